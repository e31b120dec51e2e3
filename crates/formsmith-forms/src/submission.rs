//! Submission pipeline
//!
//! Turning a submit attempt into at most one outward event:
//!
//! 1. re-validate every field; any error aborts without emitting
//! 2. collect values, leaving out fields that only exist to confirm another
//!    field (`dependsOn`)
//! 3. merge auxiliary toggles such as `rememberMe`
//! 4. hand the event to the injected [`SubmitSink`]
//! 5. optionally reset the form and its toggles
//!
//! A sink failure, including a panicking sink, is reported in the result and
//! never propagates as a panic or as a validation error.

use crate::field::FieldError;
use crate::form::FormState;
use crate::notice::{NoticeKind, SUBMIT_FAILURE_MESSAGE, SUBMIT_SUCCESS_MESSAGE};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::io::Write;
use std::panic::{AssertUnwindSafe, catch_unwind};

/// Event type carried by every successful submission.
pub const SUBMIT_EVENT_TYPE: &str = "login-submit";

/// Payload key of the remember-me toggle.
pub const REMEMBER_ME_KEY: &str = "rememberMe";

#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
	#[error("Submit sink rejected the event: {0}")]
	Rejected(String),
	#[error("Submit sink is closed")]
	Closed,
	#[error("Failed to serialize submit event: {0}")]
	Serialization(#[from] serde_json::Error),
	#[error("Failed to write submit event: {0}")]
	Io(#[from] std::io::Error),
	#[error("Submit sink panicked: {0}")]
	Panicked(String),
}

impl DispatchError {
	fn from_panic(payload: Box<dyn std::any::Any + Send>) -> Self {
		let message = payload
			.downcast_ref::<&str>()
			.map(|s| s.to_string())
			.or_else(|| payload.downcast_ref::<String>().cloned())
			.unwrap_or_else(|| "unknown panic".to_string());
		DispatchError::Panicked(message)
	}
}

/// The outward notification of one successful submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitEvent {
	#[serde(rename = "type")]
	pub event_type: String,
	pub form_name: String,
	/// Field name to final value, plus auxiliary flags.
	pub detail: Map<String, Value>,
}

impl SubmitEvent {
	pub fn new(form_name: impl Into<String>, detail: Map<String, Value>) -> Self {
		Self {
			event_type: SUBMIT_EVENT_TYPE.to_string(),
			form_name: form_name.into(),
			detail,
		}
	}
}

/// Receiver of submit events. Delivery is fire-and-forget: the sink may
/// refuse an event but cannot answer it.
pub trait SubmitSink {
	fn emit(&mut self, event: &SubmitEvent) -> Result<(), DispatchError>;
}

impl<F> SubmitSink for F
where
	F: FnMut(&SubmitEvent) -> Result<(), DispatchError>,
{
	fn emit(&mut self, event: &SubmitEvent) -> Result<(), DispatchError> {
		self(event)
	}
}

/// Sink that keeps every event it receives, for hosts that poll and for tests.
#[derive(Debug, Clone, Default)]
pub struct CollectingSink {
	events: Vec<SubmitEvent>,
}

impl CollectingSink {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn events(&self) -> &[SubmitEvent] {
		&self.events
	}

	pub fn last(&self) -> Option<&SubmitEvent> {
		self.events.last()
	}

	pub fn take(&mut self) -> Vec<SubmitEvent> {
		std::mem::take(&mut self.events)
	}
}

impl SubmitSink for CollectingSink {
	fn emit(&mut self, event: &SubmitEvent) -> Result<(), DispatchError> {
		self.events.push(event.clone());
		Ok(())
	}
}

/// Sink that writes each event as one line of JSON.
#[derive(Debug)]
pub struct JsonLinesSink<W: Write> {
	writer: W,
}

impl<W: Write> JsonLinesSink<W> {
	pub fn new(writer: W) -> Self {
		Self { writer }
	}

	pub fn into_inner(self) -> W {
		self.writer
	}
}

impl<W: Write> SubmitSink for JsonLinesSink<W> {
	fn emit(&mut self, event: &SubmitEvent) -> Result<(), DispatchError> {
		serde_json::to_writer(&mut self.writer, event)?;
		self.writer.write_all(b"\n")?;
		self.writer.flush()?;
		Ok(())
	}
}

/// Toggles that live outside the field schema but ride along in the payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuxFlags {
	remember_me: Option<bool>,
}

impl AuxFlags {
	/// Flags for a form with the remember-me toggle enabled or disabled.
	/// An enabled toggle starts unchecked.
	pub fn new(remember_me_enabled: bool) -> Self {
		Self {
			remember_me: remember_me_enabled.then_some(false),
		}
	}

	/// `None` when the form has no remember-me toggle.
	pub fn remember_me(&self) -> Option<bool> {
		self.remember_me
	}

	/// Check or uncheck remember-me. Ignored when the toggle is disabled.
	pub fn set_remember_me(&mut self, checked: bool) {
		if let Some(slot) = self.remember_me.as_mut() {
			*slot = checked;
		}
	}

	/// Uncheck every toggle.
	pub fn clear(&mut self) {
		self.set_remember_me(false);
	}

	fn merge_into(&self, payload: &mut Map<String, Value>) {
		if let Some(checked) = self.remember_me {
			payload.insert(REMEMBER_ME_KEY.to_string(), Value::Bool(checked));
		}
	}
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitOptions {
	pub reset_on_submit: bool,
}

/// Outcome of one submit attempt.
#[derive(Debug)]
pub enum SubmissionResult {
	/// Validation failed; nothing was emitted.
	Rejected { errors: HashMap<String, FieldError> },
	/// The event was delivered; `reset` tells whether the form was cleared.
	Emitted { payload: Map<String, Value>, reset: bool },
	/// Validation passed but the sink failed; form state is untouched.
	DispatchFailed { error: DispatchError },
}

impl SubmissionResult {
	pub fn is_ok(&self) -> bool {
		matches!(self, SubmissionResult::Emitted { .. })
	}

	pub fn errors(&self) -> Option<&HashMap<String, FieldError>> {
		match self {
			SubmissionResult::Rejected { errors } => Some(errors),
			_ => None,
		}
	}

	pub fn payload(&self) -> Option<&Map<String, Value>> {
		match self {
			SubmissionResult::Emitted { payload, .. } => Some(payload),
			_ => None,
		}
	}

	/// The transient notice to show for this outcome. Validation failures are
	/// shown next to the fields instead.
	pub fn notice(&self) -> Option<(NoticeKind, &'static str)> {
		match self {
			SubmissionResult::Rejected { .. } => None,
			SubmissionResult::Emitted { .. } => Some((NoticeKind::Success, SUBMIT_SUCCESS_MESSAGE)),
			SubmissionResult::DispatchFailed { .. } => {
				Some((NoticeKind::Failure, SUBMIT_FAILURE_MESSAGE))
			}
		}
	}
}

/// Values of every field that does not declare `dependsOn`.
///
/// # Examples
///
/// ```
/// use formsmith_forms::{FieldKind, FieldSchema, FormState, build_payload};
/// use serde_json::json;
///
/// let mut form = FormState::new(vec![
///     FieldSchema::new("password", FieldKind::Password),
///     FieldSchema::new("confirmPassword", FieldKind::Password).depends_on("password", "Must match"),
/// ])
/// .unwrap();
/// form.set_value("password", "x").unwrap();
/// form.set_value("confirmPassword", "x").unwrap();
///
/// let payload = build_payload(&form);
/// assert_eq!(payload.get("password"), Some(&json!("x")));
/// assert!(!payload.contains_key("confirmPassword"));
/// ```
pub fn build_payload(form: &FormState) -> Map<String, Value> {
	form.schema()
		.fields()
		.iter()
		.filter(|field| field.schema().depends_on.is_none())
		.map(|field| {
			let value = form.value(field.name()).cloned().unwrap_or(Value::Null);
			(field.name().to_string(), value)
		})
		.collect()
}

#[cfg_attr(doc, aquamarine::aquamarine)]
/// Drives one form from a submit attempt to at most one emitted event.
///
/// ```mermaid
/// stateDiagram-v2
///     [*] --> Idle
///     Idle --> Validating: submit
///     Validating --> Rejected: any field error
///     Rejected --> Idle: errors shown
///     Validating --> Accepted: no errors
///     Accepted --> Emitted: sink accepts
///     Accepted --> Idle: sink fails
///     Emitted --> Reset: reset_on_submit
///     Emitted --> Submitted: keep values
///     Reset --> Idle
///     Submitted --> Idle: next edit
/// ```
#[derive(Debug, Clone)]
pub struct SubmissionPipeline {
	form_name: String,
	options: SubmitOptions,
}

impl SubmissionPipeline {
	pub fn new(form_name: impl Into<String>, options: SubmitOptions) -> Self {
		Self {
			form_name: form_name.into(),
			options,
		}
	}

	pub fn form_name(&self) -> &str {
		&self.form_name
	}

	pub fn options(&self) -> SubmitOptions {
		self.options
	}

	/// Validate, build and emit, then reset if configured.
	///
	/// # Examples
	///
	/// ```
	/// use formsmith_forms::{
	///     AuxFlags, CollectingSink, FieldKind, FieldSchema, FormState, SubmissionPipeline,
	///     SubmitOptions, Validator,
	/// };
	///
	/// let mut form = FormState::new(vec![
	///     FieldSchema::new("username", FieldKind::Text).with_validator(Validator::required()),
	/// ])
	/// .unwrap();
	/// let mut aux = AuxFlags::new(true);
	/// let mut sink = CollectingSink::new();
	/// let pipeline = SubmissionPipeline::new("Login", SubmitOptions::default());
	///
	/// assert!(!pipeline.submit(&mut form, &mut aux, &mut sink).is_ok());
	/// assert!(sink.events().is_empty());
	///
	/// form.set_value("username", "alice").unwrap();
	/// assert!(pipeline.submit(&mut form, &mut aux, &mut sink).is_ok());
	/// assert_eq!(sink.events().len(), 1);
	/// assert!(form.is_submitted());
	/// ```
	pub fn submit<S>(&self, form: &mut FormState, aux: &mut AuxFlags, sink: &mut S) -> SubmissionResult
	where
		S: SubmitSink + ?Sized,
	{
		let errors = form.validate_all();
		if !errors.is_empty() {
			tracing::debug!(
				form = %self.form_name,
				error_count = errors.len(),
				"submission rejected"
			);
			return SubmissionResult::Rejected {
				errors: errors.clone(),
			};
		}

		let mut payload = build_payload(form);
		aux.merge_into(&mut payload);

		let event = SubmitEvent::new(self.form_name.clone(), payload);
		let dispatched = catch_unwind(AssertUnwindSafe(|| sink.emit(&event)))
			.unwrap_or_else(|payload| Err(DispatchError::from_panic(payload)));
		if let Err(error) = dispatched {
			tracing::warn!(form = %self.form_name, %error, "failed to dispatch submit event");
			return SubmissionResult::DispatchFailed { error };
		}

		tracing::info!(
			form = %self.form_name,
			fields = event.detail.len(),
			"submit event emitted"
		);

		let reset = self.options.reset_on_submit;
		if reset {
			form.reset();
			aux.clear();
		} else {
			form.mark_submitted();
		}

		SubmissionResult::Emitted {
			payload: event.detail,
			reset,
		}
	}
}
