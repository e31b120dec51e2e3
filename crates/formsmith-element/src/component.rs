//! Form component
//!
//! A [`FormComponent`] is one mounted instance of the element. It owns its
//! [`FormState`], remember-me toggle and notice slot exclusively and reacts
//! to discrete events from the host:
//!
//! ```text
//!  host                      FormComponent                     SubmitSink
//!  ────                      ─────────────                     ──────────
//!  input(name, value) ───▶  FormState::set_value
//!  click(index, now)  ───▶  ButtonSchema::state ─ disabled ─▶ ignored
//!                              │ submit
//!                              ▼
//!                           SubmissionPipeline ──────────────▶ emit(event)
//!                              │
//!                              ▼
//!                           NoticeSlot::post(now)
//!  render(now)        ◀───  FormView ─▶ HTML
//! ```
//!
//! Time is passed in by the host; the component never schedules anything.

use crate::config::{ConfigResult, FormConfig};
use crate::rendering::{FormView, render_form};
use formsmith_forms::{
	AuxFlags, ButtonAction, ButtonState, FormExt, FormResult, FormSchema, FormSnapshot, FormState,
	Notice, NoticeSlot, SubmissionPipeline, SubmissionResult, SubmitOptions, SubmitSink,
};
use serde_json::Value;
use std::time::Instant;

/// What a button click did.
#[derive(Debug)]
pub enum ClickOutcome {
	/// No button at that index, or the button is disabled.
	Ignored,
	/// The form was restored to its defaults.
	Reset,
	Submitted(SubmissionResult),
}

/// One mounted form bound to a submit sink.
pub struct FormComponent<S: SubmitSink> {
	config: FormConfig,
	form: FormState,
	aux: AuxFlags,
	pipeline: SubmissionPipeline,
	notices: NoticeSlot,
	sink: S,
}

impl<S: SubmitSink> FormComponent<S> {
	/// Compile the configured schema and create fresh state.
	///
	/// # Examples
	///
	/// ```
	/// use formsmith_element::{FormComponent, FormConfig};
	/// use formsmith_forms::CollectingSink;
	/// use std::time::Instant;
	///
	/// let config = FormConfig::from_attributes([
	///     ("form-name", "Login"),
	///     ("form-field", r#"[{"fieldLabel": "Username", "fieldType": "text", "fieldName": "username",
	///                        "validators": [{"type": "required"}]}]"#),
	///     ("buttons", r#"[{"buttonLabel": "Sign In", "checkValidation": true}]"#),
	/// ])
	/// .unwrap();
	/// let mut component = FormComponent::mount(config, CollectingSink::new()).unwrap();
	/// assert!(!component.button_states()[0].enabled);
	///
	/// component.input("username", "alice").unwrap();
	/// assert!(component.button_states()[0].enabled);
	///
	/// component.click(0, Instant::now());
	/// assert_eq!(component.sink().events().len(), 1);
	/// ```
	pub fn mount(config: FormConfig, sink: S) -> ConfigResult<Self> {
		let schema = FormSchema::compile(config.fields.clone())?;
		let form = FormState::from_schema(schema).with_dirty_policy(config.dirty_policy);
		let pipeline = SubmissionPipeline::new(
			config.form_name.clone(),
			SubmitOptions {
				reset_on_submit: config.reset_on_submit,
			},
		);

		tracing::debug!(
			form = %config.form_name,
			fields = config.fields.len(),
			buttons = config.buttons.len(),
			"form mounted"
		);

		Ok(Self {
			aux: AuxFlags::new(config.remember_me),
			config,
			form,
			pipeline,
			notices: NoticeSlot::new(),
			sink,
		})
	}

	/// Discard all state and mount again from `config`, keeping the sink.
	pub fn remount(self, config: FormConfig) -> ConfigResult<Self> {
		Self::mount(config, self.sink)
	}

	/// Record input for a field.
	pub fn input(&mut self, name: &str, value: impl Into<Value>) -> FormResult<()> {
		self.form.set_value(name, value)
	}

	/// Check or uncheck remember-me. Ignored when the feature is off.
	pub fn set_remember_me(&mut self, checked: bool) {
		self.aux.set_remember_me(checked);
	}

	/// Click the button at `index` in configuration order.
	pub fn click(&mut self, index: usize, now: Instant) -> ClickOutcome {
		let Some(button) = self.config.buttons.get(index) else {
			tracing::debug!(index, "click on missing button");
			return ClickOutcome::Ignored;
		};
		let state = button.state(self.form.is_valid(), self.form.is_dirty());
		if !state.enabled {
			tracing::debug!(index, label = %state.label, "click on disabled button");
			return ClickOutcome::Ignored;
		}

		match state.action {
			ButtonAction::Submit => ClickOutcome::Submitted(self.submit(now)),
			ButtonAction::Reset => {
				self.reset();
				ClickOutcome::Reset
			}
		}
	}

	/// Run the submission pipeline and post the resulting notice.
	///
	/// This is the form's own submit path (for example pressing Enter) and is
	/// not gated on any button.
	pub fn submit(&mut self, now: Instant) -> SubmissionResult {
		let result = self.pipeline.submit(&mut self.form, &mut self.aux, &mut self.sink);
		if let Some((kind, message)) = result.notice() {
			self.notices.post(kind, message, now);
		}
		result
	}

	/// Restore defaults and uncheck remember-me without emitting anything.
	pub fn reset(&mut self) {
		self.form.reset();
		self.aux.clear();
	}

	/// Drop the notice if its deadline has passed.
	pub fn tick(&mut self, now: Instant) {
		self.notices.clear_expired(now);
	}

	pub fn button_states(&self) -> Vec<ButtonState> {
		let valid = self.form.is_valid();
		let dirty = self.form.is_dirty();
		self.config
			.buttons
			.iter()
			.map(|button| button.state(valid, dirty))
			.collect()
	}

	pub fn notice(&self, now: Instant) -> Option<&Notice> {
		self.notices.current(now)
	}

	pub fn remember_me(&self) -> Option<bool> {
		self.aux.remember_me()
	}

	pub fn snapshot(&self) -> FormSnapshot {
		self.form.to_snapshot()
	}

	/// Render the current frame as HTML.
	pub fn render(&self, now: Instant) -> String {
		render_form(&FormView {
			form_name: &self.config.form_name,
			snapshot: self.snapshot(),
			buttons: self.button_states(),
			remember_me: self.aux.remember_me(),
			notice: self.notice(now),
		})
	}

	pub fn form(&self) -> &FormState {
		&self.form
	}

	pub fn config(&self) -> &FormConfig {
		&self.config
	}

	pub fn sink(&self) -> &S {
		&self.sink
	}

	pub fn sink_mut(&mut self) -> &mut S {
		&mut self.sink
	}

	pub fn into_sink(self) -> S {
		self.sink
	}
}
