use crate::field::{FieldError, FieldSchema, is_blank};
use crate::schema::{CompiledField, FormSchema, SchemaError};
use crate::validators;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{HashMap, HashSet};

#[derive(Debug, thiserror::Error)]
pub enum FormError {
	#[error("Unknown field: {0}")]
	UnknownField(String),
	#[error(transparent)]
	Schema(#[from] SchemaError),
}

pub type FormResult<T> = Result<T, FormError>;

/// What makes a form count as dirty for button gating.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DirtyPolicy {
	/// At least one value differs from its schema default.
	#[default]
	Changed,
	/// At least one field received input since mount or the last reset.
	Touched,
}

/// Runtime state of one mounted form: values, per-field errors and the
/// derived `valid`, `dirty` and `submitted` flags.
///
/// All mutation goes through [`FormState::set_value`], [`FormState::validate_all`]
/// and [`FormState::reset`]. Errors recorded while typing are advisory;
/// `validate_all` is the authoritative gate at submit time.
#[derive(Debug, Clone)]
pub struct FormState {
	schema: FormSchema,
	values: HashMap<String, Value>,
	errors: HashMap<String, FieldError>,
	touched: HashSet<String>,
	is_submitted: bool,
	dirty_policy: DirtyPolicy,
}

impl FormState {
	/// Compile `fields` and initialise every value from its default.
	///
	/// # Examples
	///
	/// ```
	/// use formsmith_forms::{FieldKind, FieldSchema, FormState};
	/// use serde_json::json;
	///
	/// let form = FormState::new(vec![
	///     FieldSchema::new("username", FieldKind::Text).with_default("guest"),
	///     FieldSchema::new("remember", FieldKind::Checkbox),
	/// ])
	/// .unwrap();
	///
	/// assert_eq!(form.value("username"), Some(&json!("guest")));
	/// assert_eq!(form.value("remember"), Some(&json!(false)));
	/// assert!(!form.is_dirty());
	/// assert!(form.errors().is_empty());
	/// ```
	pub fn new(fields: Vec<FieldSchema>) -> FormResult<Self> {
		Ok(Self::from_schema(FormSchema::compile(fields)?))
	}

	pub fn from_schema(schema: FormSchema) -> Self {
		let values = Self::defaults(&schema);
		Self {
			schema,
			values,
			errors: HashMap::new(),
			touched: HashSet::new(),
			is_submitted: false,
			dirty_policy: DirtyPolicy::default(),
		}
	}

	pub fn with_dirty_policy(mut self, policy: DirtyPolicy) -> Self {
		self.dirty_policy = policy;
		self
	}

	fn defaults(schema: &FormSchema) -> HashMap<String, Value> {
		schema
			.fields()
			.iter()
			.map(|field| (field.name().to_string(), field.schema().initial_value()))
			.collect()
	}

	/// Record new input for `name` and re-validate it.
	///
	/// Fields whose `dependsOn` references `name` are re-validated too, one
	/// hop only. Any edit clears the submitted flag.
	///
	/// # Examples
	///
	/// ```
	/// use formsmith_forms::{FieldKind, FieldSchema, FormState, Validator};
	///
	/// let mut form = FormState::new(vec![
	///     FieldSchema::new("username", FieldKind::Text)
	///         .with_validator(Validator::min_length(3).with_message("Minimum 3 characters")),
	/// ])
	/// .unwrap();
	///
	/// form.set_value("username", "ab").unwrap();
	/// assert_eq!(form.error("username").map(|e| e.message()), Some("Minimum 3 characters"));
	///
	/// form.set_value("username", "abc").unwrap();
	/// assert!(form.error("username").is_none());
	/// assert!(form.set_value("missing", "x").is_err());
	/// ```
	pub fn set_value(&mut self, name: &str, value: impl Into<Value>) -> FormResult<()> {
		if self.schema.get(name).is_none() {
			return Err(FormError::UnknownField(name.to_string()));
		}

		self.values.insert(name.to_string(), value.into());
		self.touched.insert(name.to_string());
		self.is_submitted = false;

		self.revalidate(name);

		let dependents: Vec<String> = self
			.schema
			.dependents_of(name)
			.map(|field| field.name().to_string())
			.collect();
		for dependent in &dependents {
			tracing::debug!(field = %name, dependent = %dependent, "re-validating dependent field");
			self.revalidate(dependent);
		}

		Ok(())
	}

	fn revalidate(&mut self, name: &str) {
		let Some(field) = self.schema.get(name) else {
			return;
		};
		match Self::check(field, &self.values) {
			Ok(()) => {
				self.errors.remove(name);
			}
			Err(error) => {
				tracing::debug!(field = %name, error = %error, "field invalid");
				self.errors.insert(name.to_string(), error);
			}
		}
	}

	fn check(field: &CompiledField, values: &HashMap<String, Value>) -> Result<(), FieldError> {
		validators::validate(field, values.get(field.name()), values)
	}

	/// Validate every field and replace the error map with the result.
	///
	/// Running it again on unchanged values yields the same map.
	pub fn validate_all(&mut self) -> &HashMap<String, FieldError> {
		let errors: HashMap<String, FieldError> = self
			.schema
			.fields()
			.iter()
			.filter_map(|field| {
				Self::check(field, &self.values)
					.err()
					.map(|error| (field.name().to_string(), error))
			})
			.collect();
		self.errors = errors;
		&self.errors
	}

	/// Restore schema defaults and clear errors, touched and submitted state.
	pub fn reset(&mut self) {
		self.values = Self::defaults(&self.schema);
		self.errors.clear();
		self.touched.clear();
		self.is_submitted = false;
	}

	pub(crate) fn mark_submitted(&mut self) {
		self.is_submitted = true;
	}

	/// No recorded error and every required field holds a non-blank value.
	pub fn is_valid(&self) -> bool {
		self.errors.is_empty()
			&& self
				.schema
				.fields()
				.iter()
				.filter(|field| field.schema().is_required())
				.all(|field| !is_blank(self.values.get(field.name())))
	}

	pub fn is_dirty(&self) -> bool {
		match self.dirty_policy {
			DirtyPolicy::Changed => self
				.schema
				.fields()
				.iter()
				.any(|field| self.values.get(field.name()) != Some(&field.schema().initial_value())),
			DirtyPolicy::Touched => !self.touched.is_empty(),
		}
	}

	pub fn is_submitted(&self) -> bool {
		self.is_submitted
	}

	pub fn is_touched(&self, name: &str) -> bool {
		self.touched.contains(name)
	}

	pub fn dirty_policy(&self) -> DirtyPolicy {
		self.dirty_policy
	}

	pub fn value(&self, name: &str) -> Option<&Value> {
		self.values.get(name)
	}

	pub fn values(&self) -> &HashMap<String, Value> {
		&self.values
	}

	pub fn error(&self, name: &str) -> Option<&FieldError> {
		self.errors.get(name)
	}

	pub fn errors(&self) -> &HashMap<String, FieldError> {
		&self.errors
	}

	pub fn schema(&self) -> &FormSchema {
		&self.schema
	}
}
