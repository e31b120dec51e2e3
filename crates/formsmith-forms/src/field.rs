//! Field schema model
//!
//! A [`FieldSchema`] is passive data describing one form field: how it is
//! labelled and rendered, which value it starts with, which validators guard
//! it and whether it must mirror another field.
//!
//! The wire format accepts both the attribute spelling used by the custom
//! element (`fieldLabel`, `fieldType`, `fieldName`) and the short spelling
//! (`label`, `kind`, `name`).

use crate::validators::Validator;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::borrow::Cow;

/// Per-field validation failure.
///
/// Validation failures are returned as data and never panic. A
/// [`FieldError::Dependency`] is the specialization raised when a field does
/// not mirror the field it depends on.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
	#[error("{0}")]
	Validation(String),
	#[error("{message}")]
	Dependency { field: String, message: String },
}

impl FieldError {
	/// The message rendered next to the offending field.
	///
	/// # Examples
	///
	/// ```
	/// use formsmith_forms::FieldError;
	///
	/// let error = FieldError::Validation("Username is required".to_string());
	/// assert_eq!(error.message(), "Username is required");
	/// ```
	pub fn message(&self) -> &str {
		match self {
			FieldError::Validation(message) => message,
			FieldError::Dependency { message, .. } => message,
		}
	}

	pub fn is_dependency(&self) -> bool {
		matches!(self, FieldError::Dependency { .. })
	}
}

pub type FieldResult<T> = Result<T, FieldError>;

/// Input kind of a field, mirroring the HTML `type` attribute.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
	#[default]
	Text,
	Email,
	Password,
	Checkbox,
	Number,
	Tel,
	Url,
	Search,
	Date,
	Hidden,
	/// Any type string the engine does not know; rendered as a text input.
	#[serde(other)]
	Other,
}

impl FieldKind {
	/// The HTML `type` attribute used when rendering this kind.
	pub fn input_type(&self) -> &'static str {
		match self {
			FieldKind::Text | FieldKind::Other => "text",
			FieldKind::Email => "email",
			FieldKind::Password => "password",
			FieldKind::Checkbox => "checkbox",
			FieldKind::Number => "number",
			FieldKind::Tel => "tel",
			FieldKind::Url => "url",
			FieldKind::Search => "search",
			FieldKind::Date => "date",
			FieldKind::Hidden => "hidden",
		}
	}
}

/// Cross-field rule: the value must equal the current value of `field_name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependsOn {
	pub field_name: String,
	pub message: String,
}

/// Declarative description of one form field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSchema {
	#[serde(
		rename = "fieldLabel",
		alias = "label",
		default,
		skip_serializing_if = "Option::is_none"
	)]
	pub label: Option<String>,

	#[serde(rename = "fieldType", alias = "kind", default)]
	pub kind: FieldKind,

	#[serde(rename = "fieldName", alias = "name")]
	pub name: String,

	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub placeholder: Option<String>,

	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub default_value: Option<Value>,

	/// Evaluated in list order within each validation stage.
	#[serde(
		default,
		deserialize_with = "crate::validators::deserialize_validators",
		skip_serializing_if = "Vec::is_empty"
	)]
	pub validators: Vec<Validator>,

	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub depends_on: Option<DependsOn>,
}

impl FieldSchema {
	/// Create a field with no label, placeholder, default or validators.
	///
	/// # Examples
	///
	/// ```
	/// use formsmith_forms::{FieldKind, FieldSchema};
	///
	/// let field = FieldSchema::new("username", FieldKind::Text);
	/// assert_eq!(field.name, "username");
	/// assert!(field.validators.is_empty());
	/// assert!(!field.is_required());
	/// ```
	pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
		Self {
			label: None,
			kind,
			name: name.into(),
			placeholder: None,
			default_value: None,
			validators: Vec::new(),
			depends_on: None,
		}
	}

	pub fn with_label(mut self, label: impl Into<String>) -> Self {
		self.label = Some(label.into());
		self
	}

	pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
		self.placeholder = Some(placeholder.into());
		self
	}

	pub fn with_default(mut self, value: impl Into<Value>) -> Self {
		self.default_value = Some(value.into());
		self
	}

	/// Append a validator to the end of the list.
	///
	/// # Examples
	///
	/// ```
	/// use formsmith_forms::{FieldKind, FieldSchema, Validator};
	///
	/// let field = FieldSchema::new("password", FieldKind::Password)
	///     .with_validator(Validator::required())
	///     .with_validator(Validator::min_length(8));
	/// assert!(field.is_required());
	/// assert_eq!(field.validators.len(), 2);
	/// ```
	pub fn with_validator(mut self, validator: Validator) -> Self {
		self.validators.push(validator);
		self
	}

	/// Require this field to mirror `field_name`, reporting `message` otherwise.
	///
	/// # Examples
	///
	/// ```
	/// use formsmith_forms::{FieldKind, FieldSchema};
	///
	/// let confirm = FieldSchema::new("confirmPassword", FieldKind::Password)
	///     .depends_on("password", "Must match");
	/// assert_eq!(confirm.depends_on.unwrap().field_name, "password");
	/// ```
	pub fn depends_on(mut self, field_name: impl Into<String>, message: impl Into<String>) -> Self {
		self.depends_on = Some(DependsOn {
			field_name: field_name.into(),
			message: message.into(),
		});
		self
	}

	pub fn is_required(&self) -> bool {
		self.validators
			.iter()
			.any(|v| matches!(v, Validator::Required { .. }))
	}

	/// The value a freshly mounted or reset form holds for this field.
	///
	/// Falls back to `false` for checkboxes and an empty string otherwise.
	pub fn initial_value(&self) -> Value {
		match (&self.default_value, self.kind) {
			(Some(value), _) => value.clone(),
			(None, FieldKind::Checkbox) => Value::Bool(false),
			(None, _) => Value::String(String::new()),
		}
	}

	/// Placeholder shown in the input, derived from the label when unset.
	pub fn placeholder_text(&self) -> Option<String> {
		self.placeholder.clone().or_else(|| {
			self.label
				.as_ref()
				.map(|label| format!("Enter your {}", label.to_lowercase()))
		})
	}
}

/// Textual form of a field value used by length, pattern, required and
/// dependency checks.
///
/// `null` and `false` read as empty, numbers as their decimal text.
///
/// # Examples
///
/// ```
/// use formsmith_forms::field::value_text;
/// use serde_json::json;
///
/// assert_eq!(value_text(None), "");
/// assert_eq!(value_text(Some(&json!(null))), "");
/// assert_eq!(value_text(Some(&json!("abc"))), "abc");
/// assert_eq!(value_text(Some(&json!(42))), "42");
/// assert_eq!(value_text(Some(&json!(true))), "true");
/// assert_eq!(value_text(Some(&json!(false))), "");
/// ```
pub fn value_text(value: Option<&Value>) -> Cow<'_, str> {
	match value {
		None | Some(Value::Null) | Some(Value::Bool(false)) => Cow::Borrowed(""),
		Some(Value::Bool(true)) => Cow::Borrowed("true"),
		Some(Value::String(s)) => Cow::Borrowed(s.as_str()),
		Some(Value::Number(n)) => Cow::Owned(n.to_string()),
		Some(other) => Cow::Owned(other.to_string()),
	}
}

/// Whether a value counts as empty for the `required` check.
pub fn is_blank(value: Option<&Value>) -> bool {
	value_text(value).trim().is_empty()
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	fn test_field_schema_from_element_attribute_names() {
		// Arrange
		let raw = json!({
			"fieldLabel": "Username",
			"fieldType": "text",
			"fieldName": "username",
			"placeholder": "Enter your username",
			"validators": [
				{ "type": "required", "message": "Username is required" },
				{ "type": "minLength", "value": 3, "message": "Minimum 3 characters" }
			]
		});

		// Act
		let field: FieldSchema = serde_json::from_value(raw).unwrap();

		// Assert
		assert_eq!(field.label.as_deref(), Some("Username"));
		assert_eq!(field.kind, FieldKind::Text);
		assert_eq!(field.name, "username");
		assert_eq!(field.validators.len(), 2);
		assert!(field.is_required());
	}

	#[rstest]
	fn test_field_schema_from_short_names() {
		// Arrange
		let raw = json!({
			"label": "Confirm",
			"kind": "password",
			"name": "confirmPassword",
			"defaultValue": "",
			"dependsOn": { "fieldName": "password", "message": "Must match" }
		});

		// Act
		let field: FieldSchema = serde_json::from_value(raw).unwrap();

		// Assert
		assert_eq!(field.kind, FieldKind::Password);
		assert_eq!(
			field.depends_on,
			Some(DependsOn {
				field_name: "password".to_string(),
				message: "Must match".to_string(),
			})
		);
	}

	#[rstest]
	#[case("datetime-local")]
	#[case("color")]
	fn test_unknown_kind_renders_as_text(#[case] kind: &str) {
		// Arrange
		let raw = json!({ "fieldType": kind, "fieldName": "x" });

		// Act
		let field: FieldSchema = serde_json::from_value(raw).unwrap();

		// Assert
		assert_eq!(field.kind, FieldKind::Other);
		assert_eq!(field.kind.input_type(), "text");
	}

	#[rstest]
	fn test_initial_value_fallbacks() {
		assert_eq!(
			FieldSchema::new("agree", FieldKind::Checkbox).initial_value(),
			json!(false)
		);
		assert_eq!(
			FieldSchema::new("name", FieldKind::Text).initial_value(),
			json!("")
		);
		assert_eq!(
			FieldSchema::new("age", FieldKind::Number)
				.with_default(18)
				.initial_value(),
			json!(18)
		);
	}

	#[rstest]
	fn test_placeholder_derived_from_label() {
		let field = FieldSchema::new("email", FieldKind::Email).with_label("Email");
		assert_eq!(field.placeholder_text().as_deref(), Some("Enter your email"));

		let field = field.with_placeholder("you@example.com");
		assert_eq!(field.placeholder_text().as_deref(), Some("you@example.com"));

		assert_eq!(FieldSchema::new("x", FieldKind::Text).placeholder_text(), None);
	}

	#[rstest]
	#[case(json!(null), true)]
	#[case(json!(""), true)]
	#[case(json!("   "), true)]
	#[case(json!(false), true)]
	#[case(json!(true), false)]
	#[case(json!(0), false)]
	#[case(json!("a"), false)]
	fn test_is_blank(#[case] value: Value, #[case] expected: bool) {
		assert_eq!(is_blank(Some(&value)), expected);
	}
}
