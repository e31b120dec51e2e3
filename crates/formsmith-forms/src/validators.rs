//! Validator engine
//!
//! Validators are a closed set of tagged variants. A field's value is checked
//! in fixed stages, and the first failing check reports:
//!
//! 1. `required`
//! 2. `minLength` / `maxLength`, in list order
//! 3. `pattern`, in list order
//! 4. `email`, only for email-kind fields
//! 5. `dependsOn`
//!
//! Unknown validator tags in a schema document are skipped, not rejected.

use crate::field::{FieldError, FieldKind, FieldResult, is_blank, value_text};
use crate::schema::CompiledField;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::LazyLock;

pub const REQUIRED_MESSAGE: &str = "This field is required";
pub const MIN_LENGTH_MESSAGE: &str = "Minimum length not met";
pub const MAX_LENGTH_MESSAGE: &str = "Maximum length exceeded";
pub const PATTERN_MESSAGE: &str = "Invalid format";
pub const EMAIL_MESSAGE: &str = "Invalid email format";

/// Threshold used by a `maxLength` validator that carries no value.
pub const DEFAULT_MAX_LENGTH: usize = 100;

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("EMAIL_REGEX: invalid regex pattern")
});

fn default_max_length() -> usize {
	DEFAULT_MAX_LENGTH
}

/// A length bound as written in a schema document: `3` or `"3"`.
#[derive(Deserialize)]
#[serde(untagged)]
enum LengthBound {
	Number(usize),
	Text(String),
}

fn length_bound<'de, D>(deserializer: D, fallback: usize) -> Result<usize, D::Error>
where
	D: Deserializer<'de>,
{
	match Option::<LengthBound>::deserialize(deserializer)? {
		None => Ok(fallback),
		Some(LengthBound::Number(value)) => Ok(value),
		Some(LengthBound::Text(text)) if text.trim().is_empty() => Ok(fallback),
		Some(LengthBound::Text(text)) => text
			.trim()
			.parse()
			.map_err(|_| serde::de::Error::custom(format!("invalid length bound: {text:?}"))),
	}
}

fn min_length_bound<'de, D: Deserializer<'de>>(deserializer: D) -> Result<usize, D::Error> {
	length_bound(deserializer, 0)
}

fn max_length_bound<'de, D: Deserializer<'de>>(deserializer: D) -> Result<usize, D::Error> {
	length_bound(deserializer, DEFAULT_MAX_LENGTH)
}

/// One validation rule attached to a field.
///
/// # Examples
///
/// ```
/// use formsmith_forms::Validator;
///
/// let validator: Validator =
///     serde_json::from_str(r#"{"type": "minLength", "value": 3, "message": "Too short"}"#).unwrap();
/// assert_eq!(validator, Validator::min_length(3).with_message("Too short"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Validator {
	Required {
		#[serde(default, skip_serializing_if = "Option::is_none")]
		message: Option<String>,
	},
	MinLength {
		#[serde(default, deserialize_with = "min_length_bound")]
		value: usize,
		#[serde(default, skip_serializing_if = "Option::is_none")]
		message: Option<String>,
	},
	MaxLength {
		#[serde(default = "default_max_length", deserialize_with = "max_length_bound")]
		value: usize,
		#[serde(default, skip_serializing_if = "Option::is_none")]
		message: Option<String>,
	},
	#[serde(alias = "regex")]
	Pattern {
		value: String,
		#[serde(default, skip_serializing_if = "Option::is_none")]
		message: Option<String>,
	},
	Email {
		#[serde(default, skip_serializing_if = "Option::is_none")]
		message: Option<String>,
	},
}

impl Validator {
	pub fn required() -> Self {
		Validator::Required { message: None }
	}

	pub fn min_length(value: usize) -> Self {
		Validator::MinLength {
			value,
			message: None,
		}
	}

	pub fn max_length(value: usize) -> Self {
		Validator::MaxLength {
			value,
			message: None,
		}
	}

	pub fn pattern(source: impl Into<String>) -> Self {
		Validator::Pattern {
			value: source.into(),
			message: None,
		}
	}

	pub fn email() -> Self {
		Validator::Email { message: None }
	}

	/// Sets a custom error message returned on validation failure.
	///
	/// # Examples
	///
	/// ```
	/// use formsmith_forms::Validator;
	///
	/// let validator = Validator::required().with_message("Username is required");
	/// assert_eq!(validator.message(), "Username is required");
	/// assert_eq!(Validator::required().message(), "This field is required");
	/// ```
	pub fn with_message(mut self, text: impl Into<String>) -> Self {
		let slot = match &mut self {
			Validator::Required { message }
			| Validator::MinLength { message, .. }
			| Validator::MaxLength { message, .. }
			| Validator::Pattern { message, .. }
			| Validator::Email { message } => message,
		};
		*slot = Some(text.into());
		self
	}

	/// The configured message, or the default for this kind of validator.
	pub fn message(&self) -> &str {
		match self {
			Validator::Required { message } => message.as_deref().unwrap_or(REQUIRED_MESSAGE),
			Validator::MinLength { message, .. } => {
				message.as_deref().unwrap_or(MIN_LENGTH_MESSAGE)
			}
			Validator::MaxLength { message, .. } => {
				message.as_deref().unwrap_or(MAX_LENGTH_MESSAGE)
			}
			Validator::Pattern { message, .. } => message.as_deref().unwrap_or(PATTERN_MESSAGE),
			Validator::Email { message } => message.as_deref().unwrap_or(EMAIL_MESSAGE),
		}
	}
}

/// Deserialize a validator list, skipping entries with unknown tags or
/// malformed parameters.
pub(crate) fn deserialize_validators<'de, D>(deserializer: D) -> Result<Vec<Validator>, D::Error>
where
	D: Deserializer<'de>,
{
	let raw = Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default();

	Ok(raw
		.into_iter()
		.filter_map(|entry| {
			let tag = entry
				.get("type")
				.and_then(Value::as_str)
				.unwrap_or("<missing>")
				.to_string();
			match serde_json::from_value::<Validator>(entry) {
				Ok(validator) => Some(validator),
				Err(error) => {
					tracing::debug!(tag = %tag, %error, "skipping unsupported validator");
					None
				}
			}
		})
		.collect())
}

/// Validate one field's value against its rules and dependency.
///
/// `all_values` supplies the current value of the field referenced by
/// `dependsOn`; a missing entry reads as empty.
pub fn validate(
	field: &CompiledField,
	value: Option<&Value>,
	all_values: &HashMap<String, Value>,
) -> FieldResult<()> {
	let schema = field.schema();
	let text = value_text(value);

	for validator in &schema.validators {
		if let Validator::Required { .. } = validator
			&& is_blank(value)
		{
			return Err(FieldError::Validation(validator.message().to_string()));
		}
	}

	let length = text.chars().count();
	for validator in &schema.validators {
		let failed = match validator {
			Validator::MinLength { value: min, .. } => length < *min,
			Validator::MaxLength { value: max, .. } => length > *max,
			_ => false,
		};
		if failed {
			return Err(FieldError::Validation(validator.message().to_string()));
		}
	}

	for pattern in field.patterns() {
		if !pattern.is_match(&text) {
			return Err(FieldError::Validation(pattern.message().to_string()));
		}
	}

	if schema.kind == FieldKind::Email {
		for validator in &schema.validators {
			if let Validator::Email { .. } = validator
				&& !EMAIL_REGEX.is_match(&text)
			{
				return Err(FieldError::Validation(validator.message().to_string()));
			}
		}
	}

	if let Some(dependency) = &schema.depends_on {
		let expected = value_text(all_values.get(&dependency.field_name));
		if text != expected {
			return Err(FieldError::Dependency {
				field: dependency.field_name.clone(),
				message: dependency.message.clone(),
			});
		}
	}

	Ok(())
}
