//! Element configuration
//!
//! The custom element is configured through string attributes. Each
//! attribute is parsed into a [`FormConfig`], which is plain data handed to
//! [`FormComponent::mount`](crate::FormComponent::mount). Changing an
//! attribute produces a new config and the component is remounted from it;
//! nothing is cached between mounts.
//!
//! A whole configuration can also be loaded from a JSON or TOML document
//! using the same camelCase keys as the element's JSON attributes.

use formsmith_forms::button::{DEFAULT_BUTTON_COLOR, DEFAULT_BUTTON_LABEL, DEFAULT_BUTTON_SIZE};
use formsmith_forms::{ButtonSchema, DirtyPolicy, FieldSchema, SchemaError};
use serde::{Deserialize, Serialize};

pub const DEFAULT_FORM_NAME: &str = "Custom Form";

pub const FORM_NAME_ATTRIBUTE: &str = "form-name";
pub const FORM_FIELD_ATTRIBUTE: &str = "form-field";
pub const BUTTONS_ATTRIBUTE: &str = "buttons";
pub const REMEMBER_ME_ATTRIBUTE: &str = "remember-me";
pub const RESET_ON_SUBMIT_ATTRIBUTE: &str = "reset-on-submit";

/// Attributes the element reacts to.
pub const OBSERVED_ATTRIBUTES: [&str; 5] = [
	FORM_FIELD_ATTRIBUTE,
	FORM_NAME_ATTRIBUTE,
	BUTTONS_ATTRIBUTE,
	REMEMBER_ME_ATTRIBUTE,
	RESET_ON_SUBMIT_ATTRIBUTE,
];

/// Error type for element configuration
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	#[error("Invalid JSON in attribute `{attribute}`: {source}")]
	Attribute {
		attribute: String,
		#[source]
		source: serde_json::Error,
	},

	#[error("Invalid boolean in attribute `{attribute}`: {value:?}")]
	InvalidBool { attribute: String, value: String },

	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),

	#[error("TOML error: {0}")]
	Toml(#[from] toml::de::Error),

	#[error(transparent)]
	Schema(#[from] SchemaError),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

fn default_form_name() -> String {
	DEFAULT_FORM_NAME.to_string()
}

/// Everything needed to mount one form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormConfig {
	#[serde(default = "default_form_name")]
	pub form_name: String,

	#[serde(rename = "formField", alias = "fields", default)]
	pub fields: Vec<FieldSchema>,

	#[serde(default)]
	pub buttons: Vec<ButtonSchema>,

	#[serde(default)]
	pub remember_me: bool,

	#[serde(default)]
	pub reset_on_submit: bool,

	#[serde(default)]
	pub dirty_policy: DirtyPolicy,
}

impl Default for FormConfig {
	fn default() -> Self {
		Self {
			form_name: default_form_name(),
			fields: Vec::new(),
			buttons: Vec::new(),
			remember_me: false,
			reset_on_submit: false,
			dirty_policy: DirtyPolicy::default(),
		}
	}
}

impl FormConfig {
	pub fn new() -> Self {
		Self::default()
	}

	/// Build a config from `(name, value)` attribute pairs, applied in order.
	///
	/// # Examples
	///
	/// ```
	/// use formsmith_element::FormConfig;
	///
	/// let config = FormConfig::from_attributes([
	///     ("form-name", "Login"),
	///     ("form-field", r#"[{"fieldLabel": "Email", "fieldType": "email", "fieldName": "email"}]"#),
	///     ("buttons", r#"[{"buttonLabel": "Sign In", "checkValidation": true}]"#),
	///     ("remember-me", ""),
	/// ])
	/// .unwrap();
	///
	/// assert_eq!(config.form_name, "Login");
	/// assert_eq!(config.fields.len(), 1);
	/// assert_eq!(config.buttons[0].color, "bg-blue-500");
	/// assert!(config.remember_me);
	/// assert!(!config.reset_on_submit);
	/// ```
	pub fn from_attributes<I, K, V>(attributes: I) -> ConfigResult<Self>
	where
		I: IntoIterator<Item = (K, V)>,
		K: AsRef<str>,
		V: AsRef<str>,
	{
		attributes
			.into_iter()
			.try_fold(Self::default(), |config, (name, value)| {
				config.with_attribute(name.as_ref(), value.as_ref())
			})
	}

	/// Apply one attribute change, returning the updated config.
	///
	/// Unknown attribute names are ignored.
	pub fn with_attribute(mut self, name: &str, value: &str) -> ConfigResult<Self> {
		match name {
			FORM_NAME_ATTRIBUTE => {
				self.form_name = if value.trim().is_empty() {
					default_form_name()
				} else {
					value.to_string()
				};
			}
			FORM_FIELD_ATTRIBUTE => {
				self.fields = parse_json_attribute(name, value)?;
			}
			BUTTONS_ATTRIBUTE => {
				let buttons: Vec<ButtonSchema> = parse_json_attribute(name, value)?;
				self.buttons = buttons.into_iter().map(fill_button_defaults).collect();
			}
			REMEMBER_ME_ATTRIBUTE => {
				self.remember_me = parse_bool(name, value)?;
			}
			RESET_ON_SUBMIT_ATTRIBUTE => {
				self.reset_on_submit = parse_bool(name, value)?;
			}
			_ => {
				tracing::debug!(attribute = %name, "ignoring unobserved attribute");
			}
		}
		Ok(self)
	}

	/// Load a config document in JSON.
	pub fn from_json_str(source: &str) -> ConfigResult<Self> {
		let config: Self = serde_json::from_str(source)?;
		Ok(config.normalized())
	}

	/// Load a config document in TOML.
	///
	/// # Examples
	///
	/// ```
	/// use formsmith_element::FormConfig;
	///
	/// let config = FormConfig::from_toml_str(r#"
	/// formName = "Sign Up"
	/// resetOnSubmit = true
	///
	/// [[formField]]
	/// fieldLabel = "Username"
	/// fieldType = "text"
	/// fieldName = "username"
	/// validators = [{ type = "required" }]
	///
	/// [[buttons]]
	/// buttonLabel = "Register"
	/// checkValidation = true
	/// "#).unwrap();
	///
	/// assert_eq!(config.form_name, "Sign Up");
	/// assert!(config.fields[0].is_required());
	/// assert!(config.buttons[0].check_validation);
	/// assert!(config.reset_on_submit);
	/// ```
	pub fn from_toml_str(source: &str) -> ConfigResult<Self> {
		let config: Self = toml::from_str(source)?;
		Ok(config.normalized())
	}

	pub fn with_dirty_policy(mut self, policy: DirtyPolicy) -> Self {
		self.dirty_policy = policy;
		self
	}

	fn normalized(mut self) -> Self {
		if self.form_name.trim().is_empty() {
			self.form_name = default_form_name();
		}
		self.buttons = self.buttons.into_iter().map(fill_button_defaults).collect();
		self
	}
}

fn parse_json_attribute<T>(attribute: &str, value: &str) -> ConfigResult<T>
where
	T: serde::de::DeserializeOwned,
{
	serde_json::from_str(value).map_err(|source| ConfigError::Attribute {
		attribute: attribute.to_string(),
		source,
	})
}

/// Blank strings fall back to the element defaults, as missing keys do.
fn fill_button_defaults(mut button: ButtonSchema) -> ButtonSchema {
	if button.label.trim().is_empty() {
		button.label = DEFAULT_BUTTON_LABEL.to_string();
	}
	if button.color.trim().is_empty() {
		button.color = DEFAULT_BUTTON_COLOR.to_string();
	}
	if button.size.trim().is_empty() {
		button.size = DEFAULT_BUTTON_SIZE.to_string();
	}
	button
}

/// Parse a boolean attribute. A present but empty attribute means `true`.
pub fn parse_bool(attribute: &str, value: &str) -> ConfigResult<bool> {
	match value.trim().to_lowercase().as_str() {
		"" | "true" | "1" | "yes" | "on" => Ok(true),
		"false" | "0" | "no" | "off" => Ok(false),
		_ => Err(ConfigError::InvalidBool {
			attribute: attribute.to_string(),
			value: value.to_string(),
		}),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use formsmith_forms::{ButtonPosition, FieldKind};
	use rstest::rstest;

	#[rstest]
	#[case("", true)]
	#[case("true", true)]
	#[case("TRUE", true)]
	#[case("1", true)]
	#[case("yes", true)]
	#[case(" on ", true)]
	#[case("false", false)]
	#[case("0", false)]
	#[case("no", false)]
	#[case("off", false)]
	fn test_parse_bool(#[case] input: &str, #[case] expected: bool) {
		assert_eq!(parse_bool("remember-me", input).unwrap(), expected);
	}

	#[rstest]
	fn test_parse_bool_rejects_garbage() {
		// Act
		let result = parse_bool("remember-me", "maybe");

		// Assert
		assert!(matches!(
			result,
			Err(ConfigError::InvalidBool { attribute, value }) if attribute == "remember-me" && value == "maybe"
		));
	}

	#[rstest]
	fn test_default_config() {
		let config = FormConfig::default();
		assert_eq!(config.form_name, "Custom Form");
		assert!(config.fields.is_empty());
		assert!(config.buttons.is_empty());
		assert!(!config.remember_me);
		assert_eq!(config.dirty_policy, DirtyPolicy::Changed);
	}

	#[rstest]
	fn test_blank_button_values_take_defaults() {
		// Arrange
		let buttons = r#"[
			{"buttonLabel": "", "buttonColor": "", "buttonSize": "", "buttonPosition": "right"},
			{"buttonLabel": "Go", "buttonColor": "bg-green-500"}
		]"#;

		// Act
		let config = FormConfig::new().with_attribute("buttons", buttons).unwrap();

		// Assert
		assert_eq!(config.buttons[0].label, "Button");
		assert_eq!(config.buttons[0].color, "bg-blue-500");
		assert_eq!(config.buttons[0].size, "px-6 py-3");
		assert_eq!(config.buttons[0].position, ButtonPosition::Right);
		assert_eq!(config.buttons[1].label, "Go");
		assert_eq!(config.buttons[1].color, "bg-green-500");
		assert!(!config.buttons[1].check_validation);
	}

	#[rstest]
	fn test_null_button_values_take_defaults() {
		// Arrange
		let buttons = r#"[
			{"buttonLabel": "Go", "buttonColor": null, "checkValidation": null},
			{"buttonLabel": null, "buttonSize": null, "buttonPosition": null}
		]"#;

		// Act
		let config = FormConfig::new().with_attribute("buttons", buttons).unwrap();

		// Assert
		assert_eq!(config.buttons[0].label, "Go");
		assert_eq!(config.buttons[0].color, "bg-blue-500");
		assert!(!config.buttons[0].check_validation);
		assert_eq!(config.buttons[1].label, "Button");
		assert_eq!(config.buttons[1].size, "px-6 py-3");
		assert_eq!(config.buttons[1].position, ButtonPosition::Left);
	}

	#[rstest]
	fn test_bad_json_attribute_names_attribute() {
		// Act
		let error = FormConfig::new()
			.with_attribute("form-field", "[{")
			.unwrap_err();

		// Assert
		assert!(matches!(&error, ConfigError::Attribute { attribute, .. } if attribute == "form-field"));
		assert!(error.to_string().contains("`form-field`"));
	}

	#[rstest]
	fn test_unknown_attribute_is_ignored() {
		// Act
		let config = FormConfig::new().with_attribute("data-theme", "dark").unwrap();

		// Assert
		assert_eq!(config, FormConfig::default());
	}

	#[rstest]
	fn test_later_attribute_replaces_earlier() {
		// Act
		let config = FormConfig::from_attributes([
			("form-name", "First"),
			("form-name", "Second"),
			("form-name", ""),
		])
		.unwrap();

		// Assert
		assert_eq!(config.form_name, "Custom Form");
	}

	#[rstest]
	fn test_from_json_str_reads_whole_document() {
		// Arrange
		let source = r#"{
			"formName": "Login",
			"formField": [
				{"fieldLabel": "Email", "fieldType": "email", "fieldName": "email",
				 "validators": [{"type": "required"}, {"type": "email"}]}
			],
			"buttons": [{"buttonLabel": "Sign In", "buttonColor": ""}],
			"rememberMe": true,
			"dirtyPolicy": "touched"
		}"#;

		// Act
		let config = FormConfig::from_json_str(source).unwrap();

		// Assert
		assert_eq!(config.form_name, "Login");
		assert_eq!(config.fields[0].kind, FieldKind::Email);
		assert_eq!(config.fields[0].validators.len(), 2);
		assert_eq!(config.buttons[0].color, "bg-blue-500");
		assert!(config.remember_me);
		assert_eq!(config.dirty_policy, DirtyPolicy::Touched);
	}

	#[rstest]
	fn test_from_toml_str_reports_syntax_errors() {
		let result = FormConfig::from_toml_str("formName = ");
		assert!(matches!(result, Err(ConfigError::Toml(_))));
	}
}
