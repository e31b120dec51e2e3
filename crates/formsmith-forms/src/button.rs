//! Button schema and enablement policy
//!
//! Whether a button accepts clicks is a pure function of its
//! `checkValidation` flag and the form's validity and dirtiness. Its visual
//! state follows from that one boolean.

use serde::{Deserialize, Deserializer, Serialize};

pub const DEFAULT_BUTTON_LABEL: &str = "Button";
pub const DEFAULT_BUTTON_COLOR: &str = "bg-blue-500";
pub const DEFAULT_BUTTON_SIZE: &str = "px-6 py-3";
pub const DISABLED_BUTTON_CLASS: &str = "bg-gray-400 cursor-not-allowed";

fn default_label() -> String {
	DEFAULT_BUTTON_LABEL.to_string()
}

fn default_color() -> String {
	DEFAULT_BUTTON_COLOR.to_string()
}

fn default_size() -> String {
	DEFAULT_BUTTON_SIZE.to_string()
}

fn label_or_default<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
	Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(default_label))
}

fn color_or_default<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
	Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(default_color))
}

fn size_or_default<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
	Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(default_size))
}

/// An explicit `null` reads the same as a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
	D: Deserializer<'de>,
	T: Deserialize<'de> + Default,
{
	Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonPosition {
	#[default]
	Left,
	Center,
	Right,
}

impl ButtonPosition {
	/// Flexbox justification class for a group of buttons at this position.
	pub fn justify_class(&self) -> &'static str {
		match self {
			ButtonPosition::Left => "justify-start",
			ButtonPosition::Center => "justify-center",
			ButtonPosition::Right => "justify-end",
		}
	}
}

/// What clicking an enabled button does.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonAction {
	#[default]
	Submit,
	/// Restore defaults without emitting anything.
	Reset,
}

impl ButtonAction {
	pub fn html_type(&self) -> &'static str {
		match self {
			ButtonAction::Submit => "submit",
			ButtonAction::Reset => "reset",
		}
	}
}

/// Declarative description of one form button.
///
/// Missing attributes take the custom element's defaults.
///
/// # Examples
///
/// ```
/// use formsmith_forms::{ButtonPosition, ButtonSchema};
///
/// let button: ButtonSchema = serde_json::from_str(r#"{"buttonLabel": "Sign In", "checkValidation": true}"#).unwrap();
/// assert_eq!(button.label, "Sign In");
/// assert_eq!(button.color, "bg-blue-500");
/// assert_eq!(button.size, "px-6 py-3");
/// assert_eq!(button.position, ButtonPosition::Left);
/// assert!(button.check_validation);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ButtonSchema {
	#[serde(
		rename = "buttonLabel",
		alias = "label",
		default = "default_label",
		deserialize_with = "label_or_default"
	)]
	pub label: String,

	#[serde(
		rename = "buttonColor",
		alias = "color",
		default = "default_color",
		deserialize_with = "color_or_default"
	)]
	pub color: String,

	#[serde(
		rename = "buttonSize",
		alias = "size",
		default = "default_size",
		deserialize_with = "size_or_default"
	)]
	pub size: String,

	#[serde(
		rename = "buttonPosition",
		alias = "position",
		default,
		deserialize_with = "null_as_default"
	)]
	pub position: ButtonPosition,

	#[serde(default, deserialize_with = "null_as_default")]
	pub check_validation: bool,

	#[serde(default, deserialize_with = "null_as_default")]
	pub action: ButtonAction,
}

impl Default for ButtonSchema {
	fn default() -> Self {
		Self {
			label: default_label(),
			color: default_color(),
			size: default_size(),
			position: ButtonPosition::default(),
			check_validation: false,
			action: ButtonAction::default(),
		}
	}
}

impl ButtonSchema {
	pub fn new(label: impl Into<String>) -> Self {
		Self {
			label: label.into(),
			..Self::default()
		}
	}

	pub fn with_color(mut self, color: impl Into<String>) -> Self {
		self.color = color.into();
		self
	}

	pub fn with_size(mut self, size: impl Into<String>) -> Self {
		self.size = size.into();
		self
	}

	pub fn with_position(mut self, position: ButtonPosition) -> Self {
		self.position = position;
		self
	}

	pub fn with_action(mut self, action: ButtonAction) -> Self {
		self.action = action;
		self
	}

	/// Gate this button on the form being valid and dirty.
	pub fn checked(mut self) -> Self {
		self.check_validation = true;
		self
	}

	/// Derive the rendered state of this button for the given form flags.
	pub fn state(&self, form_valid: bool, form_dirty: bool) -> ButtonState {
		let enabled = button_enabled(self, form_valid, form_dirty);
		let class = if enabled {
			format!("{} {}", self.color, self.size)
		} else {
			format!("{} {}", DISABLED_BUTTON_CLASS, self.size)
		};
		ButtonState {
			label: self.label.clone(),
			position: self.position,
			action: self.action,
			enabled,
			class,
		}
	}
}

/// `true` unless the button checks validation and the form is not both
/// valid and dirty.
///
/// # Examples
///
/// ```
/// use formsmith_forms::{ButtonSchema, button_enabled};
///
/// let cancel = ButtonSchema::new("Cancel");
/// assert!(button_enabled(&cancel, false, false));
///
/// let sign_in = ButtonSchema::new("Sign In").checked();
/// assert!(!button_enabled(&sign_in, true, false));
/// assert!(!button_enabled(&sign_in, false, true));
/// assert!(button_enabled(&sign_in, true, true));
/// ```
pub fn button_enabled(button: &ButtonSchema, form_valid: bool, form_dirty: bool) -> bool {
	!button.check_validation || (form_valid && form_dirty)
}

/// Rendered state of one button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ButtonState {
	pub label: String,
	pub position: ButtonPosition,
	pub action: ButtonAction,
	pub enabled: bool,
	/// Class list: configured color and size when enabled, gray when not.
	pub class: String,
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	#[case(false, false)]
	#[case(false, true)]
	#[case(true, false)]
	#[case(true, true)]
	fn test_unchecked_button_always_enabled(#[case] valid: bool, #[case] dirty: bool) {
		let button = ButtonSchema::new("Cancel");
		assert!(button_enabled(&button, valid, dirty));
	}

	#[rstest]
	#[case(false, false, false)]
	#[case(false, true, false)]
	#[case(true, false, false)]
	#[case(true, true, true)]
	fn test_checked_button_needs_valid_and_dirty(
		#[case] valid: bool,
		#[case] dirty: bool,
		#[case] expected: bool,
	) {
		let button = ButtonSchema::new("Sign In").checked();
		assert_eq!(button_enabled(&button, valid, dirty), expected);
	}

	#[rstest]
	fn test_state_styling_follows_enablement() {
		// Arrange
		let button = ButtonSchema::new("Sign In")
			.with_color("bg-green-500")
			.with_size("px-8 py-4")
			.checked();

		// Act
		let disabled = button.state(false, true);
		let enabled = button.state(true, true);

		// Assert
		assert!(!disabled.enabled);
		assert_eq!(disabled.class, "bg-gray-400 cursor-not-allowed px-8 py-4");
		assert!(enabled.enabled);
		assert_eq!(enabled.class, "bg-green-500 px-8 py-4");
	}

	#[rstest]
	fn test_button_schema_short_names_and_action() {
		// Arrange
		let raw = json!({
			"label": "Reset",
			"color": "bg-red-500",
			"position": "right",
			"action": "reset"
		});

		// Act
		let button: ButtonSchema = serde_json::from_value(raw).unwrap();

		// Assert
		assert_eq!(button.label, "Reset");
		assert_eq!(button.color, "bg-red-500");
		assert_eq!(button.size, DEFAULT_BUTTON_SIZE);
		assert_eq!(button.position, ButtonPosition::Right);
		assert_eq!(button.action, ButtonAction::Reset);
		assert!(!button.check_validation);
	}

	#[rstest]
	fn test_null_button_values_take_defaults() {
		// Arrange
		let raw = json!({
			"buttonLabel": null,
			"buttonColor": null,
			"buttonSize": null,
			"buttonPosition": null,
			"checkValidation": null,
			"action": null
		});

		// Act
		let button: ButtonSchema = serde_json::from_value(raw).unwrap();

		// Assert
		assert_eq!(button, ButtonSchema::default());
	}

	#[rstest]
	fn test_empty_button_object_takes_defaults() {
		let button: ButtonSchema = serde_json::from_value(json!({})).unwrap();
		assert_eq!(button, ButtonSchema::default());
	}
}
