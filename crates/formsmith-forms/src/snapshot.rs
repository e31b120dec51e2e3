//! Serializable view of a form's runtime state
//!
//! Renderers and hosts that sit outside the engine receive a
//! [`FormSnapshot`]: plain data with no compiled patterns, ready to be
//! turned into markup or sent across a boundary as JSON.

use crate::field::{FieldKind, value_text};
use crate::form::FormState;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSnapshot {
	pub name: String,
	pub label: Option<String>,
	pub kind: FieldKind,
	pub placeholder: Option<String>,
	pub value: Value,
	pub required: bool,
	pub touched: bool,
	/// Message of the current error, if any.
	pub error: Option<String>,
}

impl FieldSnapshot {
	/// Value as it appears in a text input.
	pub fn display_value(&self) -> String {
		value_text(Some(&self.value)).into_owned()
	}

	/// Whether a checkbox renders as checked.
	pub fn is_checked(&self) -> bool {
		!value_text(Some(&self.value)).is_empty()
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSnapshot {
	pub fields: Vec<FieldSnapshot>,
	pub valid: bool,
	pub dirty: bool,
	pub submitted: bool,
}

impl FormSnapshot {
	pub fn field(&self, name: &str) -> Option<&FieldSnapshot> {
		self.fields.iter().find(|f| f.name == name)
	}
}

/// Extension trait for extracting a [`FormSnapshot`].
pub trait FormExt {
	/// # Examples
	///
	/// ```
	/// use formsmith_forms::{FieldKind, FieldSchema, FormExt, FormState, Validator};
	///
	/// let mut form = FormState::new(vec![
	///     FieldSchema::new("username", FieldKind::Text)
	///         .with_label("Username")
	///         .with_validator(Validator::required().with_message("Username is required")),
	/// ])
	/// .unwrap();
	/// form.validate_all();
	///
	/// let snapshot = form.to_snapshot();
	/// let field = snapshot.field("username").unwrap();
	/// assert_eq!(field.placeholder.as_deref(), Some("Enter your username"));
	/// assert_eq!(field.error.as_deref(), Some("Username is required"));
	/// assert!(field.required);
	/// assert!(!snapshot.valid);
	/// ```
	fn to_snapshot(&self) -> FormSnapshot;

	/// Rendering model of each field in schema order.
	fn field_views(&self) -> Vec<FieldSnapshot>;
}

impl FormExt for FormState {
	fn to_snapshot(&self) -> FormSnapshot {
		FormSnapshot {
			fields: self.field_views(),
			valid: self.is_valid(),
			dirty: self.is_dirty(),
			submitted: self.is_submitted(),
		}
	}

	fn field_views(&self) -> Vec<FieldSnapshot> {
		self.schema()
			.fields()
			.iter()
			.map(|field| {
				let schema = field.schema();
				FieldSnapshot {
					name: schema.name.clone(),
					label: schema.label.clone(),
					kind: schema.kind,
					placeholder: schema.placeholder_text(),
					value: self.value(&schema.name).cloned().unwrap_or(Value::Null),
					required: schema.is_required(),
					touched: self.is_touched(&schema.name),
					error: self.error(&schema.name).map(|e| e.message().to_string()),
				}
			})
			.collect()
	}
}
