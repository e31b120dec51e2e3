//! Schema compilation
//!
//! A parsed list of [`FieldSchema`] is checked once at mount time: names must
//! be unique, every `dependsOn` must point at a field of the same form, and
//! every `pattern` source must compile. The result is a [`FormSchema`] whose
//! regular expressions are ready to run on each keystroke.

use crate::field::FieldSchema;
use crate::validators::Validator;
use regex::Regex;
use std::collections::HashSet;

#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
	#[error("Duplicate field name: {0}")]
	DuplicateField(String),
	#[error("Field {field} depends on unknown field {target}")]
	UnknownDependency { field: String, target: String },
	#[error("Field {field} depends on itself")]
	SelfDependency { field: String },
	#[error("Invalid pattern for field {field}: {source}")]
	InvalidPattern {
		field: String,
		#[source]
		source: regex::Error,
	},
}

/// A `pattern` validator with its regular expression compiled.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
	regex: Regex,
	message: String,
}

impl CompiledPattern {
	pub fn is_match(&self, text: &str) -> bool {
		self.regex.is_match(text)
	}

	pub fn message(&self) -> &str {
		&self.message
	}
}

/// A field schema together with its compiled patterns, in list order.
#[derive(Debug, Clone)]
pub struct CompiledField {
	schema: FieldSchema,
	patterns: Vec<CompiledPattern>,
}

impl CompiledField {
	/// Compile the `pattern` validators of a single field.
	///
	/// # Examples
	///
	/// ```
	/// use formsmith_forms::{CompiledField, FieldKind, FieldSchema, Validator};
	///
	/// let field = FieldSchema::new("pin", FieldKind::Text).with_validator(Validator::pattern("^\\d{4}$"));
	/// let compiled = CompiledField::compile(field).unwrap();
	/// assert_eq!(compiled.patterns().len(), 1);
	///
	/// let broken = FieldSchema::new("pin", FieldKind::Text).with_validator(Validator::pattern("("));
	/// assert!(CompiledField::compile(broken).is_err());
	/// ```
	pub fn compile(schema: FieldSchema) -> Result<Self, SchemaError> {
		let patterns = schema
			.validators
			.iter()
			.filter_map(|validator| match validator {
				Validator::Pattern { value, .. } => Some((value, validator.message())),
				_ => None,
			})
			.map(|(source, message)| {
				Regex::new(source)
					.map(|regex| CompiledPattern {
						regex,
						message: message.to_string(),
					})
					.map_err(|source| SchemaError::InvalidPattern {
						field: schema.name.clone(),
						source,
					})
			})
			.collect::<Result<Vec<_>, _>>()?;

		Ok(Self { schema, patterns })
	}

	pub fn schema(&self) -> &FieldSchema {
		&self.schema
	}

	pub fn name(&self) -> &str {
		&self.schema.name
	}

	pub fn patterns(&self) -> &[CompiledPattern] {
		&self.patterns
	}
}

/// An ordered, validated set of fields for one form instance.
#[derive(Debug, Clone)]
pub struct FormSchema {
	fields: Vec<CompiledField>,
}

impl FormSchema {
	/// Check the schema invariants and compile every field.
	///
	/// # Examples
	///
	/// ```
	/// use formsmith_forms::{FieldKind, FieldSchema, FormSchema};
	///
	/// let schema = FormSchema::compile(vec![
	///     FieldSchema::new("password", FieldKind::Password),
	///     FieldSchema::new("confirmPassword", FieldKind::Password).depends_on("password", "Must match"),
	/// ])
	/// .unwrap();
	/// assert_eq!(schema.len(), 2);
	///
	/// let dangling = FormSchema::compile(vec![
	///     FieldSchema::new("confirmPassword", FieldKind::Password).depends_on("password", "Must match"),
	/// ]);
	/// assert!(dangling.is_err());
	/// ```
	pub fn compile(fields: Vec<FieldSchema>) -> Result<Self, SchemaError> {
		let mut seen = HashSet::new();
		for field in &fields {
			if !seen.insert(field.name.as_str()) {
				return Err(SchemaError::DuplicateField(field.name.clone()));
			}
		}

		for field in &fields {
			if let Some(dependency) = &field.depends_on {
				if dependency.field_name == field.name {
					return Err(SchemaError::SelfDependency {
						field: field.name.clone(),
					});
				}
				if !seen.contains(dependency.field_name.as_str()) {
					return Err(SchemaError::UnknownDependency {
						field: field.name.clone(),
						target: dependency.field_name.clone(),
					});
				}
			}
		}

		let fields = fields
			.into_iter()
			.map(CompiledField::compile)
			.collect::<Result<Vec<_>, _>>()?;

		Ok(Self { fields })
	}

	pub fn fields(&self) -> &[CompiledField] {
		&self.fields
	}

	pub fn get(&self, name: &str) -> Option<&CompiledField> {
		self.fields.iter().find(|f| f.name() == name)
	}

	/// Fields whose `dependsOn` references `name` directly.
	pub fn dependents_of<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a CompiledField> + 'a {
		self.fields.iter().filter(move |f| {
			f.schema()
				.depends_on
				.as_ref()
				.is_some_and(|d| d.field_name == name)
		})
	}

	pub fn len(&self) -> usize {
		self.fields.len()
	}

	pub fn is_empty(&self) -> bool {
		self.fields.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::field::FieldKind;
	use rstest::rstest;

	#[rstest]
	fn test_duplicate_names_rejected() {
		// Arrange
		let fields = vec![
			FieldSchema::new("email", FieldKind::Email),
			FieldSchema::new("email", FieldKind::Text),
		];

		// Act
		let result = FormSchema::compile(fields);

		// Assert
		assert!(matches!(result, Err(SchemaError::DuplicateField(name)) if name == "email"));
	}

	#[rstest]
	fn test_self_dependency_rejected() {
		let fields = vec![FieldSchema::new("a", FieldKind::Text).depends_on("a", "loop")];
		assert!(matches!(
			FormSchema::compile(fields),
			Err(SchemaError::SelfDependency { .. })
		));
	}

	#[rstest]
	fn test_dependency_may_reference_later_field() {
		let fields = vec![
			FieldSchema::new("confirm", FieldKind::Password).depends_on("password", "Must match"),
			FieldSchema::new("password", FieldKind::Password),
		];
		assert!(FormSchema::compile(fields).is_ok());
	}

	#[rstest]
	fn test_invalid_pattern_reports_field() {
		// Arrange
		let fields = vec![FieldSchema::new("zip", FieldKind::Text).with_validator(Validator::pattern("[0-9"))];

		// Act
		let error = FormSchema::compile(fields).unwrap_err();

		// Assert
		assert!(matches!(&error, SchemaError::InvalidPattern { field, .. } if field == "zip"));
		assert!(error.to_string().starts_with("Invalid pattern for field zip"));
	}

	#[rstest]
	fn test_dependents_of_is_one_hop() {
		// Arrange
		let schema = FormSchema::compile(vec![
			FieldSchema::new("a", FieldKind::Text),
			FieldSchema::new("b", FieldKind::Text).depends_on("a", "b must match a"),
			FieldSchema::new("c", FieldKind::Text).depends_on("b", "c must match b"),
		])
		.unwrap();

		// Act
		let dependents: Vec<&str> = schema.dependents_of("a").map(CompiledField::name).collect();

		// Assert
		assert_eq!(dependents, vec!["b"]);
	}
}
