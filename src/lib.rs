//! # Formsmith
//!
//! A configuration-driven form component: declare fields, validators and
//! buttons as data, mount them, and receive exactly one event per valid
//! submission.
//!
//! ## Feature Flags
//!
//! - `forms` - Validation engine, form state and submission pipeline
//! - `element` (default) - Attribute configuration, component model and HTML renderer
//! - `full` - All features enabled
//!
//! ## Quick Example
//!
//! ```
//! use formsmith::prelude::*;
//! use std::time::Instant;
//!
//! let config = FormConfig::from_attributes([
//!     ("form-name", "Login"),
//!     ("form-field", r#"[
//!         {"fieldLabel": "Email", "fieldType": "email", "fieldName": "email",
//!          "validators": [{"type": "required"}, {"type": "email"}]},
//!         {"fieldLabel": "Password", "fieldType": "password", "fieldName": "password",
//!          "validators": [{"type": "required"}, {"type": "minLength", "value": 8}]}
//!     ]"#),
//!     ("buttons", r#"[{"buttonLabel": "Sign In", "checkValidation": true}]"#),
//!     ("remember-me", "true"),
//! ])
//! .unwrap();
//!
//! let mut login = FormComponent::mount(config, CollectingSink::new()).unwrap();
//! login.input("email", "a@b.com").unwrap();
//! login.input("password", "correct horse").unwrap();
//! login.set_remember_me(true);
//! login.click(0, Instant::now());
//!
//! let event = login.sink().last().unwrap();
//! assert_eq!(event.event_type, "login-submit");
//! assert_eq!(event.detail["rememberMe"], true);
//! ```

#[cfg(feature = "forms")]
pub use formsmith_forms as forms;

#[cfg(feature = "element")]
pub use formsmith_element as element;

#[cfg(feature = "forms")]
pub use formsmith_forms::{
	AuxFlags, ButtonAction, ButtonPosition, ButtonSchema, ButtonState, CollectingSink, DependsOn,
	DirtyPolicy, DispatchError, FieldError, FieldKind, FieldResult, FieldSchema, FormError, FormExt,
	FormResult, FormSchema, FormSnapshot, FormState, JsonLinesSink, Notice, NoticeKind, NoticeSlot,
	SchemaError, SubmissionPipeline, SubmissionResult, SubmitEvent, SubmitOptions, SubmitSink,
	Validator, button_enabled, build_payload,
};

#[cfg(feature = "element")]
pub use formsmith_element::{ClickOutcome, ConfigError, ConfigResult, FormComponent, FormConfig};

/// Commonly used types
pub mod prelude {
	#[cfg(feature = "forms")]
	pub use crate::{
		ButtonSchema, CollectingSink, DirtyPolicy, FieldError, FieldKind, FieldSchema, FormExt,
		FormState, SubmissionPipeline, SubmissionResult, SubmitEvent, SubmitOptions, SubmitSink,
		Validator,
	};

	#[cfg(feature = "element")]
	pub use crate::{ClickOutcome, FormComponent, FormConfig};
}
