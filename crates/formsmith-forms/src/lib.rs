//! Declarative form engine for formsmith
//!
//! This crate turns a schema of field and button definitions into a running
//! form:
//! - Field schema model with serde support for the custom element's attribute format
//! - Validator engine (required, length bounds, pattern, email, cross-field dependency)
//! - Form state controller tracking values, per-field errors, dirtiness and submission
//! - Button policy gating submit buttons on validity and dirtiness
//! - Submission pipeline emitting one event per valid submit through an injected sink
//! - Transient notices with caller-driven expiry
//!
//! It owns no DOM, attribute parsing or styling; see `formsmith-element` for
//! the custom-element layer.

pub mod button;
pub mod field;
pub mod form;
pub mod notice;
pub mod schema;
pub mod snapshot;
pub mod submission;
pub mod validators;

pub use button::{ButtonAction, ButtonPosition, ButtonSchema, ButtonState, button_enabled};
pub use field::{DependsOn, FieldError, FieldKind, FieldResult, FieldSchema};
pub use form::{DirtyPolicy, FormError, FormResult, FormState};
pub use notice::{Notice, NoticeKind, NoticeSlot};
pub use schema::{CompiledField, FormSchema, SchemaError};
pub use snapshot::{FieldSnapshot, FormExt, FormSnapshot};
pub use submission::{
	AuxFlags, CollectingSink, DispatchError, JsonLinesSink, SubmissionPipeline, SubmissionResult,
	SubmitEvent, SubmitOptions, SubmitSink, build_payload,
};
pub use validators::Validator;
