//! Custom-element layer for formsmith forms
//!
//! - [`config`]: observed attributes and config documents parsed into a [`FormConfig`]
//! - [`component`]: a mounted [`FormComponent`] reacting to input, clicks and submits
//! - [`rendering`]: accessible HTML for a component frame
//!
//! ## Example
//!
//! ```
//! use formsmith_element::{FormComponent, FormConfig};
//! use formsmith_forms::CollectingSink;
//! use std::time::Instant;
//!
//! let config = FormConfig::from_attributes([
//!     ("form-name", "Newsletter"),
//!     ("form-field", r#"[{"fieldLabel": "Email", "fieldType": "email", "fieldName": "email",
//!                        "validators": [{"type": "required"}, {"type": "email"}]}]"#),
//!     ("buttons", r#"[{"buttonLabel": "Subscribe", "checkValidation": true, "buttonPosition": "center"}]"#),
//! ])
//! .unwrap();
//!
//! let mut component = FormComponent::mount(config, CollectingSink::new()).unwrap();
//! component.input("email", "a@b").unwrap();
//!
//! let html = component.render(Instant::now());
//! assert!(html.contains("Invalid email format"));
//! assert!(html.contains("disabled"));
//! ```

pub mod component;
pub mod config;
pub mod rendering;

pub use component::{ClickOutcome, FormComponent};
pub use config::{ConfigError, ConfigResult, FormConfig, OBSERVED_ATTRIBUTES};
pub use rendering::{FormView, html_escape, render_form};
