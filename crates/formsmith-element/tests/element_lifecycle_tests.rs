//! Element lifecycle integration tests
//!
//! Drives a component the way a host page would: attributes in, input and
//! clicks, events and markup out.

use formsmith_element::{ClickOutcome, FormComponent, FormConfig};
use formsmith_forms::{CollectingSink, JsonLinesSink, SubmitEvent};
use rstest::*;
use serde_json::json;
use std::time::{Duration, Instant};

const SIGN_UP_FIELDS: &str = r#"[
	{"fieldLabel": "Username", "fieldType": "text", "fieldName": "username",
	 "validators": [{"type": "required", "message": "Username is required"},
	                {"type": "minLength", "value": 3, "message": "Minimum 3 characters"}]},
	{"fieldLabel": "Password", "fieldType": "password", "fieldName": "password",
	 "validators": [{"type": "required"}, {"type": "regex", "value": "[0-9]", "message": "Needs a digit"}]},
	{"fieldLabel": "Confirm Password", "fieldType": "password", "fieldName": "confirmPassword",
	 "dependsOn": {"fieldName": "password", "message": "Must match"}}
]"#;

const SIGN_UP_BUTTONS: &str = r#"[
	{"buttonLabel": "Register", "checkValidation": true, "buttonPosition": "right"},
	{"buttonLabel": "Cancel", "buttonColor": "bg-gray-200", "action": "reset"}
]"#;

#[fixture]
fn sign_up() -> FormConfig {
	FormConfig::from_attributes([
		("form-name", "Sign Up"),
		("form-field", SIGN_UP_FIELDS),
		("buttons", SIGN_UP_BUTTONS),
		("remember-me", "true"),
		("reset-on-submit", "yes"),
	])
	.unwrap()
}

#[rstest]
fn test_register_flow_emits_once_and_resets(sign_up: FormConfig) {
	// Arrange
	let mut component = FormComponent::mount(sign_up, CollectingSink::new()).unwrap();
	let now = Instant::now();

	// Act: invalid input keeps Register disabled
	component.input("username", "al").unwrap();
	component.input("password", "abc").unwrap();
	let states = component.button_states();

	// Assert
	assert!(!states[0].enabled);
	assert!(states[1].enabled);
	assert_eq!(states[1].class, "bg-gray-200 px-6 py-3");
	assert_eq!(
		component.form().error("username").map(|e| e.message()),
		Some("Minimum 3 characters")
	);
	assert_eq!(
		component.form().error("password").map(|e| e.message()),
		Some("Needs a digit")
	);

	// Act: fix everything and click Register
	component.input("username", "alice").unwrap();
	component.input("password", "abc1").unwrap();
	component.input("confirmPassword", "abc1").unwrap();
	component.set_remember_me(true);
	let outcome = component.click(0, now);

	// Assert
	assert!(matches!(outcome, ClickOutcome::Submitted(ref result) if result.is_ok()));
	let events = component.sink().events();
	assert_eq!(events.len(), 1);
	assert_eq!(events[0].event_type, "login-submit");
	assert_eq!(
		serde_json::Value::Object(events[0].detail.clone()),
		json!({ "username": "alice", "password": "abc1", "rememberMe": true })
	);
	assert_eq!(component.form().value("username"), Some(&json!("")));
	assert_eq!(component.remember_me(), Some(false));
	assert!(!component.button_states()[0].enabled);
}

#[rstest]
fn test_render_reflects_errors_notice_and_remember_me(sign_up: FormConfig) {
	// Arrange
	let mut component = FormComponent::mount(sign_up, CollectingSink::new()).unwrap();
	let start = Instant::now();
	component.input("password", "abc1").unwrap();
	component.input("confirmPassword", "abc2").unwrap();

	// Act
	let before = component.render(start);
	component.input("username", "alice").unwrap();
	component.input("confirmPassword", "abc1").unwrap();
	component.submit(start);
	let during = component.render(start + Duration::from_secs(1));
	let after = component.render(start + Duration::from_secs(4));

	// Assert
	assert!(before.contains(">Must match</div>"));
	assert!(before.contains(r#"placeholder="Enter your confirm password""#));
	assert!(before.contains(r#"name="rememberMe""#));
	assert!(before.contains(r#"<div class="flex justify-end gap-2 mt-4">"#));
	assert!(during.contains("Form submitted successfully!"));
	assert!(!after.contains("Form submitted successfully!"));
}

#[rstest]
fn test_remember_me_absent_when_not_configured() {
	// Arrange
	let config = FormConfig::new()
		.with_attribute("form-field", r#"[{"fieldName": "q", "fieldType": "search"}]"#)
		.unwrap()
		.with_attribute("remember-me", "off")
		.unwrap();
	let mut component = FormComponent::mount(config, CollectingSink::new()).unwrap();

	// Act
	component.set_remember_me(true);
	let result = component.submit(Instant::now());

	// Assert
	assert!(!result.payload().unwrap().contains_key("rememberMe"));
	assert!(!component.render(Instant::now()).contains("rememberMe"));
}

#[rstest]
fn test_json_lines_sink_receives_serialized_events(sign_up: FormConfig) {
	// Arrange
	let mut component = FormComponent::mount(sign_up, JsonLinesSink::new(Vec::new())).unwrap();
	component.input("username", "alice").unwrap();
	component.input("password", "abc1").unwrap();
	component.input("confirmPassword", "abc1").unwrap();

	// Act
	component.submit(Instant::now());

	// Assert
	let output = String::from_utf8(component.into_sink().into_inner()).unwrap();
	let event: SubmitEvent = serde_json::from_str(output.trim_end()).unwrap();
	assert_eq!(event.form_name, "Sign Up");
	assert_eq!(event.detail.get("rememberMe"), Some(&json!(false)));
}
