//! HTML rendering
//!
//! Turns a [`FormView`] into accessible markup with Tailwind classes:
//!
//! - every input is labelled and carries `aria-invalid` and
//!   `aria-describedby` pointing at its error text
//! - error text uses `role="alert"`, the transient notice `role="status"`
//! - disabled buttons carry the `disabled` attribute as well as the gray class
//! - buttons are grouped left, center and right in that order
//!
//! Rendering is a pure function of the view; it never touches form state.

use formsmith_forms::{
	ButtonPosition, ButtonState, FieldKind, FieldSnapshot, FormSnapshot, Notice, NoticeKind,
};

const INPUT_CLASS: &str =
	"w-full px-4 py-2 border rounded-md focus:outline-none transition-all duration-200";
const INPUT_VALID_CLASS: &str = "border-gray-300 focus:ring-blue-400";
const INPUT_INVALID_CLASS: &str = "border-red-500 focus:ring-red-500";
const BUTTON_BASE_CLASS: &str = "font-semibold text-white rounded-md transition-all duration-200";

/// Everything the renderer needs for one frame.
#[derive(Debug, Clone)]
pub struct FormView<'a> {
	pub form_name: &'a str,
	pub snapshot: FormSnapshot,
	pub buttons: Vec<ButtonState>,
	/// `None` hides the remember-me checkbox.
	pub remember_me: Option<bool>,
	pub notice: Option<&'a Notice>,
}

/// Escape text for use in HTML content and attribute values.
///
/// # Examples
///
/// ```
/// use formsmith_element::rendering::html_escape;
///
/// assert_eq!(html_escape(r#"<a href="x">"#), "&lt;a href=&quot;x&quot;&gt;");
/// ```
pub fn html_escape(s: &str) -> String {
	s.replace('&', "&amp;")
		.replace('<', "&lt;")
		.replace('>', "&gt;")
		.replace('"', "&quot;")
		.replace('\'', "&#x27;")
}

fn field_id(name: &str) -> String {
	format!("field-{}", html_escape(name))
}

fn error_id(name: &str) -> String {
	format!("field-{}-error", html_escape(name))
}

/// Render the whole form.
pub fn render_form(view: &FormView<'_>) -> String {
	let mut html = String::from(
		r#"<div class="w-full max-w-sm space-y-6 relative bg-white border border-gray-300 shadow-lg p-8 rounded-lg">"#,
	);
	html.push_str(&format!(
		r#"<h2 class="text-2xl font-bold text-center text-gray-700">{}</h2>"#,
		html_escape(view.form_name)
	));

	if let Some(notice) = view.notice {
		html.push_str(&render_notice(notice));
	}

	html.push_str(&format!(
		r#"<form class="space-y-4" name="{}" novalidate>"#,
		html_escape(view.form_name)
	));
	for field in &view.snapshot.fields {
		html.push_str(&render_field(field));
	}
	if let Some(checked) = view.remember_me {
		html.push_str(&render_remember_me(checked));
	}
	html.push_str(&render_buttons(&view.buttons));
	html.push_str("</form></div>");
	html
}

/// Render one labelled input with its error slot.
pub fn render_field(field: &FieldSnapshot) -> String {
	if field.kind == FieldKind::Hidden {
		return format!(
			r#"<input type="hidden" name="{}" value="{}" />"#,
			html_escape(&field.name),
			html_escape(&field.display_value())
		);
	}

	let id = field_id(&field.name);
	let mut html = String::from(r#"<div class="flex flex-col">"#);

	if let Some(label) = &field.label {
		html.push_str(&format!(
			r#"<label for="{}" class="block text-sm font-medium text-gray-600 mb-1 text-left">{}</label>"#,
			id,
			html_escape(label)
		));
	}

	let state_class = if field.error.is_some() {
		INPUT_INVALID_CLASS
	} else {
		INPUT_VALID_CLASS
	};
	html.push_str(&format!(
		r#"<input type="{}" id="{}" name="{}" class="{} {}""#,
		field.kind.input_type(),
		id,
		html_escape(&field.name),
		INPUT_CLASS,
		state_class
	));

	if field.kind == FieldKind::Checkbox {
		if field.is_checked() {
			html.push_str(" checked");
		}
	} else {
		html.push_str(&format!(r#" value="{}""#, html_escape(&field.display_value())));
		if let Some(placeholder) = &field.placeholder {
			html.push_str(&format!(r#" placeholder="{}""#, html_escape(placeholder)));
		}
	}

	if field.required {
		html.push_str(r#" required aria-required="true""#);
	}

	match &field.error {
		Some(error) => {
			html.push_str(&format!(
				r#" aria-invalid="true" aria-describedby="{}" />"#,
				error_id(&field.name)
			));
			html.push_str(&format!(
				r#"<div id="{}" class="text-xs text-red-600 mt-1" role="alert">{}</div>"#,
				error_id(&field.name),
				html_escape(error)
			));
		}
		None => html.push_str(r#" aria-invalid="false" />"#),
	}

	html.push_str("</div>");
	html
}

/// Render the remember-me checkbox.
pub fn render_remember_me(checked: bool) -> String {
	format!(
		r#"<div class="flex items-center"><input type="checkbox" id="remember-me" name="rememberMe" class="mr-2"{} /><label for="remember-me" class="text-sm text-gray-600">Remember me</label></div>"#,
		if checked { " checked" } else { "" }
	)
}

/// Render buttons grouped by position. Each button keeps its index in
/// `data-index` so clicks can be routed back to it.
pub fn render_buttons(buttons: &[ButtonState]) -> String {
	let mut html = String::new();
	for position in [ButtonPosition::Left, ButtonPosition::Center, ButtonPosition::Right] {
		let group: Vec<(usize, &ButtonState)> = buttons
			.iter()
			.enumerate()
			.filter(|(_, button)| button.position == position)
			.collect();
		if group.is_empty() {
			continue;
		}

		html.push_str(&format!(r#"<div class="flex {} gap-2 mt-4">"#, position.justify_class()));
		for (index, button) in group {
			html.push_str(&format!(
				r#"<button type="{}" class="{} {}" data-index="{}""#,
				button.action.html_type(),
				BUTTON_BASE_CLASS,
				html_escape(&button.class),
				index
			));
			if !button.enabled {
				html.push_str(r#" disabled aria-disabled="true""#);
			}
			html.push_str(&format!(">{}</button>", html_escape(&button.label)));
		}
		html.push_str("</div>");
	}
	html
}

/// Render the transient notice.
pub fn render_notice(notice: &Notice) -> String {
	let color = match notice.kind {
		NoticeKind::Success => "bg-green-500",
		NoticeKind::Failure => "bg-red-500",
	};
	format!(
		r#"<div class="absolute top-0 right-0 p-2 mt-2 mr-2 text-sm font-semibold text-white {} rounded-md shadow-md" role="status" aria-live="polite">{}</div>"#,
		color,
		html_escape(&notice.message)
	)
}
