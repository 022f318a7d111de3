//! Field markup.
//!
//! [`render_field`] is a pure function from a descriptor to an HTML fragment.
//! Every fragment is wrapped in a `form-group` container tagged with
//! `data-field`, which is where validation classes are toggled later.

use std::fmt::Write as _;

use crate::field::{FieldDescriptor, FieldKind, FieldValue};
use crate::template::UiText;

/// Escapes text for use in element content and quoted attribute values.
///
/// # Example
///
/// ```
/// use leadform::escape_html;
///
/// assert_eq!(escape_html("F&B <Ltd>"), "F&amp;B &lt;Ltd&gt;");
/// ```
#[must_use]
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Text of the empty first option of a select.
///
/// ```
/// use leadform::{FieldDescriptor, FieldKind};
/// use leadform::render::select_placeholder;
///
/// let field = FieldDescriptor::new(FieldKind::Select, "industry", "Industry");
/// assert_eq!(select_placeholder(&field, "Select"), "Select industry");
/// ```
#[must_use]
pub fn select_placeholder(field: &FieldDescriptor, prefix: &str) -> String {
    format!("{prefix} {}", field.label.to_lowercase())
}

/// Renders one field as a `form-group` fragment.
#[must_use]
pub fn render_field(field: &FieldDescriptor, ui: &UiText) -> String {
    let name = escape_html(&field.name);
    let mut html = String::new();
    let _ = write!(html, r#"<div class="form-group" data-field="{name}">"#);

    if field.kind == FieldKind::Checkbox {
        render_checkbox(&mut html, field, &name);
    } else {
        let marker = if field.required { " *" } else { "" };
        let _ = write!(
            html,
            r#"<label for="{name}">{}{marker}</label>"#,
            escape_html(&field.label)
        );
        match field.kind {
            FieldKind::Select => render_select(&mut html, field, &name, ui),
            FieldKind::Textarea => render_textarea(&mut html, field, &name),
            FieldKind::Range => render_range(&mut html, field, &name),
            _ => render_input(&mut html, field, &name),
        }
    }

    html.push_str("</div>");
    html
}

fn required_attr(field: &FieldDescriptor) -> &'static str {
    if field.required { " required" } else { "" }
}

fn placeholder_attr(field: &FieldDescriptor) -> String {
    field
        .placeholder
        .as_deref()
        .map(|p| format!(r#" placeholder="{}""#, escape_html(p)))
        .unwrap_or_default()
}

fn initial_text(field: &FieldDescriptor) -> String {
    match field.initial_value() {
        FieldValue::Text(text) => text,
        FieldValue::Checked(_) => String::new(),
    }
}

fn render_checkbox(html: &mut String, field: &FieldDescriptor, name: &str) {
    let checked = if field.initial_value() == FieldValue::Checked(true) {
        " checked"
    } else {
        ""
    };
    let _ = write!(
        html,
        r#"<label class="checkbox-label"><input type="checkbox" name="{name}" id="{name}"{}{checked}><span class="checkmark"></span>{}</label>"#,
        required_attr(field),
        escape_html(&field.label)
    );
}

fn render_select(html: &mut String, field: &FieldDescriptor, name: &str, ui: &UiText) {
    let selected = initial_text(field);
    let _ = write!(
        html,
        r#"<select name="{name}" id="{name}"{}><option value="">{}</option>"#,
        required_attr(field),
        escape_html(&select_placeholder(field, &ui.select_prefix))
    );
    for option in &field.options {
        let value = escape_html(option);
        let mark = if *option == selected { " selected" } else { "" };
        let _ = write!(html, r#"<option value="{value}"{mark}>{value}</option>"#);
    }
    html.push_str("</select>");
}

fn render_textarea(html: &mut String, field: &FieldDescriptor, name: &str) {
    let _ = write!(
        html,
        r#"<textarea name="{name}" id="{name}"{}{}>{}</textarea>"#,
        required_attr(field),
        placeholder_attr(field),
        escape_html(&initial_text(field))
    );
}

fn render_range(html: &mut String, field: &FieldDescriptor, name: &str) {
    let min = field.min.unwrap_or_default();
    let max = field.max.unwrap_or(min);
    let value = escape_html(&initial_text(field));
    let _ = write!(
        html,
        concat!(
            r#"<div class="range-container">"#,
            r#"<input type="range" name="{name}" id="{name}" min="{min}" max="{max}" value="{value}"{req}>"#,
            r#"<div class="range-labels"><span>{min}</span><span class="range-value">{value}</span><span>{max}</span></div>"#,
            "</div>"
        ),
        name = name,
        min = min,
        max = max,
        value = value,
        req = required_attr(field),
    );
}

fn render_input(html: &mut String, field: &FieldDescriptor, name: &str) {
    let kind = field.kind.input_type().unwrap_or("text");
    let mut bounds = String::new();
    if field.kind == FieldKind::Number {
        if let Some(min) = field.min {
            let _ = write!(bounds, r#" min="{min}""#);
        }
        if let Some(max) = field.max {
            let _ = write!(bounds, r#" max="{max}""#);
        }
    }
    let value = initial_text(field);
    let value_attr = if value.is_empty() {
        String::new()
    } else {
        format!(r#" value="{}""#, escape_html(&value))
    };
    let _ = write!(
        html,
        r#"<input type="{kind}" name="{name}" id="{name}"{}{bounds}{}{value_attr}>"#,
        required_attr(field),
        placeholder_attr(field)
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ui() -> UiText {
        UiText {
            back: "Back".into(),
            next: "Next".into(),
            submit: "Submit".into(),
            submit_stepped: "Secure My Demo".into(),
            select_prefix: "Select".into(),
            submitting: "Submitting...".into(),
            success_title: "Thank You!".into(),
            success_message: "Received.".into(),
            close: "Close".into(),
        }
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html(r#"<a href="x">'&'</a>"#), "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;");
        assert_eq!(escape_html("plain text"), "plain text");
    }

    #[test]
    fn test_text_field_required_marker() {
        let field = FieldDescriptor::new(FieldKind::Text, "name", "Full Name").required(true);
        let html = render_field(&field, &ui());
        assert!(html.starts_with(r#"<div class="form-group" data-field="name">"#));
        assert!(html.contains(r#"<label for="name">Full Name *</label>"#));
        assert!(html.contains(r#"<input type="text" name="name" id="name" required>"#));
        assert!(html.ends_with("</div>"));
    }

    #[test]
    fn test_optional_field_has_no_marker() {
        let field = FieldDescriptor::new(FieldKind::Textarea, "notes", "Notes");
        let html = render_field(&field, &ui());
        assert!(html.contains(r#"<label for="notes">Notes</label>"#));
        assert!(html.contains(r#"<textarea name="notes" id="notes"></textarea>"#));
    }

    #[test]
    fn test_select_placeholder_and_options() {
        let field = FieldDescriptor::new(FieldKind::Select, "industry", "Industry")
            .required(true)
            .options(["Retail", "F&B"]);
        let html = render_field(&field, &ui());
        assert!(html.contains(r#"<option value="">Select industry</option>"#));
        assert!(html.contains(r#"<option value="Retail">Retail</option>"#));
        assert!(html.contains(r#"<option value="F&amp;B">F&amp;B</option>"#));
        let placeholder = html.find("Select industry").unwrap();
        let first = html.find("Retail").unwrap();
        assert!(placeholder < first);
    }

    #[test]
    fn test_select_placeholder_german() {
        let field = FieldDescriptor::new(FieldKind::Select, "industry", "Branche");
        assert_eq!(select_placeholder(&field, "Wählen Sie"), "Wählen Sie branche");
    }

    #[test]
    fn test_checkbox_wraps_input_in_label() {
        let field = FieldDescriptor::new(FieldKind::Checkbox, "terms", "I agree").required(true);
        let html = render_field(&field, &ui());
        assert!(html.contains(r#"<label class="checkbox-label"><input type="checkbox" name="terms" id="terms" required>"#));
        assert!(html.contains(r#"<span class="checkmark"></span>I agree</label>"#));
        assert!(!html.contains(" *"));
    }

    #[test]
    fn test_range_readout_uses_bounds() {
        let field = FieldDescriptor::new(FieldKind::Range, "team", "Team size")
            .bounds(Some(1), Some(10))
            .default_value("4");
        let html = render_field(&field, &ui());
        assert!(html.contains(r#"min="1" max="10" value="4""#));
        assert!(html.contains(r#"<span>1</span><span class="range-value">4</span><span>10</span>"#));
    }

    #[test]
    fn test_datetime_uses_local_input() {
        let field = FieldDescriptor::new(FieldKind::Datetime, "when", "When");
        let html = render_field(&field, &ui());
        assert!(html.contains(r#"type="datetime-local""#));
    }

    #[test]
    fn test_number_with_placeholder_and_min() {
        let field = FieldDescriptor::new(FieldKind::Number, "kitchens", "Kitchens")
            .bounds(Some(1), None)
            .placeholder("e.g. 2");
        let html = render_field(&field, &ui());
        assert!(html.contains(r#"<input type="number" name="kitchens" id="kitchens" min="1" placeholder="e.g. 2">"#));
    }

    #[test]
    fn test_label_is_escaped() {
        let field = FieldDescriptor::new(FieldKind::Text, "x", "<script>");
        let html = render_field(&field, &ui());
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }
}
