//! Field descriptors, values and per-field validation.

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::IssueKind;

// -----------------------------------------------------------------------------
// Field Kind
// -----------------------------------------------------------------------------

/// The native control a field renders as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Single-line text.
    Text,
    /// Email address.
    Email,
    /// Telephone number.
    Tel,
    /// Decimal number.
    Number,
    /// Drop-down with a fixed option list.
    Select,
    /// Multi-line text.
    Textarea,
    /// Boolean checkbox.
    Checkbox,
    /// Integer slider with a live readout.
    Range,
    /// Local date and time.
    Datetime,
}

impl FieldKind {
    /// The HTML `type` attribute for kinds rendered as `<input>`.
    ///
    /// Returns `None` for kinds with their own element (`select`, `textarea`).
    #[must_use]
    pub const fn input_type(self) -> Option<&'static str> {
        match self {
            Self::Text => Some("text"),
            Self::Email => Some("email"),
            Self::Tel => Some("tel"),
            Self::Number => Some("number"),
            Self::Checkbox => Some("checkbox"),
            Self::Range => Some("range"),
            Self::Datetime => Some("datetime-local"),
            Self::Select | Self::Textarea => None,
        }
    }

    /// Returns true if values of this kind are booleans.
    #[must_use]
    pub const fn is_boolean(self) -> bool {
        matches!(self, Self::Checkbox)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Text => "text",
            Self::Email => "email",
            Self::Tel => "tel",
            Self::Number => "number",
            Self::Select => "select",
            Self::Textarea => "textarea",
            Self::Checkbox => "checkbox",
            Self::Range => "range",
            Self::Datetime => "datetime",
        };
        f.write_str(name)
    }
}

// -----------------------------------------------------------------------------
// Field Value
// -----------------------------------------------------------------------------

/// The value a field currently holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Text entered or selected by the visitor.
    Text(String),
    /// Checkbox state.
    Checked(bool),
}

impl FieldValue {
    /// Creates a text value.
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Returns the text, if this is a text value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Checked(_) => None,
        }
    }

    /// Returns true for whitespace-only text and unchecked boxes.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Text(s) => s.trim().is_empty(),
            Self::Checked(checked) => !checked,
        }
    }
}

impl Default for FieldValue {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

// -----------------------------------------------------------------------------
// Field Status
// -----------------------------------------------------------------------------

/// Validation styling applied to a field container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FieldStatus {
    /// No styling.
    #[default]
    Neutral,
    /// Holds a valid value.
    Success,
    /// Failed validation.
    Error,
}

impl FieldStatus {
    /// The CSS class for this status, if any.
    #[must_use]
    pub const fn class(self) -> Option<&'static str> {
        match self {
            Self::Neutral => None,
            Self::Success => Some("success"),
            Self::Error => Some("error"),
        }
    }
}

// -----------------------------------------------------------------------------
// Field Descriptor
// -----------------------------------------------------------------------------

/// Declarative description of one form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Control kind.
    pub kind: FieldKind,
    /// Submission key; unique within a template.
    pub name: String,
    /// Visible label.
    pub label: String,
    /// Whether a value is needed to advance or submit.
    pub required: bool,
    /// Options for `select` fields, in display order.
    pub options: Vec<String>,
    /// Lower bound for `number` and `range`.
    pub min: Option<i64>,
    /// Upper bound for `number` and `range`.
    pub max: Option<i64>,
    /// Initial value.
    pub default: Option<String>,
    /// Placeholder text.
    pub placeholder: Option<String>,
}

impl FieldDescriptor {
    /// Creates an optional field with no options or bounds.
    pub fn new(kind: FieldKind, name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            label: label.into(),
            required: false,
            options: Vec::new(),
            min: None,
            max: None,
            default: None,
            placeholder: None,
        }
    }

    /// Marks the field as required.
    #[must_use]
    pub const fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Sets the select options.
    #[must_use]
    pub fn options<S: Into<String>>(mut self, options: impl IntoIterator<Item = S>) -> Self {
        self.options = options.into_iter().map(Into::into).collect();
        self
    }

    /// Sets numeric bounds.
    #[must_use]
    pub const fn bounds(mut self, min: Option<i64>, max: Option<i64>) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    /// Sets the initial value.
    #[must_use]
    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Sets the placeholder.
    #[must_use]
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// The value a fresh instance starts with.
    ///
    /// Range sliders always hold a number, so they fall back to `min`.
    #[must_use]
    pub fn initial_value(&self) -> FieldValue {
        match self.kind {
            FieldKind::Checkbox => FieldValue::Checked(
                self.default
                    .as_deref()
                    .is_some_and(|v| matches!(v, "true" | "on" | "checked")),
            ),
            FieldKind::Range => FieldValue::Text(
                self.default
                    .clone()
                    .or_else(|| self.min.map(|m| m.to_string()))
                    .unwrap_or_default(),
            ),
            _ => FieldValue::Text(self.default.clone().unwrap_or_default()),
        }
    }

    /// Returns true if `value` has the right shape for this field.
    #[must_use]
    pub fn accepts(&self, value: &FieldValue) -> bool {
        matches!(
            (self.kind.is_boolean(), value),
            (true, FieldValue::Checked(_)) | (false, FieldValue::Text(_))
        )
    }

    /// Checks a value against this field's constraints.
    ///
    /// Blank values fail only when the field is required; non-blank values
    /// must be valid for the field kind.
    ///
    /// # Errors
    ///
    /// Returns the [`IssueKind`] describing the failure.
    pub fn check(&self, value: &FieldValue) -> Result<(), IssueKind> {
        if value.is_blank() {
            return if self.required {
                Err(IssueKind::Missing)
            } else {
                Ok(())
            };
        }
        match value {
            FieldValue::Checked(_) => Ok(()),
            FieldValue::Text(text) => match self.type_issue(text.trim()) {
                Some(reason) => Err(IssueKind::Invalid(reason)),
                None => Ok(()),
            },
        }
    }

    /// Status shown while the visitor types.
    ///
    /// Empty fields stay neutral; the error styling for missing values only
    /// appears once a step transition or submission is refused.
    #[must_use]
    pub fn live_status(&self, value: &FieldValue) -> FieldStatus {
        if value.is_blank() {
            FieldStatus::Neutral
        } else if self.check(value).is_ok() {
            FieldStatus::Success
        } else {
            FieldStatus::Error
        }
    }

    fn type_issue(&self, text: &str) -> Option<String> {
        match self.kind {
            FieldKind::Text | FieldKind::Textarea | FieldKind::Checkbox => None,
            FieldKind::Email => validate_email(text),
            FieldKind::Tel => validate_tel(text),
            FieldKind::Number => validate_number(text, self.min, self.max),
            FieldKind::Range => validate_range(text, self.min, self.max),
            FieldKind::Datetime => validate_datetime(text),
            FieldKind::Select => {
                if self.options.iter().any(|o| o == text) {
                    None
                } else {
                    Some(format!("{text:?} is not one of the offered options"))
                }
            }
        }
    }
}

// -----------------------------------------------------------------------------
// Validators
// -----------------------------------------------------------------------------

/// Checks the `local@domain.tld` shape of an email address.
///
/// # Example
/// ```
/// use leadform::validate_email;
/// assert!(validate_email("ops@example.com").is_none());
/// assert!(validate_email("ops@example").is_some());
/// ```
#[must_use]
pub fn validate_email(s: &str) -> Option<String> {
    let Some((local, domain)) = s.split_once('@') else {
        return Some("invalid email address".to_string());
    };
    if local.is_empty() || domain.contains('@') || local.chars().any(char::is_whitespace) {
        return Some("invalid email address".to_string());
    }
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 || labels.iter().any(|l| l.is_empty() || l.contains(char::is_whitespace))
    {
        return Some("invalid email address".to_string());
    }
    None
}

/// Accepts digits with common phone punctuation; at least one digit.
#[must_use]
pub fn validate_tel(s: &str) -> Option<String> {
    let allowed = |c: char| c.is_ascii_digit() || matches!(c, '+' | '-' | '(' | ')' | '.' | ' ');
    if s.chars().all(allowed) && s.chars().any(|c| c.is_ascii_digit()) {
        None
    } else {
        Some("invalid phone number".to_string())
    }
}

/// Accepts a finite decimal within the optional bounds.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn validate_number(s: &str, min: Option<i64>, max: Option<i64>) -> Option<String> {
    let Ok(n) = s.parse::<f64>() else {
        return Some("not a number".to_string());
    };
    if !n.is_finite() {
        return Some("not a number".to_string());
    }
    if min.is_some_and(|m| n < m as f64) || max.is_some_and(|m| n > m as f64) {
        return Some("number out of range".to_string());
    }
    None
}

/// Accepts an integer within the bounds of a slider.
#[must_use]
pub fn validate_range(s: &str, min: Option<i64>, max: Option<i64>) -> Option<String> {
    let Ok(n) = s.parse::<i64>() else {
        return Some("not a whole number".to_string());
    };
    if min.is_some_and(|m| n < m) || max.is_some_and(|m| n > m) {
        return Some("value out of range".to_string());
    }
    None
}

/// Accepts the `datetime-local` wire format, `YYYY-MM-DDTHH:MM[:SS]`.
#[must_use]
pub fn validate_datetime(s: &str) -> Option<String> {
    let parsed = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S"));
    match parsed {
        Ok(_) => None,
        Err(_) => Some("invalid date and time".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_type_mapping() {
        assert_eq!(FieldKind::Datetime.input_type(), Some("datetime-local"));
        assert_eq!(FieldKind::Tel.input_type(), Some("tel"));
        assert_eq!(FieldKind::Select.input_type(), None);
        assert_eq!(FieldKind::Textarea.input_type(), None);
    }

    #[test]
    fn test_kind_deserializes_lowercase() {
        let kind: FieldKind = serde_json::from_str("\"datetime\"").unwrap();
        assert_eq!(kind, FieldKind::Datetime);
        assert_eq!(kind.to_string(), "datetime");
    }

    #[test]
    fn test_required_blank_is_missing() {
        let field = FieldDescriptor::new(FieldKind::Text, "name", "Name").required(true);
        assert_eq!(field.check(&FieldValue::text("   ")), Err(IssueKind::Missing));
        assert_eq!(field.check(&FieldValue::text("Ada")), Ok(()));
    }

    #[test]
    fn test_optional_blank_passes() {
        let field = FieldDescriptor::new(FieldKind::Email, "email", "Email");
        assert_eq!(field.check(&FieldValue::text("")), Ok(()));
    }

    #[test]
    fn test_required_checkbox_must_be_checked() {
        let field = FieldDescriptor::new(FieldKind::Checkbox, "terms", "Terms").required(true);
        assert_eq!(field.check(&FieldValue::Checked(false)), Err(IssueKind::Missing));
        assert_eq!(field.check(&FieldValue::Checked(true)), Ok(()));
    }

    #[test]
    fn test_email_validation() {
        assert!(validate_email("a@b.co").is_none());
        assert!(validate_email("no-at-sign").is_some());
        assert!(validate_email("@b.co").is_some());
        assert!(validate_email("a@b").is_some());
        assert!(validate_email("a@b..co").is_some());
        assert!(validate_email("a@@b.co").is_some());
    }

    #[test]
    fn test_tel_validation() {
        assert!(validate_tel("+49 (30) 123-456").is_none());
        assert!(validate_tel("call me").is_some());
        assert!(validate_tel("+-").is_some());
    }

    #[test]
    fn test_number_bounds() {
        assert!(validate_number("50000", Some(0), None).is_none());
        assert!(validate_number("-1", Some(0), None).is_some());
        assert!(validate_number("2.5", None, None).is_none());
        assert!(validate_number("NaN", None, None).is_some());
        assert!(validate_number("lots", None, None).is_some());
    }

    #[test]
    fn test_range_bounds() {
        assert!(validate_range("5", Some(1), Some(10)).is_none());
        assert!(validate_range("11", Some(1), Some(10)).is_some());
        assert!(validate_range("5.5", Some(1), Some(10)).is_some());
    }

    #[test]
    fn test_datetime_validation() {
        assert!(validate_datetime("2026-10-20T14:30").is_none());
        assert!(validate_datetime("2026-10-20T14:30:15").is_none());
        assert!(validate_datetime("2026-10-20").is_some());
        assert!(validate_datetime("tomorrow").is_some());
    }

    #[test]
    fn test_select_requires_known_option() {
        let field = FieldDescriptor::new(FieldKind::Select, "role", "Role")
            .required(true)
            .options(["A", "B"]);
        assert_eq!(field.check(&FieldValue::text("B")), Ok(()));
        assert!(matches!(
            field.check(&FieldValue::text("C")),
            Err(IssueKind::Invalid(_))
        ));
    }

    #[test]
    fn test_live_status() {
        let field = FieldDescriptor::new(FieldKind::Email, "email", "Email").required(true);
        assert_eq!(field.live_status(&FieldValue::text("")), FieldStatus::Neutral);
        assert_eq!(field.live_status(&FieldValue::text("x@y.io")), FieldStatus::Success);
        assert_eq!(field.live_status(&FieldValue::text("x@")), FieldStatus::Error);
    }

    #[test]
    fn test_initial_values() {
        let slider = FieldDescriptor::new(FieldKind::Range, "team", "Team").bounds(Some(1), Some(10));
        assert_eq!(slider.initial_value(), FieldValue::text("1"));

        let slider = slider.default_value("5");
        assert_eq!(slider.initial_value(), FieldValue::text("5"));

        let checkbox = FieldDescriptor::new(FieldKind::Checkbox, "news", "News");
        assert_eq!(checkbox.initial_value(), FieldValue::Checked(false));
    }

    #[test]
    fn test_accepts_value_shape() {
        let checkbox = FieldDescriptor::new(FieldKind::Checkbox, "news", "News");
        assert!(checkbox.accepts(&FieldValue::Checked(true)));
        assert!(!checkbox.accepts(&FieldValue::text("on")));

        let text = FieldDescriptor::new(FieldKind::Text, "name", "Name");
        assert!(text.accepts(&FieldValue::text("x")));
        assert!(!text.accepts(&FieldValue::Checked(true)));
    }

    #[test]
    fn test_status_class() {
        assert_eq!(FieldStatus::Neutral.class(), None);
        assert_eq!(FieldStatus::Error.class(), Some("error"));
    }
}
