//! Error types for the form engine.
//!
//! Validation failures are ordinary outcomes (see [`Navigation::Blocked`] and
//! [`SubmitOutcome::Blocked`]) and never surface as errors. The variants here
//! cover misuse of the engine and malformed catalogs.
//!
//! [`Navigation::Blocked`]: crate::Navigation::Blocked
//! [`SubmitOutcome::Blocked`]: crate::SubmitOutcome::Blocked

use std::fmt;

use thiserror::Error;

/// Errors produced by the form engine.
///
/// # Recovery Strategies
///
/// | Error Variant | Recovery Strategy |
/// |--------------|-------------------|
/// | [`UnknownTemplate`](FormError::UnknownTemplate) | Log and ignore the trigger |
/// | [`NoActiveForm`](FormError::NoActiveForm) | Ignore; the modal was already closed |
/// | [`UnknownField`](FormError::UnknownField) | Markup and template disagree; log it |
/// | [`ValueKind`](FormError::ValueKind) | Caller sent a checkbox value to a text field (or the reverse) |
/// | [`NotEditing`](FormError::NotEditing) | Ignore; a submission is already in flight |
/// | [`NotSubmitting`](FormError::NotSubmitting) | Ignore the completion callback |
/// | [`StaleSubmission`](FormError::StaleSubmission) | Ignore; the form was replaced meanwhile |
/// | [`Catalog`](FormError::Catalog) | Fix the catalog source |
///
/// # Note on Clone and PartialEq
///
/// Like the catalog error, this type stores messages as `String`s so that it
/// can derive `Clone` and `PartialEq` for use in tests.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    /// No template is registered under the requested id.
    #[error("unknown form template: {0:?}")]
    UnknownTemplate(String),

    /// An operation needs an open form but none is active.
    #[error("no form is open")]
    NoActiveForm,

    /// The active template has no field with this name.
    #[error("unknown field: {0:?}")]
    UnknownField(String),

    /// The value shape does not match the field kind.
    #[error("value does not match the kind of field {0:?}")]
    ValueKind(String),

    /// The instance is no longer accepting edits or navigation.
    #[error("form is not editable (state: {0})")]
    NotEditing(crate::SubmissionState),

    /// A submission completion arrived while nothing was submitting.
    #[error("no submission is pending")]
    NotSubmitting,

    /// A submission completion belongs to a form instance that has since
    /// been closed or replaced.
    #[error("submission belongs to a closed form (generation {expected}, active {actual:?})")]
    StaleSubmission {
        /// Generation the completion was scheduled for.
        expected: u64,
        /// Generation of the currently active instance, if any.
        actual: Option<u64>,
    },

    /// The template catalog could not be loaded.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

impl FormError {
    /// Creates an unknown-template error.
    pub fn unknown_template(id: impl Into<String>) -> Self {
        Self::UnknownTemplate(id.into())
    }

    /// Returns true for errors that only mean "nothing to do".
    ///
    /// Callers wired to page events can drop these silently.
    #[must_use]
    pub const fn is_benign(&self) -> bool {
        matches!(
            self,
            Self::NoActiveForm
                | Self::NotEditing(_)
                | Self::NotSubmitting
                | Self::StaleSubmission { .. }
        )
    }
}

/// Errors raised while parsing or checking a template catalog.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// The catalog source is not valid TOML or does not match the schema.
    #[error("catalog parse error: {0}")]
    Parse(String),

    /// Two templates share an id.
    #[error("duplicate template id {0:?}")]
    DuplicateTemplate(String),

    /// A template declares both `fields` and `steps`.
    #[error("template {0:?} declares both fields and steps")]
    MixedBody(String),

    /// A template declares neither `fields` nor any `steps`.
    #[error("template {0:?} has no fields or steps")]
    EmptyBody(String),

    /// Step numbers are not `1..=N` in order.
    #[error("template {template:?}: expected step {expected}, found {found}")]
    StepIndex {
        /// Template id.
        template: String,
        /// The index the step should carry.
        expected: usize,
        /// The index it carries.
        found: usize,
    },

    /// Field names must be unique within a template.
    #[error("template {template:?}: duplicate field {field:?}")]
    DuplicateField {
        /// Template id.
        template: String,
        /// Repeated field name.
        field: String,
    },

    /// A select field has no options in at least one language.
    #[error("template {template:?}: select field {field:?} has no options")]
    MissingOptions {
        /// Template id.
        template: String,
        /// Field name.
        field: String,
    },

    /// A range field lacks `min`/`max`, or `min > max`.
    #[error("template {template:?}: range field {field:?} needs min <= max")]
    InvalidBounds {
        /// Template id.
        template: String,
        /// Field name.
        field: String,
    },
}

impl From<toml::de::Error> for CatalogError {
    fn from(err: toml::de::Error) -> Self {
        Self::Parse(err.message().to_string())
    }
}

/// A specialized [`Result`] type for form engine operations.
pub type Result<T> = std::result::Result<T, FormError>;

// -----------------------------------------------------------------------------
// Field issues
// -----------------------------------------------------------------------------

/// Why a field blocked a step transition or a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueKind {
    /// Required and empty (or unchecked).
    Missing,
    /// Non-empty but not a valid value for the field kind.
    Invalid(String),
}

/// A single failing field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIssue {
    /// Field name (the submission key).
    pub field: String,
    /// What is wrong with it.
    pub kind: IssueKind,
}

impl FieldIssue {
    /// Creates a new issue for the named field.
    pub fn new(field: impl Into<String>, kind: IssueKind) -> Self {
        Self {
            field: field.into(),
            kind,
        }
    }
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            IssueKind::Missing => write!(f, "{} is required", self.field),
            IssueKind::Invalid(reason) => write!(f, "{}: {reason}", self.field),
        }
    }
}
