//! The runtime record of one open form.
//!
//! A [`FormInstance`] owns the visitor's values, the current step and the
//! submission state. Everything the page shows about the form is derived
//! from it through [`FormInstance::view`].
//!
//! # State machine
//!
//! ```text
//!  Editing ──begin_submission──▶ Submitting ──finish_submission──▶ Succeeded
//!    │  ▲
//!    └──┘ set_value / advance / retreat
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::error::{FieldIssue, FormError, Result};
use crate::field::{FieldDescriptor, FieldStatus, FieldValue};
use crate::submission::SubmissionPayload;
use crate::template::FormTemplate;

// -----------------------------------------------------------------------------
// Outcomes
// -----------------------------------------------------------------------------

/// Lifecycle of a form instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SubmissionState {
    /// Accepting edits and navigation.
    #[default]
    Editing,
    /// Submitted; waiting for the processing delay to elapse.
    Submitting,
    /// Delivered; the confirmation view is shown.
    Succeeded,
}

impl fmt::Display for SubmissionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Editing => write!(f, "editing"),
            Self::Submitting => write!(f, "submitting"),
            Self::Succeeded => write!(f, "succeeded"),
        }
    }
}

/// Result of a step transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// The visible step changed.
    Moved {
        /// Step before the transition.
        from: usize,
        /// Step after the transition.
        to: usize,
    },
    /// Required fields of the current step failed validation.
    Blocked(Vec<FieldIssue>),
    /// Already at the boundary; nothing happened.
    Unchanged,
}

/// Result of a submit attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Values were captured and the instance is now submitting.
    Started,
    /// Required fields failed validation; still editing.
    Blocked(Vec<FieldIssue>),
    /// A submission is already in flight.
    AlreadyPending,
    /// Submitted before the last step, so the form tried to advance instead.
    Advanced(Navigation),
}

// -----------------------------------------------------------------------------
// Form View
// -----------------------------------------------------------------------------

/// Everything the page needs to draw the current state of a form.
#[derive(Debug, Clone, PartialEq)]
pub struct FormView {
    /// Template being shown.
    pub template_id: String,
    /// Visible step, 1-based.
    pub current_step: usize,
    /// Number of steps.
    pub total_steps: usize,
    /// Progress bar width in percent; `None` for single-page forms.
    pub progress: Option<f64>,
    /// Back button visibility.
    pub back_visible: bool,
    /// Next button visibility.
    pub next_visible: bool,
    /// Submit button visibility.
    pub submit_visible: bool,
    /// Whether the submit button can be pressed.
    pub submit_enabled: bool,
    /// Whether the submit button shows the busy label.
    pub busy: bool,
    /// Styling per field name.
    pub statuses: BTreeMap<String, FieldStatus>,
    /// Whether the confirmation view replaces the form.
    pub confirmed: bool,
}

/// Progress bar width at step `step` of `total`.
///
/// ```
/// assert_eq!(leadform::progress_percent(1, 2), 50.0);
/// assert_eq!(leadform::progress_percent(2, 2), 100.0);
/// ```
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn progress_percent(step: usize, total: usize) -> f64 {
    if total == 0 {
        return 100.0;
    }
    step as f64 / total as f64 * 100.0
}

// -----------------------------------------------------------------------------
// Form Instance
// -----------------------------------------------------------------------------

/// Mutable state of the single open form.
#[derive(Debug, Clone)]
pub struct FormInstance {
    template: Arc<FormTemplate>,
    current_step: usize,
    values: BTreeMap<String, FieldValue>,
    statuses: BTreeMap<String, FieldStatus>,
    state: SubmissionState,
    pending: Option<SubmissionPayload>,
}

impl FormInstance {
    /// Opens a fresh instance of `template` at step 1.
    #[must_use]
    pub fn new(template: Arc<FormTemplate>) -> Self {
        let values = template
            .body
            .fields()
            .map(|f| (f.name.clone(), f.initial_value()))
            .collect();
        Self {
            template,
            current_step: 1,
            values,
            statuses: BTreeMap::new(),
            state: SubmissionState::Editing,
            pending: None,
        }
    }

    /// The template this instance was opened from.
    #[must_use]
    pub fn template(&self) -> &Arc<FormTemplate> {
        &self.template
    }

    /// Template id.
    #[must_use]
    pub fn template_id(&self) -> &str {
        &self.template.id
    }

    /// Visible step, 1-based.
    #[must_use]
    pub const fn current_step(&self) -> usize {
        self.current_step
    }

    /// Number of steps.
    #[must_use]
    pub fn total_steps(&self) -> usize {
        self.template.total_steps()
    }

    /// Lifecycle state.
    #[must_use]
    pub const fn state(&self) -> SubmissionState {
        self.state
    }

    /// Current value of a field.
    #[must_use]
    pub fn value(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(name)
    }

    /// All current values keyed by field name.
    #[must_use]
    pub const fn values(&self) -> &BTreeMap<String, FieldValue> {
        &self.values
    }

    /// Styling of a field; neutral until it is edited or validated.
    #[must_use]
    pub fn status(&self, name: &str) -> FieldStatus {
        self.statuses.get(name).copied().unwrap_or_default()
    }

    /// Progress percent for stepped forms.
    #[must_use]
    pub fn progress(&self) -> Option<f64> {
        self.template
            .body
            .is_stepped()
            .then(|| progress_percent(self.current_step, self.total_steps()))
    }

    /// Stores a field value and returns its live validation status.
    ///
    /// # Errors
    ///
    /// Fails if the instance is not editing, the field does not exist, or
    /// the value shape does not match the field kind.
    pub fn set_value(&mut self, name: &str, value: FieldValue) -> Result<FieldStatus> {
        self.ensure_editing()?;
        let field = self
            .template
            .field(name)
            .ok_or_else(|| FormError::UnknownField(name.to_string()))?;
        if !field.accepts(&value) {
            return Err(FormError::ValueKind(name.to_string()));
        }
        let status = field.live_status(&value);
        self.values.insert(name.to_string(), value);
        self.statuses.insert(name.to_string(), status);
        Ok(status)
    }

    /// Moves to the next step if the current step's required fields pass.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::NotEditing`] once a submission has started.
    pub fn advance(&mut self) -> Result<Navigation> {
        self.ensure_editing()?;
        let total = self.total_steps();
        if self.current_step >= total {
            return Ok(Navigation::Unchanged);
        }
        let template = Arc::clone(&self.template);
        let issues = self.validate(template.body.step_fields(self.current_step).iter());
        if !issues.is_empty() {
            tracing::debug!(
                template = %self.template.id,
                step = self.current_step,
                failing = issues.len(),
                "step blocked"
            );
            return Ok(Navigation::Blocked(issues));
        }
        let from = self.current_step;
        self.current_step += 1;
        tracing::debug!(template = %self.template.id, from, to = self.current_step, "step advanced");
        Ok(Navigation::Moved {
            from,
            to: self.current_step,
        })
    }

    /// Moves to the previous step without validating.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::NotEditing`] once a submission has started.
    pub fn retreat(&mut self) -> Result<Navigation> {
        self.ensure_editing()?;
        if self.current_step <= 1 {
            return Ok(Navigation::Unchanged);
        }
        let from = self.current_step;
        self.current_step -= 1;
        tracing::debug!(template = %self.template.id, from, to = self.current_step, "step retreated");
        Ok(Navigation::Moved {
            from,
            to: self.current_step,
        })
    }

    /// Validates the whole form and, if it passes, captures the payload and
    /// enters [`SubmissionState::Submitting`].
    ///
    /// Before the last step of a stepped form this only advances, the way
    /// pressing Enter in a step's input should.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::NotEditing`] after the submission has succeeded.
    pub fn begin_submission(&mut self, at: DateTime<Utc>) -> Result<SubmitOutcome> {
        match self.state {
            SubmissionState::Submitting => return Ok(SubmitOutcome::AlreadyPending),
            SubmissionState::Succeeded => return Err(FormError::NotEditing(self.state)),
            SubmissionState::Editing => {}
        }
        if self.current_step < self.total_steps() {
            return Ok(SubmitOutcome::Advanced(self.advance()?));
        }
        let template = Arc::clone(&self.template);
        let issues = self.validate(template.body.fields());
        if !issues.is_empty() {
            tracing::debug!(template = %self.template.id, failing = issues.len(), "submit blocked");
            return Ok(SubmitOutcome::Blocked(issues));
        }
        self.pending = Some(SubmissionPayload::capture(
            self.template.id.clone(),
            &self.values,
            at,
        ));
        self.state = SubmissionState::Submitting;
        tracing::debug!(template = %self.template.id, "submission started");
        Ok(SubmitOutcome::Started)
    }

    /// Completes a pending submission and hands back its payload.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::NotSubmitting`] unless a submission is pending.
    pub fn finish_submission(&mut self) -> Result<SubmissionPayload> {
        if self.state != SubmissionState::Submitting {
            return Err(FormError::NotSubmitting);
        }
        let payload = self.pending.take().ok_or(FormError::NotSubmitting)?;
        self.state = SubmissionState::Succeeded;
        Ok(payload)
    }

    /// Projects the instance into what the page shows.
    #[must_use]
    pub fn view(&self) -> FormView {
        let total = self.total_steps();
        let stepped = self.template.body.is_stepped();
        let last = self.current_step >= total;
        FormView {
            template_id: self.template.id.clone(),
            current_step: self.current_step,
            total_steps: total,
            progress: self.progress(),
            back_visible: self.current_step > 1,
            next_visible: stepped && !last,
            submit_visible: last,
            submit_enabled: self.state == SubmissionState::Editing,
            busy: self.state == SubmissionState::Submitting,
            statuses: self.statuses.clone(),
            confirmed: self.state == SubmissionState::Succeeded,
        }
    }

    fn ensure_editing(&self) -> Result<()> {
        if self.state == SubmissionState::Editing {
            Ok(())
        } else {
            Err(FormError::NotEditing(self.state))
        }
    }

    /// Checks the required fields among `fields`, updating their styling.
    fn validate<'a>(&mut self, fields: impl Iterator<Item = &'a FieldDescriptor>) -> Vec<FieldIssue> {
        let mut issues = Vec::new();
        for field in fields.filter(|f| f.required) {
            let value = self
                .values
                .get(&field.name)
                .cloned()
                .unwrap_or_else(|| field.initial_value());
            match field.check(&value) {
                Ok(()) => {
                    self.statuses.insert(field.name.clone(), FieldStatus::Success);
                }
                Err(kind) => {
                    self.statuses.insert(field.name.clone(), FieldStatus::Error);
                    issues.push(FieldIssue::new(field.name.clone(), kind));
                }
            }
        }
        issues
    }
}
