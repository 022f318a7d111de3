//! Resolved, single-language form templates.

use crate::field::FieldDescriptor;

/// One page of a multi-step form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    /// 1-based position; contiguous within a template.
    pub index: usize,
    /// Heading shown above the step's fields.
    pub title: String,
    /// Fields on this page.
    pub fields: Vec<FieldDescriptor>,
}

/// Layout of a template: a single page or an ordered list of steps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormBody {
    /// All fields on one page.
    Flat(Vec<FieldDescriptor>),
    /// Fields split across steps, shown one at a time.
    Stepped(Vec<Step>),
}

impl FormBody {
    /// Number of pages; always 1 for flat forms.
    #[must_use]
    pub fn total_steps(&self) -> usize {
        match self {
            Self::Flat(_) => 1,
            Self::Stepped(steps) => steps.len(),
        }
    }

    /// Returns true for multi-step layouts.
    #[must_use]
    pub const fn is_stepped(&self) -> bool {
        matches!(self, Self::Stepped(_))
    }

    /// Fields shown on the given 1-based step.
    ///
    /// Flat forms have every field on step 1. Out-of-range steps are empty.
    #[must_use]
    pub fn step_fields(&self, step: usize) -> &[FieldDescriptor] {
        match self {
            Self::Flat(fields) if step == 1 => fields.as_slice(),
            Self::Flat(_) => &[],
            Self::Stepped(steps) => match step.checked_sub(1).and_then(|i| steps.get(i)) {
                Some(s) => s.fields.as_slice(),
                None => &[],
            },
        }
    }

    /// Every field in display order.
    pub fn fields(&self) -> Box<dyn Iterator<Item = &FieldDescriptor> + '_> {
        match self {
            Self::Flat(fields) => Box::new(fields.iter()),
            Self::Stepped(steps) => Box::new(steps.iter().flat_map(|s| s.fields.iter())),
        }
    }
}

/// A form template in one display language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormTemplate {
    /// Identifier used by call-to-action triggers.
    pub id: String,
    /// Modal heading.
    pub title: String,
    /// Line under the heading.
    pub subtitle: String,
    /// Field layout.
    pub body: FormBody,
}

impl FormTemplate {
    /// Looks up a field by name anywhere in the template.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.body.fields().find(|f| f.name == name)
    }

    /// Number of pages.
    #[must_use]
    pub fn total_steps(&self) -> usize {
        self.body.total_steps()
    }
}

/// Shared interface strings for one display language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiText {
    /// Back button.
    pub back: String,
    /// Next button.
    pub next: String,
    /// Submit button on single-page forms.
    pub submit: String,
    /// Submit button on the last page of a multi-step form.
    pub submit_stepped: String,
    /// Prefix of the placeholder option of a select ("Select").
    pub select_prefix: String,
    /// Submit label while a submission is in flight.
    pub submitting: String,
    /// Confirmation heading.
    pub success_title: String,
    /// Confirmation message.
    pub success_message: String,
    /// Close button on the confirmation view.
    pub close: String,
}
