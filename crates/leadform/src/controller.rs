//! The trigger surface: at most one open form at a time.

use chrono::{DateTime, Utc};

use crate::builder::{build_form, confirmation_view};
use crate::error::{FormError, Result};
use crate::field::{FieldStatus, FieldValue};
use crate::instance::{FormInstance, FormView, Navigation, SubmitOutcome};
use crate::registry::TemplateRegistry;
use crate::submission::{LogSink, SubmissionSink};

#[derive(Debug)]
struct ActiveForm {
    generation: u64,
    instance: FormInstance,
}

/// Opens, drives and closes the single form instance of a page.
///
/// Every opened instance gets a new generation number. Deferred work, such
/// as completing a submission after its delay, carries the generation it was
/// scheduled for and is refused once that instance is gone.
///
/// # Example
///
/// ```
/// use leadform::{FieldValue, FormController, Language, SubmitOutcome, TemplateRegistry};
///
/// let registry = TemplateRegistry::new(Language::En).unwrap();
/// let mut forms = FormController::new(registry);
///
/// let markup = forms.open("whitepaper").unwrap();
/// assert!(markup.contains("dynamic-form"));
///
/// for (name, value) in [
///     ("name", "Ada"),
///     ("email", "ada@example.com"),
///     ("company", "Kitchen Co"),
///     ("industry", "Retail"),
/// ] {
///     forms.set_value(name, FieldValue::text(value)).unwrap();
/// }
/// assert_eq!(forms.submit().unwrap(), SubmitOutcome::Started);
///
/// let generation = forms.generation().unwrap();
/// let confirmation = forms.complete_submission(generation).unwrap();
/// assert!(confirmation.contains("Thank You!"));
/// assert!(forms.active().is_none());
/// ```
#[derive(Debug)]
pub struct FormController<S = LogSink> {
    registry: TemplateRegistry,
    sink: S,
    active: Option<ActiveForm>,
    next_generation: u64,
}

impl FormController<LogSink> {
    /// Creates a controller that logs submissions.
    #[must_use]
    pub const fn new(registry: TemplateRegistry) -> Self {
        Self::with_sink(registry, LogSink)
    }
}

impl<S: SubmissionSink> FormController<S> {
    /// Creates a controller delivering submissions to `sink`.
    pub const fn with_sink(registry: TemplateRegistry, sink: S) -> Self {
        Self {
            registry,
            sink,
            active: None,
            next_generation: 1,
        }
    }

    /// The template registry.
    pub const fn registry(&self) -> &TemplateRegistry {
        &self.registry
    }

    /// The submission sink.
    pub const fn sink(&self) -> &S {
        &self.sink
    }

    /// The open form, if any.
    pub fn active(&self) -> Option<&FormInstance> {
        self.active.as_ref().map(|a| &a.instance)
    }

    /// Generation of the open form, if any.
    pub fn generation(&self) -> Option<u64> {
        self.active.as_ref().map(|a| a.generation)
    }

    /// Opens a template and returns its markup.
    ///
    /// Any open form is discarded first. An unknown id leaves the current
    /// form untouched.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::UnknownTemplate`] for ids not in the registry.
    pub fn open(&mut self, id: &str) -> Result<String> {
        let template = self.registry.get(id)?;
        if let Some(previous) = self.active.take() {
            tracing::debug!(
                template = %previous.instance.template_id(),
                generation = previous.generation,
                "replacing open form"
            );
        }
        let markup = build_form(&template, self.registry.ui());
        let generation = self.next_generation;
        self.next_generation += 1;
        self.active = Some(ActiveForm {
            generation,
            instance: FormInstance::new(template),
        });
        tracing::info!(template = id, generation, "form opened");
        Ok(markup)
    }

    /// Discards the open form. Returns false if none was open.
    pub fn close(&mut self) -> bool {
        match self.active.take() {
            Some(active) => {
                tracing::info!(
                    template = %active.instance.template_id(),
                    generation = active.generation,
                    state = %active.instance.state(),
                    "form closed"
                );
                true
            }
            None => false,
        }
    }

    /// Stores a field value on the open form.
    ///
    /// # Errors
    ///
    /// See [`FormInstance::set_value`]; also [`FormError::NoActiveForm`].
    pub fn set_value(&mut self, name: &str, value: FieldValue) -> Result<FieldStatus> {
        self.instance_mut()?.set_value(name, value)
    }

    /// Moves the open form to its next step.
    ///
    /// # Errors
    ///
    /// See [`FormInstance::advance`]; also [`FormError::NoActiveForm`].
    pub fn advance(&mut self) -> Result<Navigation> {
        self.instance_mut()?.advance()
    }

    /// Moves the open form to its previous step.
    ///
    /// # Errors
    ///
    /// See [`FormInstance::retreat`]; also [`FormError::NoActiveForm`].
    pub fn retreat(&mut self) -> Result<Navigation> {
        self.instance_mut()?.retreat()
    }

    /// Submits the open form, timestamped now.
    ///
    /// # Errors
    ///
    /// See [`FormController::submit_at`].
    pub fn submit(&mut self) -> Result<SubmitOutcome> {
        self.submit_at(Utc::now())
    }

    /// Submits the open form with an explicit timestamp.
    ///
    /// On [`SubmitOutcome::Started`] the caller schedules
    /// [`complete_submission`](Self::complete_submission) with the current
    /// [`generation`](Self::generation).
    ///
    /// # Errors
    ///
    /// See [`FormInstance::begin_submission`]; also
    /// [`FormError::NoActiveForm`].
    pub fn submit_at(&mut self, at: DateTime<Utc>) -> Result<SubmitOutcome> {
        self.instance_mut()?.begin_submission(at)
    }

    /// Finishes the submission scheduled for `generation`.
    ///
    /// Delivers the payload to the sink, discards the instance and returns
    /// the confirmation markup that replaces the form.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::StaleSubmission`] if that instance is gone and
    /// [`FormError::NotSubmitting`] if it never started submitting.
    pub fn complete_submission(&mut self, generation: u64) -> Result<String> {
        let current = self.generation();
        if current != Some(generation) {
            return Err(FormError::StaleSubmission {
                expected: generation,
                actual: current,
            });
        }
        let payload = self.instance_mut()?.finish_submission()?;
        self.sink.deliver(&payload);
        self.active = None;
        tracing::info!(template = %payload.template_id, generation, "submission delivered");
        Ok(confirmation_view(self.registry.ui()))
    }

    /// Projection of the open form.
    pub fn view(&self) -> Option<FormView> {
        self.active().map(FormInstance::view)
    }

    fn instance_mut(&mut self) -> Result<&mut FormInstance> {
        self.active
            .as_mut()
            .map(|a| &mut a.instance)
            .ok_or(FormError::NoActiveForm)
    }
}
