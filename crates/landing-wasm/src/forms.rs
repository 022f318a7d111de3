//! Form modal wiring.
//!
//! The modal container gets one delegated listener per event type at load.
//! Each handler updates the [`FormController`](leadform::FormController) and
//! then projects its [`FormView`] onto the markup.

use std::rc::Rc;

use gloo_timers::callback::Timeout;
use leadform::builder::{FORM_ID, PROGRESS_FILL_ID};
use leadform::{FieldValue, FormError, FormView, Navigation, SubmitOutcome, submitting_label};
use wasm_bindgen::JsCast;
use web_sys::{
    Element, Event, HtmlButtonElement, HtmlElement, HtmlInputElement, HtmlSelectElement,
    HtmlTextAreaElement,
};

use crate::dom::{self, Result};
use crate::page::{Page, report};

/// Id of the modal overlay.
pub const MODAL_ID: &str = "form-modal";

/// Id of the element the form markup is written into.
pub const CONTAINER_ID: &str = "form-container";

impl Page {
    /// Attaches the modal's listeners.
    pub(crate) fn wire_forms(self: &Rc<Self>) -> Result<()> {
        let modal = dom::by_id(MODAL_ID)?;
        let container = dom::by_id(CONTAINER_ID)?;

        self.listen(&modal, "click", |page, event| {
            let on_backdrop = match (event.target(), event.current_target()) {
                (Some(target), Some(current)) => js_sys::Object::is(&target, &current),
                _ => false,
            };
            if on_backdrop { page.close_form() } else { Ok(()) }
        })?;

        self.listen(&container, "click", |page, event| {
            let Some(element) = dom::event_element(&event) else {
                return Ok(());
            };
            if element.closest(".form-nav-next")?.is_some() {
                page.next_step()
            } else if element.closest(".form-nav-back")?.is_some() {
                page.previous_step()
            } else if element.closest(r#"[data-action="close-form"]"#)?.is_some() {
                page.close_form()
            } else {
                Ok(())
            }
        })?;

        self.listen(&container, "submit", |page, event| {
            event.prevent_default();
            page.submit_form()
        })?;

        for kind in ["input", "change"] {
            self.listen(&container, kind, |page, event| page.field_changed(&event))?;
        }

        let document = dom::document()?;
        self.listen(&document, "click", |page, event| {
            let Some(element) = dom::event_element(&event) else {
                return Ok(());
            };
            let Some(trigger) = element.closest("[data-open-form]")? else {
                return Ok(());
            };
            event.prevent_default();
            let id = trigger.get_attribute("data-open-form").unwrap_or_default();
            page.open_form(&id)
        })?;
        Ok(())
    }

    /// Builds a template into the modal and shows it.
    ///
    /// Unknown ids are logged and otherwise ignored.
    pub(crate) fn open_form(&self, id: &str) -> Result<()> {
        let opened = self.forms.borrow_mut().open(id);
        let markup = match opened {
            Ok(markup) => markup,
            Err(FormError::UnknownTemplate(id)) => {
                tracing::warn!(template = %id, "no form template with this id");
                return Ok(());
            }
            Err(err) => return Err(err.into()),
        };
        self.pending_submission.borrow_mut().take();

        let container = dom::by_id(CONTAINER_ID)?;
        container.set_inner_html(&markup);
        let modal = dom::by_id(MODAL_ID)?;
        dom::set_visible(&modal, true, "block")?;
        dom::set_style(dom::body()?.as_ref(), "overflow", "hidden")?;
        if let Some(content) = modal.query_selector(".modal-content")? {
            dom::set_class(&content, "fade-in-up", false)?;
        }
        self.render_view()
    }

    /// Hides the modal and discards the open form.
    pub(crate) fn close_form(&self) -> Result<()> {
        self.forms.borrow_mut().close();
        self.pending_submission.borrow_mut().take();

        let modal = dom::by_id(MODAL_ID)?;
        if let Some(content) = modal.query_selector(".modal-content")? {
            dom::set_class(&content, "fade-in-up", false)?;
        }
        dom::set_visible(&modal, false, "block")?;
        dom::set_style(dom::body()?.as_ref(), "overflow", "auto")?;
        dom::by_id(CONTAINER_ID)?.set_inner_html("");
        Ok(())
    }

    pub(crate) fn next_step(&self) -> Result<()> {
        let navigation = self.forms.borrow_mut().advance()?;
        if navigation != Navigation::Unchanged {
            self.render_view()?;
        }
        Ok(())
    }

    pub(crate) fn previous_step(&self) -> Result<()> {
        let navigation = self.forms.borrow_mut().retreat()?;
        if navigation != Navigation::Unchanged {
            self.render_view()?;
        }
        Ok(())
    }

    fn submit_form(self: &Rc<Self>) -> Result<()> {
        let outcome = self.forms.borrow_mut().submit()?;
        match outcome {
            SubmitOutcome::Started => {
                self.render_view()?;
                let Some(generation) = self.forms.borrow().generation() else {
                    return Ok(());
                };
                let weak = Rc::downgrade(self);
                let timer = Timeout::new(self.config.submission_delay_ms, move || {
                    if let Some(page) = weak.upgrade() {
                        if let Err(err) = page.complete_submission(generation) {
                            report("submission", &err);
                        }
                    }
                });
                // A fired timer stays here until the next open or close drops it.
                *self.pending_submission.borrow_mut() = Some(timer);
                Ok(())
            }
            SubmitOutcome::Blocked(_) => self.render_view(),
            SubmitOutcome::Advanced(Navigation::Unchanged) => Ok(()),
            SubmitOutcome::Advanced(_) => self.render_view(),
            SubmitOutcome::AlreadyPending => Ok(()),
        }
    }

    fn complete_submission(&self, generation: u64) -> Result<()> {
        let confirmation = self.forms.borrow_mut().complete_submission(generation)?;
        dom::by_id(CONTAINER_ID)?.set_inner_html(&confirmation);
        Ok(())
    }

    fn field_changed(&self, event: &Event) -> Result<()> {
        let Some(element) = dom::event_element(event) else {
            return Ok(());
        };
        let Some((name, value)) = read_field(&element) else {
            return Ok(());
        };
        if let Some(readout) = range_readout(&element)? {
            if let FieldValue::Text(text) = &value {
                readout.set_text_content(Some(text));
            }
        }
        let status = match self.forms.borrow_mut().set_value(&name, value) {
            Ok(status) => status,
            Err(FormError::UnknownField(field)) => {
                tracing::debug!(%field, "input outside the template");
                return Ok(());
            }
            Err(err) => return Err(err.into()),
        };
        if let Some(group) = element.closest(".form-group")? {
            dom::apply_status(&group, status)?;
        }
        Ok(())
    }

    /// Projects the controller's view onto the open form.
    fn render_view(&self) -> Result<()> {
        let Some(view) = self.forms.borrow().view() else {
            return Ok(());
        };
        let ui = self.forms.borrow().registry().ui().clone();
        apply_view(&dom::by_id(FORM_ID)?, &view, &ui)
    }
}

fn apply_view(form: &Element, view: &FormView, ui: &leadform::UiText) -> Result<()> {
    form.set_attribute("data-current-step", &view.current_step.to_string())?;

    for step in dom::query_all(form, ".form-step")? {
        let index = step
            .get_attribute("data-step")
            .and_then(|s| s.parse::<usize>().ok());
        dom::set_visible(&step, index == Some(view.current_step), "block")?;
    }

    if let Some(progress) = view.progress {
        if let Some(fill) = dom::document()?.get_element_by_id(PROGRESS_FILL_ID) {
            dom::set_style(&fill, "width", &format!("{progress}%"))?;
        }
    }

    if let Some(back) = form.query_selector(".form-nav-back")? {
        dom::set_visible(&back, view.back_visible, "inline-flex")?;
    }
    if let Some(next) = form.query_selector(".form-nav-next")? {
        dom::set_visible(&next, view.next_visible, "inline-flex")?;
    }
    if let Some(submit) = form.query_selector(".form-submit")? {
        dom::set_visible(&submit, view.submit_visible, "inline-flex")?;
        if let Some(button) = submit.dyn_ref::<HtmlButtonElement>() {
            button.set_disabled(!view.submit_enabled);
        }
        if view.busy {
            submit.set_inner_html(&submitting_label(ui));
        }
    }

    for group in dom::query_all(form, ".form-group")? {
        let Some(name) = group.get_attribute("data-field") else {
            continue;
        };
        if let Some(status) = view.statuses.get(&name) {
            dom::apply_status(&group, *status)?;
        }
    }
    Ok(())
}

/// Reads the name and current value of a form control.
fn read_field(element: &Element) -> Option<(String, FieldValue)> {
    if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
        let value = if input.type_() == "checkbox" {
            FieldValue::Checked(input.checked())
        } else {
            FieldValue::Text(input.value())
        };
        return Some((input.name(), value));
    }
    if let Some(select) = element.dyn_ref::<HtmlSelectElement>() {
        return Some((select.name(), FieldValue::Text(select.value())));
    }
    element
        .dyn_ref::<HtmlTextAreaElement>()
        .map(|area| (area.name(), FieldValue::Text(area.value())))
}

/// The live readout next to a range slider.
fn range_readout(element: &Element) -> Result<Option<HtmlElement>> {
    let Some(container) = element.closest(".range-container")? else {
        return Ok(None);
    };
    Ok(container
        .query_selector(".range-value")?
        .and_then(|e| e.dyn_into::<HtmlElement>().ok()))
}
