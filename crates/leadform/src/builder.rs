//! Composes templates into complete form fragments.

use std::fmt::Write as _;

use crate::render::{escape_html, render_field};
use crate::template::{FormBody, FormTemplate, UiText};

/// Id of the generated `<form>` element.
pub const FORM_ID: &str = "dynamic-form";

/// Id of the progress fill element in stepped forms.
pub const PROGRESS_FILL_ID: &str = "form-progress-fill";

const HIDDEN: &str = r#" style="display: none;""#;

/// Builds the markup for a template.
///
/// Stepped templates get a progress bar, every step with only the first one
/// visible, and Back/Next/Submit controls where Back and Submit start hidden.
/// Flat templates get all fields and a single Submit control.
#[must_use]
pub fn build_form(template: &FormTemplate, ui: &UiText) -> String {
    let mut html = String::new();
    let id = escape_html(&template.id);

    if template.body.is_stepped() {
        let _ = write!(
            html,
            r#"<div class="form-progress-bar"><div class="form-progress-fill" id="{PROGRESS_FILL_ID}"></div></div>"#
        );
    }
    let _ = write!(
        html,
        r#"<div class="form-header"><h2>{}</h2><p>{}</p></div>"#,
        escape_html(&template.title),
        escape_html(&template.subtitle)
    );

    match &template.body {
        FormBody::Stepped(steps) => {
            let _ = write!(
                html,
                r#"<form id="{FORM_ID}" data-template="{id}" data-current-step="1" data-total-steps="{}" novalidate><div class="form-fields-scroll">"#,
                steps.len()
            );
            for step in steps {
                let style = if step.index == 1 { "" } else { HIDDEN };
                let _ = write!(
                    html,
                    r#"<div class="form-step" data-step="{}"{style}><h3 class="step-title">{}</h3>"#,
                    step.index,
                    escape_html(&step.title)
                );
                for field in &step.fields {
                    html.push_str(&render_field(field, ui));
                }
                html.push_str("</div>");
            }
            let _ = write!(
                html,
                concat!(
                    r#"</div><div class="form-navigation">"#,
                    r#"<button type="button" class="form-nav-btn form-nav-back"{hidden}><i class="fas fa-arrow-left"></i> {back}</button>"#,
                    r#"<button type="button" class="form-nav-btn form-nav-next">{next} <i class="fas fa-arrow-right"></i></button>"#,
                    r#"<button type="submit" class="form-submit"{hidden}><i class="fas fa-shield-alt"></i> {submit}</button>"#,
                    "</div></form>"
                ),
                hidden = HIDDEN,
                back = escape_html(&ui.back),
                next = escape_html(&ui.next),
                submit = escape_html(&ui.submit_stepped),
            );
        }
        FormBody::Flat(fields) => {
            let _ = write!(
                html,
                r#"<form id="{FORM_ID}" data-template="{id}" novalidate><div class="form-fields-scroll">"#
            );
            for field in fields {
                html.push_str(&render_field(field, ui));
            }
            let _ = write!(
                html,
                r#"</div><button type="submit" class="form-submit"><i class="fas fa-paper-plane"></i> {}</button></form>"#,
                escape_html(&ui.submit)
            );
        }
    }
    html
}

/// Markup of the busy submit button.
#[must_use]
pub fn submitting_label(ui: &UiText) -> String {
    format!(
        r#"<i class="fas fa-spinner fa-spin"></i> {}"#,
        escape_html(&ui.submitting)
    )
}

/// The view that replaces the form after a successful submission.
#[must_use]
pub fn confirmation_view(ui: &UiText) -> String {
    format!(
        concat!(
            r#"<div class="form-success">"#,
            r#"<div class="success-icon"><i class="fas fa-check-circle"></i></div>"#,
            "<h2>{title}</h2><p>{message}</p>",
            r#"<button type="button" class="cta-button primary" data-action="close-form"><i class="fas fa-times"></i> {close}</button>"#,
            "</div>"
        ),
        title = escape_html(&ui.success_title),
        message = escape_html(&ui.success_message),
        close = escape_html(&ui.close),
    )
}
