//! DOM lookup helpers and the binding layer's error type.

use leadform::{CatalogError, ConfigError, FieldStatus, FormError};
use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, Window};

/// Errors raised while wiring or updating the page.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomError {
    /// There is no global `window` (not running in a browser).
    #[error("no global window")]
    NoWindow,

    /// The window has no document or the document has no body.
    #[error("document or body unavailable")]
    NoDocument,

    /// A required element is not on the page.
    #[error("missing element: {0}")]
    MissingElement(String),

    /// A DOM call threw.
    #[error("JavaScript error: {0}")]
    Js(String),

    /// The form engine refused an operation.
    #[error(transparent)]
    Form(#[from] FormError),

    /// The page configuration is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl DomError {
    /// Returns true for errors that only mean "nothing to do".
    #[must_use]
    pub const fn is_benign(&self) -> bool {
        match self {
            Self::Form(err) => err.is_benign(),
            _ => false,
        }
    }
}

impl From<CatalogError> for DomError {
    fn from(err: CatalogError) -> Self {
        Self::Form(err.into())
    }
}

impl From<JsValue> for DomError {
    fn from(value: JsValue) -> Self {
        Self::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

impl From<DomError> for JsValue {
    fn from(err: DomError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}

/// A specialized [`Result`] type for DOM operations.
pub type Result<T> = std::result::Result<T, DomError>;

/// The global window.
pub fn window() -> Result<Window> {
    web_sys::window().ok_or(DomError::NoWindow)
}

/// The window's document.
pub fn document() -> Result<Document> {
    window()?.document().ok_or(DomError::NoDocument)
}

/// The document body.
pub fn body() -> Result<HtmlElement> {
    document()?.body().ok_or(DomError::NoDocument)
}

/// Looks up a required element by id.
pub fn by_id(id: &str) -> Result<Element> {
    document()?
        .get_element_by_id(id)
        .ok_or_else(|| DomError::MissingElement(format!("#{id}")))
}

/// Every element under `root` matching `selector`.
pub fn query_all(root: &Element, selector: &str) -> Result<Vec<Element>> {
    let nodes = root.query_selector_all(selector)?;
    Ok((0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}

/// Every element in the document matching `selector`.
pub fn query_document(selector: &str) -> Result<Vec<Element>> {
    let nodes = document()?.query_selector_all(selector)?;
    Ok((0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}

/// Sets an inline style property on an element.
pub fn set_style(element: &Element, property: &str, value: &str) -> Result<()> {
    if let Some(html) = element.dyn_ref::<HtmlElement>() {
        html.style().set_property(property, value)?;
    }
    Ok(())
}

/// Shows an element with `display` or hides it with `display: none`.
pub fn set_visible(element: &Element, visible: bool, display: &str) -> Result<()> {
    set_style(element, "display", if visible { display } else { "none" })
}

/// Adds or removes a class.
pub fn set_class(element: &Element, class: &str, on: bool) -> Result<()> {
    element.class_list().toggle_with_force(class, on)?;
    Ok(())
}

/// Replaces the `success`/`error` styling of a field container.
pub fn apply_status(group: &Element, status: FieldStatus) -> Result<()> {
    set_class(group, "success", status == FieldStatus::Success)?;
    set_class(group, "error", status == FieldStatus::Error)
}

/// The element an event was dispatched to.
pub fn event_element(event: &web_sys::Event) -> Option<Element> {
    event.target().and_then(|t| t.dyn_into::<Element>().ok())
}
