//! # landing-wasm
//!
//! The landing page's interaction layer, compiled to WebAssembly.
//!
//! Forms come from the [`leadform`] engine; this crate only binds them and
//! the page's decorative effects to the DOM.
//!
//! ## Quick Start (JavaScript)
//!
//! ```javascript
//! import init, { LandingPage } from 'landing-wasm';
//!
//! async function main() {
//!     await init();
//!     const page = new LandingPage();
//!
//!     document.querySelector('#book-demo')
//!         .addEventListener('click', () => page.openForm('demo'));
//! }
//!
//! main();
//! ```
//!
//! Any element with `data-open-form="<template id>"` opens that form, and
//! any element with `data-open-video` opens the video lightbox, without
//! extra JavaScript.

#![forbid(unsafe_code)]

// Use wee_alloc for smaller binaries (optional)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

use std::rc::Rc;

use leadform::{FormController, LandingConfig, Language, TemplateRegistry};
use wasm_bindgen::prelude::*;

pub mod dom;
mod effects;
mod forms;
pub mod logging;
mod page;

pub use dom::DomError;
pub use effects::{LIGHTBOX_ID, LIGHTBOX_IFRAME_ID};
pub use forms::{CONTAINER_ID, MODAL_ID};

use page::Page;

#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Module version information.
#[must_use]
#[wasm_bindgen(js_name = "version")]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Check if the module is properly initialized.
#[must_use]
#[wasm_bindgen(js_name = "isReady")]
#[allow(clippy::missing_const_for_fn)] // wasm_bindgen doesn't support const fn
pub fn is_ready() -> bool {
    true
}

/// A wired landing page.
///
/// Keep the instance alive for as long as the page should stay interactive;
/// dropping it (`page.free()` in JavaScript) detaches every listener.
#[wasm_bindgen]
pub struct LandingPage {
    page: Rc<Page>,
}

#[wasm_bindgen]
impl LandingPage {
    /// Wires the current document with the default configuration.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<LandingPage, JsValue> {
        Ok(Self::wire(LandingConfig::new())?)
    }

    /// Wires the current document with a JSON configuration.
    ///
    /// Keys that are left out keep their defaults.
    #[wasm_bindgen(js_name = "withConfig")]
    pub fn with_config(json: &str) -> Result<LandingPage, JsValue> {
        let config = LandingConfig::from_json(json).map_err(DomError::from)?;
        Ok(Self::wire(config)?)
    }

    /// Opens the form template `id`. Unknown ids are ignored.
    #[wasm_bindgen(js_name = "openForm")]
    pub fn open_form(&self, id: &str) -> Result<(), JsValue> {
        settle("openForm", self.page.open_form(id))
    }

    /// Closes the form modal, abandoning any pending submission.
    #[wasm_bindgen(js_name = "closeForm")]
    pub fn close_form(&self) -> Result<(), JsValue> {
        settle("closeForm", self.page.close_form())
    }

    /// Moves a stepped form forward if the current step is complete.
    #[wasm_bindgen(js_name = "nextStep")]
    pub fn next_step(&self) -> Result<(), JsValue> {
        settle("nextStep", self.page.next_step())
    }

    /// Moves a stepped form back one step.
    #[wasm_bindgen(js_name = "previousStep")]
    pub fn previous_step(&self) -> Result<(), JsValue> {
        settle("previousStep", self.page.previous_step())
    }

    #[wasm_bindgen(js_name = "openVideoLightbox")]
    pub fn open_video_lightbox(&self) -> Result<(), JsValue> {
        settle("openVideoLightbox", self.page.open_video())
    }

    #[wasm_bindgen(js_name = "closeVideoLightbox")]
    pub fn close_video_lightbox(&self) -> Result<(), JsValue> {
        settle("closeVideoLightbox", self.page.close_video())
    }

    /// Language code the page was wired for (`en` or `de`).
    #[must_use]
    pub fn language(&self) -> String {
        self.page.language.code().to_string()
    }

    /// Id of the open form template, if any.
    #[must_use]
    #[wasm_bindgen(js_name = "activeForm")]
    pub fn active_form(&self) -> Option<String> {
        self.page
            .forms
            .borrow()
            .active()
            .map(|form| form.template_id().to_string())
    }
}

/// Converts a call's outcome for JavaScript.
///
/// Benign failures such as stepping with no open form are logged and
/// resolve normally; everything else throws.
fn settle(context: &str, result: dom::Result<()>) -> Result<(), JsValue> {
    match result {
        Err(err) if err.is_benign() => {
            page::report(context, &err);
            Ok(())
        }
        other => Ok(other?),
    }
}

impl LandingPage {
    fn wire(config: LandingConfig) -> dom::Result<Self> {
        logging::init(config.log_level.as_tracing());

        let path = dom::window()?.location().pathname()?;
        let language = Language::from_path(&path, &config.german_marker);
        let registry = TemplateRegistry::new(language)?;
        tracing::info!(
            language = language.code(),
            templates = registry.len(),
            "wiring landing page"
        );

        let page = Rc::new(Page::new(config, language, FormController::new(registry)));
        page.wire_forms()?;
        page.wire_effects()?;
        Ok(Self { page })
    }
}
