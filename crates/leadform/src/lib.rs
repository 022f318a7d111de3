#![forbid(unsafe_code)]

//! # Leadform
//!
//! Template-driven lead-capture forms for a marketing landing page.
//!
//! Leadform provides:
//! - A bilingual TOML catalog of form templates, resolved once per language
//! - Pure HTML rendering of fields and complete forms
//! - A per-form state machine with step navigation and required-field checks
//! - A two-phase submission lifecycle with a pluggable delivery sink
//! - Plain state for the page effects (navigation menu, scroll reveal, stat
//!   counters, video lightbox)
//!
//! Nothing here touches a browser. The `landing-wasm` crate projects the
//! state onto the DOM.
//!
//! ## Example
//!
//! ```
//! use leadform::{FieldValue, FormController, Language, Navigation, TemplateRegistry};
//!
//! let language = Language::from_path("/index-de.html", leadform::DEFAULT_GERMAN_MARKER);
//! let registry = TemplateRegistry::new(language)?;
//! let mut forms = FormController::new(registry);
//!
//! forms.open("demo")?;
//! forms.set_value("name", FieldValue::text("Ada"))?;
//! forms.set_value("email", FieldValue::text("ada@example.com"))?;
//! forms.set_value("phone", FieldValue::text("+49 30 1234"))?;
//! forms.set_value("company", FieldValue::text("Kitchen Co"))?;
//!
//! assert_eq!(forms.advance()?, Navigation::Moved { from: 1, to: 2 });
//! let view = forms.view().unwrap();
//! assert_eq!(view.progress, Some(100.0));
//! assert!(view.submit_visible);
//! # Ok::<(), leadform::FormError>(())
//! ```

pub mod builder;
pub mod catalog;
pub mod config;
pub mod controller;
pub mod effects;
pub mod error;
pub mod field;
pub mod instance;
pub mod language;
pub mod registry;
pub mod render;
pub mod submission;
pub mod template;

pub use builder::{build_form, confirmation_view, submitting_label};
pub use catalog::Catalog;
pub use config::{ConfigError, LandingConfig, LogLevel};
pub use controller::FormController;
pub use error::{CatalogError, FieldIssue, FormError, IssueKind, Result};
pub use field::{
    FieldDescriptor, FieldKind, FieldStatus, FieldValue, validate_datetime, validate_email,
    validate_number, validate_range, validate_tel,
};
pub use instance::{
    FormInstance, FormView, Navigation, SubmissionState, SubmitOutcome, progress_percent,
};
pub use language::{DEFAULT_GERMAN_MARKER, Language, Localized};
pub use registry::TemplateRegistry;
pub use render::{escape_html, render_field};
pub use submission::{LogSink, SubmissionPayload, SubmissionSink};
pub use template::{FormBody, FormTemplate, Step, UiText};
