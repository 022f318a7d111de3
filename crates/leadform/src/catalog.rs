//! Bilingual template catalog.
//!
//! The catalog is TOML data: a `[ui]` table of interface strings and a list
//! of `[[templates]]`. Every visible string is an `{ en, de }` pair. Parsing
//! and structural checks happen once; [`Catalog::resolve`] then produces
//! single-language [`FormTemplate`]s.
//!
//! ```toml
//! [[templates]]
//! id = "callback"
//! title = { en = "Call me back", de = "Rückruf" }
//! subtitle = { en = "We answer within a day", de = "Wir melden uns" }
//!
//! [[templates.fields]]
//! kind = "tel"
//! name = "phone"
//! label = { en = "Phone", de = "Telefon" }
//! required = true
//! ```

use std::collections::HashSet;

use serde::Deserialize;

use crate::error::CatalogError;
use crate::field::{FieldDescriptor, FieldKind};
use crate::language::{Language, Localized};
use crate::template::{FormBody, FormTemplate, Step, UiText};

/// The catalog compiled into the crate.
pub const BUILTIN_CATALOG: &str = include_str!("../catalog/templates.toml");

// -----------------------------------------------------------------------------
// Document schema
// -----------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct UiDoc {
    back: Localized,
    next: Localized,
    submit: Localized,
    submit_stepped: Localized,
    select_prefix: Localized,
    submitting: Localized,
    success_title: Localized,
    success_message: Localized,
    close: Localized,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct FieldDoc {
    kind: FieldKind,
    name: String,
    label: Localized,
    #[serde(default)]
    required: bool,
    options: Option<Localized<Vec<String>>>,
    min: Option<i64>,
    max: Option<i64>,
    default: Option<String>,
    placeholder: Option<Localized>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct StepDoc {
    step: usize,
    title: Localized,
    #[serde(default)]
    fields: Vec<FieldDoc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct TemplateDoc {
    id: String,
    title: Localized,
    subtitle: Localized,
    fields: Option<Vec<FieldDoc>>,
    steps: Option<Vec<StepDoc>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogDoc {
    ui: UiDoc,
    #[serde(default)]
    templates: Vec<TemplateDoc>,
}

// -----------------------------------------------------------------------------
// Catalog
// -----------------------------------------------------------------------------

/// A parsed and checked template catalog holding both languages.
#[derive(Debug, Clone)]
pub struct Catalog {
    doc: CatalogDoc,
}

impl Catalog {
    /// Parses the catalog compiled into the crate.
    ///
    /// # Errors
    ///
    /// Only fails if the embedded catalog is broken, which the test suite
    /// guards against.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::parse(BUILTIN_CATALOG)
    }

    /// Parses and checks a catalog from TOML source.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Parse`] for malformed TOML or unknown keys and
    /// a structural variant when a template breaks an invariant: both or
    /// neither of `fields`/`steps`, non-contiguous step numbers, repeated
    /// field names or template ids, option-less selects, or unbounded ranges.
    pub fn parse(src: &str) -> Result<Self, CatalogError> {
        let doc: CatalogDoc = toml::from_str(src)?;
        let mut ids = HashSet::new();
        for template in &doc.templates {
            if !ids.insert(template.id.as_str()) {
                return Err(CatalogError::DuplicateTemplate(template.id.clone()));
            }
            check_template(template)?;
        }
        tracing::debug!(templates = doc.templates.len(), "catalog parsed");
        Ok(Self { doc })
    }

    /// Template ids in catalog order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.doc.templates.iter().map(|t| t.id.as_str())
    }

    /// Interface strings for one language.
    #[must_use]
    pub fn ui(&self, language: Language) -> UiText {
        let ui = &self.doc.ui;
        UiText {
            back: ui.back.resolve(language),
            next: ui.next.resolve(language),
            submit: ui.submit.resolve(language),
            submit_stepped: ui.submit_stepped.resolve(language),
            select_prefix: ui.select_prefix.resolve(language),
            submitting: ui.submitting.resolve(language),
            success_title: ui.success_title.resolve(language),
            success_message: ui.success_message.resolve(language),
            close: ui.close.resolve(language),
        }
    }

    /// Resolves every template into one language, in catalog order.
    #[must_use]
    pub fn resolve(&self, language: Language) -> Vec<FormTemplate> {
        self.doc
            .templates
            .iter()
            .map(|t| resolve_template(t, language))
            .collect()
    }
}

fn check_template(template: &TemplateDoc) -> Result<(), CatalogError> {
    let id = &template.id;
    let fields: Vec<&FieldDoc> = match (&template.fields, &template.steps) {
        (Some(_), Some(_)) => return Err(CatalogError::MixedBody(id.clone())),
        (None, None) => return Err(CatalogError::EmptyBody(id.clone())),
        (None, Some(steps)) if steps.is_empty() => {
            return Err(CatalogError::EmptyBody(id.clone()));
        }
        (Some(fields), None) => fields.iter().collect(),
        (None, Some(steps)) => {
            for (position, step) in steps.iter().enumerate() {
                if step.step != position + 1 {
                    return Err(CatalogError::StepIndex {
                        template: id.clone(),
                        expected: position + 1,
                        found: step.step,
                    });
                }
            }
            steps.iter().flat_map(|s| s.fields.iter()).collect()
        }
    };

    let mut names = HashSet::new();
    for field in fields {
        if !names.insert(field.name.as_str()) {
            return Err(CatalogError::DuplicateField {
                template: id.clone(),
                field: field.name.clone(),
            });
        }
        match field.kind {
            FieldKind::Select => {
                let empty = field
                    .options
                    .as_ref()
                    .is_none_or(|o| o.en.is_empty() || o.de.is_empty());
                if empty {
                    return Err(CatalogError::MissingOptions {
                        template: id.clone(),
                        field: field.name.clone(),
                    });
                }
            }
            FieldKind::Range => {
                let bounded = matches!((field.min, field.max), (Some(lo), Some(hi)) if lo <= hi);
                if !bounded {
                    return Err(CatalogError::InvalidBounds {
                        template: id.clone(),
                        field: field.name.clone(),
                    });
                }
            }
            _ => {}
        }
    }
    Ok(())
}

fn resolve_field(field: &FieldDoc, language: Language) -> FieldDescriptor {
    FieldDescriptor {
        kind: field.kind,
        name: field.name.clone(),
        label: field.label.resolve(language),
        required: field.required,
        options: field
            .options
            .as_ref()
            .map(|o| o.resolve(language))
            .unwrap_or_default(),
        min: field.min,
        max: field.max,
        default: field.default.clone(),
        placeholder: field.placeholder.as_ref().map(|p| p.resolve(language)),
    }
}

fn resolve_template(template: &TemplateDoc, language: Language) -> FormTemplate {
    let body = match (&template.fields, &template.steps) {
        (_, Some(steps)) => FormBody::Stepped(
            steps
                .iter()
                .map(|s| Step {
                    index: s.step,
                    title: s.title.resolve(language),
                    fields: s.fields.iter().map(|f| resolve_field(f, language)).collect(),
                })
                .collect(),
        ),
        (Some(fields), None) => {
            FormBody::Flat(fields.iter().map(|f| resolve_field(f, language)).collect())
        }
        (None, None) => FormBody::Flat(Vec::new()),
    };
    FormTemplate {
        id: template.id.clone(),
        title: template.title.resolve(language),
        subtitle: template.subtitle.resolve(language),
        body,
    }
}
