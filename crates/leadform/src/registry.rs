//! Template lookup for one display language.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::catalog::Catalog;
use crate::error::{CatalogError, FormError, Result};
use crate::language::Language;
use crate::template::{FormTemplate, UiText};

/// Immutable mapping from template id to resolved template.
///
/// Built once per page from the active language; never mutated afterwards.
/// Templates are shared with open form instances through [`Arc`].
#[derive(Debug, Clone)]
pub struct TemplateRegistry {
    language: Language,
    ui: UiText,
    templates: BTreeMap<String, Arc<FormTemplate>>,
}

impl TemplateRegistry {
    /// Resolves the built-in catalog for `language`.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the embedded catalog is malformed.
    pub fn new(language: Language) -> std::result::Result<Self, CatalogError> {
        Ok(Self::from_catalog(&Catalog::builtin()?, language))
    }

    /// Parses a custom catalog and resolves it for `language`.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the source fails to parse or check.
    pub fn from_toml(src: &str, language: Language) -> std::result::Result<Self, CatalogError> {
        Ok(Self::from_catalog(&Catalog::parse(src)?, language))
    }

    /// Resolves an already parsed catalog.
    #[must_use]
    pub fn from_catalog(catalog: &Catalog, language: Language) -> Self {
        let templates = catalog
            .resolve(language)
            .into_iter()
            .map(|t| (t.id.clone(), Arc::new(t)))
            .collect();
        Self {
            language,
            ui: catalog.ui(language),
            templates,
        }
    }

    /// Looks up a template by id.
    #[must_use]
    pub fn lookup(&self, id: &str) -> Option<&Arc<FormTemplate>> {
        self.templates.get(id)
    }

    /// Looks up a template by id, failing for unknown ids.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::UnknownTemplate`] if no template has this id.
    pub fn get(&self, id: &str) -> Result<Arc<FormTemplate>> {
        self.lookup(id)
            .cloned()
            .ok_or_else(|| FormError::unknown_template(id))
    }

    /// Shared interface strings.
    #[must_use]
    pub const fn ui(&self) -> &UiText {
        &self.ui
    }

    /// The language templates were resolved in.
    #[must_use]
    pub const fn language(&self) -> Language {
        self.language
    }

    /// Registered ids in sorted order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.templates.keys().map(String::as_str)
    }

    /// Number of templates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Returns true if the registry holds no templates.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}
