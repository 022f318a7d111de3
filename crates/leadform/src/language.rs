//! Display language resolution and bilingual strings.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Path marker that selects German pages by default.
pub const DEFAULT_GERMAN_MARKER: &str = "-de.html";

/// The two display languages the landing page ships in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// English (default).
    #[default]
    En,
    /// German.
    De,
}

impl Language {
    /// Resolves the language from a page path.
    ///
    /// A path containing `marker` is German; every other path is English.
    ///
    /// # Example
    ///
    /// ```
    /// use leadform::Language;
    ///
    /// assert_eq!(Language::from_path("/index-de.html", "-de.html"), Language::De);
    /// assert_eq!(Language::from_path("/index.html", "-de.html"), Language::En);
    /// ```
    #[must_use]
    pub fn from_path(path: &str, marker: &str) -> Self {
        if !marker.is_empty() && path.contains(marker) {
            Self::De
        } else {
            Self::En
        }
    }

    /// Returns the two-letter language code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::De => "de",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A value carried in both display languages.
///
/// Catalog strings and option lists are stored this way and resolved once,
/// when a registry is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Localized<T = String> {
    /// English value.
    pub en: T,
    /// German value.
    pub de: T,
}

impl<T> Localized<T> {
    /// Creates a bilingual value.
    pub const fn new(en: T, de: T) -> Self {
        Self { en, de }
    }

    /// Returns the value for `language`.
    pub const fn get(&self, language: Language) -> &T {
        match language {
            Language::En => &self.en,
            Language::De => &self.de,
        }
    }
}

impl<T: Clone> Localized<T> {
    /// Returns an owned copy of the value for `language`.
    #[must_use]
    pub fn resolve(&self, language: Language) -> T {
        self.get(language).clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_path_german_marker() {
        assert_eq!(
            Language::from_path("/landing/index-de.html", DEFAULT_GERMAN_MARKER),
            Language::De
        );
        assert_eq!(
            Language::from_path("/landing/index.html", DEFAULT_GERMAN_MARKER),
            Language::En
        );
        assert_eq!(Language::from_path("/", DEFAULT_GERMAN_MARKER), Language::En);
    }

    #[test]
    fn test_empty_marker_is_english() {
        assert_eq!(Language::from_path("/index-de.html", ""), Language::En);
    }

    #[test]
    fn test_localized_get() {
        let text = Localized::new("Back".to_string(), "Zurück".to_string());
        assert_eq!(text.get(Language::En), "Back");
        assert_eq!(text.resolve(Language::De), "Zurück");
    }

    #[test]
    fn test_language_display() {
        assert_eq!(Language::De.to_string(), "de");
        assert_eq!(Language::default(), Language::En);
    }
}
