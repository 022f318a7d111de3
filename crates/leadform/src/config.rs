//! Page-level configuration.
//!
//! [`LandingConfig`] holds every tunable of the landing page: timings,
//! thresholds, the language marker and the log level. Pages pass a partial
//! JSON object; anything omitted keeps its default.
//!
//! ```
//! use leadform::LandingConfig;
//!
//! let config = LandingConfig::from_json(r#"{ "submission_delay_ms": 500 }"#).unwrap();
//! assert_eq!(config.submission_delay_ms, 500);
//! assert_eq!(config.navbar_scroll_threshold, 50.0);
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::language::DEFAULT_GERMAN_MARKER;

/// Embed URL used by the video lightbox unless configured otherwise.
pub const DEFAULT_VIDEO_EMBED_URL: &str = "https://www.youtube.com/embed/dQw4w9WgXcQ";

/// Runtime configuration for the landing page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LandingConfig {
    // ========================================================================
    // Forms
    // ========================================================================
    /// Simulated processing time between submit and confirmation.
    pub submission_delay_ms: u32,

    // ========================================================================
    // Navigation
    // ========================================================================
    /// Scroll offset in pixels past which the navbar gets `scrolled`.
    pub navbar_scroll_threshold: f64,

    /// How long a tapped nav link keeps its `tapped` class.
    pub tap_feedback_ms: u32,

    // ========================================================================
    // Effects
    // ========================================================================
    /// Intersection ratio at which reveal targets animate.
    pub reveal_threshold: f64,

    /// Intersection ratio at which the hero stats start counting.
    pub stats_threshold: f64,

    /// Total stat counter animation time.
    pub counter_duration_ms: u32,

    /// Interval between stat counter updates.
    pub counter_tick_ms: u32,

    /// Lightbox iframe source; `?autoplay=1` is appended on open.
    pub video_embed_url: String,

    // ========================================================================
    // Language & Logging
    // ========================================================================
    /// Path substring selecting German.
    pub german_marker: String,

    /// Most verbose level forwarded to the console.
    pub log_level: LogLevel,
}

impl Default for LandingConfig {
    fn default() -> Self {
        Self {
            submission_delay_ms: 2000,
            navbar_scroll_threshold: 50.0,
            tap_feedback_ms: 500,
            reveal_threshold: 0.2,
            stats_threshold: 0.5,
            counter_duration_ms: 2000,
            counter_tick_ms: 16,
            video_embed_url: DEFAULT_VIDEO_EMBED_URL.to_string(),
            german_marker: DEFAULT_GERMAN_MARKER.to_string(),
            log_level: LogLevel::Info,
        }
    }
}

impl LandingConfig {
    /// Create a new config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a JSON object over the defaults and validates the result.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] for malformed JSON or unknown keys, and
    /// the matching variant when a value is out of range.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Json(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first setting that is out of range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, ratio) in [
            ("reveal_threshold", self.reveal_threshold),
            ("stats_threshold", self.stats_threshold),
        ] {
            if !(0.0..=1.0).contains(&ratio) {
                return Err(ConfigError::Ratio { name, value: ratio });
            }
        }
        if !self.navbar_scroll_threshold.is_finite() || self.navbar_scroll_threshold < 0.0 {
            return Err(ConfigError::ScrollThreshold(self.navbar_scroll_threshold));
        }
        if self.counter_tick_ms == 0 || self.counter_tick_ms > self.counter_duration_ms {
            return Err(ConfigError::CounterTiming {
                tick_ms: self.counter_tick_ms,
                duration_ms: self.counter_duration_ms,
            });
        }
        if self.video_embed_url.trim().is_empty() {
            return Err(ConfigError::Empty("video_embed_url"));
        }
        if self.german_marker.is_empty() {
            return Err(ConfigError::Empty("german_marker"));
        }
        Ok(())
    }
}

/// Log verbosity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Errors only.
    Error,
    /// Warnings and errors.
    Warn,
    /// Lifecycle events.
    #[default]
    Info,
    /// Step and validation detail.
    Debug,
    /// Everything.
    Trace,
}

impl LogLevel {
    /// The matching `tracing` level.
    #[must_use]
    pub const fn as_tracing(self) -> tracing::Level {
        match self {
            Self::Error => tracing::Level::ERROR,
            Self::Warn => tracing::Level::WARN,
            Self::Info => tracing::Level::INFO,
            Self::Debug => tracing::Level::DEBUG,
            Self::Trace => tracing::Level::TRACE,
        }
    }
}

/// Configuration error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// The JSON could not be parsed.
    #[error("invalid configuration JSON: {0}")]
    Json(String),

    /// An intersection ratio lies outside `0.0..=1.0`.
    #[error("{name} must be between 0 and 1, got {value}")]
    Ratio {
        /// Setting name.
        name: &'static str,
        /// Rejected value.
        value: f64,
    },

    /// The navbar threshold is negative or not finite.
    #[error("navbar_scroll_threshold must be a non-negative number, got {0}")]
    ScrollThreshold(f64),

    /// The counter tick is zero or longer than the whole animation.
    #[error("counter_tick_ms ({tick_ms}) must be between 1 and counter_duration_ms ({duration_ms})")]
    CounterTiming {
        /// Tick interval.
        tick_ms: u32,
        /// Total duration.
        duration_ms: u32,
    },

    /// A string setting is empty.
    #[error("{0} must not be empty")]
    Empty(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_default() {
        let config = LandingConfig::default();
        assert_eq!(config.submission_delay_ms, 2000);
        assert_eq!(config.counter_tick_ms, 16);
        assert_eq!(config.german_marker, "-de.html");
        assert_eq!(config.log_level, LogLevel::Info);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn config_new_equals_default() {
        assert_eq!(LandingConfig::new(), LandingConfig::default());
    }

    #[test]
    fn config_partial_json_keeps_defaults() {
        let config =
            LandingConfig::from_json(r#"{ "reveal_threshold": 0.5, "log_level": "debug" }"#)
                .unwrap();
        assert_eq!(config.reveal_threshold, 0.5);
        assert_eq!(config.log_level.as_tracing(), tracing::Level::DEBUG);
        assert_eq!(config.submission_delay_ms, 2000);
    }

    #[test]
    fn config_empty_object_is_default() {
        assert_eq!(LandingConfig::from_json("{}").unwrap(), LandingConfig::default());
    }

    #[test]
    fn config_rejects_unknown_key() {
        assert!(matches!(
            LandingConfig::from_json(r#"{ "parallax": true }"#),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn config_rejects_bad_ratio() {
        assert_eq!(
            LandingConfig::from_json(r#"{ "stats_threshold": 1.5 }"#),
            Err(ConfigError::Ratio {
                name: "stats_threshold",
                value: 1.5
            })
        );
    }

    #[test]
    fn config_rejects_bad_counter_timing() {
        assert!(matches!(
            LandingConfig::from_json(r#"{ "counter_tick_ms": 0 }"#),
            Err(ConfigError::CounterTiming { .. })
        ));
        assert!(matches!(
            LandingConfig::from_json(r#"{ "counter_duration_ms": 10, "counter_tick_ms": 16 }"#),
            Err(ConfigError::CounterTiming { .. })
        ));
    }

    #[test]
    fn config_rejects_empty_marker() {
        assert_eq!(
            LandingConfig::from_json(r#"{ "german_marker": "" }"#),
            Err(ConfigError::Empty("german_marker"))
        );
    }

    #[test]
    fn config_serialization() {
        let config = LandingConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains(r#""log_level":"info""#));
    }
}
