//! Submission payloads and their delivery seam.

use std::collections::BTreeMap;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::field::FieldValue;

/// Keys the payload reserves for its own metadata.
pub const RESERVED_KEYS: [&str; 2] = ["templateId", "timestamp"];

/// Snapshot of a submitted form.
///
/// Serializes to a flat JSON object: every field name maps to its string or
/// boolean value, next to `templateId` and an ISO-8601 UTC `timestamp`.
///
/// ```
/// use std::collections::BTreeMap;
/// use chrono::{TimeZone, Utc};
/// use leadform::{FieldValue, SubmissionPayload};
///
/// let mut values = BTreeMap::new();
/// values.insert("email".to_string(), FieldValue::text("ops@example.com"));
/// let at = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
/// let payload = SubmissionPayload::capture("roi", &values, at);
///
/// let json = payload.to_json().unwrap();
/// assert!(json.contains(r#""templateId":"roi""#));
/// assert!(json.contains(r#""timestamp":"2026-01-02T03:04:05.000Z""#));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionPayload {
    /// Template the values were entered into.
    pub template_id: String,
    /// Capture time, RFC 3339 with millisecond precision.
    pub timestamp: String,
    /// Values keyed by field name.
    #[serde(flatten)]
    pub fields: BTreeMap<String, FieldValue>,
}

impl SubmissionPayload {
    /// Snapshots `values` at time `at`.
    ///
    /// Fields named like a reserved key are left out so that they cannot
    /// shadow the metadata.
    #[must_use]
    pub fn capture(
        template_id: impl Into<String>,
        values: &BTreeMap<String, FieldValue>,
        at: DateTime<Utc>,
    ) -> Self {
        let fields = values
            .iter()
            .filter(|(name, _)| !RESERVED_KEYS.contains(&name.as_str()))
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect();
        Self {
            template_id: template_id.into(),
            timestamp: at.to_rfc3339_opts(SecondsFormat::Millis, true),
            fields,
        }
    }

    /// Returns the value submitted for `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Serializes the payload as compact JSON.
    ///
    /// # Errors
    ///
    /// Propagates `serde_json` serialization errors.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

// -----------------------------------------------------------------------------
// Delivery
// -----------------------------------------------------------------------------

/// Receives completed submissions.
///
/// Delivery happens once per successful submission, after the simulated
/// processing delay. There is no retry.
pub trait SubmissionSink {
    /// Hands over a completed submission.
    fn deliver(&mut self, payload: &SubmissionPayload);
}

/// Sink that records submissions in the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl SubmissionSink for LogSink {
    fn deliver(&mut self, payload: &SubmissionPayload) {
        match payload.to_json() {
            Ok(json) => tracing::info!(template = %payload.template_id, %json, "form submitted"),
            Err(err) => tracing::warn!(template = %payload.template_id, %err, "form submitted, payload not serializable"),
        }
    }
}

/// Collects submissions in memory.
impl SubmissionSink for Vec<SubmissionPayload> {
    fn deliver(&mut self, payload: &SubmissionPayload) {
        self.push(payload.clone());
    }
}
