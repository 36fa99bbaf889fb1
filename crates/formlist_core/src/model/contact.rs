//! Contact message record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One submitted contact form entry.
///
/// Immutable after creation; removed only by explicit deletion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    pub id: String,
    pub name: String,
    pub email: String,
    /// Body text.
    pub message: String,
    /// Unix epoch milliseconds at submission.
    pub timestamp: i64,
}

impl ContactMessage {
    /// Builds a message from raw form values, trimming each field.
    ///
    /// Callers must validate the values first; this constructor does not.
    pub fn from_form(
        id: impl Into<String>,
        name: &str,
        email: &str,
        message: &str,
        sent_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.trim().to_string(),
            email: email.trim().to_string(),
            message: message.trim().to_string(),
            timestamp: sent_at.timestamp_millis(),
        }
    }

    /// Submission time, or `None` when the stored timestamp is out of range.
    pub fn sent_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.timestamp)
    }
}
