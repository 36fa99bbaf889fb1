//! Todo item record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One todo entry.
///
/// `completed` is the only field mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoItem {
    pub id: String,
    pub text: String,
    pub completed: bool,
    /// Serialized as an RFC 3339 (ISO-8601) UTC string.
    pub created_at: DateTime<Utc>,
}

impl TodoItem {
    /// Creates an open todo with trimmed text.
    pub fn new(id: impl Into<String>, text: &str, created_at: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            text: text.trim().to_string(),
            completed: false,
            created_at,
        }
    }

    /// Flips the completion flag.
    pub fn toggle(&mut self) {
        self.completed = !self.completed;
    }

    pub fn is_active(&self) -> bool {
        !self.completed
    }
}
