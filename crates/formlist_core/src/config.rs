//! Tunable rules, storage keys and delays shared by both apps.
//!
//! # Responsibility
//! - Keep length thresholds and the email pattern out of validation code.
//! - Own storage keys and debounce delays used by app controllers.
//! - Resolve the on-disk database path for terminal hosts.
//!
//! # Invariants
//! - Defaults reproduce the shipped behavior (2/10/3 chars, 300/400 ms).
//! - A custom email pattern is compiled once, at construction.

use once_cell::sync::Lazy;
use regex::Regex;
use std::path::PathBuf;
use std::time::Duration;

/// Storage key for the contact message history.
pub const CONTACT_STORAGE_KEY: &str = "contact_messages";
/// Storage key for the todo list.
pub const TODO_STORAGE_KEY: &str = "todo_list_v1";

/// Default pattern: `nonspace+@nonspace+.nonspace+`, with no extra `@`.
pub const DEFAULT_EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

const DB_PATH_ENV: &str = "FORMLIST_DB_PATH";
const DB_FILE_NAME: &str = "formlist.sqlite3";

static DEFAULT_EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(DEFAULT_EMAIL_PATTERN).expect("valid default email regex"));

/// Validation thresholds for the contact form.
#[derive(Debug, Clone)]
pub struct ContactRules {
    /// Minimum trimmed name length, in chars.
    pub name_min_chars: usize,
    /// Minimum trimmed message body length, in chars.
    pub message_min_chars: usize,
    email_pattern: Regex,
}

impl ContactRules {
    /// Replaces the email pattern with a caller-provided one.
    ///
    /// # Errors
    /// - Returns the regex compile error when `pattern` is invalid.
    pub fn with_email_pattern(mut self, pattern: &str) -> Result<Self, regex::Error> {
        self.email_pattern = Regex::new(pattern)?;
        Ok(self)
    }

    /// Active email pattern.
    pub fn email_pattern(&self) -> &Regex {
        &self.email_pattern
    }
}

impl Default for ContactRules {
    fn default() -> Self {
        Self {
            name_min_chars: 2,
            message_min_chars: 10,
            email_pattern: DEFAULT_EMAIL_RE.clone(),
        }
    }
}

/// Validation thresholds for the todo form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TodoRules {
    /// Minimum trimmed todo text length, in chars.
    pub min_chars: usize,
}

impl Default for TodoRules {
    fn default() -> Self {
        Self { min_chars: 3 }
    }
}

/// Quiet periods applied to keystroke-driven work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceConfig {
    /// Per-field validation delay in the contact form.
    pub contact_field: Duration,
    /// Re-render delay for the todo search box.
    pub todo_search: Duration,
}

impl Default for DebounceConfig {
    fn default() -> Self {
        Self {
            contact_field: Duration::from_millis(300),
            todo_search: Duration::from_millis(400),
        }
    }
}

/// Resolves the SQLite file used by terminal hosts.
///
/// Order: explicit override, then `FORMLIST_DB_PATH`, then the temp dir.
pub fn resolve_db_path(explicit: Option<PathBuf>) -> PathBuf {
    if let Some(path) = explicit {
        return path;
    }
    if let Ok(raw) = std::env::var(DB_PATH_ENV) {
        let trimmed = raw.trim();
        if !trimmed.is_empty() {
            return PathBuf::from(trimmed);
        }
    }
    std::env::temp_dir().join(DB_FILE_NAME)
}

#[cfg(test)]
mod tests {
    use super::{resolve_db_path, ContactRules, DebounceConfig, TodoRules};
    use std::path::PathBuf;
    use std::time::Duration;

    #[test]
    fn defaults_match_shipped_thresholds() {
        let contact = ContactRules::default();
        assert_eq!(contact.name_min_chars, 2);
        assert_eq!(contact.message_min_chars, 10);
        assert_eq!(TodoRules::default().min_chars, 3);

        let delays = DebounceConfig::default();
        assert_eq!(delays.contact_field, Duration::from_millis(300));
        assert_eq!(delays.todo_search, Duration::from_millis(400));
    }

    #[test]
    fn custom_email_pattern_is_compiled() {
        let rules = ContactRules::default()
            .with_email_pattern(r"^.+@example\.org$")
            .unwrap();
        assert!(rules.email_pattern().is_match("me@example.org"));
        assert!(!rules.email_pattern().is_match("me@example.com"));
    }

    #[test]
    fn invalid_email_pattern_is_rejected() {
        assert!(ContactRules::default().with_email_pattern("(").is_err());
    }

    #[test]
    fn explicit_db_path_wins() {
        let path = PathBuf::from("/tmp/explicit.sqlite3");
        assert_eq!(resolve_db_path(Some(path.clone())), path);
    }
}
