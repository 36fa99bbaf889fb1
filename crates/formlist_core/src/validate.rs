//! Per-field form validation.
//!
//! # Responsibility
//! - Decide validity of raw form input and produce the inline message.
//!
//! # Invariants
//! - Validators are pure: same raw value and rules give the same result.
//! - Whitespace is trimmed before any length or pattern check.
//! - A valid result always carries an empty message.

use crate::config::{ContactRules, TodoRules};
use serde::Serialize;

const EMAIL_REQUIRED: &str = "Email is required.";
const EMAIL_INVALID: &str = "Please enter a valid email address.";

/// Outcome of validating one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldCheck {
    pub valid: bool,
    /// Inline error text; empty when `valid`.
    pub message: String,
}

impl FieldCheck {
    pub fn ok() -> Self {
        Self {
            valid: true,
            message: String::new(),
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            message: message.into(),
        }
    }

    /// Error text, or `None` when valid.
    pub fn error(&self) -> Option<&str> {
        (!self.valid).then_some(self.message.as_str())
    }
}

/// Contact form fields, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ContactField {
    Name,
    Email,
    Message,
}

impl ContactField {
    pub const ALL: [ContactField; 3] = [Self::Name, Self::Email, Self::Message];

    /// Form control name used by views and event targets.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Message => "message",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "name" => Some(Self::Name),
            "email" => Some(Self::Email),
            "message" => Some(Self::Message),
            _ => None,
        }
    }
}

/// Raw, unvalidated contact form values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactDraft {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactDraft {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            message: message.into(),
        }
    }

    pub fn get(&self, field: ContactField) -> &str {
        match field {
            ContactField::Name => &self.name,
            ContactField::Email => &self.email,
            ContactField::Message => &self.message,
        }
    }

    pub fn set(&mut self, field: ContactField, value: impl Into<String>) {
        let slot = match field {
            ContactField::Name => &mut self.name,
            ContactField::Email => &mut self.email,
            ContactField::Message => &mut self.message,
        };
        *slot = value.into();
    }
}

/// Validation result for the whole contact form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactCheck {
    pub name: FieldCheck,
    pub email: FieldCheck,
    pub message: FieldCheck,
}

impl ContactCheck {
    pub fn is_valid(&self) -> bool {
        self.name.valid && self.email.valid && self.message.valid
    }

    pub fn field(&self, field: ContactField) -> &FieldCheck {
        match field {
            ContactField::Name => &self.name,
            ContactField::Email => &self.email,
            ContactField::Message => &self.message,
        }
    }
}

pub fn validate_name(raw: &str, rules: &ContactRules) -> FieldCheck {
    min_chars(
        raw,
        rules.name_min_chars,
        format!("Name must be at least {} characters.", rules.name_min_chars),
    )
}

/// Checks presence first, then the configured pattern on the trimmed value.
pub fn validate_email(raw: &str, rules: &ContactRules) -> FieldCheck {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return FieldCheck::invalid(EMAIL_REQUIRED);
    }
    if !rules.email_pattern().is_match(trimmed) {
        return FieldCheck::invalid(EMAIL_INVALID);
    }
    FieldCheck::ok()
}

pub fn validate_message(raw: &str, rules: &ContactRules) -> FieldCheck {
    min_chars(
        raw,
        rules.message_min_chars,
        format!(
            "Message must be at least {} characters.",
            rules.message_min_chars
        ),
    )
}

pub fn validate_todo_text(raw: &str, rules: &TodoRules) -> FieldCheck {
    min_chars(
        raw,
        rules.min_chars,
        format!("Todo must be at least {} characters.", rules.min_chars),
    )
}

/// Dispatches to the validator for `field`.
pub fn validate_field(field: ContactField, raw: &str, rules: &ContactRules) -> FieldCheck {
    match field {
        ContactField::Name => validate_name(raw, rules),
        ContactField::Email => validate_email(raw, rules),
        ContactField::Message => validate_message(raw, rules),
    }
}

pub fn validate_contact(draft: &ContactDraft, rules: &ContactRules) -> ContactCheck {
    ContactCheck {
        name: validate_name(&draft.name, rules),
        email: validate_email(&draft.email, rules),
        message: validate_message(&draft.message, rules),
    }
}

fn min_chars(raw: &str, min: usize, message: String) -> FieldCheck {
    if raw.trim().chars().count() < min {
        FieldCheck::invalid(message)
    } else {
        FieldCheck::ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> ContactRules {
        ContactRules::default()
    }

    #[test]
    fn name_threshold_applies_after_trim() {
        assert!(!validate_name("", &rules()).valid);
        assert!(!validate_name("  A  ", &rules()).valid);
        assert!(validate_name(" Al ", &rules()).valid);
        assert_eq!(
            validate_name("A", &rules()).message,
            "Name must be at least 2 characters."
        );
    }

    #[test]
    fn name_length_counts_chars_not_bytes() {
        assert!(!validate_name("é", &rules()).valid);
        assert!(validate_name("éa", &rules()).valid);
    }

    #[test]
    fn email_requires_value_then_pattern() {
        assert_eq!(validate_email("   ", &rules()).message, "Email is required.");
        assert_eq!(
            validate_email("a@b", &rules()).message,
            "Please enter a valid email address."
        );
        assert!(validate_email(" a@b.co ", &rules()).valid);
    }

    #[test]
    fn email_rejects_embedded_whitespace_and_extra_at() {
        for raw in ["a b@c.de", "a@b c.de", "a@@b.co", "@b.co", "a@.co", "a@b."] {
            assert!(!validate_email(raw, &rules()).valid, "{raw} should be rejected");
        }
        for raw in ["x@y.z", "first.last@sub.domain.org", "a@b.c.d"] {
            assert!(validate_email(raw, &rules()).valid, "{raw} should be accepted");
        }
    }

    #[test]
    fn message_requires_ten_chars() {
        assert!(!validate_message("  too short ", &rules()).valid);
        assert!(validate_message("Hello there!!", &rules()).valid);
    }

    #[test]
    fn todo_text_requires_three_chars() {
        let check = validate_todo_text("ok", &TodoRules::default());
        assert_eq!(check.error(), Some("Todo must be at least 3 characters."));
        assert!(validate_todo_text(" buy ", &TodoRules::default()).valid);
    }

    #[test]
    fn thresholds_follow_configured_rules() {
        let mut custom = ContactRules::default();
        custom.name_min_chars = 4;
        let check = validate_name("Bob", &custom);
        assert_eq!(check.message, "Name must be at least 4 characters.");
    }

    #[test]
    fn contact_check_reports_each_field() {
        let draft = ContactDraft::new("A", "nope", "Hello there!!");
        let check = validate_contact(&draft, &rules());
        assert!(!check.is_valid());
        assert!(!check.field(ContactField::Name).valid);
        assert!(!check.field(ContactField::Email).valid);
        assert!(check.field(ContactField::Message).valid);
    }

    #[test]
    fn field_names_round_trip() {
        for field in ContactField::ALL {
            assert_eq!(ContactField::parse(field.as_str()), Some(field));
        }
        assert_eq!(ContactField::parse("phone"), None);
    }
}
