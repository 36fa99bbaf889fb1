//! App controllers binding user events to validation, derivation and storage.
//!
//! # Responsibility
//! - Own each app's in-memory list as the single source of truth.
//! - Run every handler to completion: validate, mutate, persist, report.
//! - Recover from failed writes by reloading the persisted list.
//!
//! # Invariants
//! - No handler panics or returns an error; failures become `ActionOutcome`
//!   values plus an inline error or a global `Notice`.
//! - In-memory state never presents an unsaved mutation as saved.

pub mod contact_service;
pub mod notice;
pub mod todo_service;

/// Result of one user-triggered handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// List changed and the store accepted the write.
    Saved,
    /// View state changed; nothing needed persisting.
    Updated,
    /// Input failed validation; inline errors were set.
    Rejected,
    /// User declined the confirmation prompt.
    Cancelled,
    /// Nothing to do (unknown id, nothing pending).
    Unchanged,
    /// Write failed; list reloaded from the store and an error notice set.
    StorageFailed,
}

impl ActionOutcome {
    pub fn is_saved(self) -> bool {
        self == Self::Saved
    }
}
