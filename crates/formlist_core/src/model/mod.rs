//! Persisted entities for the contact and todo apps.
//!
//! # Responsibility
//! - Define the records mirrored into the key-value store.
//! - Fix their JSON wire shape (camelCase, one array per storage key).
//!
//! # Invariants
//! - Every entity carries a unique, never-reused string `id`.
//! - Entities are only constructed from already-validated input.

pub mod contact;
pub mod todo;

use uuid::Uuid;

/// Generates a fresh entity identifier.
pub fn new_entity_id() -> String {
    Uuid::new_v4().to_string()
}
