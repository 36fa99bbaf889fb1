//! Key-value storage contracts and implementations.
//!
//! # Responsibility
//! - Define the string-to-string store the apps mirror their lists into.
//! - Provide an in-memory store and a SQLite-backed durable store.
//! - Wrap raw store access in the failure-tolerant `ListStore` adapter.
//!
//! # Invariants
//! - Store implementations surface failures as `StoreError`, never panics.
//! - Only `ListStore` decides how failures degrade (empty list / `false`).

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod list_store;
mod memory;
mod sqlite;

pub use list_store::ListStore;
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// Failure of a raw store access or of list (de)serialization.
#[derive(Debug)]
pub enum StoreError {
    /// Backing database failure.
    Db(DbError),
    /// Store refused the operation (quota, injected fault, ...).
    Unavailable(String),
    /// Stored text is not a valid list or a list could not be encoded.
    Codec(serde_json::Error),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Unavailable(reason) => write!(f, "store unavailable: {reason}"),
            Self::Codec(err) => write!(f, "invalid stored list: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Unavailable(_) => None,
            Self::Codec(err) => Some(err),
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Codec(value)
    }
}

/// String key-value store shared by one app instance.
///
/// Methods take `&self`; implementations own any interior mutability.
pub trait KeyValueStore {
    /// Returns the stored text, or `None` when the key is absent.
    fn get(&self, key: &str) -> StoreResult<Option<String>>;
    /// Inserts or replaces the text under `key`.
    fn set(&self, key: &str, value: &str) -> StoreResult<()>;
    /// Removes `key`; removing an absent key succeeds.
    fn remove(&self, key: &str) -> StoreResult<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        (**self).remove(key)
    }
}
