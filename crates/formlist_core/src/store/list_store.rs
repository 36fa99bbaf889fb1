//! Failure-tolerant list persistence adapter.
//!
//! # Responsibility
//! - Mirror one in-memory list into one store key as a JSON array.
//! - Turn every store or codec failure into a degraded result.
//!
//! # Invariants
//! - `load` never fails: absent, unreadable or unparsable data is an empty list.
//! - `save` never fails loudly: any failure is reported as `false`.
//! - No retries happen here; callers decide how to recover.

use super::{KeyValueStore, StoreResult};
use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::marker::PhantomData;

/// Persists a `Vec<T>` under a fixed key.
pub struct ListStore<S, T> {
    store: S,
    key: String,
    _item: PhantomData<fn() -> T>,
}

impl<S, T> ListStore<S, T>
where
    S: KeyValueStore,
    T: Serialize + DeserializeOwned,
{
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
            _item: PhantomData,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Underlying store handle.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Reads the list, degrading to empty on any failure.
    pub fn load(&self) -> Vec<T> {
        match self.try_load() {
            Ok(items) => {
                debug!(
                    "event=list_load module=store status=ok key={} count={}",
                    self.key,
                    items.len()
                );
                items
            }
            Err(err) => {
                warn!(
                    "event=list_load module=store status=error key={} error={err}",
                    self.key
                );
                Vec::new()
            }
        }
    }

    /// Writes the list; returns whether the write took effect.
    pub fn save(&self, items: &[T]) -> bool {
        match self.try_save(items) {
            Ok(()) => {
                debug!(
                    "event=list_save module=store status=ok key={} count={}",
                    self.key,
                    items.len()
                );
                true
            }
            Err(err) => {
                warn!(
                    "event=list_save module=store status=error key={} error={err}",
                    self.key
                );
                false
            }
        }
    }

    /// Removes the key; returns whether the removal took effect.
    pub fn clear(&self) -> bool {
        match self.store.remove(&self.key) {
            Ok(()) => true,
            Err(err) => {
                warn!(
                    "event=list_clear module=store status=error key={} error={err}",
                    self.key
                );
                false
            }
        }
    }

    /// Strict read used by `load`; exposes the failure reason.
    pub fn try_load(&self) -> StoreResult<Vec<T>> {
        match self.store.get(&self.key)? {
            Some(text) if !text.trim().is_empty() => Ok(serde_json::from_str(&text)?),
            _ => Ok(Vec::new()),
        }
    }

    /// Strict write used by `save`; exposes the failure reason.
    pub fn try_save(&self, items: &[T]) -> StoreResult<()> {
        let text = serde_json::to_string(items)?;
        self.store.set(&self.key, &text)
    }
}
