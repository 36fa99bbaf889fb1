//! In-process key-value store.

use super::{KeyValueStore, StoreError, StoreResult};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

/// Single-threaded map store with switchable fault injection.
///
/// Clones share the same entries and fault switches, so a host can keep a
/// handle after moving a clone into an app.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
    fail_reads: Rc<Cell<bool>>,
    fail_writes: Rc<Cell<bool>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent `get` fail until switched off.
    pub fn set_read_failure(&self, enabled: bool) {
        self.fail_reads.set(enabled);
    }

    /// Makes every subsequent `set`/`remove` fail until switched off.
    pub fn set_write_failure(&self, enabled: bool) {
        self.fail_writes.set(enabled);
    }

    /// Raw text currently stored under `key`, bypassing fault injection.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn check_writable(&self) -> StoreResult<()> {
        if self.fail_writes.get() {
            return Err(StoreError::Unavailable("write rejected".to_string()));
        }
        Ok(())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        if self.fail_reads.get() {
            return Err(StoreError::Unavailable("read rejected".to_string()));
        }
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        self.check_writable()?;
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        self.check_writable()?;
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}
