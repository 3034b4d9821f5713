//! Storage substrate abstraction.
//!
//! Defines the interface draft persistence is built on, decoupling the
//! draft layer from the specific storage mechanism (in-memory map, files
//! on disk, a browser-style key-value store behind FFI).

use crate::error::{NeonkitError, Result};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

/// An abstract synchronous key-value string store.
///
/// Every operation reports failure through [`NeonkitError`]; consumers in
/// the draft layer treat *any* failure as non-fatal and degrade to "no
/// draft available".
///
/// # Implementation Notes
///
/// Implementations should handle:
/// - Missing keys (return `Ok(None)` from [`get`](Self::get), never an error)
/// - Concurrent access from multiple store instances
/// - Deleting a key that does not exist (idempotent `Ok(())`)
pub trait KeyValueStorage: Send + Sync {
    /// Reads the value stored under `key`.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(value))`: Key present
    /// - `Ok(None)`: Key absent
    /// - `Err(_)`: The substrate itself failed
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Writes `value` under `key`, overwriting any previous value.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Deletes the value stored under `key`, if any.
    ///
    /// Deleting an absent key is a successful no-op.
    fn remove(&self, key: &str) -> Result<()>;
}

impl<S: KeyValueStorage + ?Sized> KeyValueStorage for std::sync::Arc<S> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}

/// An in-process [`KeyValueStorage`] backed by a `HashMap`.
///
/// Useful for tests and for ephemeral drafts that should not outlive the
/// process. Distinct keys never interfere; the map is shared safely across
/// threads via an internal mutex.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Creates an empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.lock_entries().map(|e| e.len()).unwrap_or(0)
    }

    /// Whether the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock_entries(&self) -> Result<MutexGuard<'_, HashMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|_| NeonkitError::internal("memory storage mutex poisoned"))
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.lock_entries()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.lock_entries()?
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.lock_entries()?.remove(key);
        Ok(())
    }
}
