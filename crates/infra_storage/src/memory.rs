//! In-memory store

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

use core_kernel::{KeyValueStore, PortError, StorageOp};

use crate::error::StorageError;

/// Map-backed store for tests and the mock provider
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, String>>,
    refuse_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with `entries`
    pub fn with_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let store = Self::new();
        store
            .lock()
            .extend(entries.into_iter().map(|(k, v)| (k.into(), v.into())));
        store
    }

    /// Copy of every entry
    pub fn snapshot(&self) -> BTreeMap<String, String> {
        self.lock().clone()
    }

    /// Makes every later write fail without touching the entries
    pub fn refuse_writes(&self, refuse: bool) {
        self.refuse_writes.store(refuse, Ordering::SeqCst);
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<String, String>> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, PortError> {
        Ok(self.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PortError> {
        self.apply(&[StorageOp::set(key, value)])
    }

    fn delete(&self, key: &str) -> Result<(), PortError> {
        self.apply(&[StorageOp::delete(key)])
    }

    fn apply(&self, ops: &[StorageOp]) -> Result<(), PortError> {
        if self.refuse_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Refused(format!("{} operation(s)", ops.len())).into());
        }

        let mut entries = self.lock();
        for op in ops {
            match op {
                StorageOp::Set { key, value } => {
                    entries.insert(key.clone(), value.clone());
                }
                StorageOp::Delete { key } => {
                    entries.remove(key);
                }
            }
        }
        Ok(())
    }
}
