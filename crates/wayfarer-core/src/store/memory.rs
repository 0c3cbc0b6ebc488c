//! In-process key-value store

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use super::KeyValueStore;
use crate::error::{Error, Result};

/// `HashMap`-backed store with switchable write failures.
///
/// Every access yields to the scheduler once, so concurrent callers interleave
/// the way they would against a real asynchronous backend.
#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    values: Mutex<HashMap<String, String>>,
    fail_writes: AtomicBool,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with one value
    pub fn with_value(key: impl Into<String>, value: impl Into<String>) -> Self {
        let store = Self::default();
        if let Ok(mut values) = store.values.lock() {
            values.insert(key.into(), value.into());
        }
        store
    }

    /// Make every subsequent `set` fail until switched back off
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.values
            .lock()
            .map_err(|_| Error::Storage("memory store lock poisoned".to_string()))
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        tokio::task::yield_now().await;
        Ok(self.lock()?.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        tokio::task::yield_now().await;
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(Error::Storage(format!("write to '{key}' rejected")));
        }
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn update<T, F>(&self, key: &str, apply: F) -> Result<T>
    where
        F: FnOnce(Option<String>) -> Result<(String, T)>,
    {
        tokio::task::yield_now().await;
        let mut values = self.lock()?;
        let (value, output) = apply(values.get(key).cloned())?;
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(Error::Storage(format!("write to '{key}' rejected")));
        }
        values.insert(key.to_string(), value);
        Ok(output)
    }
}
