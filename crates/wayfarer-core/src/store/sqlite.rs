//! `SQLite`-backed key-value store

use std::path::Path;
use std::sync::Arc;

use rusqlite::{params, OptionalExtension, TransactionBehavior};
use tokio::sync::Mutex;

use super::KeyValueStore;
use crate::db::Database;
use crate::error::Result;

/// Thread-safe key-value store persisted in the `kv` table.
#[derive(Clone)]
pub struct SqliteKeyValueStore {
    db: Arc<Mutex<Database>>,
}

impl SqliteKeyValueStore {
    /// Open (or create) the store at the given filesystem path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let db = Database::open(path)?;
        Ok(Self {
            db: Arc::new(Mutex::new(db)),
        })
    }

    /// Open an in-memory store (primarily for tests).
    pub fn open_in_memory() -> Result<Self> {
        let db = Database::open_in_memory()?;
        Ok(Self {
            db: Arc::new(Mutex::new(db)),
        })
    }
}

impl KeyValueStore for SqliteKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let db = self.db.lock().await;
        let value = db
            .connection()
            .query_row("SELECT value FROM kv WHERE key = ?", params![key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let db = self.db.lock().await;
        db.connection().execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?, ?)",
            params![key, value],
        )?;
        Ok(())
    }

    /// Runs inside a `BEGIN IMMEDIATE` transaction, so other connections to
    /// the same file (other processes included) cannot interleave a write.
    async fn update<T, F>(&self, key: &str, apply: F) -> Result<T>
    where
        F: FnOnce(Option<String>) -> Result<(String, T)>,
    {
        let mut db = self.db.lock().await;
        let tx = db
            .connection_mut()
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        let current = tx
            .query_row("SELECT value FROM kv WHERE key = ?", params![key], |row| {
                row.get(0)
            })
            .optional()?;

        let (value, output) = apply(current)?;
        tx.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?, ?)",
            params![key, value],
        )?;
        tx.commit()?;
        Ok(output)
    }
}
