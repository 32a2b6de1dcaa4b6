//! SQLite-backed key-value store.
//!
//! Every record collection lives as one JSON document under a fixed key,
//! the same shape a mobile key-value store would hold.

use std::path::Path;

use rusqlite::{params, Connection};
use serde::{de::DeserializeOwned, Serialize};

use super::data_dir;
use crate::error::{DatabaseError, Result};

/// Keys used by the record collections and persisted engines.
pub mod keys {
    pub const TASKS: &str = "tasks";
    pub const COMMUNICATION_CARDS: &str = "communication_cards";
    pub const EMOTION_HISTORY: &str = "emotion_history";
    pub const USER: &str = "user";
    pub const BREATHING_ENGINE: &str = "breathing_engine";
    pub const COUNTDOWN_TIMER: &str = "countdown_timer";
    pub const GUIDE_NAVIGATOR: &str = "guide_navigator";
}

pub struct Store {
    conn: Connection,
}

impl Store {
    /// Open the store at `~/.config/tranquil/tranquil.db`.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self> {
        let path = data_dir()?.join("tranquil.db");
        Self::open_at(&path)
    }

    pub fn open_at(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(|source| DatabaseError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    /// In-memory store, for tests and throwaway hosts.
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    fn migrate(&self) -> Result<()> {
        self.conn
            .execute_batch(
                "CREATE TABLE IF NOT EXISTS kv (
                    key   TEXT PRIMARY KEY,
                    value TEXT NOT NULL
                );",
            )
            .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;
        Ok(())
    }

    pub fn kv_get(&self, key: &str) -> Result<Option<String>> {
        let mut stmt = self.conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        let result = stmt.query_row(params![key], |row| row.get::<_, String>(0));
        match result {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn kv_set(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    /// Returns whether a value was removed.
    pub fn kv_delete(&self, key: &str) -> Result<bool> {
        let n = self
            .conn
            .execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(n > 0)
    }

    /// Deserialize the JSON document under `key`, if any.
    pub fn load_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.kv_get(key)? {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    pub fn save_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let json = serde_json::to_string(value)?;
        self.kv_set(key, &json)
    }
}
