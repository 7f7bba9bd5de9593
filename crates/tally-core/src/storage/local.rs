//! SQLite-backed local store for the progression state document.
//!
//! The whole state is one JSON document in a kv table under a fixed
//! key. Local writes are synchronous and their failures are fatal to
//! the triggering save -- the gateway propagates them.

use rusqlite::{params, Connection};

use crate::error::StorageError;
use crate::progress::ProgressState;

const STATE_KEY: &str = "progress_state";

/// Local durable storage for one state document.
pub struct LocalStore {
    conn: Connection,
}

impl LocalStore {
    /// Open the store at `~/.config/tally/tally.db`, creating the
    /// schema if needed.
    pub fn open() -> Result<Self, StorageError> {
        let dir = super::data_dir().map_err(|e| StorageError::QueryFailed(e.to_string()))?;
        let path = dir.join("tally.db");
        let conn = Connection::open(&path).map_err(|source| StorageError::OpenFailed {
            path: path.clone(),
            source,
        })?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    /// Open at an explicit path (tests and tooling).
    pub fn open_at(path: &std::path::Path) -> Result<Self, StorageError> {
        let conn = Connection::open(path).map_err(|source| StorageError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    /// Open an in-memory store (for tests).
    pub fn open_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    fn migrate(&self) -> Result<(), StorageError> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )?;
        Ok(())
    }

    /// Read the state document. `None` on first run.
    pub fn get(&self) -> Result<Option<ProgressState>, StorageError> {
        match self.kv_get(STATE_KEY)? {
            Some(json) => {
                let state = serde_json::from_str(&json)
                    .map_err(|e| StorageError::CorruptDocument(e.to_string()))?;
                Ok(Some(state))
            }
            None => Ok(None),
        }
    }

    /// Write the state document. A failure here aborts the save.
    pub fn set(&self, state: &ProgressState) -> Result<(), StorageError> {
        let json = serde_json::to_string(state)
            .map_err(|e| StorageError::CorruptDocument(e.to_string()))?;
        self.kv_set(STATE_KEY, &json)
    }

    /// Remove the state document (user-initiated reset).
    pub fn clear(&self) -> Result<(), StorageError> {
        self.conn
            .execute("DELETE FROM kv WHERE key = ?1", params![STATE_KEY])?;
        Ok(())
    }

    fn kv_get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let mut stmt = self.conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        let result = stmt.query_row(params![key], |row| row.get::<_, String>(0));
        match result {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn kv_set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::{log_intake, ProgressState};
    use chrono::Utc;

    #[test]
    fn empty_store_returns_none() {
        let store = LocalStore::open_memory().unwrap();
        assert!(store.get().unwrap().is_none());
    }

    #[test]
    fn set_get_roundtrip() {
        let store = LocalStore::open_memory().unwrap();
        let mut state = ProgressState::default();
        log_intake(&mut state, 500, Utc::now()).unwrap();

        store.set(&state).unwrap();
        let loaded = store.get().unwrap().unwrap();
        assert_eq!(loaded, state);
    }

    #[test]
    fn clear_removes_document() {
        let store = LocalStore::open_memory().unwrap();
        store.set(&ProgressState::default()).unwrap();
        store.clear().unwrap();
        assert!(store.get().unwrap().is_none());
    }

    #[test]
    fn corrupt_document_is_an_error() {
        let store = LocalStore::open_memory().unwrap();
        store.kv_set(STATE_KEY, "{not json").unwrap();
        assert!(matches!(
            store.get(),
            Err(StorageError::CorruptDocument(_))
        ));
    }

    #[test]
    fn on_disk_roundtrip() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("tally.db");
        let mut state = ProgressState::default();
        state.total_xp = 430;
        state.streak = 4;

        {
            let store = LocalStore::open_at(&path).unwrap();
            store.set(&state).unwrap();
        }
        let store = LocalStore::open_at(&path).unwrap();
        let loaded = store.get().unwrap().unwrap();
        assert_eq!(loaded.total_xp, 430);
        assert_eq!(loaded.streak, 4);
    }
}
