//! Host persistent storage for the translation cache snapshot.
//! A store is a set of named slots, each holding one string value.

use std::collections::HashMap;
use std::path::Path;

use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension};
use tracing::info;

#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("sqlite: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("snapshot encoding: {0}")]
    Encoding(#[from] serde_json::Error),
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Named-slot key-value medium.
pub trait SlotStore: Send + Sync {
    fn read(&self, slot: &str) -> Result<Option<String>, PersistenceError>;
    fn write(&self, slot: &str, value: &str) -> Result<(), PersistenceError>;
    fn remove(&self, slot: &str) -> Result<(), PersistenceError>;
}

/// SQLite-backed slot store; survives process restarts.
pub struct SqliteSlotStore {
    conn: Mutex<Connection>,
}

impl SqliteSlotStore {
    /// Open (or create) the database at the given path.
    pub fn open(db_path: &Path) -> Result<Self, PersistenceError> {
        let conn = Connection::open(db_path)?;
        // WAL keeps readers from blocking on the snapshot writer
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;
        let store = Self::init(conn)?;
        info!(path = %db_path.display(), "slot store opened");
        Ok(store)
    }

    pub fn open_in_memory() -> Result<Self, PersistenceError> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self, PersistenceError> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS slots (
                slot TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at INTEGER NOT NULL
            );",
        )?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

impl SlotStore for SqliteSlotStore {
    fn read(&self, slot: &str) -> Result<Option<String>, PersistenceError> {
        let conn = self.conn.lock();
        let value = conn
            .query_row(
                "SELECT value FROM slots WHERE slot = ?1",
                params![slot],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn write(&self, slot: &str, value: &str) -> Result<(), PersistenceError> {
        let conn = self.conn.lock();
        conn.execute(
            "INSERT OR REPLACE INTO slots (slot, value, updated_at) VALUES (?1, ?2, ?3)",
            params![slot, value, crate::now_unix_ms()],
        )?;
        Ok(())
    }

    fn remove(&self, slot: &str) -> Result<(), PersistenceError> {
        let conn = self.conn.lock();
        conn.execute("DELETE FROM slots WHERE slot = ?1", params![slot])?;
        Ok(())
    }
}

/// Process-local store. Used in tests and when no database can be opened.
#[derive(Default)]
pub struct MemorySlotStore {
    slots: Mutex<HashMap<String, String>>,
    writes: Mutex<usize>,
}

impl MemorySlotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with one slot, e.g. a snapshot from a prior session.
    pub fn with_slot(slot: &str, value: &str) -> Self {
        let store = Self::new();
        store.slots.lock().insert(slot.to_string(), value.to_string());
        store
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> usize {
        *self.writes.lock()
    }
}

impl SlotStore for MemorySlotStore {
    fn read(&self, slot: &str) -> Result<Option<String>, PersistenceError> {
        Ok(self.slots.lock().get(slot).cloned())
    }

    fn write(&self, slot: &str, value: &str) -> Result<(), PersistenceError> {
        self.slots.lock().insert(slot.to_string(), value.to_string());
        *self.writes.lock() += 1;
        Ok(())
    }

    fn remove(&self, slot: &str) -> Result<(), PersistenceError> {
        self.slots.lock().remove(slot);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sqlite_round_trip_and_remove() {
        let store = SqliteSlotStore::open_in_memory().unwrap();
        assert_eq!(store.read("a").unwrap(), None);
        store.write("a", "[]").unwrap();
        store.write("a", "[1]").unwrap();
        assert_eq!(store.read("a").unwrap().as_deref(), Some("[1]"));
        store.remove("a").unwrap();
        assert_eq!(store.read("a").unwrap(), None);
    }

    #[test]
    fn sqlite_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("slots.db");
        {
            let store = SqliteSlotStore::open(&path).unwrap();
            store.write("snapshot", "payload").unwrap();
        }
        let store = SqliteSlotStore::open(&path).unwrap();
        assert_eq!(store.read("snapshot").unwrap().as_deref(), Some("payload"));
    }

    #[test]
    fn memory_store_counts_writes() {
        let store = MemorySlotStore::with_slot("s", "x");
        assert_eq!(store.read("s").unwrap().as_deref(), Some("x"));
        store.write("s", "y").unwrap();
        assert_eq!(store.write_count(), 1);
    }
}
