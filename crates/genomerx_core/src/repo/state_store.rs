//! Persistence hook contracts and implementations.
//!
//! # Responsibility
//! - Define the string-keyed payload store repositories write through.
//! - Provide the SQLite-backed implementation over `app_state` and a shared
//!   in-memory implementation for tests.
//!
//! # Invariants
//! - `save` replaces the whole payload for a key atomically.
//! - Implementations never interpret payload contents.

use rusqlite::{params, Connection};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::rc::Rc;

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence transport error.
#[derive(Debug)]
pub enum StoreError {
    Sqlite(rusqlite::Error),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
        }
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// String-keyed payload store invoked after each successful mutation.
pub trait StateStore {
    /// Returns the payload for `key`, or `None` when never written.
    fn load(&self, key: &str) -> StoreResult<Option<String>>;
    /// Replaces the payload for `key` in full.
    fn save(&self, key: &str, payload: &str) -> StoreResult<()>;
}

/// SQLite-backed store over the `app_state` table.
pub struct SqliteStateStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteStateStore<'conn> {
    /// Constructs a store from a migrated/ready connection.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl StateStore for SqliteStateStore<'_> {
    fn load(&self, key: &str) -> StoreResult<Option<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT value FROM app_state WHERE key = ?1;")?;
        let mut rows = stmt.query([key])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(row.get(0)?));
        }
        Ok(None)
    }

    fn save(&self, key: &str, payload: &str) -> StoreResult<()> {
        self.conn.execute(
            "INSERT INTO app_state (key, value, updated_at)
             VALUES (?1, ?2, strftime('%s', 'now') * 1000)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, payload],
        )?;
        Ok(())
    }
}

/// In-memory store shared across repositories via cheap clones.
///
/// The session engine is single-threaded cooperative, so interior
/// mutability through `RefCell` is sufficient here.
#[derive(Debug, Clone, Default)]
pub struct MemoryStateStore {
    entries: Rc<RefCell<BTreeMap<String, String>>>,
}

impl MemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the raw payload for `key`; test hook.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    /// Pre-loads a raw payload; test hook for malformed-state scenarios.
    pub fn put_raw(&self, key: &str, payload: &str) {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), payload.to_string());
    }
}

impl StateStore for MemoryStateStore {
    fn load(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn save(&self, key: &str, payload: &str) -> StoreResult<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), payload.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{MemoryStateStore, StateStore};

    #[test]
    fn memory_store_clones_share_entries() {
        let store = MemoryStateStore::new();
        let alias = store.clone();
        store.save("grx_tasks", "[]").expect("memory save");
        assert_eq!(alias.load("grx_tasks").expect("memory load").as_deref(), Some("[]"));
    }
}
