//! SQLite-backed slot storage.
//!
//! # Responsibility
//! - Implement the `SlotStorage` contract over the migrated `slots` table.
//!
//! # Invariants
//! - `put` is an upsert; the slot holds at most one row per key.
//! - Connections must come from `db::open_db`/`db::open_db_in_memory` so
//!   migrations have already run.

use crate::persist::{SlotStorage, StorageResult};
use rusqlite::{params, Connection};

/// Slot storage over one SQLite connection.
pub struct SqliteSlotStorage {
    conn: Connection,
}

impl SqliteSlotStorage {
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }
}

impl SlotStorage for SqliteSlotStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT value FROM slots WHERE key = ?1;")?;
        let mut rows = stmt.query(params![key])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(row.get::<_, String>(0)?));
        }
        Ok(None)
    }

    fn put(&self, key: &str, value: &str) -> StorageResult<()> {
        self.conn.execute(
            "INSERT INTO slots (key, value)
             VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value;",
            params![key, value],
        )?;
        Ok(())
    }
}
