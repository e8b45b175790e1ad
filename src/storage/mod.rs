mod queries;

use std::path::Path;

use anyhow::{Context, Result};
use rusqlite::Connection;

use crate::config;

/// Durable key-value storage, one row per key.
///
/// Plays the role browser local storage plays for the web build: the task
/// store writes a single serialized bundle under a fixed key and reads it
/// back once at startup.
pub struct Storage {
    pub conn: Connection,
}

impl Storage {
    pub fn open() -> Result<Self> {
        let db_path = config::db_path()?;
        Self::open_at(&db_path)
    }

    /// Open (or create) a file database with the schema in place.
    pub fn open_at(db_path: &Path) -> Result<Self> {
        let conn = Connection::open(db_path)
            .with_context(|| format!("failed to open database at {}", db_path.display()))?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        let storage = Storage { conn };
        storage.migrate()?;
        Ok(storage)
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let storage = Storage { conn };
        storage.migrate()?;
        Ok(storage)
    }

    pub fn migrate(&self) -> Result<()> {
        self.conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL DEFAULT (datetime('now'))
            );
            ",
        )?;
        Ok(())
    }
}
