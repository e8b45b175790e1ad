use anyhow::Result;
use rusqlite::{OptionalExtension, params};

use super::Storage;

impl Storage {
    pub fn get_item(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    /// Insert or replace the value stored under `key` in a single statement.
    pub fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let now = chrono::Utc::now().to_rfc3339();
        self.conn.execute(
            "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value, now],
        )?;
        Ok(())
    }

    /// When `key` was last written, as RFC 3339.
    pub fn updated_at(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT updated_at FROM kv WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_missing_key() {
        let storage = Storage::open_in_memory().unwrap();
        assert_eq!(storage.get_item("nope").unwrap(), None);
        assert_eq!(storage.updated_at("nope").unwrap(), None);
    }

    #[test]
    fn test_set_then_get() {
        let storage = Storage::open_in_memory().unwrap();
        storage.set_item("k", "v1").unwrap();
        assert_eq!(storage.get_item("k").unwrap().as_deref(), Some("v1"));
        assert!(storage.updated_at("k").unwrap().is_some());
    }

    #[test]
    fn test_set_overwrites() {
        let storage = Storage::open_in_memory().unwrap();
        storage.set_item("k", "v1").unwrap();
        storage.set_item("k", "v2").unwrap();
        assert_eq!(storage.get_item("k").unwrap().as_deref(), Some("v2"));

        let rows: i64 = storage
            .conn
            .query_row("SELECT COUNT(*) FROM kv", [], |row| row.get(0))
            .unwrap();
        assert_eq!(rows, 1);
    }

    #[test]
    fn test_file_backed_storage_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("digital8.db");
        {
            let storage = Storage::open_at(&path).unwrap();
            storage.set_item("k", "persisted").unwrap();
        }
        let storage = Storage::open_at(&path).unwrap();
        assert_eq!(storage.get_item("k").unwrap().as_deref(), Some("persisted"));
    }

    #[test]
    fn test_open_at_creates_schema_on_fresh_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fresh.db");
        let storage = Storage::open_at(&path).unwrap();
        assert_eq!(storage.get_item("k").unwrap(), None);
        storage.set_item("k", "v").unwrap();
        assert!(storage.updated_at("k").unwrap().is_some());

        // Reopening an existing database leaves rows alone.
        drop(storage);
        let storage = Storage::open_at(&path).unwrap();
        assert_eq!(storage.get_item("k").unwrap().as_deref(), Some("v"));
    }
}
