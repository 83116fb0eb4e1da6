//! Key-value storage behind the record store.
//!
//! Values are opaque strings (JSON in practice). The trait mirrors the small
//! `getItem`/`setItem`/`removeItem` surface of browser local storage.

use crate::errors::AppResult;
use chrono::Local;
use rusqlite::{Connection, OptionalExtension, params};
use std::collections::BTreeMap;

pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> AppResult<Option<String>>;
    fn set_item(&mut self, key: &str, value: &str) -> AppResult<()>;
    fn remove_item(&mut self, key: &str) -> AppResult<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &mut S {
    fn get_item(&self, key: &str) -> AppResult<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&mut self, key: &str, value: &str) -> AppResult<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&mut self, key: &str) -> AppResult<()> {
        (**self).remove_item(key)
    }
}

/// Storage backed by the `storage` table of the configured database.
pub struct SqliteStorage<'a> {
    conn: &'a Connection,
}

impl<'a> SqliteStorage<'a> {
    /// The schema must already be migrated (see `DbPool::open`).
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Local RFC 3339 timestamp of the last write to `key`.
    pub fn updated_at(&self, key: &str) -> AppResult<Option<String>> {
        let v = self
            .conn
            .query_row(
                "SELECT updated_at FROM storage WHERE key = ?1",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(v)
    }
}

impl KeyValueStore for SqliteStorage<'_> {
    fn get_item(&self, key: &str) -> AppResult<Option<String>> {
        let mut stmt = self
            .conn
            .prepare_cached("SELECT value FROM storage WHERE key = ?1")?;
        let v = stmt
            .query_row([key], |row| row.get::<_, String>(0))
            .optional()?;
        Ok(v)
    }

    fn set_item(&mut self, key: &str, value: &str) -> AppResult<()> {
        let mut stmt = self.conn.prepare_cached(
            "INSERT INTO storage (key, value, updated_at)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at",
        )?;
        stmt.execute(params![key, value, Local::now().to_rfc3339()])?;
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> AppResult<()> {
        self.conn
            .execute("DELETE FROM storage WHERE key = ?1", [key])?;
        Ok(())
    }
}

/// Process-local storage, mostly for tests and library callers.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    items: BTreeMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl KeyValueStore for MemoryStorage {
    fn get_item(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> AppResult<()> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> AppResult<()> {
        self.items.remove(key);
        Ok(())
    }
}
