use std::collections::HashMap;
use std::fmt::Write as _;
use std::path::Path;
use std::sync::Mutex;

use rusqlite::{Connection, params};
use tracing::debug;

use crate::config::StoreConfig;
use crate::error::StoreError;
use crate::types::{DeviceMeta, MetaColumn, MetaFilter};

use super::MetaStore;
use super::schema;

/// SQLite-backed implementation of `MetaStore`.
///
/// Owns the connection outright; embedders that manage the connection
/// lifecycle themselves inject one via [`from_connection`](Self::from_connection).
#[derive(Debug)]
pub struct SqliteMetaStore {
    conn: Mutex<Connection>,
}

impl SqliteMetaStore {
    /// Open (or create) a store at the given path. Requests WAL journaling;
    /// use [`open_with`](Self::open_with) to opt out.
    pub fn open(path: &Path) -> crate::error::Result<Self> {
        let conn = Connection::open(path).map_err(StoreError::Sqlite)?;
        // Try WAL mode — silently ignored where unavailable
        let _ = conn.execute_batch("PRAGMA journal_mode = WAL;");
        debug!(path = %path.display(), "opening twin metadata store");
        Self::from_connection(conn)
    }

    /// Create an in-memory store (for testing and ephemeral caches).
    pub fn in_memory() -> crate::error::Result<Self> {
        let conn = Connection::open_in_memory().map_err(StoreError::Sqlite)?;
        Self::from_connection(conn)
    }

    /// Open a store using a loaded [`StoreConfig`].
    pub fn open_with(config: &StoreConfig) -> crate::error::Result<Self> {
        let conn = Connection::open(&config.path).map_err(StoreError::Sqlite)?;
        conn.busy_timeout(std::time::Duration::from_millis(config.busy_timeout_ms))
            .map_err(StoreError::Sqlite)?;
        if config.wal {
            // Silently ignored where WAL is unavailable (in-memory, some VFSes)
            let _ = conn.execute_batch("PRAGMA journal_mode = WAL;");
        }
        debug!(path = %config.path.display(), "opening twin metadata store from config");
        Self::from_connection(conn)
    }

    /// Wrap an externally prepared connection.
    ///
    /// This is the session seam: the surrounding process owns open/close
    /// and hands the live handle down instead of the store reaching for
    /// ambient global state. Journal mode is left as the owner set it.
    pub fn from_connection(conn: Connection) -> crate::error::Result<Self> {
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.initialize()?;
        Ok(store)
    }

    fn initialize(&self) -> crate::error::Result<()> {
        let conn = self.conn.lock().expect("twinmeta store mutex poisoned");

        conn.execute_batch(schema::PRAGMAS_SQL)
            .map_err(StoreError::Sqlite)?;

        conn.execute_batch(schema::SCHEMA_SQL)
            .map_err(StoreError::Sqlite)?;

        // Set schema version if not present
        conn.execute(
            "INSERT OR IGNORE INTO store_meta (key, value) VALUES ('schema_version', ?1)",
            params![schema::SCHEMA_VERSION],
        )
        .map_err(StoreError::Sqlite)?;

        Ok(())
    }

    /// Helper: read a full record from a row.
    fn row_to_meta(row: &rusqlite::Row<'_>) -> rusqlite::Result<DeviceMeta> {
        Ok(DeviceMeta {
            key: row.get("key")?,
            kind: row.get("type")?,
            value: row.get("value")?,
        })
    }

    /// Build the WHERE clause and parameter list for a filter.
    ///
    /// One builder for every filtered read so key/type equality semantics
    /// cannot drift between operations.
    fn where_clause(filter: &MetaFilter) -> (String, Vec<Box<dyn rusqlite::types::ToSql>>) {
        let mut sql = String::from("WHERE key = ?1");
        let mut param_values: Vec<Box<dyn rusqlite::types::ToSql>> =
            vec![Box::new(filter.key.clone())];

        if let Some(kind) = &filter.kind {
            let _ = write!(sql, " AND type = ?{}", param_values.len() + 1);
            param_values.push(Box::new(kind.clone()));
        }

        (sql, param_values)
    }

    fn select_filtered(&self, filter: &MetaFilter) -> crate::error::Result<Vec<DeviceMeta>> {
        let conn = self.conn.lock().expect("twinmeta store mutex poisoned");
        let (clause, param_values) = Self::where_clause(filter);
        let sql = format!("SELECT key, type, value FROM device_meta {clause}");

        let mut stmt = conn.prepare(&sql).map_err(StoreError::Sqlite)?;
        let params_ref: Vec<&dyn rusqlite::types::ToSql> = param_values
            .iter()
            .map(std::convert::AsRef::as_ref)
            .collect();
        let records = stmt
            .query_map(params_ref.as_slice(), Self::row_to_meta)
            .map_err(StoreError::Sqlite)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(StoreError::Sqlite)?;

        Ok(records)
    }
}

impl MetaStore for SqliteMetaStore {
    // ── Write operations ───────────────────────────────────────────

    fn save(&self, meta: &DeviceMeta) -> crate::error::Result<()> {
        let conn = self.conn.lock().expect("twinmeta store mutex poisoned");
        conn.execute(
            "INSERT INTO device_meta (key, type, value) VALUES (?1, ?2, ?3)",
            params![meta.key, meta.kind, meta.value],
        )
        .map_err(StoreError::Sqlite)?;
        Ok(())
    }

    fn delete_by_key(&self, key: &str) -> crate::error::Result<()> {
        let conn = self.conn.lock().expect("twinmeta store mutex poisoned");
        let (clause, param_values) = Self::where_clause(&MetaFilter::by_key(key));
        let sql = format!("DELETE FROM device_meta {clause}");
        let params_ref: Vec<&dyn rusqlite::types::ToSql> = param_values
            .iter()
            .map(std::convert::AsRef::as_ref)
            .collect();
        let deleted = conn
            .execute(&sql, params_ref.as_slice())
            .map_err(StoreError::Sqlite)?;
        debug!(key, deleted, "deleted twin metadata");
        Ok(())
    }

    fn update(&self, meta: &DeviceMeta) -> crate::error::Result<()> {
        let conn = self.conn.lock().expect("twinmeta store mutex poisoned");
        conn.execute(
            "UPDATE device_meta SET type = ?2, value = ?3 WHERE key = ?1",
            params![meta.key, meta.kind, meta.value],
        )
        .map_err(StoreError::Sqlite)?;
        Ok(())
    }

    fn upsert(&self, meta: &DeviceMeta) -> crate::error::Result<()> {
        let conn = self.conn.lock().expect("twinmeta store mutex poisoned");
        conn.execute(
            "INSERT INTO device_meta (key, type, value) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET
                type = excluded.type,
                value = excluded.value",
            params![meta.key, meta.kind, meta.value],
        )
        .map_err(StoreError::Sqlite)?;
        Ok(())
    }

    fn update_field(
        &self,
        key: &str,
        column: MetaColumn,
        value: &str,
    ) -> crate::error::Result<()> {
        let conn = self.conn.lock().expect("twinmeta store mutex poisoned");
        // Column name comes from the MetaColumn enum, never caller text.
        let sql = format!(
            "UPDATE device_meta SET {} = ?2 WHERE key = ?1",
            column.as_str()
        );
        conn.execute(&sql, params![key, value])
            .map_err(StoreError::Sqlite)?;
        debug!(key, column = %column, "updated twin metadata field");
        Ok(())
    }

    fn update_fields(
        &self,
        key: &str,
        fields: &HashMap<MetaColumn, String>,
    ) -> crate::error::Result<()> {
        if fields.is_empty() {
            return Ok(());
        }

        let conn = self.conn.lock().expect("twinmeta store mutex poisoned");
        let mut sql = String::from("UPDATE device_meta SET ");
        let mut param_values: Vec<Box<dyn rusqlite::types::ToSql>> = vec![Box::new(key.to_string())];

        for (i, (column, value)) in fields.iter().enumerate() {
            if i > 0 {
                sql.push_str(", ");
            }
            let _ = write!(sql, "{} = ?{}", column.as_str(), param_values.len() + 1);
            param_values.push(Box::new(value.clone()));
        }
        sql.push_str(" WHERE key = ?1");

        let params_ref: Vec<&dyn rusqlite::types::ToSql> = param_values
            .iter()
            .map(std::convert::AsRef::as_ref)
            .collect();
        conn.execute(&sql, params_ref.as_slice())
            .map_err(StoreError::Sqlite)?;
        Ok(())
    }

    // ── Read operations ────────────────────────────────────────────

    fn query(&self, key: &str, kind: &str) -> crate::error::Result<Vec<DeviceMeta>> {
        self.select_filtered(&MetaFilter::by_key_and_kind(key, kind))
    }

    fn query_all(&self, key: &str, kind: &str) -> crate::error::Result<Vec<DeviceMeta>> {
        self.select_filtered(&MetaFilter::by_key_and_kind(key, kind))
    }
}
