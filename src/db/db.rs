use crate::orm::error::{OrmError, Result};
use rusqlite::types::Value as SqlValue;
use rusqlite::{params, params_from_iter, Connection, OpenFlags, OptionalExtension};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::trace;

pub const DB_FILE_EXTENSION: &str = "sqlite";

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS {table} ({fields})";
const SELECT_ALL: &str = "SELECT {fields} FROM {table} ORDER BY rowid";
const INSERT: &str = "INSERT INTO {table} ({fields}) VALUES ({placeholders})";
const UPDATE_BY_ID: &str = "UPDATE {table} SET {assignments} WHERE id = ?1";
const DELETE_BY_ID: &str = "DELETE FROM {table} WHERE id = ?1";
const SELECT_SEQUENCE: &str = "SELECT seq FROM sqlite_sequence WHERE name = ?1";

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// A named store and the file that backs it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Store {
    pub name: String,
    pub path: PathBuf,
}

impl Store {
    pub fn new(name: &str, path: PathBuf) -> Self {
        Self {
            name: name.to_string(),
            path,
        }
    }
}

/// A connection to one store, opened for a single logical operation.
pub struct Db {
    pub conn: Connection,
}

fn quote(identifier: &str) -> String {
    format!("\"{}\"", identifier.replace('"', "\"\""))
}

fn quote_all(identifiers: &[&str]) -> String {
    identifiers.iter().map(|i| quote(i)).collect::<Vec<_>>().join(", ")
}

impl Db {
    /// Open an existing store. Never creates the file.
    pub fn open(store: &Store) -> Result<Db> {
        if !store.path.exists() {
            return Err(OrmError::StoreNotFound(store.name.clone()));
        }
        let conn = Connection::open_with_flags(&store.path, OpenFlags::SQLITE_OPEN_READ_WRITE)?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        Ok(Db { conn })
    }

    /// Create the backing file for a new store.
    pub fn create(path: &Path) -> Result<Db> {
        let conn = Connection::open(path)?;
        Ok(Db { conn })
    }

    pub fn create_table(&self, table: &str, field_defs: &[String]) -> Result<()> {
        let sql = CREATE_TABLE
            .replace("{table}", &quote(table))
            .replace("{fields}", &field_defs.join(", "));
        trace!(%sql, "create table");
        self.conn.execute(&sql, [])?;
        Ok(())
    }

    /// Every row of `table`, `fields` in the given order, sorted by id
    /// (`rowid` aliases the integer primary key).
    pub fn select_all(&self, table: &str, fields: &[&str]) -> Result<Vec<Vec<SqlValue>>> {
        let sql = SELECT_ALL
            .replace("{fields}", &quote_all(fields))
            .replace("{table}", &quote(table));
        let mut stmt = self.conn.prepare(&sql)?;
        let row_iter = stmt.query_map([], |row| {
            (0..fields.len()).map(|i| row.get::<_, SqlValue>(i)).collect::<rusqlite::Result<Vec<_>>>()
        })?;

        let mut rows = Vec::new();
        for row in row_iter {
            rows.push(row?);
        }
        Ok(rows)
    }

    /// Highest id ever stored in `table`, deleted rows included. `0` when
    /// nothing was ever inserted.
    pub fn sequence(&self, table: &str) -> Result<i64> {
        let seq = self
            .conn
            .query_row(SELECT_SEQUENCE, params![table], |row| row.get::<_, i64>(0))
            .optional()?;
        Ok(seq.unwrap_or(0))
    }

    pub fn insert(&self, table: &str, fields: &[&str], values: &[SqlValue]) -> Result<()> {
        let placeholders = (1..=values.len()).map(|i| format!("?{}", i)).collect::<Vec<_>>().join(", ");
        let sql = INSERT
            .replace("{table}", &quote(table))
            .replace("{fields}", &quote_all(fields))
            .replace("{placeholders}", &placeholders);
        trace!(%sql, "insert");
        self.conn.execute(&sql, params_from_iter(values.iter()))?;
        Ok(())
    }

    /// Returns the number of rows touched.
    pub fn update_by_id(&self, table: &str, id: i64, fields: &[&str], values: &[SqlValue]) -> Result<usize> {
        let assignments = fields
            .iter()
            .enumerate()
            .map(|(i, field)| format!("{} = ?{}", quote(field), i + 2))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = UPDATE_BY_ID
            .replace("{table}", &quote(table))
            .replace("{assignments}", &assignments);
        trace!(%sql, id, "update");
        let params = std::iter::once(SqlValue::Integer(id)).chain(values.iter().cloned());
        Ok(self.conn.execute(&sql, params_from_iter(params))?)
    }

    /// Returns the number of rows touched.
    pub fn delete_by_id(&self, table: &str, id: i64) -> Result<usize> {
        let sql = DELETE_BY_ID.replace("{table}", &quote(table));
        trace!(%sql, id, "delete");
        Ok(self.conn.execute(&sql, params![id])?)
    }
}
