//! Named stores on disk.
//!
//! Each store is one SQLite file, `<dir>/<name>.sqlite`. The catalog lists,
//! creates, renames and deletes them and guards every name against
//! filesystem-unsafe input. Refused operations leave the directory untouched.

use super::db::{Db, Store, DB_FILE_EXTENSION};
use crate::libs::config::Config;
use crate::orm::error::{OrmError, Result};
use crate::orm::model::TableSchema;
use std::fs;
use std::path::PathBuf;
use tracing::debug;

const MAX_NAME_LENGTH: usize = 64;
const FORBIDDEN_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

#[derive(Debug, Clone)]
pub struct Catalog {
    dir: PathBuf,
}

impl Catalog {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(config.store_dir()?))
    }

    pub fn dir(&self) -> &PathBuf {
        &self.dir
    }

    /// Whether `name` is safe to use as a store file name.
    pub fn validate_name(name: &str) -> bool {
        !name.is_empty()
            && name.trim() == name
            && name.chars().count() <= MAX_NAME_LENGTH
            && name != "."
            && name != ".."
            && !name.chars().any(|c| c.is_control() || FORBIDDEN_CHARS.contains(&c))
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}.{}", name, DB_FILE_EXTENSION))
    }

    pub fn exists(&self, name: &str) -> bool {
        Self::validate_name(name) && self.path(name).is_file()
    }

    /// Handle to an existing store.
    pub fn store(&self, name: &str) -> Result<Store> {
        if !self.exists(name) {
            return Err(OrmError::StoreNotFound(name.to_string()));
        }
        Ok(Store::new(name, self.path(name)))
    }

    /// Names of every store, sorted.
    pub fn list(&self) -> Result<Vec<String>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(DB_FILE_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    /// Create a store holding one table per schema.
    pub fn create(&self, name: &str, schemas: &[TableSchema]) -> Result<Store> {
        if !Self::validate_name(name) {
            return Err(OrmError::InvalidName(name.to_string()));
        }
        if self.exists(name) {
            return Err(OrmError::StoreAlreadyExists(name.to_string()));
        }
        fs::create_dir_all(&self.dir)?;

        let path = self.path(name);
        let created = Db::create(&path).and_then(|db| {
            for schema in schemas {
                db.create_table(schema.table, &schema.definitions())?;
            }
            Ok(())
        });
        if let Err(err) = created {
            let _ = fs::remove_file(&path);
            return Err(err);
        }
        debug!(store = name, tables = schemas.len(), "created store");
        Ok(Store::new(name, path))
    }

    pub fn delete(&self, name: &str) -> Result<()> {
        let store = self.store(name)?;
        fs::remove_file(&store.path)?;
        debug!(store = name, "deleted store");
        Ok(())
    }

    pub fn rename(&self, old: &str, new: &str) -> Result<Store> {
        if !Self::validate_name(new) {
            return Err(OrmError::InvalidName(new.to_string()));
        }
        let store = self.store(old)?;
        if self.exists(new) {
            return Err(OrmError::StoreAlreadyExists(new.to_string()));
        }
        let path = self.path(new);
        fs::rename(&store.path, &path)?;
        debug!(from = old, to = new, "renamed store");
        Ok(Store::new(new, path))
    }
}
