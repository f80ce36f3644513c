//! The active-record lifecycle shared by every entity type.
//!
//! An entity type implements [`Model`] by naming its table, its static field
//! list and its registry, and by mapping a [`Record`] onto its holders. Every
//! lifecycle operation (construct, new, save, delete, bulk load) is provided
//! here once, on top of that mapping.

use super::error::{OrmError, Result};
use super::field::{field_names, FieldDescriptor};
use super::holder::{FieldHolder, Holder};
use super::registry::Registry;
use super::value::{Record, Value};
use crate::db::db::{Db, Store};
use parking_lot::RwLock;
use rusqlite::types::Value as SqlValue;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Shared handle to a live entity in its identity map.
pub type Handle<E> = Arc<RwLock<E>>;

static ID_FIELD: FieldDescriptor = FieldDescriptor::id();

/// State every entity carries: its id holder and whether it still has to be
/// inserted.
#[derive(Debug, Clone)]
pub struct EntityBase {
    id: Holder<i64>,
    created: bool,
}

impl EntityBase {
    /// Take the `id` value out of `record`.
    pub fn from_record(record: &mut Record) -> Result<Self> {
        Ok(Self {
            id: Holder::<i64>::new(&ID_FIELD, record.take(ID_FIELD.name))?,
            created: false,
        })
    }

    pub fn id(&self) -> i64 {
        *self.id.get()
    }

    pub fn id_holder(&self) -> &dyn FieldHolder {
        &self.id
    }

    pub fn id_holder_mut(&mut self) -> &mut dyn FieldHolder {
        &mut self.id
    }

    pub fn is_created(&self) -> bool {
        self.created
    }
}

/// Table name plus field list, enough to create the table.
#[derive(Debug, Clone, Copy)]
pub struct TableSchema {
    pub table: &'static str,
    pub fields: &'static [FieldDescriptor],
}

impl TableSchema {
    pub fn definitions(&self) -> Vec<String> {
        self.fields.iter().map(FieldDescriptor::definition).collect()
    }
}

pub trait Model: fmt::Display + Sized + Send + Sync + 'static {
    const TABLE: &'static str;

    /// Plural display name of the entity type.
    const TITLE: &'static str;

    /// Declared fields, `id` first.
    fn fields() -> &'static [FieldDescriptor];

    fn registry() -> &'static Registry<Self>;

    /// Build an instance from field values without registering it.
    fn from_record(record: Record) -> Result<Self>;

    fn base(&self) -> &EntityBase;

    fn base_mut(&mut self) -> &mut EntityBase;

    /// Holders in the same order as [`Model::fields`].
    fn holders(&self) -> Vec<&dyn FieldHolder>;

    fn holders_mut(&mut self) -> Vec<&mut dyn FieldHolder>;

    fn id(&self) -> i64 {
        self.base().id()
    }

    fn is_created(&self) -> bool {
        self.base().created
    }

    fn schema() -> TableSchema {
        TableSchema {
            table: Self::TABLE,
            fields: Self::fields(),
        }
    }

    fn field(name: &str) -> Option<&'static FieldDescriptor> {
        Self::fields().iter().find(|f| f.name == name)
    }

    /// Reject values for fields the type does not declare.
    fn check_record(record: &Record) -> Result<()> {
        match record.names().find(|name| Self::field(name).is_none()) {
            Some(name) => Err(OrmError::UnknownField {
                table: Self::TABLE,
                field: name.to_string(),
            }),
            None => Ok(()),
        }
    }

    /// Build an instance and register it in the identity map. An id that is
    /// already live is refused.
    fn construct(record: Record) -> Result<Handle<Self>> {
        Self::check_record(&record)?;
        Self::registry().register(Self::from_record(record)?)
    }

    /// Create a brand-new entity with the next free id and persist it.
    fn new(mut record: Record) -> Result<Handle<Self>> {
        Self::check_record(&record)?;
        let registry = Self::registry();
        let handle = registry.insert_new(|id| {
            record.set(ID_FIELD.name, id);
            let mut entity = Self::from_record(record)?;
            entity.base_mut().created = true;
            Ok(entity)
        })?;

        let saved = handle.write().save();
        if let Err(err) = saved {
            let id = handle.read().id();
            registry.evict(id);
            return Err(err);
        }
        Ok(handle)
    }

    /// Every field as it goes into the row store, in declaration order.
    fn storage_values(&self) -> Vec<SqlValue> {
        self.holders().iter().map(|h| h.to_storage()).collect()
    }

    fn value(&self, name: &str) -> Option<Value> {
        self.holders().into_iter().find(|h| h.descriptor().name == name).map(|h| h.to_value())
    }

    /// Assign one field through its holder. Read-only fields are refused.
    fn set_value(&mut self, name: &str, value: Value) -> Result<()> {
        let table = Self::TABLE;
        let holder = self
            .holders_mut()
            .into_iter()
            .find(|h| h.descriptor().name == name && !h.descriptor().read_only)
            .ok_or_else(|| OrmError::UnknownField {
                table,
                field: name.to_string(),
            })?;
        holder.set_value(value)
    }

    /// Assign several fields at once. Every value is checked first, so a bad
    /// one leaves the entity untouched.
    fn set_values(&mut self, record: &Record) -> Result<()> {
        for name in record.names() {
            let descriptor = match Self::field(name) {
                Some(descriptor) if !descriptor.read_only => descriptor,
                _ => {
                    return Err(OrmError::UnknownField {
                        table: Self::TABLE,
                        field: name.to_string(),
                    })
                }
            };
            descriptor.check(descriptor.or_default(record.get(name).cloned())?)?;
        }
        for name in record.names() {
            if let Some(value) = record.get(name) {
                self.set_value(name, value.clone())?;
            }
        }
        Ok(())
    }

    /// Insert when created, otherwise update every non-key field.
    fn save(&mut self) -> Result<()> {
        let store = Self::registry().store()?;
        let db = Db::open(&store)?;
        let fields = Self::fields();
        let values = self.storage_values();

        if self.is_created() {
            db.insert(Self::TABLE, &field_names(fields), &values)?;
            self.base_mut().created = false;
            debug!(table = Self::TABLE, id = self.id(), store = %store.name, "inserted row");
        } else {
            let (names, values): (Vec<&str>, Vec<SqlValue>) = fields
                .iter()
                .zip(values)
                .filter(|(field, _)| !field.primary_key)
                .map(|(field, value)| (field.name, value))
                .unzip();
            db.update_by_id(Self::TABLE, self.id(), &names, &values)?;
            debug!(table = Self::TABLE, id = self.id(), store = %store.name, "updated row");
        }
        Ok(())
    }

    /// Remove the row, then evict the instance from the identity map.
    fn delete(&self) -> Result<()> {
        let store = Self::registry().store()?;
        Db::open(&store)?.delete_by_id(Self::TABLE, self.id())?;
        Self::registry().evict(self.id());
        debug!(table = Self::TABLE, id = self.id(), "deleted row");
        Ok(())
    }

    /// Bind the type to `store` and hydrate one instance per row. Ids of
    /// rows deleted in earlier sessions stay reserved.
    fn load_all(store: &Store) -> Result<usize> {
        let registry = Self::registry();
        registry.bind(store.clone());

        let names = field_names(Self::fields());
        let db = Db::open(store)?;
        let rows = db.select_all(Self::TABLE, &names)?;
        let count = rows.len();
        for row in rows {
            let record = names
                .iter()
                .zip(row)
                .map(|(name, value)| (name.to_string(), Value::from(value)))
                .collect::<Record>();
            registry.register(Self::from_record(record)?)?;
        }
        registry.reserve_up_to(db.sequence(Self::TABLE)?);
        debug!(table = Self::TABLE, store = %store.name, count, "loaded rows");
        Ok(count)
    }

    fn get(id: i64) -> Option<Handle<Self>> {
        Self::registry().get(id)
    }

    fn all() -> Vec<Handle<Self>> {
        Self::registry().all()
    }
}
