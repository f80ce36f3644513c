//! Field-level values exchanged between the row store, holders and callers.
//!
//! A [`Value`] is what a holder is built from: either the raw persisted form
//! (an integer id, an encoded id list) or the already-resolved form carrying
//! the referenced table, so reference fields can reject entities of the wrong
//! type. Only [`SqlValue::Integer`] and [`SqlValue::Text`] ever cross into the
//! row store.

use super::model::{Handle, Model};
use rusqlite::types::Value as SqlValue;

/// Id stored for an unset reference.
pub const EMPTY_ID: i64 = -1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Null,
    Integer(i64),
    Text(String),
    /// A resolved reference; `id == None` is the empty selection.
    Reference { table: &'static str, id: Option<i64> },
    /// A resolved, homogeneous list of references.
    List { table: &'static str, ids: Vec<Option<i64>> },
    /// A stored value no field kind accepts (`real`, `blob`).
    Unsupported(&'static str),
}

impl Value {
    pub fn text(value: impl Into<String>) -> Self {
        Value::Text(value.into())
    }

    /// Reference to a live entity.
    pub fn reference<E: Model>(entity: &Handle<E>) -> Self {
        Value::Reference {
            table: E::TABLE,
            id: Some(entity.read().id()),
        }
    }

    /// The empty reference for entities of type `E`.
    pub fn empty_reference<E: Model>() -> Self {
        Value::Reference { table: E::TABLE, id: None }
    }

    pub fn list<E: Model>(entities: &[Handle<E>]) -> Self {
        Value::List {
            table: E::TABLE,
            ids: entities.iter().map(|e| Some(e.read().id())).collect(),
        }
    }

    /// The text a user would type to enter this value, the inverse of
    /// [`FieldDescriptor::parse_input`](super::field::FieldDescriptor::parse_input).
    pub fn to_input(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Integer(value) => value.to_string(),
            Value::Text(value) => value.clone(),
            Value::Reference { id, .. } => id.map(|id| id.to_string()).unwrap_or_default(),
            Value::List { ids, .. } => ids
                .iter()
                .map(|id| encode_id(*id).to_string())
                .collect::<Vec<_>>()
                .join(", "),
            Value::Unsupported(_) => String::new(),
        }
    }

    /// Short kind name used in type-mismatch reports.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Integer(_) => "integer",
            Value::Text(_) => "text",
            Value::Reference { .. } => "reference",
            Value::List { .. } => "reference list",
            Value::Unsupported(kind) => *kind,
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Integer(i64::from(value))
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<SqlValue> for Value {
    fn from(value: SqlValue) -> Self {
        match value {
            SqlValue::Integer(i) => Value::Integer(i),
            SqlValue::Text(s) => Value::Text(s),
            SqlValue::Null => Value::Null,
            SqlValue::Real(_) => Value::Unsupported("real"),
            SqlValue::Blob(_) => Value::Unsupported("blob"),
        }
    }
}

/// Encode an optional id the way the row store keeps it.
pub fn encode_id(id: Option<i64>) -> i64 {
    id.unwrap_or(EMPTY_ID)
}

/// Decode a stored id; negative ids are the empty selection.
pub fn decode_id(raw: i64) -> Option<i64> {
    (raw >= 0).then_some(raw)
}

/// A named set of field values, the equivalent of keyword arguments when
/// constructing an entity.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    values: Vec<(String, Value)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, replacing any previous value for `name`.
    pub fn with(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: &str, value: impl Into<Value>) {
        let value = value.into();
        match self.values.iter_mut().find(|(n, _)| n == name) {
            Some(slot) => slot.1 = value,
            None => self.values.push((name.to_string(), value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    /// Remove and return the value for `name`.
    pub fn take(&mut self, name: &str) -> Option<Value> {
        let index = self.values.iter().position(|(n, _)| n == name)?;
        Some(self.values.remove(index).1)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(|(n, _)| n.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FromIterator<(String, Value)> for Record {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (name, value) in iter {
            record.set(&name, value);
        }
        record
    }
}
