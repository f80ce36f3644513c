//! Value holders: one per entity attribute, bound to its field descriptor.
//!
//! Holders mediate between what the row store keeps (integers, strings,
//! encoded id lists) and what callers work with. Reference holders keep the
//! target id and resolve it through the target type's identity map on every
//! access, so a deleted target reads back as `None`.

use super::error::{OrmError, Result};
use super::field::{decode_list, FieldDescriptor};
use super::model::{Handle, Model};
use super::value::{decode_id, encode_id, Value};
use rusqlite::types::Value as SqlValue;
use std::fmt;
use std::marker::PhantomData;

/// Shown in place of an empty or stale reference.
pub const EMPTY_LABEL: &str = "—";

/// Behavior shared by every holder, used by the generic save path and by
/// field-driven forms.
pub trait FieldHolder {
    fn descriptor(&self) -> &'static FieldDescriptor;

    /// The value as it is written to the row store.
    fn to_storage(&self) -> SqlValue;

    fn to_value(&self) -> Value;

    /// Replace the value after validating it against the descriptor.
    fn set_value(&mut self, value: Value) -> Result<()>;

    /// Human-readable rendering, resolving references.
    fn display(&self) -> String;
}

fn mismatch(descriptor: &FieldDescriptor, value: &Value) -> OrmError {
    OrmError::TypeMismatch {
        field: descriptor.name,
        expected: descriptor.expected(),
        found: value.kind(),
    }
}

/// Holder for plain integer and text fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Holder<T> {
    descriptor: &'static FieldDescriptor,
    value: T,
}

impl<T> Holder<T> {
    pub fn get(&self) -> &T {
        &self.value
    }

    pub fn set(&mut self, value: T) {
        self.value = value;
    }
}

impl Holder<i64> {
    pub fn new(descriptor: &'static FieldDescriptor, value: Option<Value>) -> Result<Self> {
        match descriptor.check(descriptor.or_default(value)?)? {
            Value::Integer(value) => Ok(Self { descriptor, value }),
            other => Err(mismatch(descriptor, &other)),
        }
    }
}

impl Holder<String> {
    pub fn new(descriptor: &'static FieldDescriptor, value: Option<Value>) -> Result<Self> {
        match descriptor.check(descriptor.or_default(value)?)? {
            Value::Text(value) => Ok(Self { descriptor, value }),
            other => Err(mismatch(descriptor, &other)),
        }
    }
}

impl FieldHolder for Holder<i64> {
    fn descriptor(&self) -> &'static FieldDescriptor {
        self.descriptor
    }

    fn to_storage(&self) -> SqlValue {
        SqlValue::Integer(self.value)
    }

    fn to_value(&self) -> Value {
        Value::Integer(self.value)
    }

    fn set_value(&mut self, value: Value) -> Result<()> {
        *self = Self::new(self.descriptor, Some(value))?;
        Ok(())
    }

    fn display(&self) -> String {
        self.value.to_string()
    }
}

impl FieldHolder for Holder<String> {
    fn descriptor(&self) -> &'static FieldDescriptor {
        self.descriptor
    }

    fn to_storage(&self) -> SqlValue {
        SqlValue::Text(self.value.clone())
    }

    fn to_value(&self) -> Value {
        Value::Text(self.value.clone())
    }

    fn set_value(&mut self, value: Value) -> Result<()> {
        *self = Self::new(self.descriptor, Some(value))?;
        Ok(())
    }

    fn display(&self) -> String {
        self.value.clone()
    }
}

/// One-to-one reference to an entity of type `E`.
pub struct Reference<E> {
    descriptor: &'static FieldDescriptor,
    id: Option<i64>,
    _target: PhantomData<fn() -> E>,
}

impl<E> Clone for Reference<E> {
    fn clone(&self) -> Self {
        Self {
            descriptor: self.descriptor,
            id: self.id,
            _target: PhantomData,
        }
    }
}

impl<E> fmt::Debug for Reference<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reference")
            .field("field", &self.descriptor.name)
            .field("id", &self.id)
            .finish()
    }
}

impl<E: Model> Reference<E> {
    /// Accepts a raw id (negative for empty) or a resolved reference to `E`.
    pub fn new(descriptor: &'static FieldDescriptor, value: Option<Value>) -> Result<Self> {
        let id = match descriptor.check(descriptor.or_default(value)?)? {
            Value::Integer(raw) => decode_id(raw),
            Value::Reference { table, id } if table == E::TABLE => id,
            other => return Err(mismatch(descriptor, &other)),
        };
        Ok(Self::with_id(descriptor, id))
    }

    fn with_id(descriptor: &'static FieldDescriptor, id: Option<i64>) -> Self {
        Self {
            descriptor,
            id,
            _target: PhantomData,
        }
    }

    /// Resolve through the identity map. `None` for empty or deleted targets.
    pub fn get(&self) -> Option<Handle<E>> {
        self.id.and_then(|id| E::registry().get(id))
    }

    /// The stored id, which may point at a deleted entity.
    pub fn id(&self) -> Option<i64> {
        self.id
    }

    /// The id only while its entity is still live.
    pub fn resolved_id(&self) -> Option<i64> {
        self.id.filter(|id| E::registry().contains(*id))
    }

    pub fn set(&mut self, target: Option<&Handle<E>>) {
        self.id = target.map(|t| t.read().id());
    }

    pub fn set_id(&mut self, id: Option<i64>) {
        self.id = id;
    }

    pub fn is_empty(&self) -> bool {
        self.resolved_id().is_none()
    }
}

impl<E: Model + fmt::Display> FieldHolder for Reference<E> {
    fn descriptor(&self) -> &'static FieldDescriptor {
        self.descriptor
    }

    fn to_storage(&self) -> SqlValue {
        SqlValue::Integer(encode_id(self.id))
    }

    fn to_value(&self) -> Value {
        Value::Reference {
            table: E::TABLE,
            id: self.id,
        }
    }

    fn set_value(&mut self, value: Value) -> Result<()> {
        *self = Self::new(self.descriptor, Some(value))?;
        Ok(())
    }

    fn display(&self) -> String {
        match self.get() {
            Some(target) => target.read().to_string(),
            None => EMPTY_LABEL.to_string(),
        }
    }
}

/// Ordered list of references to entities of type `E`.
pub struct ReferenceList<E> {
    descriptor: &'static FieldDescriptor,
    items: Vec<Reference<E>>,
}

impl<E> Clone for ReferenceList<E> {
    fn clone(&self) -> Self {
        Self {
            descriptor: self.descriptor,
            items: self.items.clone(),
        }
    }
}

impl<E> fmt::Debug for ReferenceList<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReferenceList")
            .field("field", &self.descriptor.name)
            .field("ids", &self.items.iter().map(|i| i.id).collect::<Vec<_>>())
            .finish()
    }
}

impl<E: Model> ReferenceList<E> {
    /// Accepts the encoded id list read from the row store or a resolved list.
    pub fn new(descriptor: &'static FieldDescriptor, value: Option<Value>) -> Result<Self> {
        let ids = match descriptor.or_default(value)? {
            Value::Text(encoded) => decode_list(&encoded).map_err(|source| OrmError::Decode {
                field: descriptor.name,
                source,
            })?,
            Value::List { table, ids } if table == E::TABLE => ids,
            other => return Err(mismatch(descriptor, &other)),
        };
        Ok(Self {
            descriptor,
            items: ids.into_iter().map(|id| Reference::with_id(descriptor, id)).collect(),
        })
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[Reference<E>] {
        &self.items
    }

    /// Resolve the element at `index`; `None` when out of range, empty or stale.
    pub fn get(&self, index: usize) -> Option<Handle<E>> {
        self.items.get(index).and_then(Reference::get)
    }

    pub fn item(&self, index: usize) -> Option<&Reference<E>> {
        self.items.get(index)
    }

    pub fn resolve_all(&self) -> Vec<Option<Handle<E>>> {
        self.items.iter().map(Reference::get).collect()
    }

    pub fn ids(&self) -> Vec<Option<i64>> {
        self.items.iter().map(Reference::id).collect()
    }

    pub fn push(&mut self, target: Option<&Handle<E>>) {
        let mut item = Reference::with_id(self.descriptor, None);
        item.set(target);
        self.items.push(item);
    }

    pub fn push_id(&mut self, id: Option<i64>) {
        self.items.push(Reference::with_id(self.descriptor, id));
    }

    pub fn remove(&mut self, index: usize) -> Option<Reference<E>> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    pub fn swap(&mut self, a: usize, b: usize) {
        self.items.swap(a, b);
    }

    /// Replace the element at `index`. Returns `false` when out of range.
    pub fn set(&mut self, index: usize, target: Option<&Handle<E>>) -> bool {
        match self.items.get_mut(index) {
            Some(item) => {
                item.set(target);
                true
            }
            None => false,
        }
    }

    pub fn set_id(&mut self, index: usize, id: Option<i64>) -> bool {
        match self.items.get_mut(index) {
            Some(item) => {
                item.set_id(id);
                true
            }
            None => false,
        }
    }

    fn encode(&self) -> String {
        let ids: Vec<String> = self.items.iter().map(|i| encode_id(i.id).to_string()).collect();
        format!("[{}]", ids.join(", "))
    }
}

impl<E: Model + fmt::Display> FieldHolder for ReferenceList<E> {
    fn descriptor(&self) -> &'static FieldDescriptor {
        self.descriptor
    }

    fn to_storage(&self) -> SqlValue {
        SqlValue::Text(self.encode())
    }

    fn to_value(&self) -> Value {
        Value::List {
            table: E::TABLE,
            ids: self.ids(),
        }
    }

    fn set_value(&mut self, value: Value) -> Result<()> {
        *self = Self::new(self.descriptor, Some(value))?;
        Ok(())
    }

    fn display(&self) -> String {
        self.items.iter().map(|item| item.display()).collect::<Vec<_>>().join(", ")
    }
}
