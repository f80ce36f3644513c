//! Typed schema declarations for entity fields.
//!
//! Each entity type declares its fields once, as a `static` slice of
//! [`FieldDescriptor`]s. The slice drives table creation, the generic forms
//! of the presentation layer and the validation of every value a holder is
//! built from.

use super::error::{OrmError, Result};
use super::value::{decode_id, Value};

/// How a field is laid out in the row store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageKind {
    Integer,
    Text,
}

impl StorageKind {
    pub fn sql_type(self) -> &'static str {
        match self {
            StorageKind::Integer => "INTEGER",
            StorageKind::Text => "TEXT",
        }
    }
}

/// What a field means, beyond its storage layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Integer,
    Text,
    /// File name of an image; stored and validated as text.
    Image,
    /// One-to-one reference, stored as the target's id.
    Reference { target: &'static str },
    /// Ordered one-to-many references, stored as an encoded id list.
    ReferenceList { target: &'static str },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub kind: FieldKind,
    pub default: Option<&'static str>,
    pub primary_key: bool,
    pub autoincrement: bool,
    pub read_only: bool,
    pub label: &'static str,
}

impl FieldDescriptor {
    const fn new(name: &'static str, kind: FieldKind, label: &'static str) -> Self {
        Self {
            name,
            kind,
            default: None,
            primary_key: false,
            autoincrement: false,
            read_only: false,
            label,
        }
    }

    /// The `id` field every entity starts with.
    pub const fn id() -> Self {
        Self {
            primary_key: true,
            autoincrement: true,
            read_only: true,
            ..Self::new("id", FieldKind::Integer, "ID")
        }
    }

    pub const fn integer(name: &'static str, label: &'static str) -> Self {
        Self::new(name, FieldKind::Integer, label)
    }

    pub const fn text(name: &'static str, label: &'static str) -> Self {
        Self::new(name, FieldKind::Text, label)
    }

    pub const fn image(name: &'static str, label: &'static str) -> Self {
        Self::new(name, FieldKind::Image, label)
    }

    pub const fn reference(name: &'static str, target: &'static str, label: &'static str) -> Self {
        Self::new(name, FieldKind::Reference { target }, label)
    }

    pub const fn list(name: &'static str, target: &'static str, label: &'static str) -> Self {
        Self::new(name, FieldKind::ReferenceList { target }, label)
    }

    pub const fn with_default(self, default: &'static str) -> Self {
        Self {
            default: Some(default),
            ..self
        }
    }

    pub const fn read_only(self) -> Self {
        Self { read_only: true, ..self }
    }

    pub fn storage_kind(&self) -> StorageKind {
        match self.kind {
            FieldKind::Integer | FieldKind::Reference { .. } => StorageKind::Integer,
            FieldKind::Text | FieldKind::Image | FieldKind::ReferenceList { .. } => StorageKind::Text,
        }
    }

    /// Table the field points at, for reference and list fields.
    pub fn target(&self) -> Option<&'static str> {
        match self.kind {
            FieldKind::Reference { target } | FieldKind::ReferenceList { target } => Some(target),
            _ => None,
        }
    }

    /// Column definition used when creating the table, e.g.
    /// `id INTEGER PRIMARY KEY AUTOINCREMENT`.
    pub fn definition(&self) -> String {
        let mut parts = vec![self.name.to_string(), self.storage_kind().sql_type().to_string()];
        if self.primary_key {
            parts.push("PRIMARY KEY".to_string());
        }
        if self.autoincrement {
            parts.push("AUTOINCREMENT".to_string());
        }
        if let Some(default) = self.default {
            parts.push(format!("DEFAULT '{}'", default.replace('\'', "''")));
        }
        parts.join(" ")
    }

    pub fn expected(&self) -> &'static str {
        match self.kind {
            FieldKind::Integer => "an integer",
            FieldKind::Text => "text",
            FieldKind::Image => "an image file name",
            FieldKind::Reference { .. } => "an entity id or reference",
            FieldKind::ReferenceList { .. } => "an encoded id list or reference list",
        }
    }

    /// Whether `value` may be stored in this field. Never coerces.
    pub fn validate(&self, value: &Value) -> bool {
        match (self.kind, value) {
            (FieldKind::Integer, Value::Integer(_)) => true,
            (FieldKind::Text | FieldKind::Image, Value::Text(_)) => true,
            (FieldKind::Reference { .. }, Value::Integer(_)) => true,
            (FieldKind::Reference { target }, Value::Reference { table, .. }) => *table == target,
            (FieldKind::ReferenceList { .. }, Value::Text(encoded)) => decode_list(encoded).is_ok(),
            (FieldKind::ReferenceList { target }, Value::List { table, .. }) => *table == target,
            _ => false,
        }
    }

    /// Validate `value` or report the mismatch.
    pub fn check(&self, value: Value) -> Result<Value> {
        if self.validate(&value) {
            Ok(value)
        } else {
            Err(OrmError::TypeMismatch {
                field: self.name,
                expected: self.expected(),
                found: value.kind(),
            })
        }
    }

    /// Substitute the declared default for a missing or null value.
    pub fn or_default(&self, value: Option<Value>) -> Result<Value> {
        match (value, self.default) {
            (Some(Value::Null) | None, Some(default)) => Ok(Value::text(default)),
            (Some(value), _) => Ok(value),
            (None, None) => Err(OrmError::MissingField(self.name)),
        }
    }

    /// Parse user input typed into a form for this field.
    ///
    /// Reference fields take a raw id (`-1` or an empty string clears them),
    /// list fields a comma-separated id list.
    pub fn parse_input(&self, input: &str) -> Result<Value> {
        let input = input.trim();
        let mismatch = || OrmError::TypeMismatch {
            field: self.name,
            expected: self.expected(),
            found: "text",
        };
        let value = match self.kind {
            FieldKind::Text | FieldKind::Image => Value::text(input),
            FieldKind::Integer => Value::Integer(input.parse().map_err(|_| mismatch())?),
            FieldKind::Reference { target } => {
                let id = if input.is_empty() { None } else { decode_id(input.parse().map_err(|_| mismatch())?) };
                Value::Reference { table: target, id }
            }
            FieldKind::ReferenceList { target } => {
                let ids = input
                    .split(',')
                    .map(str::trim)
                    .filter(|part| !part.is_empty())
                    .map(|part| part.parse::<i64>().map(decode_id).map_err(|_| mismatch()))
                    .collect::<Result<Vec<_>>>()?;
                Value::List { table: target, ids }
            }
        };
        self.check(value)
    }
}

/// Decode the stored form of a reference list: a JSON array of ids.
pub fn decode_list(encoded: &str) -> std::result::Result<Vec<Option<i64>>, serde_json::Error> {
    let encoded = encoded.trim();
    if encoded.is_empty() {
        return Ok(Vec::new());
    }
    let raw: Vec<i64> = serde_json::from_str(encoded)?;
    Ok(raw.into_iter().map(decode_id).collect())
}

/// Column names of a field set, in declaration order.
pub fn field_names(fields: &[FieldDescriptor]) -> Vec<&'static str> {
    fields.iter().map(|f| f.name).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    static ID: FieldDescriptor = FieldDescriptor::id();
    static NAME: FieldDescriptor = FieldDescriptor::text("name", "Name");
    static IMAGE: FieldDescriptor = FieldDescriptor::image("image", "Image").with_default("default.png");
    static TEACHER: FieldDescriptor = FieldDescriptor::reference("teacher", "teachers", "Teacher");
    static LESSONS: FieldDescriptor = FieldDescriptor::list("lessons", "lessons", "Lessons");

    #[test]
    fn definitions_carry_modifiers() {
        assert_eq!(ID.definition(), "id INTEGER PRIMARY KEY AUTOINCREMENT");
        assert_eq!(NAME.definition(), "name TEXT");
        assert_eq!(IMAGE.definition(), "image TEXT DEFAULT 'default.png'");
        assert_eq!(TEACHER.definition(), "teacher INTEGER");
        assert_eq!(LESSONS.definition(), "lessons TEXT");
    }

    #[test]
    fn integer_and_text_do_not_coerce() {
        assert!(ID.validate(&Value::Integer(4)));
        assert!(!ID.validate(&Value::text("4")));
        assert!(NAME.validate(&Value::text("Math")));
        assert!(!NAME.validate(&Value::Integer(1)));
        assert!(matches!(NAME.check(Value::Null), Err(OrmError::TypeMismatch { field: "name", .. })));
    }

    #[test]
    fn corrupt_row_values_are_reported() {
        let real = Value::from(rusqlite::types::Value::Real(3.0));
        assert!(matches!(ID.check(real.clone()), Err(OrmError::TypeMismatch { found: "real", .. })));
        assert!(!TEACHER.validate(&real));
        assert!(IMAGE.check(IMAGE.or_default(Some(real)).unwrap()).is_err());
    }

    #[test]
    fn references_check_the_target_table() {
        assert!(TEACHER.validate(&Value::Integer(2)));
        assert!(TEACHER.validate(&Value::Reference { table: "teachers", id: None }));
        assert!(!TEACHER.validate(&Value::Reference { table: "groups", id: Some(1) }));
        assert!(!TEACHER.validate(&Value::text("2")));
    }

    #[test]
    fn lists_accept_encoded_or_resolved_forms() {
        assert!(LESSONS.validate(&Value::text("[1, -1, 3]")));
        assert!(LESSONS.validate(&Value::text("")));
        assert!(!LESSONS.validate(&Value::text("[\"a\"]")));
        assert!(LESSONS.validate(&Value::List { table: "lessons", ids: vec![Some(1)] }));
        assert!(!LESSONS.validate(&Value::List { table: "classrooms", ids: vec![] }));
    }

    #[test]
    fn decode_list_maps_empty_slots() {
        assert_eq!(decode_list("[4,-1,2]").unwrap(), vec![Some(4), None, Some(2)]);
        assert!(decode_list("[4,").is_err());
    }

    #[test]
    fn default_fills_missing_values() {
        assert_eq!(IMAGE.or_default(None).unwrap(), Value::text("default.png"));
        assert_eq!(IMAGE.or_default(Some(Value::Null)).unwrap(), Value::text("default.png"));
        assert!(matches!(NAME.or_default(None), Err(OrmError::MissingField("name"))));
    }

    #[test]
    fn parse_input_follows_the_field_kind() {
        assert_eq!(ID.parse_input("12").unwrap(), Value::Integer(12));
        assert!(ID.parse_input("twelve").is_err());
        assert_eq!(TEACHER.parse_input("").unwrap(), Value::Reference { table: "teachers", id: None });
        assert_eq!(
            LESSONS.parse_input("3, -1,5").unwrap(),
            Value::List { table: "lessons", ids: vec![Some(3), None, Some(5)] }
        );
    }
}
