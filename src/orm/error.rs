use thiserror::Error;

/// Errors raised by the mapping layer, the row store and the store catalog.
///
/// Schema violations are fatal to the operation that triggered them. Stale
/// references are never reported here: resolving a deleted id yields `None`.
#[derive(Debug, Error)]
pub enum OrmError {
    #[error("field `{field}` expects {expected}, got {found}")]
    TypeMismatch {
        field: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    #[error("table `{table}` already holds a live instance with id {id}")]
    DuplicateId { table: &'static str, id: i64 },

    #[error("no value supplied for field `{0}`")]
    MissingField(&'static str),

    #[error("table `{table}` has no field named `{field}`")]
    UnknownField { table: &'static str, field: String },

    #[error("field `{field}` holds an undecodable reference list")]
    Decode {
        field: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("store `{0}` does not exist")]
    StoreNotFound(String),

    #[error("store `{0}` already exists")]
    StoreAlreadyExists(String),

    #[error("`{0}` is not a valid store name")]
    InvalidName(String),

    #[error("no store is open for table `{0}`")]
    StoreNotOpen(&'static str),

    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = OrmError> = std::result::Result<T, E>;
