//! The active-record mapping layer.
//!
//! Entity types declare a static field list and implement [`model::Model`];
//! everything else (identity maps, id allocation, holders, persistence) is
//! shared here.
//!
//! ```rust,no_run
//! use schedmaker::models::structure::{Lesson, Teacher};
//! use schedmaker::orm::model::Model;
//!
//! let ivanov = Teacher::create("Ivanov", None)?;
//! let math = Lesson::create("Math", Some(&ivanov))?;
//! assert_eq!(math.read().teacher.resolved_id(), Some(ivanov.read().id()));
//!
//! ivanov.read().delete()?;
//! assert!(math.read().teacher.get().is_none());
//! # Ok::<(), schedmaker::orm::error::OrmError>(())
//! ```

/// Typed error for every mapping-layer failure.
pub mod error;

/// Static field declarations: storage kind, defaults, validation.
pub mod field;

/// Value holders bound to one field of one entity.
pub mod holder;

/// The `Model` trait and the shared entity lifecycle.
pub mod model;

/// Per-type identity maps with atomic id allocation.
pub mod registry;

/// Values and records exchanged with holders and the row store.
pub mod value;
