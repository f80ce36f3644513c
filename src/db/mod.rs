//! Storage for the schedmaker application.
//!
//! Every named store is one SQLite file. [`db::Db`] runs the row-level
//! commands the mapping layer needs against one store; [`catalog::Catalog`]
//! manages the set of stores in a directory.
//!
//! ```rust,no_run
//! use schedmaker::db::catalog::Catalog;
//! use schedmaker::models::schedule::Schedule;
//!
//! let catalog = Catalog::new("/tmp/schedules");
//! catalog.create("10A", &Schedule::schemas())?;
//! assert!(catalog.list()?.contains(&"10A".to_string()));
//! # Ok::<(), schedmaker::orm::error::OrmError>(())
//! ```

/// Store names, creation, renaming and removal.
pub mod catalog;

/// Connection handling and the parameterized row-store commands.
pub mod db;
