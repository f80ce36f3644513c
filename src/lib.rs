//! # Schedmaker - school timetable editor
//!
//! Groups, teachers, classrooms and lessons live in a main store; each
//! schedule store holds one week of slots per group. Both sit on a small
//! active-record layer over SQLite.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use schedmaker::commands::Cli;
//!
//! fn main() -> anyhow::Result<()> {
//!     Cli::menu()
//! }
//! ```

pub mod commands;
pub mod db;
pub mod libs;
pub mod models;
pub mod orm;
