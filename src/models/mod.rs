//! The schedule domain.

/// Double-booking detection between groups.
pub mod conflict;

/// A weekday of one group: parallel lesson and classroom slots.
pub mod day;

/// Schedule store lifecycle and per-group weeks.
pub mod schedule;

/// Groups, teachers, classrooms and lessons from the main store.
pub mod structure;

pub mod week;
