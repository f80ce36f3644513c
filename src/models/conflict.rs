//! Double-booking detection across groups.
//!
//! A slot conflicts when another day on the same weekday uses the same
//! classroom, or a lesson taught by the same teacher, at the same slot index.
//! Nothing is stored; every query scans the open schedule's days.

use super::day::Day;
use crate::orm::model::Model;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictKind {
    Classroom,
    Teacher,
}

/// Conflicts found for one slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SlotConflicts {
    pub classroom: bool,
    pub teacher: bool,
}

impl SlotConflicts {
    pub fn any(&self) -> bool {
        self.classroom || self.teacher
    }
}

/// Key compared across days: the live classroom id, or the live teacher id
/// of the slot's lesson.
fn slot_key(day: &Day, index: usize, kind: ConflictKind) -> Option<i64> {
    match kind {
        ConflictKind::Classroom => day.classrooms.item(index)?.resolved_id(),
        ConflictKind::Teacher => day.lessons.get(index)?.read().teacher.resolved_id(),
    }
}

/// Whether slot `index` of `day` clashes with another day of the same weekday.
///
/// `day` itself is skipped by id, so it may be borrowed from a locked handle.
pub fn has_conflict(day: &Day, index: usize, kind: ConflictKind) -> bool {
    let Some(key) = slot_key(day, index, kind) else {
        return false;
    };
    let day_order = day.day_order();
    Day::registry()
        .entries()
        .into_iter()
        .filter(|(id, _)| *id != day.id())
        .any(|(_, other)| {
            let other = other.read();
            other.day_order() == day_order && slot_key(&other, index, kind) == Some(key)
        })
}

/// Both conflict kinds for every slot of `day`.
pub fn slot_conflicts(day: &Day) -> Vec<SlotConflicts> {
    (0..day.slot_count())
        .map(|index| SlotConflicts {
            classroom: has_conflict(day, index, ConflictKind::Classroom),
            teacher: has_conflict(day, index, ConflictKind::Teacher),
        })
        .collect()
}
