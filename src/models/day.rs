//! One weekday of one group's timetable.
//!
//! A day is two parallel reference lists, lessons and classrooms, where index
//! `i` of both lists together form slot `i`. Every slot operation touches both
//! lists at once so they never drift apart in length or order.

use super::structure::{Classroom, Group, Lesson};
use crate::orm::error::Result;
use crate::orm::field::FieldDescriptor;
use crate::orm::holder::{FieldHolder, Holder, Reference, ReferenceList};
use crate::orm::model::{EntityBase, Handle, Model};
use crate::orm::registry::Registry;
use crate::orm::value::{Record, Value};
use std::fmt;

pub const WEEKDAYS: [&str; 6] = ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday"];

static DAY_FIELDS: [FieldDescriptor; 5] = [
    FieldDescriptor::id(),
    FieldDescriptor::list("lessons", "lessons", "Lessons"),
    FieldDescriptor::list("classrooms", "classrooms", "Classrooms"),
    FieldDescriptor::reference("group_id", "groups", "Group").read_only(),
    FieldDescriptor::integer("day_order", "Day of week").read_only(),
];

static DAYS: Registry<Day> = Registry::new();

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// One timetable slot, resolved. `None` marks an empty or stale reference.
#[derive(Debug, Clone)]
pub struct Slot {
    pub lesson: Option<Handle<Lesson>>,
    pub classroom: Option<Handle<Classroom>>,
}

#[derive(Debug, Clone)]
pub struct Day {
    base: EntityBase,
    pub lessons: ReferenceList<Lesson>,
    pub classrooms: ReferenceList<Classroom>,
    pub group: Reference<Group>,
    pub day_order: Holder<i64>,
}

impl Day {
    /// Create and persist an empty day for `group`.
    pub fn create(group: &Handle<Group>, day_order: i64) -> Result<Handle<Day>> {
        <Day as Model>::new(
            Record::new()
                .with("lessons", Value::List { table: Lesson::TABLE, ids: Vec::new() })
                .with("classrooms", Value::List { table: Classroom::TABLE, ids: Vec::new() })
                .with("group_id", Value::reference(group))
                .with("day_order", day_order),
        )
    }

    pub fn day_order(&self) -> i64 {
        *self.day_order.get()
    }

    /// Weekday name for the day's ordinal, 1 being Monday.
    pub fn weekday(&self) -> &'static str {
        usize::try_from(self.day_order() - 1)
            .ok()
            .and_then(|i| WEEKDAYS.get(i).copied())
            .unwrap_or("Unknown day")
    }

    pub fn slot_count(&self) -> usize {
        self.lessons.len()
    }

    pub fn slot(&self, index: usize) -> Option<Slot> {
        (index < self.slot_count()).then(|| Slot {
            lesson: self.lessons.get(index),
            classroom: self.classrooms.get(index),
        })
    }

    pub fn slots(&self) -> Vec<Slot> {
        (0..self.slot_count()).filter_map(|i| self.slot(i)).collect()
    }

    /// Add an empty slot at the end.
    pub fn append_empty_slot(&mut self) {
        self.lessons.push(None);
        self.classrooms.push(None);
    }

    /// Remove slot `index` from both lists. `false` when out of range.
    pub fn remove_slot(&mut self, index: usize) -> bool {
        if index >= self.slot_count() {
            return false;
        }
        self.lessons.remove(index);
        self.classrooms.remove(index);
        true
    }

    /// Swap slot `index` with its neighbour. Refused at the edges.
    pub fn move_slot(&mut self, index: usize, direction: Direction) -> bool {
        let len = self.slot_count();
        if index >= len {
            return false;
        }
        let other = match direction {
            Direction::Up if index > 0 => index - 1,
            Direction::Down if index + 1 < len => index + 1,
            _ => return false,
        };
        self.lessons.swap(index, other);
        self.classrooms.swap(index, other);
        true
    }

    pub fn set_lesson(&mut self, index: usize, lesson: Option<&Handle<Lesson>>) -> bool {
        self.lessons.set(index, lesson)
    }

    pub fn set_classroom(&mut self, index: usize, classroom: Option<&Handle<Classroom>>) -> bool {
        self.classrooms.set(index, classroom)
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.weekday())
    }
}

impl Model for Day {
    const TABLE: &'static str = "days";
    const TITLE: &'static str = "Days";

    fn fields() -> &'static [FieldDescriptor] {
        &DAY_FIELDS
    }

    fn registry() -> &'static Registry<Self> {
        &DAYS
    }

    /// Older stores have no classroom column content; a short classroom list
    /// is padded with empty slots so both lists keep the same length.
    fn from_record(mut record: Record) -> Result<Self> {
        let base = EntityBase::from_record(&mut record)?;
        let lessons = ReferenceList::new(&DAY_FIELDS[1], record.take("lessons"))?;
        let classrooms = record
            .take("classrooms")
            .filter(|value| *value != Value::Null)
            .unwrap_or(Value::List { table: Classroom::TABLE, ids: Vec::new() });
        let mut classrooms = ReferenceList::new(&DAY_FIELDS[2], Some(classrooms))?;
        while classrooms.len() < lessons.len() {
            classrooms.push_id(None);
        }
        while classrooms.len() > lessons.len() {
            classrooms.remove(classrooms.len() - 1);
        }

        Ok(Self {
            base,
            lessons,
            classrooms,
            group: Reference::new(&DAY_FIELDS[3], record.take("group_id"))?,
            day_order: Holder::<i64>::new(&DAY_FIELDS[4], record.take("day_order"))?,
        })
    }

    fn base(&self) -> &EntityBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut EntityBase {
        &mut self.base
    }

    fn holders(&self) -> Vec<&dyn FieldHolder> {
        vec![self.base.id_holder(), &self.lessons, &self.classrooms, &self.group, &self.day_order]
    }

    fn holders_mut(&mut self) -> Vec<&mut dyn FieldHolder> {
        vec![
            self.base.id_holder_mut(),
            &mut self.lessons,
            &mut self.classrooms,
            &mut self.group,
            &mut self.day_order,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(lessons: &str, classrooms: &str) -> Day {
        Day::from_record(
            Record::new()
                .with("id", 1)
                .with("lessons", lessons)
                .with("classrooms", classrooms)
                .with("group_id", 1)
                .with("day_order", 3),
        )
        .unwrap()
    }

    #[test]
    fn append_keeps_lists_in_lockstep() {
        let mut day = day("[]", "[]");
        day.append_empty_slot();
        day.append_empty_slot();
        assert_eq!(day.lessons.ids(), vec![None, None]);
        assert_eq!(day.classrooms.ids(), vec![None, None]);
    }

    #[test]
    fn move_up_at_first_index_is_refused() {
        let mut day = day("[1, 2, 3]", "[10, 20, 30]");
        assert!(!day.move_slot(0, Direction::Up));
        assert_eq!(day.lessons.ids(), vec![Some(1), Some(2), Some(3)]);
    }

    #[test]
    fn move_down_at_last_index_is_refused() {
        let mut day = day("[1, 2, 3]", "[10, 20, 30]");
        assert!(!day.move_slot(2, Direction::Down));
        assert!(!day.move_slot(7, Direction::Up));
        assert_eq!(day.classrooms.ids(), vec![Some(10), Some(20), Some(30)]);
    }

    #[test]
    fn move_swaps_both_lists_and_nothing_else() {
        let mut day = day("[1, 2, 3, 4]", "[10, 20, 30, 40]");
        assert!(day.move_slot(1, Direction::Down));
        assert_eq!(day.lessons.ids(), vec![Some(1), Some(3), Some(2), Some(4)]);
        assert_eq!(day.classrooms.ids(), vec![Some(10), Some(30), Some(20), Some(40)]);

        assert!(day.move_slot(1, Direction::Up));
        assert_eq!(day.lessons.ids(), vec![Some(3), Some(1), Some(2), Some(4)]);
        assert_eq!(day.classrooms.ids(), vec![Some(30), Some(10), Some(20), Some(40)]);
    }

    #[test]
    fn remove_preserves_relative_order() {
        let mut day = day("[1, 2, 3]", "[10, -1, 30]");
        assert!(day.remove_slot(1));
        assert_eq!(day.lessons.ids(), vec![Some(1), Some(3)]);
        assert_eq!(day.classrooms.ids(), vec![Some(10), Some(30)]);
        assert!(!day.remove_slot(2));
        assert_eq!(day.slot_count(), 2);
    }

    #[test]
    fn set_touches_one_list_only() {
        let mut day = day("[1, 2]", "[10, 20]");
        day.lessons.set_id(0, Some(5));
        assert_eq!(day.lessons.ids(), vec![Some(5), Some(2)]);
        assert_eq!(day.classrooms.ids(), vec![Some(10), Some(20)]);
        assert!(!day.set_classroom(9, None));
        assert!(day.set_classroom(1, None));
        assert_eq!(day.classrooms.ids(), vec![Some(10), None]);
    }

    #[test]
    fn classroom_list_is_padded_to_lesson_count() {
        let day = Day::from_record(
            Record::new()
                .with("id", 1)
                .with("lessons", "[1, 2]")
                .with("classrooms", Value::Null)
                .with("group_id", 1)
                .with("day_order", 1),
        )
        .unwrap();
        assert_eq!(day.classrooms.ids(), vec![None, None]);
        assert_eq!(day.weekday(), "Monday");
    }

    #[test]
    fn encoded_lists_round_trip_through_storage() {
        let day = day("[1, -1, 3]", "[10, 20, -1]");
        let values = day.storage_values();
        assert_eq!(values[1], rusqlite::types::Value::Text("[1, -1, 3]".into()));
        assert_eq!(values[2], rusqlite::types::Value::Text("[10, 20, -1]".into()));
    }
}
