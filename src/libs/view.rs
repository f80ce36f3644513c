use crate::libs::formatter::slot_number;
use crate::libs::messages::Message;
use crate::models::conflict::slot_conflicts;
use crate::models::day::Day;
use crate::orm::holder::{FieldHolder, EMPTY_LABEL};
use crate::orm::model::{Handle, Model};
use anyhow::Result;
use prettytable::{row, Cell, Row, Table};

const CONFLICT_MARK: &str = " (!)";

pub struct View {}

impl View {
    /// One row per entity, one column per declared field.
    pub fn entities<E: Model>(entities: &[Handle<E>]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(Row::new(E::fields().iter().map(|f| Cell::new(&f.label.to_uppercase())).collect()));
        for entity in entities {
            let entity = entity.read();
            table.add_row(Row::new(entity.holders().iter().map(|h| Cell::new(&h.display())).collect()));
        }
        table.printstd();

        Ok(())
    }

    /// Label/value pairs for a single entity; read-only fields are marked.
    pub fn entity<E: Model>(entity: &E) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["FIELD", "VALUE"]);
        for holder in entity.holders() {
            let descriptor = holder.descriptor();
            let label = if descriptor.read_only {
                format!("{} (read-only)", descriptor.label)
            } else {
                descriptor.label.to_string()
            };
            table.add_row(row![label, holder.display()]);
        }
        table.printstd();

        Ok(())
    }

    pub fn stores(names: &[String]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["#", "NAME"]);
        for (index, name) in names.iter().enumerate() {
            table.add_row(row![slot_number(index), name]);
        }
        table.printstd();

        Ok(())
    }

    /// The slots of one day with conflict marks.
    pub fn day(day: &Day) -> Result<()> {
        println!("{}", day.weekday());
        if day.slot_count() == 0 {
            println!("  {}", Message::NoSlots);
            return Ok(());
        }

        let conflicts = slot_conflicts(day);
        let mut table = Table::new();

        table.add_row(row!["#", "LESSON", "TEACHER", "CLASSROOM"]);
        for (index, slot) in day.slots().into_iter().enumerate() {
            let flags = conflicts.get(index).copied().unwrap_or_default();
            let (lesson, teacher) = match &slot.lesson {
                Some(lesson) => {
                    let lesson = lesson.read();
                    (lesson.to_string(), lesson.teacher.display())
                }
                None => (EMPTY_LABEL.to_string(), EMPTY_LABEL.to_string()),
            };
            let classroom = slot
                .classroom
                .map(|classroom| classroom.read().to_string())
                .unwrap_or_else(|| EMPTY_LABEL.to_string());

            table.add_row(row![
                slot_number(index),
                lesson,
                mark(teacher, flags.teacher),
                mark(classroom, flags.classroom)
            ]);
        }
        table.printstd();

        Ok(())
    }
}

fn mark(text: String, conflict: bool) -> String {
    if conflict {
        text + CONFLICT_MARK
    } else {
        text
    }
}
