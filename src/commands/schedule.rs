//! Slot editing for one group's week in a schedule store.
//!
//! Days are addressed by number (1 is Monday) or by weekday name, slots by
//! their one-based position. Every change is saved immediately and the
//! edited day is shown again with its conflict marks.

use crate::{
    db::catalog::Catalog,
    libs::{config::Config, messages::Message, view::View},
    models::{
        day::{Day, Direction, WEEKDAYS},
        schedule::Schedule,
        structure::{Classroom, Group, Lesson, Structure},
        week::Week,
    },
    msg_bail_anyhow, msg_error, msg_print, msg_success, msg_warning,
    orm::model::{Handle, Model},
};
use anyhow::Result;
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct ScheduleArgs {
    /// Schedule name; created on first use
    store: String,
    /// Group ID
    group: i64,
    #[command(subcommand)]
    command: Option<ScheduleCommand>,
}

#[derive(Debug, Subcommand)]
enum ScheduleCommand {
    /// Show the whole week
    Show,
    /// Append an empty slot to a day
    Add {
        /// Day: 1-6 or Monday..Saturday
        #[arg(value_parser = parse_day)]
        day: i64,
    },
    /// Remove a slot
    Remove {
        #[arg(value_parser = parse_day)]
        day: i64,
        /// Slot number, starting at 1
        slot: usize,
    },
    /// Move a slot one position earlier
    Up {
        #[arg(value_parser = parse_day)]
        day: i64,
        slot: usize,
    },
    /// Move a slot one position later
    Down {
        #[arg(value_parser = parse_day)]
        day: i64,
        slot: usize,
    },
    /// Set the lesson of a slot; omit the ID to clear it
    Lesson {
        #[arg(value_parser = parse_day)]
        day: i64,
        slot: usize,
        lesson: Option<i64>,
    },
    /// Set the classroom of a slot; omit the ID to clear it
    Classroom {
        #[arg(value_parser = parse_day)]
        day: i64,
        slot: usize,
        classroom: Option<i64>,
    },
}

/// Accepts `1`..`6` or a weekday name, case-insensitive, abbreviations
/// included (`mon`, `Tue`).
pub fn parse_day(input: &str) -> Result<i64, String> {
    let input = input.trim();
    if let Ok(order) = input.parse::<i64>() {
        if (1..=WEEKDAYS.len() as i64).contains(&order) {
            return Ok(order);
        }
    } else if input.len() >= 2 {
        let lowered = input.to_lowercase();
        if let Some(index) = WEEKDAYS.iter().position(|day| day.to_lowercase().starts_with(&lowered)) {
            return Ok(index as i64 + 1);
        }
    }
    Err(Message::InvalidDay(input.to_string()).to_string())
}

pub fn cmd(args: ScheduleArgs) -> Result<()> {
    let config = Config::read()?;
    let catalog = Catalog::from_config(&config)?;
    if args.store == config.main_store {
        msg_bail_anyhow!(Message::MainStoreProtected(args.store));
    }
    Structure::open(&catalog, &config)?;
    Schedule::open(&catalog, &args.store)?;

    let Some(group) = Group::get(args.group) else {
        msg_bail_anyhow!(Message::GroupNotFound(args.group));
    };
    let week = Schedule::week(&group)?;

    match args.command.unwrap_or(ScheduleCommand::Show) {
        ScheduleCommand::Show => show_week(&args.store, &group, &week),
        ScheduleCommand::Add { day } => {
            let day = find_day(&week, day)?;
            let count = {
                let mut day = day.write();
                day.append_empty_slot();
                day.save()?;
                day.slot_count()
            };
            let day = day.read();
            msg_success!(Message::SlotAdded(day.weekday().to_string(), count));
            View::day(&day)
        }
        ScheduleCommand::Remove { day, slot } => edit_slot(&week, day, slot, |day, index| {
            day.remove_slot(index);
            Ok(Message::SlotRemoved(day.weekday().to_string(), index + 1))
        }),
        ScheduleCommand::Up { day, slot } => move_slot(&week, day, slot, Direction::Up),
        ScheduleCommand::Down { day, slot } => move_slot(&week, day, slot, Direction::Down),
        ScheduleCommand::Lesson { day, slot, lesson } => {
            let lesson = lookup::<Lesson>(lesson, Message::LessonNotFound)?;
            edit_slot(&week, day, slot, |day, index| {
                day.set_lesson(index, lesson.as_ref());
                Ok(Message::LessonAssigned(day.weekday().to_string(), index + 1))
            })
        }
        ScheduleCommand::Classroom { day, slot, classroom } => {
            let classroom = lookup::<Classroom>(classroom, Message::ClassroomNotFound)?;
            edit_slot(&week, day, slot, |day, index| {
                day.set_classroom(index, classroom.as_ref());
                Ok(Message::ClassroomAssigned(day.weekday().to_string(), index + 1))
            })
        }
    }
}

fn show_week(store: &str, group: &Handle<Group>, week: &Handle<Week>) -> Result<()> {
    msg_print!(Message::ScheduleHeader(group.read().to_string(), store.to_string()), true);
    for day in week.read().days() {
        View::day(&day.read())?;
    }
    msg_print!(Message::ConflictLegend);
    Ok(())
}

fn find_day(week: &Handle<Week>, day_order: i64) -> Result<Handle<Day>> {
    let found = week.read().days().into_iter().find(|day| day.read().day_order() == day_order);
    match found {
        Some(day) => Ok(day),
        None => {
            let name = usize::try_from(day_order - 1)
                .ok()
                .and_then(|index| WEEKDAYS.get(index))
                .map_or_else(|| day_order.to_string(), |name| name.to_string());
            msg_bail_anyhow!(Message::DayNotFound(name))
        }
    }
}

/// Resolve an optional ID typed by the user; `None` clears the slot.
fn lookup<E: Model>(id: Option<i64>, missing: fn(i64) -> Message) -> Result<Option<Handle<E>>> {
    match id {
        None => Ok(None),
        Some(id) => match E::get(id) {
            Some(entity) => Ok(Some(entity)),
            None => msg_bail_anyhow!(missing(id)),
        },
    }
}

/// Apply `change` to slot `slot` (one-based) of a day, save and show the day.
fn edit_slot<F>(week: &Handle<Week>, day: i64, slot: usize, change: F) -> Result<()>
where
    F: FnOnce(&mut Day, usize) -> Result<Message>,
{
    let day = find_day(week, day)?;
    {
        let mut day = day.write();
        let index = match slot.checked_sub(1) {
            Some(index) if index < day.slot_count() => index,
            _ => {
                msg_error!(Message::SlotNotFound(day.weekday().to_string(), slot));
                return Ok(());
            }
        };
        let message = change(&mut day, index)?;
        day.save()?;
        msg_success!(message);
    }
    let day = day.read();
    View::day(&day)
}

fn move_slot(week: &Handle<Week>, day: i64, slot: usize, direction: Direction) -> Result<()> {
    let target = match direction {
        Direction::Up => slot.saturating_sub(1),
        Direction::Down => slot + 1,
    };
    let day = find_day(week, day)?;
    let moved = {
        let mut day = day.write();
        let moved = slot.checked_sub(1).is_some_and(|index| day.move_slot(index, direction));
        if moved {
            day.save()?;
        }
        moved
    };

    let day = day.read();
    if moved {
        msg_success!(Message::SlotMoved(day.weekday().to_string(), slot, target));
    } else {
        msg_warning!(Message::SlotMoveRefused(slot));
    }
    View::day(&day)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn days_parse_by_number_or_name() {
        assert_eq!(parse_day("1"), Ok(1));
        assert_eq!(parse_day("6"), Ok(6));
        assert_eq!(parse_day("wed"), Ok(3));
        assert_eq!(parse_day("Saturday"), Ok(6));
        assert!(parse_day("7").is_err());
        assert!(parse_day("0").is_err());
        assert!(parse_day("s").is_err());
        assert!(parse_day("sunday").is_err());
    }
}
