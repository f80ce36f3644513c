//! Text for every user-facing message.
//!
//! All wording lives in this one `match`, so commands only ever name a
//! [`Message`] variant and pass the values it interpolates.

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = match self {
            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::ConfigLocation(path) => format!("Stores are kept in {}", path),
            Message::PromptStoreDir => "Directory for schedule stores".to_string(),
            Message::PromptMainStore => "Name of the store holding groups, teachers, classrooms and lessons".to_string(),
            Message::PromptTeacherImage => "Default teacher image".to_string(),

            // === STORE MESSAGES ===
            Message::StoreListHeader => "Schedules:".to_string(),
            Message::NoStoresFound => "No schedules found".to_string(),
            Message::StoreCreated(name) => format!("Schedule '{}' created", name),
            Message::StoreAlreadyExists(name) => format!("A store named '{}' already exists", name),
            Message::InvalidStoreName(name) => format!("'{}' cannot be used as a store name", name),
            Message::StoreRenamed(old, new) => format!("Schedule '{}' renamed to '{}'", old, new),
            Message::StoreRenameRefused(old, new) => {
                format!("Cannot rename '{}' to '{}': the source is missing or the new name is taken or invalid", old, new)
            }
            Message::StoreDeleted(name) => format!("Schedule '{}' deleted", name),
            Message::StoreNotFound(name) => format!("Schedule '{}' not found", name),
            Message::MainStoreProtected(name) => format!("'{}' is the main store and cannot be changed here", name),
            Message::ConfirmDeleteStore(name) => format!("Delete schedule '{}' with all its days?", name),

            // === ENTITY MESSAGES ===
            Message::EntityListHeader(title) => format!("{}:", title),
            Message::NoEntitiesFound(title) => format!("No {} found", title.to_lowercase()),
            Message::EntityCreated(title, id) => format!("{} #{} created", title, id),
            Message::EntityUpdated(title, id) => format!("{} #{} updated", title, id),
            Message::EntityDeleted(title, id) => format!("{} #{} deleted", title, id),
            Message::EntityNotFound(title, id) => format!("{} #{} not found", title, id),
            Message::ConfirmDeleteEntity(title, name) => format!("Delete {} '{}'?", title.to_lowercase(), name),
            Message::EditingEntity(title, id) => format!("Editing {} #{}", title.to_lowercase(), id),
            Message::PromptFieldValue(label) => label.clone(),
            Message::InvalidFieldAssignment(arg) => format!("Expected field=value, got '{}'", arg),
            Message::FieldNotEditable(table, field) => format!("'{}' has no editable field '{}'", table, field),

            // === SCHEDULE MESSAGES ===
            Message::ScheduleHeader(group, store) => format!("Week of {} in '{}'", group, store),
            Message::GroupNotFound(id) => format!("Group #{} not found", id),
            Message::LessonNotFound(id) => format!("Lesson #{} not found", id),
            Message::ClassroomNotFound(id) => format!("Classroom #{} not found", id),
            Message::InvalidDay(day) => format!("'{}' is not a weekday (use 1-6 or Monday..Saturday)", day),
            Message::DayNotFound(day) => format!("{} is missing from this week", day),
            Message::SlotNotFound(day, slot) => format!("{} has no slot {}", day, slot),
            Message::SlotAdded(day, slot) => format!("Slot {} added to {}", slot, day),
            Message::SlotRemoved(day, slot) => format!("Slot {} removed from {}", slot, day),
            Message::SlotMoved(day, from, to) => format!("{}: slot {} moved to {}", day, from, to),
            Message::SlotMoveRefused(slot) => format!("Slot {} cannot move any further", slot),
            Message::LessonAssigned(day, slot) => format!("{}: lesson of slot {} updated", day, slot),
            Message::ClassroomAssigned(day, slot) => format!("{}: classroom of slot {} updated", day, slot),
            Message::NoSlots => "no lessons".to_string(),
            Message::ConflictLegend => "(!) marks a teacher or classroom booked by another group at the same time".to_string(),

            // === EXPORT MESSAGES ===
            Message::ExportingSchedule(store, format) => format!("Exporting schedule '{}' as {}", store, format),
            Message::ExportSuccess(path) => format!("Schedule exported to {}", path),

            // === GENERAL MESSAGES ===
            Message::OperationCancelled => "Operation cancelled".to_string(),
            Message::DebugModeEnabled => "Debug logging enabled".to_string(),
        };

        write!(f, "{}", text)
    }
}
