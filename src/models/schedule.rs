//! Schedule stores: one store per timetable, holding the days and weeks of
//! every group.
//!
//! Only one schedule is open at a time. Opening binds the `Day` and `Week`
//! identity maps to the store and reloads them; closing unbinds and clears
//! both.

use super::day::{Day, WEEKDAYS};
use super::structure::Group;
use super::week::Week;
use crate::db::catalog::Catalog;
use crate::libs::config::Config;
use crate::orm::error::{OrmError, Result};
use crate::orm::model::{Handle, Model, TableSchema};
use tracing::debug;

pub struct Schedule;

impl Schedule {
    pub fn schemas() -> [TableSchema; 2] {
        [Day::schema(), Week::schema()]
    }

    /// Open `name`, creating the store on first use.
    pub fn open(catalog: &Catalog, name: &str) -> Result<()> {
        let store = if catalog.exists(name) {
            catalog.store(name)?
        } else {
            catalog.create(name, &Self::schemas())?
        };
        Day::load_all(&store)?;
        Week::load_all(&store)?;
        debug!(store = name, "schedule opened");
        Ok(())
    }

    pub fn close() {
        Day::registry().close();
        Week::registry().close();
    }

    /// Name of the open schedule, if any.
    pub fn current() -> Option<String> {
        Day::registry().store_name()
    }

    /// Create an empty schedule store. `false` when the name is taken or
    /// unusable.
    pub fn create(catalog: &Catalog, name: &str) -> Result<bool> {
        match catalog.create(name, &Self::schemas()) {
            Ok(_) => Ok(true),
            Err(OrmError::StoreAlreadyExists(_) | OrmError::InvalidName(_)) => Ok(false),
            Err(err) => Err(err),
        }
    }

    /// Rename a schedule store, following it if it is the open one. `false`
    /// when the source is missing or the new name is taken or unusable.
    pub fn rename(catalog: &Catalog, old: &str, new: &str) -> Result<bool> {
        let store = match catalog.rename(old, new) {
            Ok(store) => store,
            Err(
                OrmError::StoreNotFound(_) | OrmError::StoreAlreadyExists(_) | OrmError::InvalidName(_),
            ) => return Ok(false),
            Err(err) => return Err(err),
        };
        if Self::current().as_deref() == Some(old) {
            Day::registry().rebind(store.clone());
            Week::registry().rebind(store);
        }
        Ok(true)
    }

    pub fn delete(catalog: &Catalog, name: &str) -> Result<()> {
        if Self::current().as_deref() == Some(name) {
            Self::close();
        }
        catalog.delete(name)
    }

    /// Every schedule store, the main store excluded.
    pub fn all(catalog: &Catalog, config: &Config) -> Result<Vec<String>> {
        Ok(catalog
            .list()?
            .into_iter()
            .filter(|name| *name != config.main_store)
            .collect())
    }

    /// The week of `group` in the open schedule, built with six empty days
    /// on first access.
    pub fn week(group: &Handle<Group>) -> Result<Handle<Week>> {
        let group_id = group.read().id();
        let existing = Week::all().into_iter().find(|week| week.read().group_id() == Some(group_id));
        if let Some(week) = existing {
            return Ok(week);
        }

        let mut days = Vec::with_capacity(WEEKDAYS.len());
        for day_order in 1..=WEEKDAYS.len() as i64 {
            days.push(Day::create(group, day_order)?);
        }
        let week = Week::create(group, &days)?;
        debug!(group = group_id, week = week.read().id(), "week created");
        Ok(week)
    }
}
