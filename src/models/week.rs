use super::day::Day;
use super::structure::Group;
use crate::orm::error::Result;
use crate::orm::field::FieldDescriptor;
use crate::orm::holder::{FieldHolder, Reference, ReferenceList};
use crate::orm::model::{EntityBase, Handle, Model};
use crate::orm::registry::Registry;
use crate::orm::value::{Record, Value};
use std::fmt;

static WEEK_FIELDS: [FieldDescriptor; 3] = [
    FieldDescriptor::id(),
    FieldDescriptor::list("days", "days", "Days").read_only(),
    FieldDescriptor::reference("group_id", "groups", "Group").read_only(),
];

static WEEKS: Registry<Week> = Registry::new();

/// The six days of one group's timetable.
#[derive(Debug, Clone)]
pub struct Week {
    base: EntityBase,
    pub days: ReferenceList<Day>,
    pub group: Reference<Group>,
}

impl Week {
    pub fn create(group: &Handle<Group>, days: &[Handle<Day>]) -> Result<Handle<Week>> {
        <Week as Model>::new(
            Record::new()
                .with("days", Value::list(days))
                .with("group_id", Value::reference(group)),
        )
    }

    /// Live days ordered Monday first.
    pub fn days(&self) -> Vec<Handle<Day>> {
        let mut days: Vec<Handle<Day>> = self.days.resolve_all().into_iter().flatten().collect();
        days.sort_by_key(|day| day.read().day_order());
        days
    }

    pub fn group_id(&self) -> Option<i64> {
        self.group.id()
    }
}

impl fmt::Display for Week {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.group.display())
    }
}

impl Model for Week {
    const TABLE: &'static str = "weeks";
    const TITLE: &'static str = "Weeks";

    fn fields() -> &'static [FieldDescriptor] {
        &WEEK_FIELDS
    }

    fn registry() -> &'static Registry<Self> {
        &WEEKS
    }

    fn from_record(mut record: Record) -> Result<Self> {
        Ok(Self {
            base: EntityBase::from_record(&mut record)?,
            days: ReferenceList::new(&WEEK_FIELDS[1], record.take("days"))?,
            group: Reference::new(&WEEK_FIELDS[2], record.take("group_id"))?,
        })
    }

    fn base(&self) -> &EntityBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut EntityBase {
        &mut self.base
    }

    fn holders(&self) -> Vec<&dyn FieldHolder> {
        vec![self.base.id_holder(), &self.days, &self.group]
    }

    fn holders_mut(&mut self) -> Vec<&mut dyn FieldHolder> {
        vec![self.base.id_holder_mut(), &mut self.days, &mut self.group]
    }
}
