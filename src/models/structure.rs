//! Reference entities kept in the main store: groups, teachers, classrooms
//! and lessons.

use crate::db::catalog::Catalog;
use crate::libs::config::Config;
use crate::libs::formatter::{shorten, SHORT_NAME_LENGTH};
use crate::orm::error::Result;
use crate::orm::field::FieldDescriptor;
use crate::orm::holder::{FieldHolder, Holder, Reference};
use crate::orm::model::{EntityBase, Handle, Model, TableSchema};
use crate::orm::registry::Registry;
use crate::orm::value::{Record, Value};
use std::fmt;
use tracing::debug;

static GROUP_FIELDS: [FieldDescriptor; 2] = [FieldDescriptor::id(), FieldDescriptor::text("name", "Name")];

static TEACHER_FIELDS: [FieldDescriptor; 3] = [
    FieldDescriptor::id(),
    FieldDescriptor::text("name", "Name"),
    FieldDescriptor::image("image", "Image").with_default("default.png"),
];

static CLASSROOM_FIELDS: [FieldDescriptor; 2] = [FieldDescriptor::id(), FieldDescriptor::text("name", "Name")];

static LESSON_FIELDS: [FieldDescriptor; 3] = [
    FieldDescriptor::id(),
    FieldDescriptor::text("name", "Name"),
    FieldDescriptor::reference("teacher", "teachers", "Teacher"),
];

static GROUPS: Registry<Group> = Registry::new();
static TEACHERS: Registry<Teacher> = Registry::new();
static CLASSROOMS: Registry<Classroom> = Registry::new();
static LESSONS: Registry<Lesson> = Registry::new();

/// Entities identified to users by a name.
pub trait Named {
    fn name(&self) -> &str;

    fn set_name(&mut self, name: &str);

    fn short_name(&self) -> String {
        shorten(self.name(), SHORT_NAME_LENGTH)
    }
}

/// A class of students; every schedule week belongs to one.
#[derive(Debug, Clone)]
pub struct Group {
    base: EntityBase,
    pub name: Holder<String>,
}

impl Group {
    /// Create and persist a group.
    pub fn create(name: &str) -> Result<Handle<Group>> {
        <Group as Model>::new(Record::new().with("name", name))
    }
}

impl Named for Group {
    fn name(&self) -> &str {
        self.name.get()
    }

    fn set_name(&mut self, name: &str) {
        self.name.set(name.to_string());
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.short_name())
    }
}

impl Model for Group {
    const TABLE: &'static str = "groups";
    const TITLE: &'static str = "Groups";

    fn fields() -> &'static [FieldDescriptor] {
        &GROUP_FIELDS
    }

    fn registry() -> &'static Registry<Self> {
        &GROUPS
    }

    fn from_record(mut record: Record) -> Result<Self> {
        Ok(Self {
            base: EntityBase::from_record(&mut record)?,
            name: Holder::<String>::new(&GROUP_FIELDS[1], record.take("name"))?,
        })
    }

    fn base(&self) -> &EntityBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut EntityBase {
        &mut self.base
    }

    fn holders(&self) -> Vec<&dyn FieldHolder> {
        vec![self.base.id_holder(), &self.name]
    }

    fn holders_mut(&mut self) -> Vec<&mut dyn FieldHolder> {
        vec![self.base.id_holder_mut(), &mut self.name]
    }
}

#[derive(Debug, Clone)]
pub struct Teacher {
    base: EntityBase,
    pub name: Holder<String>,
    pub image: Holder<String>,
}

impl Teacher {
    /// Create and persist a teacher. `None` keeps the default image.
    pub fn create(name: &str, image: Option<&str>) -> Result<Handle<Teacher>> {
        let mut record = Record::new().with("name", name);
        if let Some(image) = image {
            record.set("image", image);
        }
        <Teacher as Model>::new(record)
    }
}

impl Named for Teacher {
    fn name(&self) -> &str {
        self.name.get()
    }

    fn set_name(&mut self, name: &str) {
        self.name.set(name.to_string());
    }
}

impl fmt::Display for Teacher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.short_name())
    }
}

impl Model for Teacher {
    const TABLE: &'static str = "teachers";
    const TITLE: &'static str = "Teachers";

    fn fields() -> &'static [FieldDescriptor] {
        &TEACHER_FIELDS
    }

    fn registry() -> &'static Registry<Self> {
        &TEACHERS
    }

    fn from_record(mut record: Record) -> Result<Self> {
        Ok(Self {
            base: EntityBase::from_record(&mut record)?,
            name: Holder::<String>::new(&TEACHER_FIELDS[1], record.take("name"))?,
            image: Holder::<String>::new(&TEACHER_FIELDS[2], record.take("image"))?,
        })
    }

    fn base(&self) -> &EntityBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut EntityBase {
        &mut self.base
    }

    fn holders(&self) -> Vec<&dyn FieldHolder> {
        vec![self.base.id_holder(), &self.name, &self.image]
    }

    fn holders_mut(&mut self) -> Vec<&mut dyn FieldHolder> {
        vec![self.base.id_holder_mut(), &mut self.name, &mut self.image]
    }
}

#[derive(Debug, Clone)]
pub struct Classroom {
    base: EntityBase,
    pub name: Holder<String>,
}

impl Classroom {
    pub fn create(name: &str) -> Result<Handle<Classroom>> {
        <Classroom as Model>::new(Record::new().with("name", name))
    }
}

impl Named for Classroom {
    fn name(&self) -> &str {
        self.name.get()
    }

    fn set_name(&mut self, name: &str) {
        self.name.set(name.to_string());
    }
}

impl fmt::Display for Classroom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.short_name())
    }
}

impl Model for Classroom {
    const TABLE: &'static str = "classrooms";
    const TITLE: &'static str = "Classrooms";

    fn fields() -> &'static [FieldDescriptor] {
        &CLASSROOM_FIELDS
    }

    fn registry() -> &'static Registry<Self> {
        &CLASSROOMS
    }

    fn from_record(mut record: Record) -> Result<Self> {
        Ok(Self {
            base: EntityBase::from_record(&mut record)?,
            name: Holder::<String>::new(&CLASSROOM_FIELDS[1], record.take("name"))?,
        })
    }

    fn base(&self) -> &EntityBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut EntityBase {
        &mut self.base
    }

    fn holders(&self) -> Vec<&dyn FieldHolder> {
        vec![self.base.id_holder(), &self.name]
    }

    fn holders_mut(&mut self) -> Vec<&mut dyn FieldHolder> {
        vec![self.base.id_holder_mut(), &mut self.name]
    }
}

/// A subject taught by one teacher.
#[derive(Debug, Clone)]
pub struct Lesson {
    base: EntityBase,
    pub name: Holder<String>,
    pub teacher: Reference<Teacher>,
}

impl Lesson {
    pub fn create(name: &str, teacher: Option<&Handle<Teacher>>) -> Result<Handle<Lesson>> {
        let teacher = match teacher {
            Some(teacher) => Value::reference(teacher),
            None => Value::empty_reference::<Teacher>(),
        };
        <Lesson as Model>::new(Record::new().with("name", name).with("teacher", teacher))
    }

    /// Lessons with the same name are interchangeable, whatever their ids.
    pub fn are_same(&self, other: &Lesson) -> bool {
        self.name.get() == other.name.get()
    }
}

impl Named for Lesson {
    fn name(&self) -> &str {
        self.name.get()
    }

    fn set_name(&mut self, name: &str) {
        self.name.set(name.to_string());
    }
}

impl fmt::Display for Lesson {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.short_name())
    }
}

impl Model for Lesson {
    const TABLE: &'static str = "lessons";
    const TITLE: &'static str = "Lessons";

    fn fields() -> &'static [FieldDescriptor] {
        &LESSON_FIELDS
    }

    fn registry() -> &'static Registry<Self> {
        &LESSONS
    }

    fn from_record(mut record: Record) -> Result<Self> {
        Ok(Self {
            base: EntityBase::from_record(&mut record)?,
            name: Holder::<String>::new(&LESSON_FIELDS[1], record.take("name"))?,
            teacher: Reference::new(&LESSON_FIELDS[2], record.take("teacher"))?,
        })
    }

    fn base(&self) -> &EntityBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut EntityBase {
        &mut self.base
    }

    fn holders(&self) -> Vec<&dyn FieldHolder> {
        vec![self.base.id_holder(), &self.name, &self.teacher]
    }

    fn holders_mut(&mut self) -> Vec<&mut dyn FieldHolder> {
        vec![self.base.id_holder_mut(), &mut self.name, &mut self.teacher]
    }
}

/// The main store and the four reference types loaded from it.
pub struct Structure;

impl Structure {
    pub fn schemas() -> [TableSchema; 4] {
        [Group::schema(), Teacher::schema(), Classroom::schema(), Lesson::schema()]
    }

    /// Open the main store, creating it on first use, and load every type.
    pub fn open(catalog: &Catalog, config: &Config) -> Result<()> {
        let store = if catalog.exists(&config.main_store) {
            catalog.store(&config.main_store)?
        } else {
            catalog.create(&config.main_store, &Self::schemas())?
        };
        Group::load_all(&store)?;
        Teacher::load_all(&store)?;
        Classroom::load_all(&store)?;
        Lesson::load_all(&store)?;
        debug!(store = %store.name, "structure loaded");
        Ok(())
    }

    pub fn close() {
        Group::registry().close();
        Teacher::registry().close();
        Classroom::registry().close();
        Lesson::registry().close();
    }
}
