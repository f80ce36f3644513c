//! Schedule export to spreadsheet and data formats.
//!
//! The open schedule is first flattened into [`ScheduleExport`] (every group,
//! its six days and their slots as display text) and then written in the
//! requested format. The Excel layout gives each group a five-column band:
//! the group name merged across the band on the first row, then per day a
//! merged day header followed by one row per slot.
//!
//! ```rust,no_run
//! use schedmaker::libs::export::{Exporter, ExportFormat, ScheduleExport};
//! use std::path::PathBuf;
//!
//! let schedule = ScheduleExport::gather()?;
//! Exporter::new(ExportFormat::Csv, PathBuf::from("10A.csv")).export(&schedule)?;
//! # Ok::<(), anyhow::Error>(())
//! ```

use crate::models::day::Day;
use crate::models::schedule::Schedule;
use crate::models::structure::Group;
use crate::orm::error::Result as OrmResult;
use crate::orm::holder::{FieldHolder, EMPTY_LABEL};
use crate::orm::model::Model;
use anyhow::Result;
use rust_xlsxwriter::{Format, FormatAlign, Workbook};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Columns taken by one group in the Excel layout, spacer included.
const GROUP_BAND_WIDTH: u16 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportFormat {
    /// Excel workbook, one band of columns per group.
    Xlsx,
    /// Flat table, one line per slot.
    Csv,
    /// Nested groups, days and slots, pretty-printed.
    Json,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Xlsx => "xlsx",
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportSlot {
    pub number: usize,
    pub lesson: String,
    pub teacher: String,
    pub classroom: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportDay {
    pub name: String,
    pub slots: Vec<ExportSlot>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportGroup {
    pub name: String,
    pub days: Vec<ExportDay>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScheduleExport {
    pub groups: Vec<ExportGroup>,
}

impl ScheduleExport {
    /// Collect every group of the main store with its week in the open
    /// schedule. Weeks that do not exist yet are created empty.
    pub fn gather() -> OrmResult<Self> {
        let mut groups = Vec::new();
        for group in Group::all() {
            let week = Schedule::week(&group)?;
            let days = week.read().days();
            groups.push(ExportGroup {
                name: group.read().to_string(),
                days: days.iter().map(|day| export_day(&day.read())).collect(),
            });
        }
        Ok(Self { groups })
    }
}

fn export_day(day: &Day) -> ExportDay {
    let slots = day
        .slots()
        .into_iter()
        .enumerate()
        .map(|(index, slot)| {
            let (lesson, teacher) = match slot.lesson {
                Some(lesson) => {
                    let lesson = lesson.read();
                    (lesson.to_string(), lesson.teacher.display())
                }
                None => (String::new(), String::new()),
            };
            ExportSlot {
                number: index + 1,
                lesson,
                teacher: if teacher == EMPTY_LABEL { String::new() } else { teacher },
                classroom: slot.classroom.map(|c| c.read().to_string()).unwrap_or_default(),
            }
        })
        .collect();
    ExportDay {
        name: day.weekday().to_string(),
        slots,
    }
}

pub struct Exporter {
    format: ExportFormat,
    output_path: PathBuf,
}

impl Exporter {
    /// A path without an extension gets the format's one.
    pub fn new(format: ExportFormat, output_path: PathBuf) -> Self {
        let output_path = if output_path.extension().is_none() {
            output_path.with_extension(format.extension())
        } else {
            output_path
        };
        Self { format, output_path }
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    pub fn export(&self, schedule: &ScheduleExport) -> Result<()> {
        match self.format {
            ExportFormat::Xlsx => self.export_excel(schedule),
            ExportFormat::Csv => self.export_csv(schedule),
            ExportFormat::Json => self.export_json(schedule),
        }
    }

    fn export_csv(&self, schedule: &ScheduleExport) -> Result<()> {
        let mut wtr = csv::Writer::from_path(&self.output_path)?;
        wtr.write_record(["Group", "Day", "Slot", "Lesson", "Teacher", "Classroom"])?;

        for group in &schedule.groups {
            for day in &group.days {
                for slot in &day.slots {
                    wtr.write_record([
                        group.name.as_str(),
                        day.name.as_str(),
                        &slot.number.to_string(),
                        &slot.lesson,
                        &slot.teacher,
                        &slot.classroom,
                    ])?;
                }
            }
        }

        wtr.flush()?;
        Ok(())
    }

    fn export_json(&self, schedule: &ScheduleExport) -> Result<()> {
        let json = serde_json::to_string_pretty(schedule)?;
        fs::write(&self.output_path, json)?;
        Ok(())
    }

    fn export_excel(&self, schedule: &ScheduleExport) -> Result<()> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();

        let header_format = Format::new().set_bold().set_align(FormatAlign::Center);
        let day_format = Format::new().set_bold().set_background_color(rust_xlsxwriter::Color::Gray);
        let plain = Format::new();

        for (index, group) in schedule.groups.iter().enumerate() {
            let left = index as u16 * GROUP_BAND_WIDTH;
            worksheet.merge_range(0, left, 0, left + 3, &group.name, &header_format)?;

            let mut row: u32 = 2;
            for day in &group.days {
                worksheet.merge_range(row, left, row, left + 3, &day.name, &day_format)?;
                row += 1;
                for slot in &day.slots {
                    worksheet.write_number(row, left, slot.number as f64)?;
                    worksheet.merge_range(row, left + 1, row, left + 2, &slot.lesson, &plain)?;
                    worksheet.write_string(row, left + 3, &slot.classroom)?;
                    row += 1;
                }
                row += 1;
            }
        }

        workbook.save(&self.output_path)?;
        Ok(())
    }
}
