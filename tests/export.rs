#[cfg(test)]
mod tests {
    use parking_lot::{const_mutex, Mutex, MutexGuard};
    use schedmaker::db::catalog::Catalog;
    use schedmaker::libs::config::Config;
    use schedmaker::libs::export::{ExportFormat, Exporter, ScheduleExport};
    use schedmaker::models::day::Day;
    use schedmaker::models::schedule::Schedule;
    use schedmaker::models::structure::{Classroom, Group, Lesson, Structure, Teacher};
    use schedmaker::orm::model::{Handle, Model};
    use std::path::PathBuf;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    static LOCK: Mutex<()> = const_mutex(());

    struct ExportTestContext {
        _guard: MutexGuard<'static, ()>,
        temp_dir: TempDir,
    }

    impl ExportTestContext {
        fn output(&self, name: &str) -> PathBuf {
            self.temp_dir.path().join(name)
        }
    }

    impl TestContext for ExportTestContext {
        fn setup() -> Self {
            let guard = LOCK.lock();
            let temp_dir = tempfile::tempdir().unwrap();
            let config = Config {
                store_dir: Some(temp_dir.path().join("stores")),
                ..Config::default()
            };
            let catalog = Catalog::from_config(&config).unwrap();
            Structure::open(&catalog, &config).unwrap();
            Schedule::open(&catalog, "autumn").unwrap();

            // 10A: Monday Math with Ivanov in Room A, then an empty slot
            let group = Group::create("10A").unwrap();
            Group::create("10B").unwrap();
            let ivanov = Teacher::create("Ivanov", None).unwrap();
            let math = Lesson::create("Math", Some(&ivanov)).unwrap();
            let room = Classroom::create("Room A").unwrap();
            let monday = monday_of(&group);
            {
                let mut day = monday.write();
                day.append_empty_slot();
                day.append_empty_slot();
                day.set_lesson(0, Some(&math));
                day.set_classroom(0, Some(&room));
                day.save().unwrap();
            }

            ExportTestContext {
                _guard: guard,
                temp_dir,
            }
        }

        fn teardown(self) {
            Schedule::close();
            Structure::close();
        }
    }

    fn monday_of(group: &Handle<Group>) -> Handle<Day> {
        let week = Schedule::week(group).unwrap();
        let days = week.read().days();
        days.into_iter().next().unwrap()
    }

    #[test_context(ExportTestContext)]
    #[test]
    fn test_gather_flattens_every_group(_ctx: &mut ExportTestContext) {
        let schedule = ScheduleExport::gather().unwrap();
        assert_eq!(schedule.groups.len(), 2);

        let first = &schedule.groups[0];
        assert_eq!(first.name, "10A");
        assert_eq!(first.days.len(), 6);
        assert_eq!(first.days[0].name, "Monday");

        let slots = &first.days[0].slots;
        assert_eq!(slots.len(), 2);
        assert_eq!(slots[0].number, 1);
        assert_eq!(slots[0].lesson, "Math");
        assert_eq!(slots[0].teacher, "Ivanov");
        assert_eq!(slots[0].classroom, "Room A");
        assert_eq!(slots[1].lesson, "");
        assert_eq!(slots[1].classroom, "");

        // 10B had no week yet and gets an empty one
        let second = &schedule.groups[1];
        assert_eq!(second.days.len(), 6);
        assert!(second.days.iter().all(|day| day.slots.is_empty()));
    }

    #[test_context(ExportTestContext)]
    #[test]
    fn test_csv_has_one_line_per_slot(ctx: &mut ExportTestContext) {
        let schedule = ScheduleExport::gather().unwrap();
        let exporter = Exporter::new(ExportFormat::Csv, ctx.output("autumn"));
        exporter.export(&schedule).unwrap();
        assert_eq!(exporter.output_path(), ctx.output("autumn.csv"));

        let mut reader = csv::Reader::from_path(exporter.output_path()).unwrap();
        let headers = reader.headers().unwrap().clone();
        assert_eq!(headers.iter().collect::<Vec<_>>(), vec!["Group", "Day", "Slot", "Lesson", "Teacher", "Classroom"]);

        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].iter().collect::<Vec<_>>(), vec!["10A", "Monday", "1", "Math", "Ivanov", "Room A"]);
        assert_eq!(rows[1].iter().collect::<Vec<_>>(), vec!["10A", "Monday", "2", "", "", ""]);
    }

    #[test_context(ExportTestContext)]
    #[test]
    fn test_json_nests_groups_days_and_slots(ctx: &mut ExportTestContext) {
        let schedule = ScheduleExport::gather().unwrap();
        let exporter = Exporter::new(ExportFormat::Json, ctx.output("autumn.json"));
        exporter.export(&schedule).unwrap();

        let text = std::fs::read_to_string(exporter.output_path()).unwrap();
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(json["groups"][0]["name"], "10A");
        assert_eq!(json["groups"][0]["days"][0]["slots"][0]["classroom"], "Room A");
        assert_eq!(json["groups"][1]["days"].as_array().unwrap().len(), 6);
    }

    #[test_context(ExportTestContext)]
    #[test]
    fn test_xlsx_file_is_written(ctx: &mut ExportTestContext) {
        let schedule = ScheduleExport::gather().unwrap();
        let exporter = Exporter::new(ExportFormat::Xlsx, ctx.output("autumn"));
        exporter.export(&schedule).unwrap();

        let path = exporter.output_path();
        assert_eq!(path.extension().and_then(|e| e.to_str()), Some("xlsx"));
        let bytes = std::fs::read(path).unwrap();
        // xlsx is a zip archive
        assert!(bytes.starts_with(b"PK"));
    }

    #[test_context(ExportTestContext)]
    #[test]
    fn test_stale_references_export_as_blank(_ctx: &mut ExportTestContext) {
        Teacher::all()[0].read().delete().unwrap();
        Classroom::all()[0].read().delete().unwrap();

        let schedule = ScheduleExport::gather().unwrap();
        let slot = &schedule.groups[0].days[0].slots[0];
        assert_eq!(slot.lesson, "Math");
        assert_eq!(slot.teacher, "");
        assert_eq!(slot.classroom, "");
    }
}
