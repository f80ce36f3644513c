#[cfg(test)]
mod tests {
    use parking_lot::{const_mutex, Mutex, MutexGuard};
    use schedmaker::db::catalog::Catalog;
    use schedmaker::db::db::Db;
    use schedmaker::libs::config::Config;
    use schedmaker::models::conflict::{has_conflict, slot_conflicts, ConflictKind};
    use schedmaker::models::day::{Day, Direction};
    use schedmaker::models::schedule::Schedule;
    use schedmaker::models::structure::{Classroom, Group, Lesson, Structure, Teacher};
    use schedmaker::models::week::Week;
    use schedmaker::orm::model::{Handle, Model};
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    static LOCK: Mutex<()> = const_mutex(());

    struct ScheduleTestContext {
        _guard: MutexGuard<'static, ()>,
        _temp_dir: TempDir,
        catalog: Catalog,
        config: Config,
    }

    impl ScheduleTestContext {
        /// The day of `group` with the given order, in the open schedule.
        fn day(&self, group: &Handle<Group>, day_order: i64) -> Handle<Day> {
            let week = Schedule::week(group).unwrap();
            let days = week.read().days();
            days.into_iter().find(|day| day.read().day_order() == day_order).unwrap()
        }
    }

    impl TestContext for ScheduleTestContext {
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
            ScheduleTestContext {
                _guard: guard,
                _temp_dir: temp_dir,
                catalog,
                config,
            }
        }

        fn teardown(self) {
            Schedule::close();
            Structure::close();
        }
    }

    /// Give `day` as many empty slots as needed and fill slot `index`.
    fn fill(day: &Handle<Day>, index: usize, lesson: Option<&Handle<Lesson>>, classroom: Option<&Handle<Classroom>>) {
        let mut day = day.write();
        while day.slot_count() <= index {
            day.append_empty_slot();
        }
        day.set_lesson(index, lesson);
        day.set_classroom(index, classroom);
        day.save().unwrap();
    }

    #[test_context(ScheduleTestContext)]
    #[test]
    fn test_week_is_built_on_first_access(ctx: &mut ScheduleTestContext) {
        let group = Group::create("10A").unwrap();
        let week = Schedule::week(&group).unwrap();

        let days = week.read().days();
        let orders: Vec<i64> = days.iter().map(|day| day.read().day_order()).collect();
        assert_eq!(orders, vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(days[0].read().to_string(), "Monday");
        assert_eq!(days[5].read().to_string(), "Saturday");
        assert!(days.iter().all(|day| day.read().slot_count() == 0));

        // Second access returns the same week
        let again = Schedule::week(&group).unwrap();
        assert!(std::sync::Arc::ptr_eq(&week, &again));
        assert_eq!(Week::all().len(), 1);
        assert_eq!(Day::all().len(), 6);

        // And so does a fresh load of the store
        Schedule::open(&ctx.catalog, "autumn").unwrap();
        assert_eq!(Week::all().len(), 1);
        assert_eq!(Schedule::week(&group).unwrap().read().days().len(), 6);
    }

    #[test_context(ScheduleTestContext)]
    #[test]
    fn test_slot_edits_round_trip(ctx: &mut ScheduleTestContext) {
        let group = Group::create("10A").unwrap();
        let ivanov = Teacher::create("Ivanov", None).unwrap();
        let math = Lesson::create("Math", Some(&ivanov)).unwrap();
        let art = Lesson::create("Art", None).unwrap();
        let room_a = Classroom::create("Room A").unwrap();
        let room_b = Classroom::create("Room B").unwrap();

        let monday = ctx.day(&group, 1);
        fill(&monday, 0, Some(&math), Some(&room_a));
        fill(&monday, 2, Some(&art), Some(&room_b));
        {
            let mut day = monday.write();
            assert!(day.move_slot(2, Direction::Up));
            day.save().unwrap();
        }
        let monday_id = monday.read().id();

        Schedule::open(&ctx.catalog, "autumn").unwrap();

        let monday = Day::get(monday_id).unwrap();
        let day = monday.read();
        assert_eq!(day.lessons.ids(), vec![Some(math.read().id()), Some(art.read().id()), None]);
        assert_eq!(day.classrooms.ids(), vec![Some(room_a.read().id()), Some(room_b.read().id()), None]);
        let first = day.slot(0).unwrap();
        assert!(std::sync::Arc::ptr_eq(&first.lesson.unwrap(), &math));
        assert!(day.slot(2).unwrap().lesson.is_none());
    }

    #[test_context(ScheduleTestContext)]
    #[test]
    fn test_remove_slot_is_persisted(ctx: &mut ScheduleTestContext) {
        let group = Group::create("10A").unwrap();
        let math = Lesson::create("Math", None).unwrap();
        let art = Lesson::create("Art", None).unwrap();
        let room = Classroom::create("Room A").unwrap();

        let tuesday = ctx.day(&group, 2);
        fill(&tuesday, 0, Some(&math), None);
        fill(&tuesday, 1, None, Some(&room));
        fill(&tuesday, 2, Some(&art), None);
        {
            let mut day = tuesday.write();
            assert!(day.remove_slot(1));
            assert!(!day.remove_slot(5));
            day.save().unwrap();
        }
        let id = tuesday.read().id();

        Schedule::open(&ctx.catalog, "autumn").unwrap();
        let day = Day::get(id).unwrap();
        let day = day.read();
        assert_eq!(day.lessons.ids(), vec![Some(math.read().id()), Some(art.read().id())]);
        assert_eq!(day.classrooms.ids(), vec![None, None]);
    }

    #[test_context(ScheduleTestContext)]
    #[test]
    fn test_classroom_conflict_on_same_weekday(ctx: &mut ScheduleTestContext) {
        let g1 = Group::create("10A").unwrap();
        let g2 = Group::create("10B").unwrap();
        let room_a = Classroom::create("Room A").unwrap();
        let room_b = Classroom::create("Room B").unwrap();
        let room_c = Classroom::create("Room C").unwrap();

        let a = ctx.day(&g1, 3);
        let b = ctx.day(&g2, 3);
        fill(&a, 0, None, Some(&room_b));
        fill(&a, 2, None, Some(&room_a));
        fill(&b, 0, None, Some(&room_c));
        fill(&b, 2, None, Some(&room_a));

        for day in [&a, &b] {
            let day = day.read();
            assert!(has_conflict(&day, 2, ConflictKind::Classroom));
            assert!(!has_conflict(&day, 0, ConflictKind::Classroom));
            assert!(!has_conflict(&day, 1, ConflictKind::Classroom));
            assert!(!has_conflict(&day, 2, ConflictKind::Teacher));
        }

        // Same room on another weekday is no clash
        let thursday = ctx.day(&g2, 4);
        fill(&thursday, 0, None, Some(&room_b));
        assert!(!has_conflict(&a.read(), 0, ConflictKind::Classroom));
    }

    #[test_context(ScheduleTestContext)]
    #[test]
    fn test_day_never_conflicts_with_itself(ctx: &mut ScheduleTestContext) {
        let group = Group::create("10A").unwrap();
        let room = Classroom::create("Room A").unwrap();
        let monday = ctx.day(&group, 1);
        fill(&monday, 0, None, Some(&room));
        fill(&monday, 1, None, Some(&room));

        let conflicts = slot_conflicts(&monday.read());
        assert_eq!(conflicts.len(), 2);
        assert!(conflicts.iter().all(|c| !c.any()));
    }

    #[test_context(ScheduleTestContext)]
    #[test]
    fn test_teacher_conflict_follows_the_lesson_teacher(ctx: &mut ScheduleTestContext) {
        let g1 = Group::create("G1").unwrap();
        let g2 = Group::create("G2").unwrap();
        let ivanov = Teacher::create("Ivanov", None).unwrap();
        let petrova = Teacher::create("Petrova", None).unwrap();
        let math = Lesson::create("Math", Some(&ivanov)).unwrap();
        let physics = Lesson::create("Physics", Some(&petrova)).unwrap();

        let day_a = ctx.day(&g1, 1);
        let day_b = ctx.day(&g2, 1);
        fill(&day_a, 0, Some(&math), None);
        fill(&day_b, 0, Some(&math), None);

        assert!(has_conflict(&day_a.read(), 0, ConflictKind::Teacher));
        assert!(!has_conflict(&day_a.read(), 0, ConflictKind::Classroom));

        fill(&day_b, 0, Some(&physics), None);
        assert!(!has_conflict(&day_a.read(), 0, ConflictKind::Teacher));

        // A different lesson taught by the same teacher still clashes
        let algebra = Lesson::create("Algebra", Some(&ivanov)).unwrap();
        fill(&day_b, 0, Some(&algebra), None);
        assert!(has_conflict(&day_a.read(), 0, ConflictKind::Teacher));
    }

    #[test_context(ScheduleTestContext)]
    #[test]
    fn test_teacherless_and_stale_slots_never_conflict(ctx: &mut ScheduleTestContext) {
        let g1 = Group::create("G1").unwrap();
        let g2 = Group::create("G2").unwrap();
        let ivanov = Teacher::create("Ivanov", None).unwrap();
        let free = Lesson::create("Free period", None).unwrap();
        let math = Lesson::create("Math", Some(&ivanov)).unwrap();
        let room = Classroom::create("Room A").unwrap();

        let day_a = ctx.day(&g1, 5);
        let day_b = ctx.day(&g2, 5);
        fill(&day_a, 0, Some(&free), Some(&room));
        fill(&day_b, 0, Some(&free), Some(&room));
        fill(&day_a, 1, Some(&math), None);
        fill(&day_b, 1, Some(&math), None);

        assert!(!has_conflict(&day_a.read(), 0, ConflictKind::Teacher));
        assert!(has_conflict(&day_a.read(), 1, ConflictKind::Teacher));

        room.read().delete().unwrap();
        ivanov.read().delete().unwrap();
        assert!(!has_conflict(&day_a.read(), 0, ConflictKind::Classroom));
        assert!(!has_conflict(&day_a.read(), 1, ConflictKind::Teacher));

        // Shorter days on the same weekday are tolerated
        assert!(!has_conflict(&day_a.read(), 7, ConflictKind::Classroom));
    }

    #[test_context(ScheduleTestContext)]
    #[test]
    fn test_create_refuses_existing_store(ctx: &mut ScheduleTestContext) {
        let group = Group::create("10A").unwrap();
        Schedule::week(&group).unwrap();

        assert!(Schedule::create(&ctx.catalog, "spring").unwrap());
        assert!(!Schedule::create(&ctx.catalog, "autumn").unwrap());
        assert!(!Schedule::create(&ctx.catalog, "bad/name").unwrap());

        // The existing store still holds its rows
        let store = ctx.catalog.store("autumn").unwrap();
        let rows = Db::open(&store).unwrap().select_all("days", &["id"]).unwrap();
        assert_eq!(rows.len(), 6);
    }

    #[test_context(ScheduleTestContext)]
    #[test]
    fn test_rename_follows_the_open_schedule(ctx: &mut ScheduleTestContext) {
        let group = Group::create("10A").unwrap();
        Schedule::week(&group).unwrap();
        Schedule::create(&ctx.catalog, "spring").unwrap();

        assert!(!Schedule::rename(&ctx.catalog, "autumn", "spring").unwrap());
        assert!(!Schedule::rename(&ctx.catalog, "missing", "winter").unwrap());
        assert!(Schedule::rename(&ctx.catalog, "autumn", "fall").unwrap());
        assert_eq!(Schedule::current().as_deref(), Some("fall"));

        // Saving after the rename lands in the renamed store
        let monday = ctx.day(&group, 1);
        fill(&monday, 0, None, None);
        Schedule::open(&ctx.catalog, "fall").unwrap();
        assert_eq!(ctx.day(&group, 1).read().slot_count(), 1);
    }

    #[test_context(ScheduleTestContext)]
    #[test]
    fn test_delete_and_list(ctx: &mut ScheduleTestContext) {
        Schedule::create(&ctx.catalog, "spring").unwrap();
        assert_eq!(Schedule::all(&ctx.catalog, &ctx.config).unwrap(), vec!["autumn", "spring"]);

        Schedule::delete(&ctx.catalog, "autumn").unwrap();
        assert_eq!(Schedule::current(), None);
        assert!(Day::all().is_empty());
        assert_eq!(Schedule::all(&ctx.catalog, &ctx.config).unwrap(), vec!["spring"]);
        assert!(Schedule::delete(&ctx.catalog, "autumn").is_err());
    }
}
