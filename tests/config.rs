#[cfg(test)]
mod tests {
    use parking_lot::{const_mutex, Mutex, MutexGuard};
    use schedmaker::db::catalog::Catalog;
    use schedmaker::libs::config::{Config, CONFIG_FILE_NAME, DEFAULT_MAIN_STORE, DEFAULT_TEACHER_IMAGE};
    use schedmaker::libs::data_storage::{DataStorage, STORES_DIR};
    use std::path::PathBuf;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    // HOME is process-wide; tests in this binary take turns.
    static LOCK: Mutex<()> = const_mutex(());

    /// Points the user's home/appdata directory at a temporary directory.
    struct ConfigTestContext {
        _guard: MutexGuard<'static, ()>,
        temp_dir: TempDir,
    }

    impl TestContext for ConfigTestContext {
        fn setup() -> Self {
            let guard = LOCK.lock();
            let temp_dir = tempfile::tempdir().unwrap();
            std::env::set_var("HOME", temp_dir.path());
            std::env::set_var("LOCALAPPDATA", temp_dir.path());
            ConfigTestContext {
                _guard: guard,
                temp_dir,
            }
        }
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_read_without_file_gives_defaults(_ctx: &mut ConfigTestContext) {
        let config = Config::read().unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.main_store, DEFAULT_MAIN_STORE);
        assert_eq!(config.default_teacher_image, DEFAULT_TEACHER_IMAGE);
        assert!(config.store_dir.is_none());
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_save_and_read_config(ctx: &mut ConfigTestContext) {
        let config = Config {
            store_dir: Some(ctx.temp_dir.path().join("timetables")),
            main_store: "school".to_string(),
            default_teacher_image: "nobody.png".to_string(),
        };
        config.save().unwrap();

        let path = DataStorage::new().get_path(CONFIG_FILE_NAME).unwrap();
        assert!(path.starts_with(ctx.temp_dir.path()));
        assert!(path.exists());

        assert_eq!(Config::read().unwrap(), config);
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_partial_file_fills_in_defaults(_ctx: &mut ConfigTestContext) {
        let path = DataStorage::new().get_path(CONFIG_FILE_NAME).unwrap();
        std::fs::write(&path, r#"{ "main_store": "school" }"#).unwrap();

        let config = Config::read().unwrap();
        assert_eq!(config.main_store, "school");
        assert_eq!(config.default_teacher_image, DEFAULT_TEACHER_IMAGE);
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_malformed_file_is_an_error(_ctx: &mut ConfigTestContext) {
        let path = DataStorage::new().get_path(CONFIG_FILE_NAME).unwrap();
        std::fs::write(&path, "not json").unwrap();
        assert!(Config::read().is_err());
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_default_store_dir_lives_in_data_dir(ctx: &mut ConfigTestContext) {
        let dir = Config::default().store_dir().unwrap();
        assert!(dir.starts_with(ctx.temp_dir.path()));
        assert!(dir.ends_with(STORES_DIR));
        assert!(dir.is_dir());

        let catalog = Catalog::from_config(&Config::default()).unwrap();
        assert_eq!(catalog.dir(), &dir);
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_explicit_store_dir_is_kept(_ctx: &mut ConfigTestContext) {
        let config = Config {
            store_dir: Some(PathBuf::from("/srv/schedules")),
            ..Config::default()
        };
        let catalog = Catalog::from_config(&config).unwrap();
        assert_eq!(catalog.dir(), &PathBuf::from("/srv/schedules"));
    }
}
