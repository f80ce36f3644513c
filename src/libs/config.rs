//! Configuration for the schedmaker application.
//!
//! Settings live in `config.json` in the per-user data directory resolved by
//! [`DataStorage`]. A missing file means defaults: stores under the data
//! directory, the structure store named `main_db`, and `default.png` as the
//! teacher image.
//!
//! ```rust,no_run
//! use schedmaker::libs::config::Config;
//!
//! let mut config = Config::read()?;
//! config.main_store = "school".to_string();
//! config.save()?;
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::data_storage::{DataStorage, STORES_DIR};
use crate::db::catalog::Catalog;
use crate::libs::messages::Message;
use crate::msg_bail_anyhow;
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io;
use std::path::PathBuf;

/// Configuration file name used for storing application settings.
pub const CONFIG_FILE_NAME: &str = "config.json";

pub const DEFAULT_MAIN_STORE: &str = "main_db";
pub const DEFAULT_TEACHER_IMAGE: &str = "default.png";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Config {
    /// Where named stores live. Defaults to `stores/` in the data directory.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub store_dir: Option<PathBuf>,

    /// Store holding groups, teachers, classrooms and lessons.
    #[serde(default = "default_main_store")]
    pub main_store: String,

    /// Image file name given to teachers created without one.
    #[serde(default = "default_teacher_image")]
    pub default_teacher_image: String,
}

fn default_main_store() -> String {
    DEFAULT_MAIN_STORE.to_string()
}

fn default_teacher_image() -> String {
    DEFAULT_TEACHER_IMAGE.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            store_dir: None,
            main_store: default_main_store(),
            default_teacher_image: default_teacher_image(),
        }
    }
}

impl Config {
    pub fn read() -> Result<Config> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;

        // No file yet: run on defaults
        if !config_file_path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(config_file_path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        let config_file = File::create(config_file_path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    /// Resolved store directory.
    pub fn store_dir(&self) -> io::Result<PathBuf> {
        match &self.store_dir {
            Some(dir) => Ok(dir.clone()),
            None => DataStorage::new().get_dir(STORES_DIR),
        }
    }

    /// Interactive setup, starting from the current values.
    pub fn init() -> Result<Config> {
        let current = Config::read()?;
        let theme = ColorfulTheme::default();

        let store_dir: String = Input::with_theme(&theme)
            .with_prompt(Message::PromptStoreDir.to_string())
            .default(current.store_dir()?.display().to_string())
            .interact_text()?;

        let main_store: String = Input::with_theme(&theme)
            .with_prompt(Message::PromptMainStore.to_string())
            .default(current.main_store.clone())
            .interact_text()?;
        if !Catalog::validate_name(&main_store) {
            msg_bail_anyhow!(Message::InvalidStoreName(main_store));
        }

        let default_teacher_image: String = Input::with_theme(&theme)
            .with_prompt(Message::PromptTeacherImage.to_string())
            .default(current.default_teacher_image.clone())
            .interact_text()?;

        Ok(Config {
            store_dir: Some(PathBuf::from(store_dir)),
            main_store,
            default_teacher_image,
        })
    }
}
