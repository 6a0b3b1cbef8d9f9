//! Конфигурация приложения (`hms.toml`)

pub mod loader;

pub use loader::{ConfigError, ConfigLoader, ConfigSource};

use common::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Путь к файлу SQLite; директории создаются при открытии
    pub path: PathBuf,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_database_path(),
        }
    }
}

/// `<data_local_dir>/hms/hms.db`, иначе `./data/hms.db`
pub fn default_database_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join("hms").join("hms.db"))
        .unwrap_or_else(|| PathBuf::from("data").join("hms.db"))
}
