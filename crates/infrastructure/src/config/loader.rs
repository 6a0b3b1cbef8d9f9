use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

use super::AppConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    Default,
}

pub struct ConfigLoader {
    config_paths: Vec<PathBuf>,
    env_prefix: String,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self {
            config_paths: Self::default_config_paths(),
            env_prefix: "HMS_".to_string(),
        }
    }

    /// Явный путь проверяется раньше стандартных
    pub fn with_path(mut self, path: PathBuf) -> Self {
        self.config_paths.insert(0, path);
        self
    }

    /// Только указанные пути, без стандартных (для тестов)
    pub fn with_paths_only(mut self, paths: Vec<PathBuf>) -> Self {
        self.config_paths = paths;
        self
    }

    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    fn default_config_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("hms.toml"), PathBuf::from("hms.json")];

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("hms").join("config.toml"));
            paths.push(config_dir.join("hms").join("config.json"));
        }

        paths
    }

    pub fn load(&self) -> Result<AppConfig, ConfigError> {
        self.load_with_source().map(|(config, _)| config)
    }

    /// Первый существующий файл побеждает, затем env overrides
    pub fn load_with_source(&self) -> Result<(AppConfig, ConfigSource), ConfigError> {
        let (config, source) = match self.config_paths.iter().find(|path| path.exists()) {
            Some(path) => {
                let config = Self::load_file(path)?;
                info!("Loaded configuration from: {}", path.display());
                (config, ConfigSource::File(path.clone()))
            }
            None => {
                debug!("No config file found, using defaults");
                (AppConfig::default(), ConfigSource::Default)
            }
        };

        Ok((self.apply_env_overrides(config), source))
    }

    fn load_file(path: &Path) -> Result<AppConfig, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let parse_error = |message: String| ConfigError::Parse {
            path: path.to_path_buf(),
            message,
        };

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => serde_json::from_str(&content).map_err(|e| parse_error(e.to_string())),
            _ => toml::from_str(&content).map_err(|e| parse_error(e.to_string())),
        }
    }

    fn apply_env_overrides(&self, mut config: AppConfig) -> AppConfig {
        if let Ok(path) = env::var(format!("{}DATABASE_PATH", self.env_prefix)) {
            debug!("Database path overridden from environment");
            config.database.path = PathBuf::from(path);
        }

        if let Ok(level) = env::var(format!("{}LOG_LEVEL", self.env_prefix)) {
            config.logging.level = level;
        }

        if let Ok(json) = env::var(format!("{}LOG_JSON", self.env_prefix)) {
            config.logging.json_output = matches!(json.to_lowercase().as_str(), "1" | "true" | "yes");
        }

        config
    }
}
