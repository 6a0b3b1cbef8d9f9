//! Infrastructure Layer - SQLite хранилище и загрузка конфигурации
//!
//! Реализует domain ports; domain об этом слое ничего не знает.

pub mod config;
pub mod database;
pub mod repositories;

pub use config::{AppConfig, ConfigError, ConfigLoader, ConfigSource, DatabaseConfig};
pub use database::{ConnectionProvider, DatabaseError, MigrationReport, SchemaManager};
pub use repositories::SqliteHospitalRepository;
