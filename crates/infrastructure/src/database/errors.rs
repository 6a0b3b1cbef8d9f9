//! Ошибки уровня хранилища
//!
//! Наружу из infrastructure уходят как `DomainError` (см. `From` ниже).

use domain::DomainError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Failed to open database at {}: {source}", .path.display())]
    Connection {
        path: PathBuf,
        source: rusqlite::Error,
    },

    /// Тоже ошибка подключения: файл нельзя создать без родительской директории
    #[error("Failed to create database directory {}: {source}", .path.display())]
    Directory {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Миграция откатилась целиком, версия схемы не изменилась
    #[error("Migration v{version} ({description}) failed: {source}")]
    Migration {
        version: u32,
        description: String,
        source: rusqlite::Error,
    },

    #[error("Database error: {0}")]
    Storage(#[from] rusqlite::Error),
}

impl DatabaseError {
    /// Файл базы нельзя открыть или создать
    pub fn is_connection(&self) -> bool {
        matches!(self, Self::Connection { .. } | Self::Directory { .. })
    }
}

impl From<DatabaseError> for DomainError {
    fn from(error: DatabaseError) -> Self {
        DomainError::storage(error)
    }
}
