//! Версионированная схема базы данных
//!
//! Каждая миграция применяется в своей транзакции вместе с записью в `schema_version`.
//! SQLite DDL транзакционен, поэтому упавшая миграция не оставляет следов.

use chrono::Utc;
use rusqlite::{params, Connection};
use std::sync::Arc;
use tracing::{debug, info};

use super::{ConnectionProvider, DatabaseError};

/// Один шаг эволюции схемы
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Migration {
    pub version: u32,
    pub description: &'static str,
    pub sql: &'static str,
}

const SCHEMA_VERSION_DDL: &str = "
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER PRIMARY KEY,
    applied_at TEXT NOT NULL,
    description TEXT NOT NULL
);";

/// Миграции приложения в порядке версий
pub const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    description: "create hospitals table",
    sql: r#"
        CREATE TABLE IF NOT EXISTS hospitals (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            hospital_name TEXT NOT NULL,
            registration_number TEXT NOT NULL,
            hospital_type TEXT NOT NULL,
            specialization_type TEXT NOT NULL,
            address_line1 TEXT NOT NULL,
            address_line2 TEXT,
            city TEXT NOT NULL,
            state TEXT NOT NULL,
            pin_code TEXT NOT NULL,
            country TEXT NOT NULL DEFAULT 'India',
            phone_primary TEXT NOT NULL,
            phone_alternate TEXT,
            emergency_contact TEXT NOT NULL,
            email TEXT NOT NULL,
            website TEXT,
            total_beds INTEGER NOT NULL CHECK (total_beds > 0),
            icu_beds INTEGER NOT NULL DEFAULT 0 CHECK (icu_beds >= 0 AND icu_beds <= total_beds),
            operation_theaters INTEGER NOT NULL DEFAULT 0 CHECK (operation_theaters >= 0),
            administrator_name TEXT NOT NULL,
            license_number TEXT NOT NULL,
            accreditation TEXT NOT NULL DEFAULT 'None',
            established_year INTEGER NOT NULL,
            gstin TEXT,
            is_active INTEGER NOT NULL DEFAULT 1,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );

        CREATE UNIQUE INDEX IF NOT EXISTS idx_hospitals_reg_no ON hospitals(registration_number);
        CREATE UNIQUE INDEX IF NOT EXISTS idx_hospitals_license ON hospitals(license_number);
        CREATE INDEX IF NOT EXISTS idx_hospitals_name ON hospitals(hospital_name);

        CREATE TRIGGER IF NOT EXISTS trg_hospital_updated_at
        AFTER UPDATE ON hospitals
        FOR EACH ROW
        BEGIN
            UPDATE hospitals
            SET updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
            WHERE id = NEW.id;
        END;
    "#,
}];

/// Итог `apply_migrations`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationReport {
    /// Версии, применённые этим вызовом
    pub applied: Vec<u32>,
    pub current_version: u32,
}

impl MigrationReport {
    pub fn is_up_to_date(&self) -> bool {
        self.applied.is_empty()
    }
}

pub struct SchemaManager {
    provider: Arc<ConnectionProvider>,
    migrations: Vec<Migration>,
}

impl SchemaManager {
    pub fn new(provider: Arc<ConnectionProvider>) -> Self {
        Self::with_migrations(provider, MIGRATIONS.to_vec())
    }

    /// Свой набор миграций (порядок в списке не важен, сортируется по версии)
    pub fn with_migrations(provider: Arc<ConnectionProvider>, mut migrations: Vec<Migration>) -> Self {
        migrations.sort_by_key(|m| m.version);
        Self {
            provider,
            migrations,
        }
    }

    /// Последняя применённая версия, 0 для пустой базы
    pub fn current_version(&self) -> Result<u32, DatabaseError> {
        let conn = self.provider.acquire();
        Self::ensure_version_table(&conn)?;
        Ok(Self::read_version(&conn)?)
    }

    pub fn latest_version(&self) -> u32 {
        self.migrations.last().map(|m| m.version).unwrap_or(0)
    }

    /// Применить все миграции с версией выше текущей. Повторный вызов ничего не делает.
    pub fn apply_migrations(&self) -> Result<MigrationReport, DatabaseError> {
        let starting_version = self.current_version()?;
        let mut current_version = starting_version;
        let mut applied = Vec::new();

        for migration in self
            .migrations
            .iter()
            .filter(|m| m.version > starting_version)
        {
            info!(
                "Applying migration v{}: {}",
                migration.version, migration.description
            );

            self.provider
                .with_transaction(|tx| -> rusqlite::Result<()> {
                    tx.execute_batch(migration.sql)?;
                    tx.execute(
                        "INSERT INTO schema_version (version, applied_at, description) VALUES (?1, ?2, ?3)",
                        params![
                            migration.version,
                            Utc::now().to_rfc3339(),
                            migration.description
                        ],
                    )?;
                    Ok(())
                })
                .map_err(|source| DatabaseError::Migration {
                    version: migration.version,
                    description: migration.description.to_string(),
                    source,
                })?;

            current_version = migration.version;
            applied.push(migration.version);
        }

        if applied.is_empty() {
            debug!("Schema is up to date at v{}", current_version);
        } else {
            info!(
                "Applied {} migration(s), schema now at v{}",
                applied.len(),
                current_version
            );
        }

        Ok(MigrationReport {
            applied,
            current_version,
        })
    }

    fn ensure_version_table(conn: &Connection) -> rusqlite::Result<()> {
        conn.execute_batch(SCHEMA_VERSION_DDL)
    }

    fn read_version(conn: &Connection) -> rusqlite::Result<u32> {
        conn.query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_version",
            [],
            |row| row.get(0),
        )
    }
}
