//! SQLite реализация HospitalRepository
//!
//! Единственное место, где строки таблицы `hospitals` превращаются в `Hospital` и обратно.

use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{params, OptionalExtension, Row};
use std::sync::Arc;
use tracing::debug;

use crate::database::ConnectionProvider;
use domain::{
    Accreditation, DomainError, DomainResult, DuplicateField, Hospital, HospitalField,
    HospitalId, HospitalRepository, HospitalSearch, HospitalType, SpecializationType,
};

const SELECT_COLUMNS: &str = "SELECT id, hospital_name, registration_number, hospital_type,
        specialization_type, address_line1, address_line2, city, state, pin_code, country,
        phone_primary, phone_alternate, emergency_contact, email, website,
        total_beds, icu_beds, operation_theaters, administrator_name, license_number,
        accreditation, established_year, gstin, is_active, created_at, updated_at
    FROM hospitals";

const UNIQUE_VIOLATION_PREFIX: &str = "UNIQUE constraint failed: ";

const LIKE_ESCAPE: char = '\\';

pub struct SqliteHospitalRepository {
    provider: Arc<ConnectionProvider>,
}

impl SqliteHospitalRepository {
    pub fn new(provider: Arc<ConnectionProvider>) -> Self {
        Self { provider }
    }

    fn query_hospitals<P: rusqlite::Params>(
        &self,
        sql: &str,
        params: P,
    ) -> rusqlite::Result<Vec<Hospital>> {
        let conn = self.provider.acquire();
        let mut stmt = conn.prepare(sql)?;
        let rows = stmt.query_map(params, row_to_hospital)?;
        rows.collect()
    }

    fn exists_where(&self, sql: &str, value: &str) -> DomainResult<bool> {
        let conn = self.provider.acquire();
        conn.query_row(sql, [value], |row| row.get::<_, bool>(0))
            .map_err(storage_error)
    }
}

impl HospitalRepository for SqliteHospitalRepository {
    fn exists_any(&self) -> DomainResult<bool> {
        let conn = self.provider.acquire();
        conn.query_row("SELECT EXISTS(SELECT 1 FROM hospitals)", [], |row| {
            row.get::<_, bool>(0)
        })
        .map_err(storage_error)
    }

    fn save(&self, hospital: &Hospital) -> DomainResult<HospitalId> {
        let conn = self.provider.acquire();

        conn.execute(
            "INSERT INTO hospitals (
                hospital_name, registration_number, hospital_type, specialization_type,
                address_line1, address_line2, city, state, pin_code, country,
                phone_primary, phone_alternate, emergency_contact, email, website,
                total_beds, icu_beds, operation_theaters, administrator_name, license_number,
                accreditation, established_year, gstin, is_active, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13,
                      ?14, ?15, ?16, ?17, ?18, ?19, ?20, ?21, ?22, ?23, ?24, ?25, ?26)",
            params![
                hospital.hospital_name,
                hospital.registration_number,
                hospital.hospital_type.as_str(),
                hospital.specialization_type.as_str(),
                hospital.address_line1,
                hospital.address_line2,
                hospital.city,
                hospital.state,
                hospital.pin_code,
                hospital.country,
                hospital.phone_primary,
                hospital.phone_alternate,
                hospital.emergency_contact,
                hospital.email,
                hospital.website,
                hospital.total_beds,
                hospital.icu_beds,
                hospital.operation_theaters,
                hospital.administrator_name,
                hospital.license_number,
                hospital.accreditation.as_str(),
                hospital.established_year,
                hospital.gstin,
                hospital.is_active,
                hospital.created_at.to_rfc3339(),
                hospital.updated_at.to_rfc3339(),
            ],
        )
        .map_err(|error| map_insert_error(error, hospital))?;

        let id = HospitalId::new(conn.last_insert_rowid());
        debug!("Inserted hospital row {}", id);
        Ok(id)
    }

    fn find_by_id(&self, id: HospitalId) -> DomainResult<Option<Hospital>> {
        let conn = self.provider.acquire();
        conn.query_row(
            &format!("{SELECT_COLUMNS} WHERE id = ?1"),
            [id.value()],
            row_to_hospital,
        )
        .optional()
        .map_err(storage_error)
    }

    fn find_by_registration_number(
        &self,
        registration_number: &str,
    ) -> DomainResult<Option<Hospital>> {
        let conn = self.provider.acquire();
        conn.query_row(
            &format!("{SELECT_COLUMNS} WHERE registration_number = ?1"),
            [registration_number],
            row_to_hospital,
        )
        .optional()
        .map_err(storage_error)
    }

    fn exists_registration_number(&self, registration_number: &str) -> DomainResult<bool> {
        self.exists_where(
            "SELECT EXISTS(SELECT 1 FROM hospitals WHERE registration_number = ?1)",
            registration_number,
        )
    }

    fn exists_license_number(&self, license_number: &str) -> DomainResult<bool> {
        self.exists_where(
            "SELECT EXISTS(SELECT 1 FROM hospitals WHERE license_number = ?1)",
            license_number,
        )
    }

    fn find_all(&self, active_only: bool) -> DomainResult<Vec<Hospital>> {
        self.query_hospitals(
            &format!("{SELECT_COLUMNS} WHERE (?1 = 0 OR is_active = 1) ORDER BY hospital_name"),
            [active_only],
        )
        .map_err(storage_error)
    }

    fn search(&self, filter: &HospitalSearch) -> DomainResult<Vec<Hospital>> {
        debug!("Searching hospitals: {:?}", filter);
        self.query_hospitals(
            &format!(
                "{SELECT_COLUMNS}
                 WHERE (?1 IS NULL OR hospital_name LIKE '%' || ?1 || '%' ESCAPE '\\')
                   AND (?2 IS NULL OR id = ?2)
                   AND (?3 IS NULL OR city LIKE '%' || ?3 || '%' ESCAPE '\\')
                   AND (?4 = 0 OR is_active = 1)
                 ORDER BY hospital_name"
            ),
            params![
                filter.name.as_deref().map(escape_like),
                filter.id.map(|id| id.value()),
                filter.city.as_deref().map(escape_like),
                filter.active_only,
            ],
        )
        .map_err(storage_error)
    }
}

fn row_to_hospital(row: &Row<'_>) -> rusqlite::Result<Hospital> {
    let hospital_type: String = row.get(3)?;
    let accreditation: String = row.get(21)?;

    Ok(Hospital {
        id: Some(HospitalId::new(row.get(0)?)),
        hospital_name: row.get(1)?,
        registration_number: row.get(2)?,
        hospital_type: HospitalType::parse(&hospital_type)
            .ok_or_else(|| conversion_error(3, format!("unknown hospital type '{hospital_type}'")))?,
        specialization_type: SpecializationType::from(row.get::<_, String>(4)?.as_str()),
        address_line1: row.get(5)?,
        address_line2: row.get(6)?,
        city: row.get(7)?,
        state: row.get(8)?,
        pin_code: row.get(9)?,
        country: row.get(10)?,
        phone_primary: row.get(11)?,
        phone_alternate: row.get(12)?,
        emergency_contact: row.get(13)?,
        email: row.get(14)?,
        website: row.get(15)?,
        total_beds: row.get(16)?,
        icu_beds: row.get(17)?,
        operation_theaters: row.get(18)?,
        administrator_name: row.get(19)?,
        license_number: row.get(20)?,
        accreditation: Accreditation::parse(&accreditation).ok_or_else(|| {
            conversion_error(21, format!("unknown accreditation '{accreditation}'"))
        })?,
        established_year: row.get(22)?,
        gstin: row.get(23)?,
        is_active: row.get(24)?,
        created_at: parse_timestamp(row, 25)?,
        updated_at: parse_timestamp(row, 26)?,
    })
}

fn parse_timestamp(row: &Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let raw: String = row.get(idx)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn conversion_error(idx: usize, message: String) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, message.into())
}

/// UNIQUE violation -> DuplicateKey с колонками из текста ошибки SQLite
fn map_insert_error(error: rusqlite::Error, hospital: &Hospital) -> DomainError {
    let columns = match &error {
        rusqlite::Error::SqliteFailure(failure, Some(message))
            if failure.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
        {
            message
                .strip_prefix(UNIQUE_VIOLATION_PREFIX)
                .map(unique_columns)
                .unwrap_or_default()
        }
        _ => Vec::new(),
    };

    if columns.is_empty() {
        return storage_error(error);
    }

    DomainError::DuplicateKey {
        fields: columns
            .into_iter()
            .map(|field| DuplicateField {
                field,
                value: match field {
                    HospitalField::LicenseNumber => hospital.license_number.clone(),
                    HospitalField::RegistrationNumber => hospital.registration_number.clone(),
                    other => other.column().to_string(),
                },
            })
            .collect(),
    }
}

/// "hospitals.registration_number, hospitals.x" -> поля формы
fn unique_columns(list: &str) -> Vec<HospitalField> {
    list.split(',')
        .filter_map(|qualified| {
            let column = qualified.trim().rsplit('.').next()?;
            HospitalField::from_column(column)
        })
        .collect()
}

/// `%` и `_` из пользовательского ввода ищутся буквально
fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        if matches!(ch, '%' | '_') || ch == LIKE_ESCAPE {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(ch);
    }
    escaped
}

fn storage_error(error: rusqlite::Error) -> DomainError {
    DomainError::storage(error)
}
