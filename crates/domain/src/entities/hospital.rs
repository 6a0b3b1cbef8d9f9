//! Hospital - единственная сущность системы
//!
//! Содержит ТОЛЬКО данные; валидация живёт в services::validation,
//! перевод в строки таблицы - в infrastructure repository.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::HospitalId;
use crate::value_objects::{Accreditation, HospitalType, SpecializationType};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hospital {
    /// `None` до сохранения в repository
    pub id: Option<HospitalId>,

    // Identity
    pub hospital_name: String,
    pub registration_number: String,
    pub hospital_type: HospitalType,
    pub specialization_type: SpecializationType,
    pub established_year: i32,

    // Location
    pub address_line1: String,
    pub address_line2: Option<String>,
    pub city: String,
    pub state: String,
    pub pin_code: String,
    pub country: String,

    // Contact
    pub phone_primary: String,
    pub phone_alternate: Option<String>,
    pub emergency_contact: String,
    pub email: String,
    pub website: Option<String>,

    // Capacity
    pub total_beds: u32,
    pub icu_beds: u32,
    pub operation_theaters: u32,

    // Administration
    pub administrator_name: String,
    pub license_number: String,
    pub accreditation: Accreditation,
    pub gstin: Option<String>,

    // Metadata
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Hospital {
    pub fn with_id(mut self, id: HospitalId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Адрес одной строкой для landing view
    pub fn full_address(&self) -> String {
        let mut parts: Vec<&str> = vec![&self.address_line1];
        if let Some(line2) = self.address_line2.as_deref() {
            parts.push(line2);
        }
        parts.extend([
            self.city.as_str(),
            self.state.as_str(),
            self.pin_code.as_str(),
            self.country.as_str(),
        ]);
        parts.join(", ")
    }

    /// Сколько лет учреждение работает на указанный год
    pub fn years_in_operation(&self, current_year: i32) -> i32 {
        (current_year - self.established_year).max(0)
    }
}
