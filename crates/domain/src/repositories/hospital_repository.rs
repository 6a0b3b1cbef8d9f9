//! HospitalRepository - Domain abstraction for hospital persistence
//!
//! Defines the contract for hospital storage without infrastructure concerns

use crate::entities::{Hospital, HospitalId};
use crate::errors::DomainResult;
use serde::{Deserialize, Serialize};

/// Repository abstraction for hospital persistence
///
/// Follows Repository Pattern - domain defines the interface,
/// infrastructure provides the implementation.
/// Отсутствующая запись - всегда `Ok(None)`, не ошибка.
#[cfg_attr(test, mockall::automock)]
pub trait HospitalRepository: Send + Sync {
    /// Есть ли хотя бы одна зарегистрированная больница
    fn exists_any(&self) -> DomainResult<bool>;

    /// Insert a new hospital row
    ///
    /// UNIQUE violation -> `DomainError::DuplicateKey`, остальное -> `DomainError::Storage`
    fn save(&self, hospital: &Hospital) -> DomainResult<HospitalId>;

    /// Retrieve hospital by ID
    fn find_by_id(&self, id: HospitalId) -> DomainResult<Option<Hospital>>;

    fn find_by_registration_number(
        &self,
        registration_number: &str,
    ) -> DomainResult<Option<Hospital>>;

    fn exists_registration_number(&self, registration_number: &str) -> DomainResult<bool>;

    fn exists_license_number(&self, license_number: &str) -> DomainResult<bool>;

    /// All hospitals ordered by name
    fn find_all(&self, active_only: bool) -> DomainResult<Vec<Hospital>>;

    /// Filtered listing ordered by name
    fn search(&self, filter: &HospitalSearch) -> DomainResult<Vec<Hospital>>;
}

/// Фильтр поиска: подстрока для name/city, точное совпадение для id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HospitalSearch {
    pub name: Option<String>,
    pub id: Option<HospitalId>,
    pub city: Option<String>,
    pub active_only: bool,
}

impl Default for HospitalSearch {
    fn default() -> Self {
        Self {
            name: None,
            id: None,
            city: None,
            active_only: true,
        }
    }
}

impl HospitalSearch {
    pub fn by_name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn by_city(city: impl Into<String>) -> Self {
        Self {
            city: Some(city.into()),
            ..Self::default()
        }
    }

    pub fn include_inactive(mut self) -> Self {
        self.active_only = false;
        self
    }

    /// Проверка одной записи - используется in-memory реализацией
    ///
    /// Семантика совпадает с SQL `LIKE '%x%' ESCAPE`: подстрока ищется буквально
    /// (`%` и `_` не wildcard), без учёта регистра для ASCII.
    pub fn matches(&self, hospital: &Hospital) -> bool {
        if self.active_only && !hospital.is_active {
            return false;
        }
        if let Some(id) = self.id {
            if hospital.id != Some(id) {
                return false;
            }
        }
        let contains = |haystack: &str, needle: &str| {
            haystack
                .to_ascii_lowercase()
                .contains(&needle.to_ascii_lowercase())
        };
        if let Some(name) = self.name.as_deref() {
            if !contains(&hospital.hospital_name, name) {
                return false;
            }
        }
        if let Some(city) = self.city.as_deref() {
            if !contains(&hospital.city, city) {
                return false;
            }
        }
        true
    }
}
