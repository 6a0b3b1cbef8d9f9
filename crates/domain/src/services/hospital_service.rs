//! HospitalService - регистрация больницы и чтение зарегистрированных данных
//!
//! Views знают только trait; реализация держит repository через `Arc<dyn ...>`.

use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use super::validation;
use crate::entities::{Hospital, HospitalId, RegistrationRequest};
use crate::errors::{DomainError, DomainResult, DuplicateField};
use crate::repositories::{HospitalRepository, HospitalSearch};
use crate::value_objects::HospitalField;

/// Источник текущего времени (подменяется в тестах)
pub type Clock = fn() -> DateTime<Utc>;

/// Service boundary для views
pub trait HospitalService: Send + Sync {
    /// Validate and persist a new hospital
    fn register(&self, request: RegistrationRequest) -> DomainResult<Hospital>;

    /// Всегда перечитывается из хранилища
    fn is_already_registered(&self) -> DomainResult<bool>;

    fn get_hospital(&self, id: HospitalId) -> DomainResult<Option<Hospital>>;

    /// Как `get_hospital`, но отсутствие записи - `DomainError::NotFound`
    fn get_hospital_required(&self, id: HospitalId) -> DomainResult<Hospital>;

    /// Active hospitals ordered by name
    fn list_hospitals(&self) -> DomainResult<Vec<Hospital>>;

    fn search_hospitals(&self, filter: &HospitalSearch) -> DomainResult<Vec<Hospital>>;

    /// Самая ранняя регистрация (минимальный id) - её показывает landing view
    fn primary_hospital(&self) -> DomainResult<Option<Hospital>>;
}

/// Production implementation of [`HospitalService`]
pub struct HospitalRegistrationService {
    repository: Arc<dyn HospitalRepository>,
    clock: Clock,
}

impl HospitalRegistrationService {
    pub fn new(repository: Arc<dyn HospitalRepository>) -> Self {
        Self::with_clock(repository, Utc::now)
    }

    pub fn with_clock(repository: Arc<dyn HospitalRepository>, clock: Clock) -> Self {
        Self { repository, clock }
    }

    /// Проверяет оба уникальных ключа и сообщает обо всех занятых сразу
    fn ensure_unique(&self, hospital: &Hospital) -> DomainResult<()> {
        let mut taken = Vec::new();
        if self
            .repository
            .exists_registration_number(&hospital.registration_number)?
        {
            taken.push(DuplicateField {
                field: HospitalField::RegistrationNumber,
                value: hospital.registration_number.clone(),
            });
        }
        if self
            .repository
            .exists_license_number(&hospital.license_number)?
        {
            taken.push(DuplicateField {
                field: HospitalField::LicenseNumber,
                value: hospital.license_number.clone(),
            });
        }

        if taken.is_empty() {
            Ok(())
        } else {
            Err(DomainError::DuplicateKey { fields: taken })
        }
    }
}

impl HospitalService for HospitalRegistrationService {
    #[instrument(skip(self, request), fields(registration_number = %request.registration_number.trim()))]
    fn register(&self, request: RegistrationRequest) -> DomainResult<Hospital> {
        let hospital = validation::validate(&request, (self.clock)()).map_err(|error| {
            warn!(field = %error.field, "Registration rejected: {}", error);
            DomainError::from(error)
        })?;

        if let Err(error) = self.ensure_unique(&hospital) {
            warn!("Registration rejected: {}", error);
            return Err(error);
        }

        let id = self.repository.save(&hospital)?;
        info!(
            "Registered hospital '{}' ({}) with id {}",
            hospital.hospital_name, hospital.registration_number, id
        );
        Ok(hospital.with_id(id))
    }

    fn is_already_registered(&self) -> DomainResult<bool> {
        let exists = self.repository.exists_any()?;
        debug!("Hospital registered: {}", exists);
        Ok(exists)
    }

    fn get_hospital(&self, id: HospitalId) -> DomainResult<Option<Hospital>> {
        self.repository.find_by_id(id)
    }

    fn get_hospital_required(&self, id: HospitalId) -> DomainResult<Hospital> {
        self.repository
            .find_by_id(id)?
            .ok_or_else(|| DomainError::NotFound(id.to_string()))
    }

    fn list_hospitals(&self) -> DomainResult<Vec<Hospital>> {
        self.repository.find_all(true)
    }

    fn search_hospitals(&self, filter: &HospitalSearch) -> DomainResult<Vec<Hospital>> {
        self.repository.search(filter)
    }

    fn primary_hospital(&self) -> DomainResult<Option<Hospital>> {
        Ok(self
            .repository
            .find_all(false)?
            .into_iter()
            .min_by_key(|hospital| hospital.id))
    }
}
