//! InMemoryHospitalRepository - test double без файловой системы
//!
//! Те же правила уникальности, что у UNIQUE индексов в SQLite.

use parking_lot::Mutex;

use super::{HospitalRepository, HospitalSearch};
use crate::entities::{Hospital, HospitalId};
use crate::errors::{DomainError, DomainResult};
use crate::value_objects::HospitalField;

#[derive(Debug, Default)]
pub struct InMemoryHospitalRepository {
    state: Mutex<State>,
}

#[derive(Debug, Default)]
struct State {
    rows: Vec<Hospital>,
    last_id: i64,
}

impl InMemoryHospitalRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.state.lock().rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn sorted(mut rows: Vec<Hospital>) -> Vec<Hospital> {
        rows.sort_by(|a, b| a.hospital_name.cmp(&b.hospital_name));
        rows
    }
}

impl HospitalRepository for InMemoryHospitalRepository {
    fn exists_any(&self) -> DomainResult<bool> {
        Ok(!self.state.lock().rows.is_empty())
    }

    fn save(&self, hospital: &Hospital) -> DomainResult<HospitalId> {
        let mut state = self.state.lock();

        // Первая нарушенная колонка, как у SQLite
        if state
            .rows
            .iter()
            .any(|row| row.registration_number == hospital.registration_number)
        {
            return Err(DomainError::duplicate(
                HospitalField::RegistrationNumber,
                &hospital.registration_number,
            ));
        }
        if state
            .rows
            .iter()
            .any(|row| row.license_number == hospital.license_number)
        {
            return Err(DomainError::duplicate(
                HospitalField::LicenseNumber,
                &hospital.license_number,
            ));
        }

        state.last_id += 1;
        let id = HospitalId::new(state.last_id);
        state.rows.push(hospital.clone().with_id(id));
        Ok(id)
    }

    fn find_by_id(&self, id: HospitalId) -> DomainResult<Option<Hospital>> {
        Ok(self
            .state
            .lock()
            .rows
            .iter()
            .find(|row| row.id == Some(id))
            .cloned())
    }

    fn find_by_registration_number(
        &self,
        registration_number: &str,
    ) -> DomainResult<Option<Hospital>> {
        Ok(self
            .state
            .lock()
            .rows
            .iter()
            .find(|row| row.registration_number == registration_number)
            .cloned())
    }

    fn exists_registration_number(&self, registration_number: &str) -> DomainResult<bool> {
        Ok(self
            .state
            .lock()
            .rows
            .iter()
            .any(|row| row.registration_number == registration_number))
    }

    fn exists_license_number(&self, license_number: &str) -> DomainResult<bool> {
        Ok(self
            .state
            .lock()
            .rows
            .iter()
            .any(|row| row.license_number == license_number))
    }

    fn find_all(&self, active_only: bool) -> DomainResult<Vec<Hospital>> {
        let rows = self
            .state
            .lock()
            .rows
            .iter()
            .filter(|row| !active_only || row.is_active)
            .cloned()
            .collect();
        Ok(Self::sorted(rows))
    }

    fn search(&self, filter: &HospitalSearch) -> DomainResult<Vec<Hospital>> {
        let rows = self
            .state
            .lock()
            .rows
            .iter()
            .filter(|row| filter.matches(row))
            .cloned()
            .collect();
        Ok(Self::sorted(rows))
    }
}
