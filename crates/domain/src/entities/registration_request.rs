//! RegistrationRequest - сырой ввод формы регистрации
//!
//! Все поля - строки (включая числовые), потому что view собирает текст как есть.
//! Разбор и проверка происходят в services::validation.

use serde::{Deserialize, Serialize};

use crate::value_objects::HospitalField;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistrationRequest {
    pub hospital_name: String,
    pub registration_number: String,
    pub hospital_type: String,
    pub specialization_type: String,
    pub established_year: String,

    pub address_line1: String,
    pub address_line2: String,
    pub city: String,
    pub state: String,
    pub pin_code: String,
    pub country: String,

    pub phone_primary: String,
    pub phone_alternate: String,
    pub emergency_contact: String,
    pub email: String,
    pub website: String,

    pub total_beds: String,
    pub icu_beds: String,
    pub operation_theaters: String,

    pub administrator_name: String,
    pub license_number: String,
    pub accreditation: String,
    pub gstin: String,
}

impl RegistrationRequest {
    pub fn get(&self, field: HospitalField) -> &str {
        match field {
            HospitalField::HospitalName => &self.hospital_name,
            HospitalField::RegistrationNumber => &self.registration_number,
            HospitalField::HospitalType => &self.hospital_type,
            HospitalField::SpecializationType => &self.specialization_type,
            HospitalField::EstablishedYear => &self.established_year,
            HospitalField::AddressLine1 => &self.address_line1,
            HospitalField::AddressLine2 => &self.address_line2,
            HospitalField::City => &self.city,
            HospitalField::State => &self.state,
            HospitalField::PinCode => &self.pin_code,
            HospitalField::Country => &self.country,
            HospitalField::PhonePrimary => &self.phone_primary,
            HospitalField::PhoneAlternate => &self.phone_alternate,
            HospitalField::EmergencyContact => &self.emergency_contact,
            HospitalField::Email => &self.email,
            HospitalField::Website => &self.website,
            HospitalField::TotalBeds => &self.total_beds,
            HospitalField::IcuBeds => &self.icu_beds,
            HospitalField::OperationTheaters => &self.operation_theaters,
            HospitalField::AdministratorName => &self.administrator_name,
            HospitalField::LicenseNumber => &self.license_number,
            HospitalField::Accreditation => &self.accreditation,
            HospitalField::Gstin => &self.gstin,
        }
    }

    /// Доступ на запись - view переспрашивает одно поле после ошибки
    pub fn field_mut(&mut self, field: HospitalField) -> &mut String {
        match field {
            HospitalField::HospitalName => &mut self.hospital_name,
            HospitalField::RegistrationNumber => &mut self.registration_number,
            HospitalField::HospitalType => &mut self.hospital_type,
            HospitalField::SpecializationType => &mut self.specialization_type,
            HospitalField::EstablishedYear => &mut self.established_year,
            HospitalField::AddressLine1 => &mut self.address_line1,
            HospitalField::AddressLine2 => &mut self.address_line2,
            HospitalField::City => &mut self.city,
            HospitalField::State => &mut self.state,
            HospitalField::PinCode => &mut self.pin_code,
            HospitalField::Country => &mut self.country,
            HospitalField::PhonePrimary => &mut self.phone_primary,
            HospitalField::PhoneAlternate => &mut self.phone_alternate,
            HospitalField::EmergencyContact => &mut self.emergency_contact,
            HospitalField::Email => &mut self.email,
            HospitalField::Website => &mut self.website,
            HospitalField::TotalBeds => &mut self.total_beds,
            HospitalField::IcuBeds => &mut self.icu_beds,
            HospitalField::OperationTheaters => &mut self.operation_theaters,
            HospitalField::AdministratorName => &mut self.administrator_name,
            HospitalField::LicenseNumber => &mut self.license_number,
            HospitalField::Accreditation => &mut self.accreditation,
            HospitalField::Gstin => &mut self.gstin,
        }
    }

    pub fn set(&mut self, field: HospitalField, value: impl Into<String>) {
        *self.field_mut(field) = value.into();
    }

    /// Builder-style вариант `set` для тестов и сценариев
    pub fn with(mut self, field: HospitalField, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    /// Trimmed значение; пустая строка считается отсутствующим значением
    pub fn trimmed(&self, field: HospitalField) -> Option<&str> {
        let value = self.get(field).trim();
        (!value.is_empty()).then_some(value)
    }
}
