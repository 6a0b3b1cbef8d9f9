//! HospitalField - имя поля формы регистрации
//!
//! Используется в ValidationError, чтобы UI мог подсветить конкретное поле,
//! и в repository для сопоставления UNIQUE-колонок.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HospitalField {
    // Identity
    HospitalName,
    RegistrationNumber,
    HospitalType,
    SpecializationType,
    EstablishedYear,
    // Location
    AddressLine1,
    AddressLine2,
    City,
    State,
    PinCode,
    Country,
    // Contact
    PhonePrimary,
    PhoneAlternate,
    EmergencyContact,
    Email,
    Website,
    // Capacity
    TotalBeds,
    IcuBeds,
    OperationTheaters,
    // Administration
    AdministratorName,
    LicenseNumber,
    Accreditation,
    Gstin,
}

impl HospitalField {
    /// Все поля в порядке формы
    pub const ALL: [HospitalField; 23] = [
        HospitalField::HospitalName,
        HospitalField::RegistrationNumber,
        HospitalField::HospitalType,
        HospitalField::SpecializationType,
        HospitalField::EstablishedYear,
        HospitalField::AddressLine1,
        HospitalField::AddressLine2,
        HospitalField::City,
        HospitalField::State,
        HospitalField::PinCode,
        HospitalField::Country,
        HospitalField::PhonePrimary,
        HospitalField::PhoneAlternate,
        HospitalField::EmergencyContact,
        HospitalField::Email,
        HospitalField::Website,
        HospitalField::TotalBeds,
        HospitalField::IcuBeds,
        HospitalField::OperationTheaters,
        HospitalField::AdministratorName,
        HospitalField::LicenseNumber,
        HospitalField::Accreditation,
        HospitalField::Gstin,
    ];

    /// Обязательные поля в порядке проверки
    pub const MANDATORY: [HospitalField; 16] = [
        HospitalField::HospitalName,
        HospitalField::RegistrationNumber,
        HospitalField::HospitalType,
        HospitalField::SpecializationType,
        HospitalField::EstablishedYear,
        HospitalField::AddressLine1,
        HospitalField::City,
        HospitalField::State,
        HospitalField::PinCode,
        HospitalField::Country,
        HospitalField::PhonePrimary,
        HospitalField::EmergencyContact,
        HospitalField::Email,
        HospitalField::TotalBeds,
        HospitalField::AdministratorName,
        HospitalField::LicenseNumber,
    ];

    pub fn is_mandatory(&self) -> bool {
        Self::MANDATORY.contains(self)
    }

    /// Человекочитаемое название поля
    pub fn label(&self) -> &'static str {
        match self {
            HospitalField::HospitalName => "Hospital Name",
            HospitalField::RegistrationNumber => "Registration Number",
            HospitalField::HospitalType => "Hospital Type",
            HospitalField::SpecializationType => "Specialization Type",
            HospitalField::EstablishedYear => "Established Year",
            HospitalField::AddressLine1 => "Address Line 1",
            HospitalField::AddressLine2 => "Address Line 2",
            HospitalField::City => "City",
            HospitalField::State => "State",
            HospitalField::PinCode => "PIN Code",
            HospitalField::Country => "Country",
            HospitalField::PhonePrimary => "Primary Phone",
            HospitalField::PhoneAlternate => "Alternate Phone",
            HospitalField::EmergencyContact => "Emergency Contact",
            HospitalField::Email => "Email",
            HospitalField::Website => "Website",
            HospitalField::TotalBeds => "Total Beds",
            HospitalField::IcuBeds => "ICU Beds",
            HospitalField::OperationTheaters => "Operation Theaters",
            HospitalField::AdministratorName => "Administrator Name",
            HospitalField::LicenseNumber => "License Number",
            HospitalField::Accreditation => "Accreditation",
            HospitalField::Gstin => "GSTIN",
        }
    }

    /// Имя колонки в таблице `hospitals`
    pub fn column(&self) -> &'static str {
        match self {
            HospitalField::HospitalName => "hospital_name",
            HospitalField::RegistrationNumber => "registration_number",
            HospitalField::HospitalType => "hospital_type",
            HospitalField::SpecializationType => "specialization_type",
            HospitalField::EstablishedYear => "established_year",
            HospitalField::AddressLine1 => "address_line1",
            HospitalField::AddressLine2 => "address_line2",
            HospitalField::City => "city",
            HospitalField::State => "state",
            HospitalField::PinCode => "pin_code",
            HospitalField::Country => "country",
            HospitalField::PhonePrimary => "phone_primary",
            HospitalField::PhoneAlternate => "phone_alternate",
            HospitalField::EmergencyContact => "emergency_contact",
            HospitalField::Email => "email",
            HospitalField::Website => "website",
            HospitalField::TotalBeds => "total_beds",
            HospitalField::IcuBeds => "icu_beds",
            HospitalField::OperationTheaters => "operation_theaters",
            HospitalField::AdministratorName => "administrator_name",
            HospitalField::LicenseNumber => "license_number",
            HospitalField::Accreditation => "accreditation",
            HospitalField::Gstin => "gstin",
        }
    }

    pub fn from_column(column: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.column() == column)
    }
}

impl fmt::Display for HospitalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
