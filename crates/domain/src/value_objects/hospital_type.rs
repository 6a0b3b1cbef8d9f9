//! HospitalType - форма собственности / профиль учреждения

use super::normalize_variant;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HospitalType {
    General,
    Specialty,
    Clinic,
    Government,
    Private,
    SemiGovernment,
    Trust,
    Charitable,
}

impl HospitalType {
    pub const ALL: [HospitalType; 8] = [
        HospitalType::General,
        HospitalType::Specialty,
        HospitalType::Clinic,
        HospitalType::Government,
        HospitalType::Private,
        HospitalType::SemiGovernment,
        HospitalType::Trust,
        HospitalType::Charitable,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HospitalType::General => "General",
            HospitalType::Specialty => "Specialty",
            HospitalType::Clinic => "Clinic",
            HospitalType::Government => "Government",
            HospitalType::Private => "Private",
            HospitalType::SemiGovernment => "Semi-Government",
            HospitalType::Trust => "Trust",
            HospitalType::Charitable => "Charitable",
        }
    }

    /// Разбор пользовательского ввода ("semi government", "PRIVATE", ...)
    pub fn parse(value: &str) -> Option<Self> {
        let wanted = normalize_variant(value);
        Self::ALL
            .into_iter()
            .find(|variant| normalize_variant(variant.as_str()) == wanted)
    }
}

impl fmt::Display for HospitalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
