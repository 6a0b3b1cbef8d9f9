//! Accreditation - статус аккредитации учреждения

use super::normalize_variant;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Accreditation {
    /// Хранится как "None"
    #[default]
    NotAccredited,
    Nabh,
    Jci,
    Iso9001,
    NabhIso,
}

impl Accreditation {
    pub const ALL: [Accreditation; 5] = [
        Accreditation::NotAccredited,
        Accreditation::Nabh,
        Accreditation::Jci,
        Accreditation::Iso9001,
        Accreditation::NabhIso,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Accreditation::NotAccredited => "None",
            Accreditation::Nabh => "NABH",
            Accreditation::Jci => "JCI",
            Accreditation::Iso9001 => "ISO 9001",
            Accreditation::NabhIso => "NABH + ISO",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        let wanted = normalize_variant(value);
        Self::ALL
            .into_iter()
            .find(|variant| normalize_variant(variant.as_str()) == wanted)
    }
}

impl fmt::Display for Accreditation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
