//! SpecializationType - известные профили плюс свободный текст

use super::normalize_variant;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpecializationType {
    MultiSpecialty,
    SuperSpecialty,
    General,
    SingleSpecialty,
    /// Любой другой профиль, введённый вручную
    Other(String),
}

impl SpecializationType {
    pub const KNOWN: [SpecializationType; 4] = [
        SpecializationType::MultiSpecialty,
        SpecializationType::SuperSpecialty,
        SpecializationType::General,
        SpecializationType::SingleSpecialty,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            SpecializationType::MultiSpecialty => "Multi-Specialty",
            SpecializationType::SuperSpecialty => "Super-Specialty",
            SpecializationType::General => "General",
            SpecializationType::SingleSpecialty => "Single-Specialty",
            SpecializationType::Other(text) => text,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, SpecializationType::Other(_))
    }
}

impl From<&str> for SpecializationType {
    /// Известный вариант, если совпадает, иначе `Other` с обрезанным текстом
    fn from(value: &str) -> Self {
        let wanted = normalize_variant(value);
        Self::KNOWN
            .into_iter()
            .find(|variant| normalize_variant(variant.as_str()) == wanted)
            .unwrap_or_else(|| SpecializationType::Other(value.trim().to_string()))
    }
}

impl fmt::Display for SpecializationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_and_free_text() {
        assert_eq!(
            SpecializationType::from("multi specialty"),
            SpecializationType::MultiSpecialty
        );
        let other = SpecializationType::from("  Cardiac Care ");
        assert_eq!(other, SpecializationType::Other("Cardiac Care".to_string()));
        assert!(!other.is_known());
        assert_eq!(other.as_str(), "Cardiac Care");
    }
}
