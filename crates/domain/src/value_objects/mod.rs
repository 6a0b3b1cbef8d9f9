//! Domain Value Objects - Immutable domain concepts
//!
//! Value objects представляют business concepts без identity.
//! Immutable по определению.

pub mod accreditation;
pub mod hospital_field;
pub mod hospital_type;
pub mod specialization_type;

pub use accreditation::Accreditation;
pub use hospital_field::HospitalField;
pub use hospital_type::HospitalType;
pub use specialization_type::SpecializationType;

/// Нормализация для сравнения вариантов: регистр, пробелы, дефисы и подчёркивания не важны
pub(crate) fn normalize_variant(value: &str) -> String {
    value
        .trim()
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}
