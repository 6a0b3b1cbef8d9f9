//! Domain Layer - HMS Business Logic
//!
//! Содержит ТОЛЬКО чистую business logic без dependencies на:
//! - Infrastructure (SQLite, файловая система)
//! - UI (формы, терминал)
//!
//! Принципы Clean Architecture:
//! - Entities: Hospital, RegistrationRequest
//! - Value Objects: HospitalType, SpecializationType, Accreditation, HospitalField
//! - Repository Abstractions: interfaces для persistence
//! - Services: валидация регистрации и делегирование в repository

pub mod entities;
pub mod errors;
pub mod repositories;
pub mod services;
pub mod value_objects;

// Re-export core domain types
pub use entities::{Hospital, HospitalId, RegistrationRequest};
pub use errors::{
    DomainError, DomainResult, DuplicateField, ErrorCategory, ValidationError, ValidationRule,
};
pub use repositories::{HospitalRepository, HospitalSearch, InMemoryHospitalRepository};
pub use services::{Clock, HospitalRegistrationService, HospitalService};
pub use value_objects::{Accreditation, HospitalField, HospitalType, SpecializationType};
