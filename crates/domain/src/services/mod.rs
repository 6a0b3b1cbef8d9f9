//! Domain Services - Pure business logic services
//!
//! Содержит сложную business logic которая не вписывается в entities
//! Оперирует entities и value objects, использует repository abstractions

pub mod hospital_service;
pub mod validation;

pub use hospital_service::{Clock, HospitalRegistrationService, HospitalService};
