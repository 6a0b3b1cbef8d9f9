//! Repository Abstractions - Ports for Infrastructure Layer
//!
//! Определяет contracts между Domain и Infrastructure слоями
//! Следует Dependency Inversion Principle

mod hospital_repository;
mod in_memory;

pub use hospital_repository::{HospitalRepository, HospitalSearch};
pub use in_memory::InMemoryHospitalRepository;

#[cfg(test)]
pub use hospital_repository::MockHospitalRepository;
