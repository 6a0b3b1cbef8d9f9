//! Persistence adapters for domain repository ports

mod sqlite_hospital_repository;

pub use sqlite_hospital_repository::SqliteHospitalRepository;
