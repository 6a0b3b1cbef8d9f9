//! Domain Entities - Core business objects
//!
//! Entities содержат identity и business data.
//! Независимы от infrastructure concerns.

pub mod hospital;
pub mod hospital_id;
pub mod registration_request;

pub use hospital::Hospital;
pub use hospital_id::HospitalId;
pub use registration_request::RegistrationRequest;
