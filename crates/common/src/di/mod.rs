//! Простая DI система для HMS
//!
//! ПРИНЦИПЫ:
//! - Ключ регистрации - TypeId capability (допускаются trait objects: `dyn HospitalService`)
//! - Три режима: Singleton / Factory / Instance
//! - Factory получает `&DIContainer` и сама разрешает свои зависимости
//! - Циклы обнаруживаются по стеку разрешения, а не бесконечной рекурсией

pub mod container;
pub mod errors;

pub use container::{DIContainer, Lifetime};
pub use errors::{DIError, DIResult};
