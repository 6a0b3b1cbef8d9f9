//! Общие компоненты HMS: DI контейнер и инициализация логирования.
//!
//! Не зависит ни от domain, ни от infrastructure - только cross-cutting concerns.

pub mod di;
pub mod logging;

pub use di::{DIContainer, DIError, DIResult, Lifetime};
pub use logging::{init_logging, LoggingConfig, OperationTimer};
