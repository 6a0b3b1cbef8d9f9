//! Ошибки DI контейнера.
//!
//! Все ошибки здесь - ошибки конфигурации (wiring), а не пользовательского ввода.
//! В корректно собранном приложении они не возникают; при старте считаются фатальными.

use thiserror::Error;

/// Error type для всех операций DI контейнера
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DIError {
    /// Для capability не зарегистрирован ни один provider
    #[error("Service not registered: {service}")]
    UnregisteredKey { service: String },

    /// Factory прямо или транзитивно запросила саму себя
    #[error("Cyclic dependency detected: {}", .chain.join(" -> "))]
    CyclicDependency { chain: Vec<String> },

    /// Factory вернула ошибку, не являющуюся DIError
    #[error("Factory for {service} failed: {message}")]
    Factory { service: String, message: String },

    /// Перерегистрация ключа, который уже был разрешён
    #[error("Service {service} cannot be registered after it has been resolved")]
    RegistrationAfterResolution { service: String },

    #[error("Type downcast failed for {service}")]
    TypeMismatch { service: String },
}

pub type DIResult<T> = Result<T, DIError>;

impl DIError {
    /// Превращает ошибку factory в DIError.
    ///
    /// Если factory вернула DIError (например, вложенный `resolve` не нашёл ключ
    /// или обнаружил цикл), ошибка пробрасывается без обёртки.
    pub(crate) fn from_factory(service: &str, error: anyhow::Error) -> Self {
        match error.downcast::<DIError>() {
            Ok(di_error) => di_error,
            Err(other) => DIError::Factory {
                service: service.to_string(),
                message: format!("{other:#}"),
            },
        }
    }

    /// Имя сервиса, к которому относится ошибка (для логов)
    pub fn service(&self) -> Option<&str> {
        match self {
            DIError::UnregisteredKey { service }
            | DIError::Factory { service, .. }
            | DIError::RegistrationAfterResolution { service }
            | DIError::TypeMismatch { service } => Some(service),
            DIError::CyclicDependency { chain } => chain.first().map(String::as_str),
        }
    }
}
