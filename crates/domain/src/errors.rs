//! Domain Errors - Business rule violations
//!
//! Contains ONLY business logic errors, не infrastructure errors.
//! Ошибки хранилища приходят сюда уже переведёнными в `Storage` / `DuplicateKey`.

use crate::value_objects::HospitalField;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Какое именно правило нарушено
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationRule {
    /// Обязательное поле пустое после trim
    Required,
    /// Значение не соответствует формату
    InvalidFormat { expected: &'static str },
    /// Значение не является целым числом
    NotANumber,
    /// Значение вне допустимого диапазона (`max = None` - без верхней границы)
    OutOfRange { min: i64, max: Option<i64> },
    /// Значение больше значения другого поля
    Exceeds { other: HospitalField },
    /// Значение не входит в список допустимых вариантов
    UnknownVariant,
}

/// Ошибка валидации, привязанная к конкретному полю формы
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: HospitalField,
    pub rule: ValidationRule,
}

impl ValidationError {
    pub fn new(field: HospitalField, rule: ValidationRule) -> Self {
        Self { field, rule }
    }

    pub fn required(field: HospitalField) -> Self {
        Self::new(field, ValidationRule::Required)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = self.field.label();
        match self.rule {
            ValidationRule::Required => write!(f, "{label} is required"),
            ValidationRule::InvalidFormat { expected } => {
                write!(f, "{label} format is invalid (expected {expected})")
            }
            ValidationRule::NotANumber => write!(f, "{label} must be a whole number"),
            ValidationRule::OutOfRange { min, max: Some(max) } => {
                write!(f, "{label} must be between {min} and {max}")
            }
            ValidationRule::OutOfRange { min, max: None } => {
                write!(f, "{label} must be at least {min}")
            }
            ValidationRule::Exceeds { other } => {
                write!(f, "{label} cannot exceed {}", other.label())
            }
            ValidationRule::UnknownVariant => write!(f, "{label} is not a recognised option"),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Значение уникального ключа, которое уже занято
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateField {
    pub field: HospitalField,
    pub value: String,
}

impl fmt::Display for DuplicateField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}' is already in use", self.field.label(), self.value)
    }
}

/// Domain-specific errors representing business rule violations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Input validation: конкретное поле, конкретное правило
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// Business rule: уникальный ключ уже используется (все занятые ключи сразу)
    #[error("{}", .fields.iter().map(ToString::to_string).collect::<Vec<_>>().join("; "))]
    DuplicateKey { fields: Vec<DuplicateField> },

    #[error("Hospital not found: {0}")]
    NotFound(String),

    /// Ошибка нижнего уровня (I/O, SQL) - пользователь исправить не может
    #[error("Storage error: {0}")]
    Storage(String),
}

/// Domain result type
pub type DomainResult<T> = Result<T, DomainError>;

impl DomainError {
    pub fn duplicate(field: HospitalField, value: impl Into<String>) -> Self {
        DomainError::DuplicateKey {
            fields: vec![DuplicateField {
                field,
                value: value.into(),
            }],
        }
    }

    pub fn storage(error: impl fmt::Display) -> Self {
        DomainError::Storage(error.to_string())
    }

    /// Поля, которые UI должен подсветить
    pub fn offending_fields(&self) -> Vec<HospitalField> {
        match self {
            DomainError::Validation(error) => vec![error.field],
            DomainError::DuplicateKey { fields } => fields.iter().map(|d| d.field).collect(),
            DomainError::NotFound(_) | DomainError::Storage(_) => Vec::new(),
        }
    }

    /// Ошибку можно исправить изменением ввода
    pub fn is_user_fixable(&self) -> bool {
        matches!(
            self.category(),
            ErrorCategory::Validation | ErrorCategory::BusinessRule
        )
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            DomainError::Validation(_) => ErrorCategory::Validation,
            DomainError::DuplicateKey { .. } => ErrorCategory::BusinessRule,
            DomainError::NotFound(_) => ErrorCategory::NotFound,
            DomainError::Storage(_) => ErrorCategory::Environment,
        }
    }
}

/// Categories of domain errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Input validation errors
    Validation,
    /// Business rule violations (uniqueness)
    BusinessRule,
    /// Resource not found
    NotFound,
    /// Environment-level failures, fatal for the current operation
    Environment,
}
