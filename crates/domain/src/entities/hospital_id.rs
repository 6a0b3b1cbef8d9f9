//! HospitalId - идентификатор зарегистрированной больницы
//!
//! Внутреннее представление - rowid хранилища, но domain видит только newtype.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HospitalId(i64);

impl HospitalId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// NOTE: This should only be used by infrastructure layer
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for HospitalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for HospitalId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}
