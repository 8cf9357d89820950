//! Phone Value Object

use serde::{Deserialize, Serialize};
use std::fmt;

/// Phone number value object
///
/// Stored as entered minus formatting noise; no country-specific
/// validation, customers sync in from many sources.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Phone(String);

impl Phone {
    pub fn new(value: impl Into<String>) -> Self {
        let cleaned: String = value
            .into()
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '+')
            .collect();
        Self(cleaned)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Phone {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
