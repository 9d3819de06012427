//! City domain model.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// A normalised city name, used as the lookup key for stored readings.
///
/// Normalisation trims surrounding whitespace and lower-cases the name, so
/// `" Moscow "` and `"moscow"` address the same readings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct City(String);

impl City {
    /// Creates a city key from free text.
    ///
    /// # Validation
    /// - Name cannot be empty or blank
    pub fn new(name: impl AsRef<str>) -> Result<Self, DomainError> {
        let name = name.as_ref().trim();
        if name.is_empty() {
            return Err(DomainError::EmptyCity);
        }
        Ok(Self(name.to_lowercase()))
    }

    /// Returns the normalised name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for City {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for City {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for City {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for City {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<City> for String {
    fn from(city: City) -> Self {
        city.0
    }
}
