//! Domain value objects - Identifiers and validated primitives

use crate::domain::errors::DomainError;
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// Macro to implement common traits for integer id wrapper types
macro_rules! impl_id_wrapper {
    ($type:ident) => {
        impl $type {
            pub fn new(id: i64) -> Self {
                Self(id)
            }

            pub fn value(&self) -> i64 {
                self.0
            }
        }

        impl From<i64> for $type {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl std::fmt::Display for $type {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

/// Unique identifier for an experience
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ExperienceId(i64);

impl_id_wrapper!(ExperienceId);

/// Unique identifier for a category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CategoryId(i64);

impl_id_wrapper!(CategoryId);

/// Unique identifier for a property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PropertyId(i64);

impl_id_wrapper!(PropertyId);

/// Unique identifier for a review
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ReviewId(i64);

impl_id_wrapper!(ReviewId);

/// Unique identifier for a user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(i64);

impl_id_wrapper!(UserId);

/// User email address, the lookup key for reviews
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Email(String);

impl Email {
    pub fn new(address: String) -> Self {
        Self(address)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for Email {
    fn from(address: String) -> Self {
        Self(address)
    }
}

impl From<&str> for Email {
    fn from(address: &str) -> Self {
        Self(address.to_string())
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A review rating, restricted to 1.0..=5.0 in steps of 0.5
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rating(f64);

impl Rating {
    pub fn new(value: f64) -> Result<Self, DomainError> {
        if !(1.0..=5.0).contains(&value) || (value * 2.0).fract() != 0.0 {
            return Err(DomainError::InvalidRating { value });
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    /// The value as stored on a review, rounded to one decimal.
    pub fn rounded(&self) -> f64 {
        round_to_tenth(self.0)
    }
}

/// Opening hours of an experience, parsed from "HH:mm-HH:mm"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceHours {
    start: NaiveTime,
    end: NaiveTime,
}

impl ServiceHours {
    /// Parse and validate a service-hours string. The start must be
    /// strictly before the end.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let Some((start_raw, end_raw)) = raw.split_once('-') else {
            return Err(DomainError::malformed_service_hours(raw));
        };

        let start = NaiveTime::parse_from_str(start_raw, "%H:%M")
            .map_err(|_| DomainError::malformed_service_hours(raw))?;
        let end = NaiveTime::parse_from_str(end_raw, "%H:%M")
            .map_err(|_| DomainError::malformed_service_hours(raw))?;

        if start >= end {
            return Err(DomainError::ServiceHoursOrder {
                raw: raw.to_string(),
            });
        }

        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveTime {
        self.start
    }

    pub fn end(&self) -> NaiveTime {
        self.end
    }
}

impl std::fmt::Display for ServiceHours {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}-{}",
            self.start.format("%H:%M"),
            self.end.format("%H:%M")
        )
    }
}

/// Round to one decimal place on the scaled integer, half up.
///
/// `f64::round` rounds ties away from zero, which for the non-negative
/// rating domain is exactly half-up. Reputation arithmetic depends on this
/// tie-breaking; do not swap in a half-to-even rounding.
pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
