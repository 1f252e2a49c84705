//! Domain errors - Business rule violations and lookup failures

use crate::domain::value_objects::{CategoryId, Email, ExperienceId, PropertyId};
use thiserror::Error;

/// Domain-specific errors raised synchronously at the point of detection.
///
/// Each variant maps onto an [`ErrorKind`], which is what the (external)
/// transport layer translates into response statuses.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    #[error("experience with id {id} not found")]
    ExperienceNotFound { id: ExperienceId },

    #[error("category with id {id} not found")]
    CategoryNotFound { id: CategoryId },

    #[error("categories not found: [{}]", .ids.iter().map(|id| id.to_string()).collect::<Vec<_>>().join(", "))]
    CategoriesNotFound { ids: Vec<CategoryId> },

    #[error("property with id {id} not found")]
    PropertyNotFound { id: PropertyId },

    #[error("user with email {email} not found")]
    UserNotFound { email: Email },

    #[error("review by {email} for experience {experience_id} not found")]
    ReviewNotFound {
        email: Email,
        experience_id: ExperienceId,
    },

    #[error("an experience with title '{title}' already exists")]
    DuplicateTitle { title: String },

    #[error("duplicated {field} are not allowed")]
    DuplicateIds { field: &'static str },

    #[error("user {email} has already rated experience {experience_id}")]
    AlreadyReviewed {
        email: Email,
        experience_id: ExperienceId,
    },

    #[error("rating must be between 1.0 and 5.0 in increments of 0.5, got {value}")]
    InvalidRating { value: f64 },

    #[error("invalid service hours '{raw}': expected format HH:mm-HH:mm")]
    MalformedServiceHours { raw: String },

    #[error("service hours start must be earlier than end in '{raw}'")]
    ServiceHoursOrder { raw: String },

    #[error("storage error: {message}")]
    Storage { message: String },
}

/// Coarse classification of a [`DomainError`] for transport translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A referenced entity is absent.
    NotFound,
    /// A uniqueness rule was violated.
    Conflict,
    /// The input itself is malformed or out of range.
    Validation,
    /// The storage backend failed; not a business outcome.
    Internal,
}

impl DomainError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ExperienceNotFound { .. }
            | Self::CategoryNotFound { .. }
            | Self::CategoriesNotFound { .. }
            | Self::PropertyNotFound { .. }
            | Self::UserNotFound { .. }
            | Self::ReviewNotFound { .. } => ErrorKind::NotFound,
            Self::DuplicateTitle { .. }
            | Self::DuplicateIds { .. }
            | Self::AlreadyReviewed { .. } => ErrorKind::Conflict,
            Self::InvalidRating { .. }
            | Self::MalformedServiceHours { .. }
            | Self::ServiceHoursOrder { .. } => ErrorKind::Validation,
            Self::Storage { .. } => ErrorKind::Internal,
        }
    }

    pub fn experience_not_found(id: impl Into<ExperienceId>) -> Self {
        Self::ExperienceNotFound { id: id.into() }
    }

    pub fn user_not_found(email: impl Into<Email>) -> Self {
        Self::UserNotFound {
            email: email.into(),
        }
    }

    pub fn duplicate_title(title: impl Into<String>) -> Self {
        Self::DuplicateTitle {
            title: title.into(),
        }
    }

    pub fn malformed_service_hours(raw: impl Into<String>) -> Self {
        Self::MalformedServiceHours { raw: raw.into() }
    }
}
