//! Domain repository traits - Abstractions over the persistence layer
//!
//! These traits define the contracts the business logic needs from its
//! stores, without fixing an implementation (relational database, in-memory
//! map, etc.). Lookups that can miss return `Option` so that absence is a
//! value, not an error; [`RepositoryError`] is reserved for backend failure.

use crate::domain::entities::{
    Category, Experience, Property, ReservationDates, User, UserExperienceReview,
};
use crate::domain::errors::DomainError;
use crate::domain::value_objects::{CategoryId, Email, ExperienceId, PropertyId};
use async_trait::async_trait;

/// Errors surfaced by a storage backend.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("storage backend unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("IO error: {message}")]
    Io { message: String },

    #[error("serialization error: {message}")]
    Serialization { message: String },
}

impl From<RepositoryError> for DomainError {
    fn from(error: RepositoryError) -> Self {
        DomainError::Storage {
            message: error.to_string(),
        }
    }
}

/// Store for experiences: full CRUD plus the query shapes the manager needs.
#[async_trait]
pub trait ExperienceRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Experience>, RepositoryError>;

    async fn find_by_id(&self, id: ExperienceId) -> Result<Option<Experience>, RepositoryError>;

    async fn exists_by_title(&self, title: &str) -> Result<bool, RepositoryError>;

    /// Batch fetch by id list; ids without a record are silently omitted.
    async fn find_all_by_ids(
        &self,
        ids: &[ExperienceId],
    ) -> Result<Vec<Experience>, RepositoryError>;

    /// Experiences whose attached categories match exactly `match_count` of
    /// the given ids. Callers pass the requested id count to get
    /// intersection semantics (supersets still qualify).
    async fn find_by_category_ids(
        &self,
        ids: &[CategoryId],
        match_count: usize,
    ) -> Result<Vec<Experience>, RepositoryError>;

    /// Insert or overwrite; an unassigned id is allocated by the backend.
    /// Returns the stored record.
    async fn save(&self, experience: Experience) -> Result<Experience, RepositoryError>;

    async fn delete(&self, id: ExperienceId) -> Result<(), RepositoryError>;
}

/// Lookup store for categories.
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn find_by_id(&self, id: CategoryId) -> Result<Option<Category>, RepositoryError>;
}

/// Lookup store for properties.
#[async_trait]
pub trait PropertyRepository: Send + Sync {
    async fn find_by_id(&self, id: PropertyId) -> Result<Option<Property>, RepositoryError>;
}

/// Store for user reviews of experiences, keyed by (email, experience).
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    async fn exists_for(
        &self,
        email: &Email,
        experience_id: ExperienceId,
    ) -> Result<bool, RepositoryError>;

    async fn find_for(
        &self,
        email: &Email,
        experience_id: ExperienceId,
    ) -> Result<Option<UserExperienceReview>, RepositoryError>;

    async fn find_all_by_experience(
        &self,
        experience_id: ExperienceId,
    ) -> Result<Vec<UserExperienceReview>, RepositoryError>;

    /// Append a review; an unassigned id is allocated by the backend.
    /// Returns the stored record.
    async fn insert(
        &self,
        review: UserExperienceReview,
    ) -> Result<UserExperienceReview, RepositoryError>;
}

/// Lookup store for users.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError>;
}

/// Narrow read-only view into the reservation subsystem.
#[async_trait]
pub trait ReservationReader: Send + Sync {
    /// All reservation date ranges currently held against an experience.
    async fn reservations_for(
        &self,
        experience_id: ExperienceId,
    ) -> Result<Vec<ReservationDates>, RepositoryError>;
}
