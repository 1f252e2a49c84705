//! # capitravel
//!
//! Business-logic core of a travel-booking platform: management of
//! bookable "experiences", their categorization, availability windows, and
//! user reviews. Transport (HTTP/JSON), persistence schema, and
//! authentication live in outer layers; this crate exposes the
//! [`ExperienceManager`] service object over injected store abstractions.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use capitravel::application::experiences::{ExperienceDraft, ExperienceManager};
//! use capitravel::infrastructure::repositories::{
//!     InMemoryCategoryRepository, InMemoryExperienceRepository, InMemoryPropertyRepository,
//!     InMemoryReservationBook, InMemoryReviewRepository, InMemoryUserRepository,
//! };
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), capitravel::DomainError> {
//! let manager = ExperienceManager::new(
//!     Arc::new(InMemoryExperienceRepository::new()),
//!     Arc::new(InMemoryCategoryRepository::new()),
//!     Arc::new(InMemoryPropertyRepository::new()),
//!     Arc::new(InMemoryReviewRepository::new()),
//!     Arc::new(InMemoryUserRepository::new()),
//!     Arc::new(InMemoryReservationBook::new()),
//! );
//!
//! let stored = manager
//!     .create(ExperienceDraft {
//!         title: "Glacier Hike".to_string(),
//!         country: Some("Iceland".to_string()),
//!         location: "Skaftafell".to_string(),
//!         description: "Half-day guided hike".to_string(),
//!         images: vec![],
//!         quantity: 8,
//!         time_unit: "hours".to_string(),
//!         category_ids: vec![],
//!         property_ids: vec![],
//!         service_hours: "08:00-16:00".to_string(),
//!         available_days: vec![chrono::Weekday::Mon, chrono::Weekday::Sat],
//!     })
//!     .await?;
//!
//! assert_eq!(manager.get_by_id(stored.id).await?.title, "Glacier Hike");
//! # Ok(())
//! # }
//! ```

pub mod application;
pub mod domain;
pub mod infrastructure;

// Stable public surface - the main API for library users
pub use application::experiences::{ExperienceDraft, ExperienceManager, SearchQuery};
pub use domain::entities::{
    Category, Experience, Property, ReservationDates, User, UserExperienceReview,
};
pub use domain::errors::{DomainError, ErrorKind};
pub use domain::value_objects::{
    CategoryId, Email, ExperienceId, PropertyId, Rating, ReviewId, ServiceHours, UserId,
};
