//! Experience management use cases
//!
//! [`ExperienceManager`] is the stateless service object behind the
//! experience endpoints: search and filtering, CRUD with referential
//! validation, and the review/reputation flow. Every operation is a single
//! validate-then-commit unit over the injected stores.

use crate::domain::entities::{Category, Experience, Property, UserExperienceReview};
use crate::domain::errors::DomainError;
use crate::domain::repositories::{
    CategoryRepository, ExperienceRepository, PropertyRepository, ReservationReader,
    ReviewRepository, UserRepository,
};
use crate::domain::services::{normalized_countries, AvailabilityService};
use crate::domain::value_objects::{
    CategoryId, Email, ExperienceId, PropertyId, Rating, ReviewId, ServiceHours,
};
use chrono::{NaiveDateTime, Utc, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::hash::Hash;
use std::sync::Arc;

const CATEGORIES_FIELD: &str = "categories";
const PROPERTIES_FIELD: &str = "properties";

/// Incoming payload for creating or fully replacing an experience.
///
/// Category and property ids must reference existing entities; they are
/// resolved at the point of use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceDraft {
    pub title: String,
    pub country: Option<String>,
    pub location: String,
    pub description: String,
    pub images: Vec<String>,
    pub quantity: u32,
    pub time_unit: String,
    pub category_ids: Vec<CategoryId>,
    pub property_ids: Vec<PropertyId>,
    pub service_hours: String,
    pub available_days: Vec<Weekday>,
}

/// Independent optional filters for [`ExperienceManager::search`]. Each
/// present filter narrows the result; the date-range filter only applies
/// when both endpoints are given.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchQuery {
    pub keywords: Option<String>,
    pub country: Option<String>,
    pub start_date: Option<NaiveDateTime>,
    pub end_date: Option<NaiveDateTime>,
}

/// Stateless service object over the five stores and the reservation
/// reader. All collaborators are constructor-injected trait objects so
/// tests can substitute in-memory fakes.
pub struct ExperienceManager {
    experiences: Arc<dyn ExperienceRepository>,
    categories: Arc<dyn CategoryRepository>,
    properties: Arc<dyn PropertyRepository>,
    reviews: Arc<dyn ReviewRepository>,
    users: Arc<dyn UserRepository>,
    reservations: Arc<dyn ReservationReader>,
    availability: AvailabilityService,
}

impl ExperienceManager {
    pub fn new(
        experiences: Arc<dyn ExperienceRepository>,
        categories: Arc<dyn CategoryRepository>,
        properties: Arc<dyn PropertyRepository>,
        reviews: Arc<dyn ReviewRepository>,
        users: Arc<dyn UserRepository>,
        reservations: Arc<dyn ReservationReader>,
    ) -> Self {
        Self {
            experiences,
            categories,
            properties,
            reviews,
            users,
            reservations,
            availability: AvailabilityService::new(),
        }
    }

    pub async fn get_all(&self) -> Result<Vec<Experience>, DomainError> {
        Ok(self.experiences.find_all().await?)
    }

    pub async fn get_by_id(&self, id: ExperienceId) -> Result<Experience, DomainError> {
        self.experiences
            .find_by_id(id)
            .await?
            .ok_or(DomainError::ExperienceNotFound { id })
    }

    /// Experiences tagged with *all* of the given categories. Every id is
    /// checked first; the failure aggregates all invalid ids rather than
    /// stopping at the first.
    pub async fn get_by_categories(
        &self,
        category_ids: &[CategoryId],
    ) -> Result<Vec<Experience>, DomainError> {
        let mut valid = Vec::new();
        let mut missing = Vec::new();

        for &id in category_ids {
            match self.categories.find_by_id(id).await? {
                Some(_) => valid.push(id),
                None => missing.push(id),
            }
        }

        if !missing.is_empty() {
            return Err(DomainError::CategoriesNotFound { ids: missing });
        }

        let match_count = valid.len();
        Ok(self
            .experiences
            .find_by_category_ids(&valid, match_count)
            .await?)
    }

    /// Distinct countries across all experiences, normalized for display.
    pub async fn get_countries(&self) -> Result<Vec<String>, DomainError> {
        let experiences = self.experiences.find_all().await?;
        Ok(normalized_countries(&experiences))
    }

    /// Bulk fetch for a favorites list; unknown ids are silently dropped.
    pub async fn get_favorites(
        &self,
        ids: &[ExperienceId],
    ) -> Result<Vec<Experience>, DomainError> {
        Ok(self.experiences.find_all_by_ids(ids).await?)
    }

    /// Narrow the full experience list through the query's active filters
    /// in sequence: keywords, country, then date-range availability.
    pub async fn search(&self, query: &SearchQuery) -> Result<Vec<Experience>, DomainError> {
        let mut experiences = self.experiences.find_all().await?;

        if let Some(keywords) = query.keywords.as_deref().filter(|k| !k.is_empty()) {
            let tokens: Vec<String> = keywords
                .to_lowercase()
                .split_whitespace()
                .map(str::to_string)
                .collect();
            experiences.retain(|exp| exp.matches_keywords(&tokens));
        }

        if let Some(country) = query.country.as_deref().filter(|c| !c.is_empty()) {
            experiences.retain(|exp| exp.matches_country(country));
        }

        if let (Some(start), Some(end)) = (query.start_date, query.end_date) {
            let mut open = Vec::with_capacity(experiences.len());
            for exp in experiences {
                let reservations = self.reservations.reservations_for(exp.id).await?;
                if self
                    .availability
                    .is_free_of_reservations(&reservations, start, end)
                    && self.availability.spans_available_weekday(&exp, start, end)
                {
                    open.push(exp);
                }
            }
            experiences = open;
        }

        Ok(experiences)
    }

    pub async fn create(&self, draft: ExperienceDraft) -> Result<Experience, DomainError> {
        if self.experiences.exists_by_title(&draft.title).await? {
            return Err(DomainError::duplicate_title(draft.title));
        }

        validate_no_duplicates(&draft.category_ids, CATEGORIES_FIELD)?;
        validate_no_duplicates(&draft.property_ids, PROPERTIES_FIELD)?;
        ServiceHours::parse(&draft.service_hours)?;

        let categories = self.resolve_categories(&draft.category_ids).await?;
        let properties = self.resolve_properties(&draft.property_ids).await?;

        let experience = Experience {
            id: ExperienceId::new(0),
            title: draft.title,
            country: draft.country,
            location: draft.location,
            description: draft.description,
            images: draft.images,
            quantity: draft.quantity,
            time_unit: draft.time_unit,
            categories,
            properties,
            service_hours: draft.service_hours,
            available_days: draft.available_days.into_iter().collect(),
            reputation: 0.0,
            rating_count: 0,
        };

        let stored = self.experiences.save(experience).await?;
        log::debug!("created experience {} ('{}')", stored.id, stored.title);
        Ok(stored)
    }

    /// Full replace of all mutable fields. Reputation and rating count are
    /// never touched here. Unlike `create`, the service-hours string is
    /// stored without re-parsing; see DESIGN.md for why the asymmetry is
    /// kept.
    pub async fn update(
        &self,
        id: ExperienceId,
        draft: ExperienceDraft,
    ) -> Result<Experience, DomainError> {
        let mut existing = self.get_by_id(id).await?;

        if existing.title != draft.title && self.experiences.exists_by_title(&draft.title).await? {
            return Err(DomainError::duplicate_title(draft.title));
        }

        validate_no_duplicates(&draft.category_ids, CATEGORIES_FIELD)?;
        validate_no_duplicates(&draft.property_ids, PROPERTIES_FIELD)?;

        let categories = self.resolve_categories(&draft.category_ids).await?;
        let properties = self.resolve_properties(&draft.property_ids).await?;

        existing.title = draft.title;
        existing.country = draft.country;
        existing.location = draft.location;
        existing.description = draft.description;
        existing.images = draft.images;
        existing.quantity = draft.quantity;
        existing.time_unit = draft.time_unit;
        existing.categories = categories;
        existing.properties = properties;
        existing.service_hours = draft.service_hours;
        existing.available_days = draft.available_days.into_iter().collect();

        let stored = self.experiences.save(existing).await?;
        log::debug!("updated experience {}", stored.id);
        Ok(stored)
    }

    /// Hard delete; reviews and reservations are not cascaded here.
    pub async fn delete(&self, id: ExperienceId) -> Result<(), DomainError> {
        self.get_by_id(id).await?;
        self.experiences.delete(id).await?;
        log::debug!("deleted experience {id}");
        Ok(())
    }

    /// Record a review and fold its rating into the experience's running
    /// reputation mean.
    ///
    /// The experience save and the review insert are two separate store
    /// writes; a crash between them leaves the counters ahead of the stored
    /// reviews. A backend that cares about crash consistency must span both
    /// in one transaction.
    pub async fn review_experience(
        &self,
        experience_id: ExperienceId,
        email: Email,
        rating: f64,
        message: String,
    ) -> Result<UserExperienceReview, DomainError> {
        let rating = Rating::new(rating)?;

        let mut experience = self.get_by_id(experience_id).await?;

        let user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or_else(|| DomainError::user_not_found(email.clone()))?;

        if self.reviews.exists_for(&email, experience_id).await? {
            return Err(DomainError::AlreadyReviewed {
                email,
                experience_id,
            });
        }

        experience.record_rating(rating.value());
        self.experiences.save(experience).await?;

        let review = UserExperienceReview {
            id: ReviewId::new(0),
            name: user.name,
            lastname: user.lastname,
            email,
            experience_id,
            rating: rating.rounded(),
            message,
            created_at: Utc::now().naive_utc(),
        };

        let stored = self.reviews.insert(review).await?;
        log::debug!(
            "recorded review {} for experience {experience_id}",
            stored.id
        );
        Ok(stored)
    }

    /// The rating this user already gave the experience, or 0.0 if none.
    pub async fn already_rated(
        &self,
        experience_id: ExperienceId,
        email: &Email,
    ) -> Result<f64, DomainError> {
        self.users
            .find_by_email(email)
            .await?
            .ok_or_else(|| DomainError::user_not_found(email.clone()))?;

        self.get_by_id(experience_id).await?;

        if !self.reviews.exists_for(email, experience_id).await? {
            return Ok(0.0);
        }

        // Existence was just confirmed; the second lookup failing means the
        // store mutated underneath us, reported as the review being gone.
        let review = self
            .reviews
            .find_for(email, experience_id)
            .await?
            .ok_or_else(|| DomainError::ReviewNotFound {
                email: email.clone(),
                experience_id,
            })?;

        Ok(review.rating)
    }

    pub async fn get_all_reviews(
        &self,
        experience_id: ExperienceId,
    ) -> Result<Vec<UserExperienceReview>, DomainError> {
        self.get_by_id(experience_id).await?;
        Ok(self.reviews.find_all_by_experience(experience_id).await?)
    }

    async fn resolve_categories(
        &self,
        ids: &[CategoryId],
    ) -> Result<Vec<Category>, DomainError> {
        let mut categories = Vec::with_capacity(ids.len());
        for &id in ids {
            let category = self
                .categories
                .find_by_id(id)
                .await?
                .ok_or(DomainError::CategoryNotFound { id })?;
            categories.push(category);
        }
        Ok(categories)
    }

    async fn resolve_properties(
        &self,
        ids: &[PropertyId],
    ) -> Result<Vec<Property>, DomainError> {
        let mut properties = Vec::with_capacity(ids.len());
        for &id in ids {
            let property = self
                .properties
                .find_by_id(id)
                .await?
                .ok_or(DomainError::PropertyNotFound { id })?;
            properties.push(property);
        }
        Ok(properties)
    }
}

fn validate_no_duplicates<T: Eq + Hash + Copy>(
    ids: &[T],
    field: &'static str,
) -> Result<(), DomainError> {
    let unique: HashSet<T> = ids.iter().copied().collect();
    if unique.len() < ids.len() {
        return Err(DomainError::DuplicateIds { field });
    }
    Ok(())
}
