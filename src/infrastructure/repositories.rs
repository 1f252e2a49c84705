//! In-memory implementations of the domain repository traits
//!
//! These back the crate out of the box and double as the substitution
//! point for tests; a relational backend would implement the same traits.
//! State lives in `BTreeMap`s behind `parking_lot` locks so iteration
//! order follows id assignment, which is insertion order.

use crate::domain::entities::{
    Category, Experience, Property, ReservationDates, User, UserExperienceReview,
};
use crate::domain::repositories::{
    CategoryRepository, ExperienceRepository, PropertyRepository, RepositoryError,
    ReservationReader, ReviewRepository, UserRepository,
};
use crate::domain::value_objects::{CategoryId, Email, ExperienceId, PropertyId, ReviewId};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};

/// In-memory experience store.
pub struct InMemoryExperienceRepository {
    experiences: RwLock<BTreeMap<ExperienceId, Experience>>,
    next_id: AtomicI64,
}

impl InMemoryExperienceRepository {
    pub fn new() -> Self {
        Self {
            experiences: RwLock::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for InMemoryExperienceRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ExperienceRepository for InMemoryExperienceRepository {
    async fn find_all(&self) -> Result<Vec<Experience>, RepositoryError> {
        Ok(self.experiences.read().values().cloned().collect())
    }

    async fn find_by_id(&self, id: ExperienceId) -> Result<Option<Experience>, RepositoryError> {
        Ok(self.experiences.read().get(&id).cloned())
    }

    async fn exists_by_title(&self, title: &str) -> Result<bool, RepositoryError> {
        Ok(self
            .experiences
            .read()
            .values()
            .any(|exp| exp.title == title))
    }

    async fn find_all_by_ids(
        &self,
        ids: &[ExperienceId],
    ) -> Result<Vec<Experience>, RepositoryError> {
        let experiences = self.experiences.read();
        Ok(ids
            .iter()
            .filter_map(|id| experiences.get(id).cloned())
            .collect())
    }

    async fn find_by_category_ids(
        &self,
        ids: &[CategoryId],
        match_count: usize,
    ) -> Result<Vec<Experience>, RepositoryError> {
        let experiences = self.experiences.read();
        Ok(experiences
            .values()
            .filter(|exp| {
                exp.categories
                    .iter()
                    .filter(|category| ids.contains(&category.id))
                    .count()
                    == match_count
            })
            .cloned()
            .collect())
    }

    async fn save(&self, mut experience: Experience) -> Result<Experience, RepositoryError> {
        // Id 0 marks a record the backend has not assigned yet.
        if experience.id.value() == 0 {
            experience.id = ExperienceId::new(self.next_id.fetch_add(1, Ordering::Relaxed));
        }
        self.experiences
            .write()
            .insert(experience.id, experience.clone());
        Ok(experience)
    }

    async fn delete(&self, id: ExperienceId) -> Result<(), RepositoryError> {
        self.experiences.write().remove(&id);
        Ok(())
    }
}

/// In-memory category store with a seeding method for wiring and tests.
pub struct InMemoryCategoryRepository {
    categories: RwLock<BTreeMap<CategoryId, Category>>,
}

impl InMemoryCategoryRepository {
    pub fn new() -> Self {
        Self {
            categories: RwLock::new(BTreeMap::new()),
        }
    }

    pub fn insert(&self, category: Category) {
        self.categories.write().insert(category.id, category);
    }
}

impl Default for InMemoryCategoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CategoryRepository for InMemoryCategoryRepository {
    async fn find_by_id(&self, id: CategoryId) -> Result<Option<Category>, RepositoryError> {
        Ok(self.categories.read().get(&id).cloned())
    }
}

/// In-memory property store with a seeding method for wiring and tests.
pub struct InMemoryPropertyRepository {
    properties: RwLock<BTreeMap<PropertyId, Property>>,
}

impl InMemoryPropertyRepository {
    pub fn new() -> Self {
        Self {
            properties: RwLock::new(BTreeMap::new()),
        }
    }

    pub fn insert(&self, property: Property) {
        self.properties.write().insert(property.id, property);
    }
}

impl Default for InMemoryPropertyRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PropertyRepository for InMemoryPropertyRepository {
    async fn find_by_id(&self, id: PropertyId) -> Result<Option<Property>, RepositoryError> {
        Ok(self.properties.read().get(&id).cloned())
    }
}

/// In-memory review store.
pub struct InMemoryReviewRepository {
    reviews: RwLock<BTreeMap<ReviewId, UserExperienceReview>>,
    next_id: AtomicI64,
}

impl InMemoryReviewRepository {
    pub fn new() -> Self {
        Self {
            reviews: RwLock::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for InMemoryReviewRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReviewRepository for InMemoryReviewRepository {
    async fn exists_for(
        &self,
        email: &Email,
        experience_id: ExperienceId,
    ) -> Result<bool, RepositoryError> {
        Ok(self
            .reviews
            .read()
            .values()
            .any(|review| review.email == *email && review.experience_id == experience_id))
    }

    async fn find_for(
        &self,
        email: &Email,
        experience_id: ExperienceId,
    ) -> Result<Option<UserExperienceReview>, RepositoryError> {
        Ok(self
            .reviews
            .read()
            .values()
            .find(|review| review.email == *email && review.experience_id == experience_id)
            .cloned())
    }

    async fn find_all_by_experience(
        &self,
        experience_id: ExperienceId,
    ) -> Result<Vec<UserExperienceReview>, RepositoryError> {
        Ok(self
            .reviews
            .read()
            .values()
            .filter(|review| review.experience_id == experience_id)
            .cloned()
            .collect())
    }

    async fn insert(
        &self,
        mut review: UserExperienceReview,
    ) -> Result<UserExperienceReview, RepositoryError> {
        if review.id.value() == 0 {
            review.id = ReviewId::new(self.next_id.fetch_add(1, Ordering::Relaxed));
        }
        self.reviews.write().insert(review.id, review.clone());
        Ok(review)
    }
}

/// In-memory user store with a seeding method for wiring and tests.
pub struct InMemoryUserRepository {
    users: RwLock<BTreeMap<Email, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: RwLock::new(BTreeMap::new()),
        }
    }

    pub fn insert(&self, user: User) {
        self.users.write().insert(user.email.clone(), user);
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError> {
        Ok(self.users.read().get(email).cloned())
    }
}

/// In-memory stand-in for the reservation subsystem's read side.
pub struct InMemoryReservationBook {
    reservations: RwLock<BTreeMap<ExperienceId, Vec<ReservationDates>>>,
}

impl InMemoryReservationBook {
    pub fn new() -> Self {
        Self {
            reservations: RwLock::new(BTreeMap::new()),
        }
    }

    pub fn add(&self, experience_id: ExperienceId, dates: ReservationDates) {
        self.reservations
            .write()
            .entry(experience_id)
            .or_default()
            .push(dates);
    }
}

impl Default for InMemoryReservationBook {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReservationReader for InMemoryReservationBook {
    async fn reservations_for(
        &self,
        experience_id: ExperienceId,
    ) -> Result<Vec<ReservationDates>, RepositoryError> {
        Ok(self
            .reservations
            .read()
            .get(&experience_id)
            .cloned()
            .unwrap_or_default())
    }
}
