//! Shared wiring for the integration suites: an `ExperienceManager` over
//! fresh in-memory stores, plus fixture builders.
#![allow(dead_code)]

use capitravel::application::experiences::{ExperienceDraft, ExperienceManager};
use capitravel::domain::entities::{Category, Property, User};
use capitravel::domain::value_objects::{CategoryId, Email, PropertyId, UserId};
use capitravel::infrastructure::repositories::{
    InMemoryCategoryRepository, InMemoryExperienceRepository, InMemoryPropertyRepository,
    InMemoryReservationBook, InMemoryReviewRepository, InMemoryUserRepository,
};
use chrono::{NaiveDate, NaiveDateTime, Weekday};
use std::sync::Arc;

pub struct TestContext {
    pub manager: ExperienceManager,
    pub categories: Arc<InMemoryCategoryRepository>,
    pub properties: Arc<InMemoryPropertyRepository>,
    pub users: Arc<InMemoryUserRepository>,
    pub reservations: Arc<InMemoryReservationBook>,
}

pub fn context() -> TestContext {
    let categories = Arc::new(InMemoryCategoryRepository::new());
    let properties = Arc::new(InMemoryPropertyRepository::new());
    let users = Arc::new(InMemoryUserRepository::new());
    let reservations = Arc::new(InMemoryReservationBook::new());

    let manager = ExperienceManager::new(
        Arc::new(InMemoryExperienceRepository::new()),
        categories.clone(),
        properties.clone(),
        Arc::new(InMemoryReviewRepository::new()),
        users.clone(),
        reservations.clone(),
    );

    TestContext {
        manager,
        categories,
        properties,
        users,
        reservations,
    }
}

/// A valid draft with no category/property references.
pub fn draft(title: &str) -> ExperienceDraft {
    ExperienceDraft {
        title: title.to_string(),
        country: Some("Iceland".to_string()),
        location: "Skaftafell".to_string(),
        description: "Half-day guided activity".to_string(),
        images: vec!["cover.jpg".to_string()],
        quantity: 8,
        time_unit: "hours".to_string(),
        category_ids: vec![],
        property_ids: vec![],
        service_hours: "09:00-17:00".to_string(),
        available_days: vec![Weekday::Mon, Weekday::Sat],
    }
}

pub fn category(id: i64, name: &str) -> Category {
    Category {
        id: CategoryId::new(id),
        name: name.to_string(),
    }
}

pub fn property(id: i64, name: &str) -> Property {
    Property {
        id: PropertyId::new(id),
        name: name.to_string(),
    }
}

pub fn user(id: i64, email: &str) -> User {
    User {
        id: UserId::new(id),
        name: "Ada".to_string(),
        lastname: "Lovelace".to_string(),
        email: Email::from(email),
    }
}

pub fn at(year: i32, month: u32, day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}
