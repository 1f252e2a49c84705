//! Domain entities - Core business objects with identity and lifecycle

use crate::domain::value_objects::*;
use chrono::{NaiveDateTime, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Reference entity used to tag experiences; must exist before it can be
/// attached to one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

/// Reference entity describing an amenity or feature of an experience.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    pub id: PropertyId,
    pub name: String,
}

/// A registered user; the email is the lookup key for reviews.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub lastname: String,
    pub email: Email,
}

/// Check-in/check-out range of an existing reservation, as reported by the
/// reservation subsystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationDates {
    pub check_in: NaiveDateTime,
    pub check_out: NaiveDateTime,
}

/// A bookable travel activity.
///
/// `reputation` is the running mean of all review ratings, rounded to one
/// decimal; `rating_count` is the number of reviews folded into it. Both
/// start at zero and are only ever advanced through [`Experience::record_rating`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    pub id: ExperienceId,
    pub title: String,
    pub country: Option<String>,
    pub location: String,
    pub description: String,
    pub images: Vec<String>,
    pub quantity: u32,
    pub time_unit: String,
    pub categories: Vec<Category>,
    pub properties: Vec<Property>,
    pub service_hours: String,
    pub available_days: HashSet<Weekday>,
    pub reputation: f64,
    pub rating_count: u32,
}

impl Experience {
    /// Fold a new rating into the running reputation mean.
    ///
    /// The mean is recomputed incrementally from the already-rounded stored
    /// reputation, so the result is order-dependent by design: it must match
    /// what sequential reviews produced, not a batch mean over raw ratings.
    pub fn record_rating(&mut self, rating: f64) {
        let total = self.reputation * f64::from(self.rating_count) + rating;
        self.reputation = round_to_tenth(total / f64::from(self.rating_count + 1));
        self.rating_count += 1;
    }

    /// Keyword match over the title and property names.
    ///
    /// Tokens are expected pre-lowercased; any token matching either surface
    /// as a substring qualifies the experience.
    pub fn matches_keywords(&self, tokens: &[String]) -> bool {
        let title = self.title.to_lowercase();
        if tokens.iter().any(|token| title.contains(token.as_str())) {
            return true;
        }

        self.properties.iter().any(|property| {
            let name = property.name.to_lowercase();
            tokens.iter().any(|token| name.contains(token.as_str()))
        })
    }

    /// Case-insensitive substring match against the country; an experience
    /// without a country never matches.
    pub fn matches_country(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.country
            .as_deref()
            .is_some_and(|country| country.to_lowercase().contains(&query))
    }
}

/// A user's review of an experience.
///
/// At most one review exists per (email, experience) pair; the rating is
/// stored already rounded to one decimal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserExperienceReview {
    pub id: ReviewId,
    pub name: String,
    pub lastname: String,
    pub email: Email,
    pub experience_id: ExperienceId,
    pub rating: f64,
    pub message: String,
    pub created_at: NaiveDateTime,
}
