//! Domain services - Availability computation and country normalization

use crate::domain::entities::{Experience, ReservationDates};
use chrono::{Datelike, Duration, NaiveDateTime, Weekday};
use std::collections::HashSet;

/// Domain service answering whether an experience can host a requested
/// date range.
///
/// Availability is two independent predicates: the range must not touch any
/// existing reservation, and it must span at least one weekday on which the
/// experience is offered.
pub struct AvailabilityService;

impl AvailabilityService {
    pub fn new() -> Self {
        Self
    }

    /// True when no reservation overlaps the inclusive requested range.
    /// Touching endpoints count as overlapping.
    pub fn is_free_of_reservations(
        &self,
        reservations: &[ReservationDates],
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> bool {
        reservations
            .iter()
            .all(|reservation| end < reservation.check_in || start > reservation.check_out)
    }

    /// True when the experience's available weekdays intersect the weekdays
    /// spanned by the inclusive requested range.
    pub fn spans_available_weekday(
        &self,
        experience: &Experience,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> bool {
        let days = weekdays_in_range(start, end);
        experience.available_days.iter().any(|day| days.contains(day))
    }
}

impl Default for AvailabilityService {
    fn default() -> Self {
        Self::new()
    }
}

/// The weekdays touched when stepping from `start` to `end` inclusive in
/// 24-hour increments. Stepping keeps the start's time-of-day, so an end
/// with an earlier time-of-day does not contribute its calendar day.
fn weekdays_in_range(start: NaiveDateTime, end: NaiveDateTime) -> HashSet<Weekday> {
    let mut days = HashSet::new();
    let mut current = start;

    while current <= end {
        days.insert(current.weekday());
        current = current + Duration::days(1);
    }

    days
}

/// Distinct experience countries: trimmed, deduplicated case-insensitively
/// in first-seen order, then re-capitalized per word. Experiences without a
/// country are skipped.
pub fn normalized_countries(experiences: &[Experience]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut countries = Vec::new();

    for country in experiences.iter().filter_map(|exp| exp.country.as_deref()) {
        let normalized = country.trim().to_lowercase();
        if seen.insert(normalized.clone()) {
            countries.push(capitalize_each_word(&normalized));
        }
    }

    countries
}

/// Uppercase the first letter of each space-separated word, leaving the
/// rest of the word unchanged.
pub fn capitalize_each_word(value: &str) -> String {
    value
        .split(' ')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
