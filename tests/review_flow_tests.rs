//! Review creation, the reputation running mean, and review lookups.

mod common;

use capitravel::domain::errors::{DomainError, ErrorKind};
use capitravel::domain::value_objects::{Email, ExperienceId};
use common::{context, draft, user};

#[tokio::test]
async fn review_then_already_rated_round_trips_every_valid_step() {
    let ctx = context();
    let stored = ctx.manager.create(draft("Glacier Hike")).await.unwrap();

    let mut step = 0;
    let mut rating = 1.0;
    while rating <= 5.0 {
        let email = format!("reviewer{step}@example.com");
        ctx.users.insert(user(step + 1, &email));

        let review = ctx
            .manager
            .review_experience(stored.id, Email::from(email.as_str()), rating, "ok".to_string())
            .await
            .unwrap();
        assert_eq!(review.rating, rating);

        let rated = ctx
            .manager
            .already_rated(stored.id, &Email::from(email.as_str()))
            .await
            .unwrap();
        assert_eq!(rated, rating);

        step += 1;
        rating += 0.5;
    }
}

#[tokio::test]
async fn ratings_off_the_half_step_grid_are_rejected() {
    let ctx = context();
    let stored = ctx.manager.create(draft("Glacier Hike")).await.unwrap();
    ctx.users.insert(user(1, "ada@example.com"));

    for raw in [0.5, 5.5, 3.3, 0.0, -2.0] {
        let err = ctx
            .manager
            .review_experience(
                stored.id,
                Email::from("ada@example.com"),
                raw,
                "nope".to_string(),
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation, "{raw} should be invalid");
    }
}

#[tokio::test]
async fn reputation_is_the_incrementally_rounded_running_mean() {
    let ctx = context();
    let stored = ctx.manager.create(draft("Glacier Hike")).await.unwrap();

    for (index, (rating, expected)) in [(5.0, 5.0), (1.0, 3.0)].into_iter().enumerate() {
        let email = format!("r{index}@example.com");
        ctx.users.insert(user(index as i64 + 1, &email));
        ctx.manager
            .review_experience(stored.id, Email::from(email.as_str()), rating, String::new())
            .await
            .unwrap();

        let current = ctx.manager.get_by_id(stored.id).await.unwrap();
        assert_eq!(current.reputation, expected);
        assert_eq!(current.rating_count, index as u32 + 1);
    }
}

#[tokio::test]
async fn reputation_rounding_happens_at_each_step() {
    let ctx = context();
    let stored = ctx.manager.create(draft("Glacier Hike")).await.unwrap();

    // 4.5 -> (4.5+4.0)/2 = 4.25 -> 4.3 (half up) -> (4.3*2+3.5)/3 -> 4.0
    for (index, (rating, expected)) in [(4.5, 4.5), (4.0, 4.3), (3.5, 4.0)]
        .into_iter()
        .enumerate()
    {
        let email = format!("r{index}@example.com");
        ctx.users.insert(user(index as i64 + 1, &email));
        ctx.manager
            .review_experience(stored.id, Email::from(email.as_str()), rating, String::new())
            .await
            .unwrap();

        let current = ctx.manager.get_by_id(stored.id).await.unwrap();
        assert_eq!(current.reputation, expected);
    }
}

#[tokio::test]
async fn a_user_cannot_review_the_same_experience_twice() {
    let ctx = context();
    let stored = ctx.manager.create(draft("Glacier Hike")).await.unwrap();
    ctx.users.insert(user(1, "ada@example.com"));

    ctx.manager
        .review_experience(
            stored.id,
            Email::from("ada@example.com"),
            4.0,
            "great".to_string(),
        )
        .await
        .unwrap();

    let err = ctx
        .manager
        .review_experience(
            stored.id,
            Email::from("ada@example.com"),
            5.0,
            "even better".to_string(),
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);
    assert!(matches!(err, DomainError::AlreadyReviewed { .. }));

    // The rejected second review left the aggregate untouched.
    let current = ctx.manager.get_by_id(stored.id).await.unwrap();
    assert_eq!(current.reputation, 4.0);
    assert_eq!(current.rating_count, 1);
}

#[tokio::test]
async fn reviews_require_existing_user_and_experience() {
    let ctx = context();
    let stored = ctx.manager.create(draft("Glacier Hike")).await.unwrap();
    ctx.users.insert(user(1, "ada@example.com"));

    let err = ctx
        .manager
        .review_experience(
            stored.id,
            Email::from("ghost@example.com"),
            4.0,
            String::new(),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::UserNotFound { .. }));

    let err = ctx
        .manager
        .review_experience(
            ExperienceId::new(404),
            Email::from("ada@example.com"),
            4.0,
            String::new(),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::ExperienceNotFound { .. }));
}

#[tokio::test]
async fn already_rated_returns_zero_when_unreviewed() {
    let ctx = context();
    let stored = ctx.manager.create(draft("Glacier Hike")).await.unwrap();
    ctx.users.insert(user(1, "ada@example.com"));

    let rated = ctx
        .manager
        .already_rated(stored.id, &Email::from("ada@example.com"))
        .await
        .unwrap();
    assert_eq!(rated, 0.0);
}

#[tokio::test]
async fn already_rated_checks_user_and_experience_first() {
    let ctx = context();
    let stored = ctx.manager.create(draft("Glacier Hike")).await.unwrap();
    ctx.users.insert(user(1, "ada@example.com"));

    let err = ctx
        .manager
        .already_rated(stored.id, &Email::from("ghost@example.com"))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::UserNotFound { .. }));

    let err = ctx
        .manager
        .already_rated(ExperienceId::new(404), &Email::from("ada@example.com"))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::ExperienceNotFound { .. }));
}

#[tokio::test]
async fn all_reviews_for_an_experience_are_listed() {
    let ctx = context();
    let hike = ctx.manager.create(draft("Glacier Hike")).await.unwrap();
    let caving = ctx.manager.create(draft("Lava Caving")).await.unwrap();

    ctx.users.insert(user(1, "ada@example.com"));
    ctx.users.insert(user(2, "grace@example.com"));

    ctx.manager
        .review_experience(hike.id, Email::from("ada@example.com"), 4.0, "good".to_string())
        .await
        .unwrap();
    ctx.manager
        .review_experience(hike.id, Email::from("grace@example.com"), 5.0, "great".to_string())
        .await
        .unwrap();
    ctx.manager
        .review_experience(caving.id, Email::from("ada@example.com"), 3.0, "damp".to_string())
        .await
        .unwrap();

    let reviews = ctx.manager.get_all_reviews(hike.id).await.unwrap();
    assert_eq!(reviews.len(), 2);
    assert!(reviews.iter().all(|review| review.experience_id == hike.id));
    // Reviewer identity is copied from the user record at review time.
    assert_eq!(reviews[0].name, "Ada");

    let err = ctx
        .manager
        .get_all_reviews(ExperienceId::new(404))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::ExperienceNotFound { .. }));
}
