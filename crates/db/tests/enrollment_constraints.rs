//! Integration tests for enrollment and assignment storage invariants.

use sqlx::PgPool;

use reviewdrop_db::is_unique_violation;
use reviewdrop_db::models::status::EnrollmentState;
use reviewdrop_db::repositories::{AssignmentRepo, EnrollmentRepo, TextOptionRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn seed_campaign(pool: &PgPool) -> i64 {
    let row: (i64,) = sqlx::query_as(
        "INSERT INTO campaigns (name, status) VALUES ('C', 'active') RETURNING id",
    )
    .fetch_one(pool)
    .await
    .unwrap();
    row.0
}

async fn seed_product(pool: &PgPool, campaign_id: i64, position: i32) -> i64 {
    let row: (i64,) = sqlx::query_as(
        "INSERT INTO products (campaign_id, title, position) \
         VALUES ($1, 'P', $2) RETURNING id",
    )
    .bind(campaign_id)
    .bind(position)
    .fetch_one(pool)
    .await
    .unwrap();
    row.0
}

// ---------------------------------------------------------------------------
// Enrollment uniqueness
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_enrollment_is_unique_violation(pool: PgPool) {
    let campaign_id = seed_campaign(&pool).await;

    EnrollmentRepo::create(&pool, "a@x.com", campaign_id)
        .await
        .unwrap();
    let err = EnrollmentRepo::create(&pool, "a@x.com", campaign_id)
        .await
        .unwrap_err();

    assert!(is_unique_violation(&err, "uq_enrollments_email_campaign"));
    assert!(!is_unique_violation(&err, "uq_assignments_enrollment_product"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_same_email_different_campaigns_is_fine(pool: PgPool) {
    let c1 = seed_campaign(&pool).await;
    let c2 = seed_campaign(&pool).await;

    EnrollmentRepo::create(&pool, "a@x.com", c1).await.unwrap();
    EnrollmentRepo::create(&pool, "a@x.com", c2).await.unwrap();
}

// ---------------------------------------------------------------------------
// State advancement
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_state_advances_monotonically(pool: PgPool) {
    let campaign_id = seed_campaign(&pool).await;
    let enrollment = EnrollmentRepo::create(&pool, "a@x.com", campaign_id)
        .await
        .unwrap();
    assert_eq!(enrollment.state, EnrollmentState::Assigned);

    let advanced =
        EnrollmentRepo::advance_state(&pool, enrollment.id, EnrollmentState::Submitted)
            .await
            .unwrap()
            .expect("forward advance succeeds");
    assert_eq!(advanced.state, EnrollmentState::Submitted);

    // Regression attempt is a silent no-op.
    let regressed =
        EnrollmentRepo::advance_state(&pool, enrollment.id, EnrollmentState::InProgress)
            .await
            .unwrap();
    assert!(regressed.is_none());

    let current = EnrollmentRepo::find_by_id(&pool, enrollment.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(current.state, EnrollmentState::Submitted);

    // Repeating the same state is also a no-op.
    let repeated =
        EnrollmentRepo::advance_state(&pool, enrollment.id, EnrollmentState::Submitted)
            .await
            .unwrap();
    assert!(repeated.is_none());
}

// ---------------------------------------------------------------------------
// Assignment uniqueness
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_assignment_create_loses_race_gracefully(pool: PgPool) {
    let campaign_id = seed_campaign(&pool).await;
    let product_id = seed_product(&pool, campaign_id, 1).await;
    TextOptionRepo::bulk_add(&pool, product_id, &["t1".into(), "t2".into()])
        .await
        .unwrap();

    let enrollment = EnrollmentRepo::create(&pool, "a@x.com", campaign_id)
        .await
        .unwrap();

    let t1 = TextOptionRepo::claim(&pool, product_id, "a@x.com")
        .await
        .unwrap()
        .unwrap();
    let first = AssignmentRepo::create(&pool, enrollment.id, product_id, t1, "t1")
        .await
        .unwrap();
    assert!(first.is_some());

    // A second insert for the same (enrollment, product) quietly loses.
    let t2 = TextOptionRepo::claim(&pool, product_id, "a@x.com")
        .await
        .unwrap()
        .unwrap();
    let second = AssignmentRepo::create(&pool, enrollment.id, product_id, t2, "t2")
        .await
        .unwrap();
    assert!(second.is_none());

    let existing =
        AssignmentRepo::find_by_enrollment_product(&pool, enrollment.id, product_id)
            .await
            .unwrap()
            .unwrap();
    assert_eq!(existing.text_option_id, t1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_assignments_listed_in_product_order(pool: PgPool) {
    let campaign_id = seed_campaign(&pool).await;
    // Insert positions out of order to prove the sort.
    let p_late = seed_product(&pool, campaign_id, 9).await;
    let p_early = seed_product(&pool, campaign_id, 1).await;
    for p in [p_late, p_early] {
        TextOptionRepo::bulk_add(&pool, p, &["t".into()]).await.unwrap();
    }

    let enrollment = EnrollmentRepo::create(&pool, "a@x.com", campaign_id)
        .await
        .unwrap();
    for p in [p_late, p_early] {
        let t = TextOptionRepo::claim(&pool, p, "a@x.com")
            .await
            .unwrap()
            .unwrap();
        AssignmentRepo::create(&pool, enrollment.id, p, t, "t")
            .await
            .unwrap();
    }

    let listed = AssignmentRepo::list_by_enrollment(&pool, enrollment.id)
        .await
        .unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].product_id, p_early);
    assert_eq!(listed[1].product_id, p_late);
}
