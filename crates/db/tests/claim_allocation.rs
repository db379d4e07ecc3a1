//! Integration tests for the claim allocator.
//!
//! Exercises the exactly-once checkout contract against a real database,
//! including the concurrent case the `FOR UPDATE SKIP LOCKED` query
//! exists for.

use std::collections::HashSet;

use sqlx::PgPool;

use reviewdrop_db::models::status::TextOptionStatus;
use reviewdrop_db::repositories::TextOptionRepo;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn seed_product(pool: &PgPool) -> i64 {
    let campaign: (i64,) = sqlx::query_as(
        "INSERT INTO campaigns (name, status) VALUES ('Spring', 'active') RETURNING id",
    )
    .fetch_one(pool)
    .await
    .unwrap();
    let product: (i64,) = sqlx::query_as(
        "INSERT INTO products (campaign_id, title, position) \
         VALUES ($1, 'Widget', 1) RETURNING id",
    )
    .bind(campaign.0)
    .fetch_one(pool)
    .await
    .unwrap();
    product.0
}

async fn seed_texts(pool: &PgPool, product_id: i64, n: usize) {
    let texts: Vec<String> = (0..n).map(|i| format!("Review text {i}")).collect();
    TextOptionRepo::bulk_add(pool, product_id, &texts)
        .await
        .unwrap();
}

// ---------------------------------------------------------------------------
// Sequential claim semantics
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_claim_assigns_one_option(pool: PgPool) {
    let product_id = seed_product(&pool).await;
    seed_texts(&pool, product_id, 2).await;

    let first = TextOptionRepo::claim(&pool, product_id, "a@x.com")
        .await
        .unwrap()
        .expect("first claim should win a text");
    let second = TextOptionRepo::claim(&pool, product_id, "b@x.com")
        .await
        .unwrap()
        .expect("second claim should win the other text");
    assert_ne!(first, second, "two claims must win distinct texts");

    // Pool is now empty: third claim returns None without mutating.
    let third = TextOptionRepo::claim(&pool, product_id, "c@x.com")
        .await
        .unwrap();
    assert_eq!(third, None);

    let claimed = TextOptionRepo::find_by_id(&pool, first)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(claimed.status, TextOptionStatus::Assigned);
    assert_eq!(claimed.assigned_to_email.as_deref(), Some("a@x.com"));
    assert!(claimed.assigned_at.is_some());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_claim_ignores_disabled_options(pool: PgPool) {
    let product_id = seed_product(&pool).await;
    seed_texts(&pool, product_id, 1).await;

    let option = &TextOptionRepo::list_by_product(&pool, product_id)
        .await
        .unwrap()[0];
    TextOptionRepo::set_status(&pool, option.id, TextOptionStatus::Disabled)
        .await
        .unwrap()
        .expect("toggle should succeed on an available option");

    let claimed = TextOptionRepo::claim(&pool, product_id, "a@x.com")
        .await
        .unwrap();
    assert_eq!(claimed, None, "disabled options are never handed out");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_claim_is_scoped_to_product(pool: PgPool) {
    let product_a = seed_product(&pool).await;
    let product_b = seed_product(&pool).await;
    seed_texts(&pool, product_a, 1).await;

    let claimed = TextOptionRepo::claim(&pool, product_b, "a@x.com")
        .await
        .unwrap();
    assert_eq!(claimed, None, "another product's pool must not leak");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_release_returns_option_to_pool(pool: PgPool) {
    let product_id = seed_product(&pool).await;
    seed_texts(&pool, product_id, 1).await;

    let id = TextOptionRepo::claim(&pool, product_id, "a@x.com")
        .await
        .unwrap()
        .unwrap();
    TextOptionRepo::release(&pool, id).await.unwrap();

    let released = TextOptionRepo::find_by_id(&pool, id).await.unwrap().unwrap();
    assert_eq!(released.status, TextOptionStatus::Available);
    assert_eq!(released.assigned_to_email, None);
    assert_eq!(released.assigned_at, None);

    // And it is claimable again.
    let reclaimed = TextOptionRepo::claim(&pool, product_id, "b@x.com")
        .await
        .unwrap();
    assert_eq!(reclaimed, Some(id));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_toggle_never_touches_assigned_options(pool: PgPool) {
    let product_id = seed_product(&pool).await;
    seed_texts(&pool, product_id, 1).await;

    let id = TextOptionRepo::claim(&pool, product_id, "a@x.com")
        .await
        .unwrap()
        .unwrap();

    let toggled = TextOptionRepo::set_status(&pool, id, TextOptionStatus::Disabled)
        .await
        .unwrap();
    assert!(toggled.is_none(), "assigned options are immutable to the toggle");

    let row = TextOptionRepo::find_by_id(&pool, id).await.unwrap().unwrap();
    assert_eq!(row.status, TextOptionStatus::Assigned);
}

// ---------------------------------------------------------------------------
// Concurrency: exactly-once checkout
// ---------------------------------------------------------------------------

/// N concurrent claims against K < N available texts: exactly K win, the
/// winners are distinct, and the rest observe exhaustion.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_concurrent_claims_are_exactly_once(pool: PgPool) {
    const AVAILABLE: usize = 5;
    const CLAIMANTS: usize = 12;

    let product_id = seed_product(&pool).await;
    seed_texts(&pool, product_id, AVAILABLE).await;

    let mut handles = Vec::with_capacity(CLAIMANTS);
    for i in 0..CLAIMANTS {
        let pool = pool.clone();
        handles.push(tokio::spawn(async move {
            TextOptionRepo::claim(&pool, product_id, &format!("user{i}@x.com")).await
        }));
    }

    let mut won = HashSet::new();
    let mut exhausted = 0;
    for handle in handles {
        match handle.await.unwrap().unwrap() {
            Some(id) => {
                assert!(won.insert(id), "text option {id} was handed out twice");
            }
            None => exhausted += 1,
        }
    }

    assert_eq!(won.len(), AVAILABLE);
    assert_eq!(exhausted, CLAIMANTS - AVAILABLE);

    // Invariant check at rest: assigned rows carry both claim fields,
    // available rows carry neither.
    let bad: (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM product_text_options \
         WHERE (status = 'assigned') <> \
               (assigned_to_email IS NOT NULL AND assigned_at IS NOT NULL)",
    )
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(bad.0, 0);
}

// ---------------------------------------------------------------------------
// Inventory maintenance
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_cleanup_duplicates_preserves_assigned(pool: PgPool) {
    let product_id = seed_product(&pool).await;
    let texts = vec![
        "Great product".to_string(),
        "Great product".to_string(),
        "Great product".to_string(),
        "Unique take".to_string(),
    ];
    TextOptionRepo::bulk_add(&pool, product_id, &texts)
        .await
        .unwrap();

    // Claim one of the duplicates so an assigned copy exists.
    let claimed = TextOptionRepo::claim(&pool, product_id, "a@x.com")
        .await
        .unwrap()
        .unwrap();

    let deleted = TextOptionRepo::cleanup_duplicates(&pool).await.unwrap();
    assert_eq!(deleted, 2, "both unassigned duplicate copies go");

    let remaining = TextOptionRepo::list_by_product(&pool, product_id)
        .await
        .unwrap();
    assert_eq!(remaining.len(), 2);
    assert!(remaining.iter().any(|o| o.id == claimed));
    assert!(remaining.iter().any(|o| o.text_md == "Unique take"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_available_counts_by_campaign(pool: PgPool) {
    let campaign: (i64,) = sqlx::query_as(
        "INSERT INTO campaigns (name, status) VALUES ('Spring', 'active') RETURNING id",
    )
    .fetch_one(&pool)
    .await
    .unwrap();

    let mut product_ids = Vec::new();
    for position in 1..=3 {
        let product: (i64,) = sqlx::query_as(
            "INSERT INTO products (campaign_id, title, position) \
             VALUES ($1, 'P', $2) RETURNING id",
        )
        .bind(campaign.0)
        .bind(position)
        .fetch_one(&pool)
        .await
        .unwrap();
        product_ids.push(product.0);
    }

    seed_texts(&pool, product_ids[0], 3).await;
    // product_ids[1] gets nothing
    seed_texts(&pool, product_ids[2], 1).await;
    TextOptionRepo::claim(&pool, product_ids[2], "a@x.com")
        .await
        .unwrap()
        .unwrap();

    let counts = TextOptionRepo::available_counts_by_campaign(&pool, campaign.0)
        .await
        .unwrap();
    assert_eq!(counts.len(), 3);
    assert_eq!(counts[0].available, 3);
    assert_eq!(counts[1].available, 0, "empty pool still appears with zero");
    assert_eq!(counts[2].available, 0, "claimed texts no longer count");
}
