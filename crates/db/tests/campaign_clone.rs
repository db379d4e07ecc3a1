//! Integration tests for campaign cloning.

use sqlx::PgPool;

use reviewdrop_db::models::status::{CampaignStatus, TextOptionStatus};
use reviewdrop_db::repositories::{CampaignRepo, ProductRepo, TextOptionRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Seed a campaign with two products; the first holds one assigned and
/// one available text, the second one disabled text.
async fn seed_source(pool: &PgPool) -> (i64, i64, i64) {
    let campaign: (i64,) = sqlx::query_as(
        "INSERT INTO campaigns \
            (name, status, required_products_count, welcome_text_md, support_email) \
         VALUES ('Source', 'active', 2, 'Welcome!', 'help@x.com') \
         RETURNING id",
    )
    .fetch_one(pool)
    .await
    .unwrap();

    let p1: (i64,) = sqlx::query_as(
        "INSERT INTO products (campaign_id, title, position, review_link_url) \
         VALUES ($1, 'First', 1, 'https://shop.example/1') RETURNING id",
    )
    .bind(campaign.0)
    .fetch_one(pool)
    .await
    .unwrap();
    let p2: (i64,) = sqlx::query_as(
        "INSERT INTO products (campaign_id, title, position, status) \
         VALUES ($1, 'Second', 2, 'hidden') RETURNING id",
    )
    .bind(campaign.0)
    .fetch_one(pool)
    .await
    .unwrap();

    let texts = vec!["Love it".to_string(), "Would buy again".to_string()];
    TextOptionRepo::bulk_add(pool, p1.0, &texts).await.unwrap();
    TextOptionRepo::claim(pool, p1.0, "claimed@x.com")
        .await
        .unwrap()
        .unwrap();

    TextOptionRepo::bulk_add(pool, p2.0, &["Parked".to_string()])
        .await
        .unwrap();
    let parked = &TextOptionRepo::list_by_product(pool, p2.0).await.unwrap()[0];
    TextOptionRepo::set_status(pool, parked.id, TextOptionStatus::Disabled)
        .await
        .unwrap()
        .unwrap();

    (campaign.0, p1.0, p2.0)
}

// ---------------------------------------------------------------------------
// Cloning
// ---------------------------------------------------------------------------

/// Cloning with text options resets every copy to available with cleared
/// claim fields, whatever the source rows looked like.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_clone_resets_text_pool(pool: PgPool) {
    let (campaign_id, _, _) = seed_source(&pool).await;

    let new_id = CampaignRepo::clone_campaign(&pool, campaign_id, true, true)
        .await
        .unwrap()
        .expect("source campaign exists");

    let products = ProductRepo::list_by_campaign(&pool, new_id).await.unwrap();
    assert_eq!(products.len(), 2);
    assert_eq!(products[0].title, "First");
    assert_eq!(products[0].position, 1);
    assert_eq!(products[1].title, "Second");

    for product in &products {
        let options = TextOptionRepo::list_by_product(&pool, product.id)
            .await
            .unwrap();
        for option in &options {
            assert_eq!(option.status, TextOptionStatus::Available);
            assert_eq!(option.assigned_to_email, None);
            assert_eq!(option.assigned_at, None);
        }
    }

    // Counts carried over: 2 texts on the first product, 1 on the second.
    let first = TextOptionRepo::list_by_product(&pool, products[0].id)
        .await
        .unwrap();
    assert_eq!(first.len(), 2);
    let second = TextOptionRepo::list_by_product(&pool, products[1].id)
        .await
        .unwrap();
    assert_eq!(second.len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_clone_is_additive(pool: PgPool) {
    let (campaign_id, p1, _) = seed_source(&pool).await;

    CampaignRepo::clone_campaign(&pool, campaign_id, true, true)
        .await
        .unwrap()
        .unwrap();

    // Source claim state is untouched.
    let source_options = TextOptionRepo::list_by_product(&pool, p1).await.unwrap();
    assert!(source_options
        .iter()
        .any(|o| o.status == TextOptionStatus::Assigned
            && o.assigned_to_email.as_deref() == Some("claimed@x.com")));

    let source = CampaignRepo::find_by_id(&pool, campaign_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(source.status, CampaignStatus::Active);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_clone_without_products(pool: PgPool) {
    let (campaign_id, _, _) = seed_source(&pool).await;

    let new_id = CampaignRepo::clone_campaign(&pool, campaign_id, false, false)
        .await
        .unwrap()
        .unwrap();

    let clone = CampaignRepo::find_by_id(&pool, new_id).await.unwrap().unwrap();
    assert_eq!(clone.name, "Source");
    assert_eq!(clone.status, CampaignStatus::Paused, "clones start paused");
    assert_eq!(clone.required_products_count, 2);
    assert_eq!(clone.welcome_text_md, "Welcome!");

    let products = ProductRepo::list_by_campaign(&pool, new_id).await.unwrap();
    assert!(products.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_clone_products_without_texts(pool: PgPool) {
    let (campaign_id, _, _) = seed_source(&pool).await;

    let new_id = CampaignRepo::clone_campaign(&pool, campaign_id, true, false)
        .await
        .unwrap()
        .unwrap();

    let products = ProductRepo::list_by_campaign(&pool, new_id).await.unwrap();
    assert_eq!(products.len(), 2);
    for product in &products {
        let options = TextOptionRepo::list_by_product(&pool, product.id)
            .await
            .unwrap();
        assert!(options.is_empty(), "text pools start empty without clone_text_options");
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_clone_missing_campaign_returns_none(pool: PgPool) {
    let result = CampaignRepo::clone_campaign(&pool, 424242, true, true)
        .await
        .unwrap();
    assert_eq!(result, None);
}
