//! Repository for the `campaigns` table, including campaign cloning.

use reviewdrop_core::types::DbId;
use sqlx::PgPool;

use crate::models::campaign::{Campaign, CreateCampaign, UpdateCampaign};
use crate::models::status::{CampaignStatus, TextOptionStatus};

/// Column list for `campaigns` queries.
const COLUMNS: &str = "id, name, status, required_products_count, welcome_text_md, \
    payment_instructions_md, support_email, created_at, updated_at";

/// Provides CRUD and clone operations for campaigns.
pub struct CampaignRepo;

impl CampaignRepo {
    /// Insert a new campaign, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateCampaign,
    ) -> Result<Campaign, sqlx::Error> {
        let query = format!(
            "INSERT INTO campaigns \
                (name, status, required_products_count, welcome_text_md, \
                 payment_instructions_md, support_email) \
             VALUES ($1, COALESCE($2, 'paused'), COALESCE($3, 0), \
                     COALESCE($4, ''), $5, COALESCE($6, '')) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Campaign>(&query)
            .bind(&input.name)
            .bind(input.status)
            .bind(input.required_products_count)
            .bind(&input.welcome_text_md)
            .bind(&input.payment_instructions_md)
            .bind(&input.support_email)
            .fetch_one(pool)
            .await
    }

    /// Find a campaign by its primary key.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<Campaign>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM campaigns WHERE id = $1");
        sqlx::query_as::<_, Campaign>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Resolve "the" active campaign for entrypoints that do not pass an
    /// explicit id. When more than one campaign is active the most
    /// recently created wins; core code always receives an explicit id.
    pub async fn find_active(pool: &PgPool) -> Result<Option<Campaign>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM campaigns \
             WHERE status = $1 \
             ORDER BY created_at DESC, id DESC \
             LIMIT 1"
        );
        sqlx::query_as::<_, Campaign>(&query)
            .bind(CampaignStatus::Active)
            .fetch_optional(pool)
            .await
    }

    /// List all campaigns, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Campaign>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM campaigns ORDER BY created_at DESC");
        sqlx::query_as::<_, Campaign>(&query).fetch_all(pool).await
    }

    /// Patch a campaign. `None` fields keep their current value.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCampaign,
    ) -> Result<Option<Campaign>, sqlx::Error> {
        let query = format!(
            "UPDATE campaigns SET \
                name = COALESCE($2, name), \
                status = COALESCE($3, status), \
                required_products_count = COALESCE($4, required_products_count), \
                welcome_text_md = COALESCE($5, welcome_text_md), \
                payment_instructions_md = COALESCE($6, payment_instructions_md), \
                support_email = COALESCE($7, support_email), \
                updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Campaign>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.status)
            .bind(input.required_products_count)
            .bind(&input.welcome_text_md)
            .bind(&input.payment_instructions_md)
            .bind(&input.support_email)
            .fetch_optional(pool)
            .await
    }

    /// Duplicate a campaign, optionally with its products and their text
    /// pools, in one transaction. Returns the new campaign id, or `None`
    /// if the source campaign does not exist.
    ///
    /// The clone is entirely additive: nothing on the source side is
    /// touched. Cloned campaigns start `paused`, and cloned text options
    /// are forced back to `available` with both claim fields cleared --
    /// the new campaign has no enrollments, so it must not inherit claim
    /// state no matter what the source rows say.
    pub async fn clone_campaign(
        pool: &PgPool,
        campaign_id: DbId,
        clone_products: bool,
        clone_text_options: bool,
    ) -> Result<Option<DbId>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let new_campaign: Option<(DbId,)> = sqlx::query_as(
            "INSERT INTO campaigns \
                (name, status, required_products_count, welcome_text_md, \
                 payment_instructions_md, support_email) \
             SELECT name, $2, required_products_count, welcome_text_md, \
                    payment_instructions_md, support_email \
             FROM campaigns WHERE id = $1 \
             RETURNING id",
        )
        .bind(campaign_id)
        .bind(CampaignStatus::Paused)
        .fetch_optional(&mut *tx)
        .await?;

        let Some((new_campaign_id,)) = new_campaign else {
            return Ok(None);
        };

        if clone_products {
            let source_products: Vec<(DbId,)> = sqlx::query_as(
                "SELECT id FROM products WHERE campaign_id = $1 \
                 ORDER BY position ASC, id ASC",
            )
            .bind(campaign_id)
            .fetch_all(&mut *tx)
            .await?;

            for (source_product_id,) in source_products {
                let (new_product_id,): (DbId,) = sqlx::query_as(
                    "INSERT INTO products \
                        (campaign_id, title, position, resource_link_url, \
                         review_link_url, status) \
                     SELECT $2, title, position, resource_link_url, \
                            review_link_url, status \
                     FROM products WHERE id = $1 \
                     RETURNING id",
                )
                .bind(source_product_id)
                .bind(new_campaign_id)
                .fetch_one(&mut *tx)
                .await?;

                if clone_text_options {
                    // Pure mapping: every source option becomes a fresh
                    // available one, whatever its source status.
                    sqlx::query(
                        "INSERT INTO product_text_options (product_id, text_md, status) \
                         SELECT $2, text_md, $3 \
                         FROM product_text_options WHERE product_id = $1",
                    )
                    .bind(source_product_id)
                    .bind(new_product_id)
                    .bind(TextOptionStatus::Available)
                    .execute(&mut *tx)
                    .await?;
                }
            }
        }

        tx.commit().await?;
        Ok(Some(new_campaign_id))
    }
}
