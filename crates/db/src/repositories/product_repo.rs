//! Repository for the `products` table.

use reviewdrop_core::types::DbId;
use sqlx::PgPool;

use crate::models::product::{CreateProduct, Product, UpdateProduct};
use crate::models::status::ProductStatus;

/// Column list for `products` queries.
const COLUMNS: &str = "id, campaign_id, title, position, resource_link_url, \
    review_link_url, status, created_at";

/// Provides CRUD operations for campaign products.
pub struct ProductRepo;

impl ProductRepo {
    /// Insert a new product under a campaign, returning the created row.
    pub async fn create(
        pool: &PgPool,
        campaign_id: DbId,
        input: &CreateProduct,
    ) -> Result<Product, sqlx::Error> {
        let query = format!(
            "INSERT INTO products \
                (campaign_id, title, position, resource_link_url, \
                 review_link_url, status) \
             VALUES ($1, $2, $3, $4, $5, COALESCE($6, 'active')) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(campaign_id)
            .bind(&input.title)
            .bind(input.position)
            .bind(&input.resource_link_url)
            .bind(&input.review_link_url)
            .bind(input.status)
            .fetch_one(pool)
            .await
    }

    /// Find a product by its primary key.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<Product>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM products WHERE id = $1");
        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List every product of a campaign, by position.
    pub async fn list_by_campaign(
        pool: &PgPool,
        campaign_id: DbId,
    ) -> Result<Vec<Product>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM products \
             WHERE campaign_id = $1 \
             ORDER BY position ASC, id ASC"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(campaign_id)
            .fetch_all(pool)
            .await
    }

    /// List the active products of a campaign, by position. This is the
    /// product set the enrollment orchestrator assigns against.
    pub async fn list_active_by_campaign(
        pool: &PgPool,
        campaign_id: DbId,
    ) -> Result<Vec<Product>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM products \
             WHERE campaign_id = $1 AND status = $2 \
             ORDER BY position ASC, id ASC"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(campaign_id)
            .bind(ProductStatus::Active)
            .fetch_all(pool)
            .await
    }

    /// Patch a product. `None` fields keep their current value.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProduct,
    ) -> Result<Option<Product>, sqlx::Error> {
        let query = format!(
            "UPDATE products SET \
                title = COALESCE($2, title), \
                position = COALESCE($3, position), \
                resource_link_url = COALESCE($4, resource_link_url), \
                review_link_url = COALESCE($5, review_link_url), \
                status = COALESCE($6, status) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(input.position)
            .bind(&input.resource_link_url)
            .bind(&input.review_link_url)
            .bind(input.status)
            .fetch_optional(pool)
            .await
    }

    /// Delete a product and (via cascade) its text pool.
    ///
    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
