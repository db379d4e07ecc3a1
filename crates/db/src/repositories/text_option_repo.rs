//! Repository for the `product_text_options` table.
//!
//! `claim` is the only place in the codebase where a text transitions
//! from `available` to `assigned`.

use reviewdrop_core::stock::ProductStock;
use reviewdrop_core::types::DbId;
use sqlx::PgPool;

use crate::models::status::{ProductStatus, TextOptionStatus};
use crate::models::text_option::TextOption;

/// Column list for `product_text_options` queries.
const COLUMNS: &str =
    "id, product_id, text_md, status, assigned_to_email, assigned_at, created_at";

/// Provides claim, release, and admin inventory operations for the
/// per-product review-text pool.
pub struct TextOptionRepo;

impl TextOptionRepo {
    /// Atomically claim one available text for a product.
    ///
    /// Uses `SELECT FOR UPDATE SKIP LOCKED` inside a single `UPDATE` so
    /// that concurrent claims for the same product each win a distinct
    /// row: a row locked by an in-flight claim is skipped, not waited on,
    /// and the status filter excludes it once that claim commits.
    ///
    /// Returns `None` when the product has no available texts. Exhaustion
    /// is a normal outcome, not an error, and makes no mutation.
    pub async fn claim(
        pool: &PgPool,
        product_id: DbId,
        claimant_email: &str,
    ) -> Result<Option<DbId>, sqlx::Error> {
        let row: Option<(DbId,)> = sqlx::query_as(
            "UPDATE product_text_options \
             SET status = $3, assigned_to_email = $2, assigned_at = NOW() \
             WHERE id = ( \
                 SELECT id FROM product_text_options \
                 WHERE product_id = $1 AND status = $4 \
                 ORDER BY created_at ASC, id ASC \
                 LIMIT 1 \
                 FOR UPDATE SKIP LOCKED \
             ) \
             RETURNING id",
        )
        .bind(product_id)
        .bind(claimant_email)
        .bind(TextOptionStatus::Assigned)
        .bind(TextOptionStatus::Available)
        .fetch_optional(pool)
        .await?;
        Ok(row.map(|(id,)| id))
    }

    /// Return a claimed text to the pool, clearing both claim fields.
    ///
    /// Only used on the snapshot-repair path, where an assignment is
    /// re-pointed away from a stale option.
    pub async fn release(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE product_text_options \
             SET status = $2, assigned_to_email = NULL, assigned_at = NULL \
             WHERE id = $1",
        )
        .bind(id)
        .bind(TextOptionStatus::Available)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Find a text option by its primary key.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<TextOption>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM product_text_options WHERE id = $1");
        sqlx::query_as::<_, TextOption>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a batch of texts for a product, all `available`.
    ///
    /// Returns the number of rows inserted.
    pub async fn bulk_add(
        pool: &PgPool,
        product_id: DbId,
        texts: &[String],
    ) -> Result<u64, sqlx::Error> {
        if texts.is_empty() {
            return Ok(0);
        }
        let result = sqlx::query(
            "INSERT INTO product_text_options (product_id, text_md) \
             SELECT $1, t FROM UNNEST($2::text[]) AS t",
        )
        .bind(product_id)
        .bind(texts)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// List all text options for a product, newest first.
    pub async fn list_by_product(
        pool: &PgPool,
        product_id: DbId,
    ) -> Result<Vec<TextOption>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM product_text_options \
             WHERE product_id = $1 \
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, TextOption>(&query)
            .bind(product_id)
            .fetch_all(pool)
            .await
    }

    /// Flip a non-assigned option between `available` and `disabled`.
    ///
    /// Assigned options are excluded by the WHERE clause; mutating one
    /// would break the claim-field invariant. Returns the updated row, or
    /// `None` if the option does not exist or is assigned.
    pub async fn set_status(
        pool: &PgPool,
        id: DbId,
        status: TextOptionStatus,
    ) -> Result<Option<TextOption>, sqlx::Error> {
        let query = format!(
            "UPDATE product_text_options \
             SET status = $2 \
             WHERE id = $1 AND status <> $3 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TextOption>(&query)
            .bind(id)
            .bind(status)
            .bind(TextOptionStatus::Assigned)
            .fetch_optional(pool)
            .await
    }

    /// Count available texts for a single product.
    pub async fn count_available(
        pool: &PgPool,
        product_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM product_text_options \
             WHERE product_id = $1 AND status = $2",
        )
        .bind(product_id)
        .bind(TextOptionStatus::Available)
        .fetch_one(pool)
        .await?;
        Ok(row.0)
    }

    /// Available-text counts for every active product of a campaign,
    /// ordered by product position. Products with an empty pool appear
    /// with a zero count.
    pub async fn available_counts_by_campaign(
        pool: &PgPool,
        campaign_id: DbId,
    ) -> Result<Vec<ProductStock>, sqlx::Error> {
        let rows: Vec<(DbId, i64)> = sqlx::query_as(
            "SELECT p.id, COUNT(o.id) FILTER (WHERE o.status = $2) \
             FROM products p \
             LEFT JOIN product_text_options o ON o.product_id = p.id \
             WHERE p.campaign_id = $1 AND p.status = $3 \
             GROUP BY p.id, p.position \
             ORDER BY p.position ASC, p.id ASC",
        )
        .bind(campaign_id)
        .bind(TextOptionStatus::Available)
        .bind(ProductStatus::Active)
        .fetch_all(pool)
        .await?;
        Ok(rows
            .into_iter()
            .map(|(product_id, available)| ProductStock {
                product_id,
                available,
            })
            .collect())
    }

    /// Delete duplicate texts, per product, keeping one row per distinct
    /// text. Assigned rows are always preserved; among the rest the
    /// earliest row survives. Returns the number of rows deleted.
    pub async fn cleanup_duplicates(pool: &PgPool) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM product_text_options p \
             WHERE p.status <> $1 \
               AND EXISTS ( \
                   SELECT 1 FROM product_text_options k \
                   WHERE k.product_id = p.product_id \
                     AND k.text_md = p.text_md \
                     AND k.id <> p.id \
                     AND (k.status = $1 OR k.id < p.id) \
               )",
        )
        .bind(TextOptionStatus::Assigned)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Wipe the entire text inventory. Admin reset only.
    ///
    /// Fails with a foreign-key violation if any assignment still points
    /// at an option; the caller is expected to have cleared enrollments
    /// first.
    pub async fn delete_all(pool: &PgPool) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM product_text_options")
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
