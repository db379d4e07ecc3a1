//! Repository for the `enrollments` table.
//!
//! The `uq_enrollments_email_campaign` unique constraint, not a
//! pre-check, is what enforces one enrollment per (email, campaign);
//! callers of [`EnrollmentRepo::create`] fold a violation into the
//! revisit path via [`crate::is_unique_violation`].

use reviewdrop_core::types::DbId;
use sqlx::PgPool;

use crate::models::enrollment::{Enrollment, EnrollmentSummary};
use crate::models::status::EnrollmentState;

/// Column list for `enrollments` queries.
const COLUMNS: &str = "id, email, campaign_id, state, created_at, updated_at";

/// Provides CRUD and state-advance operations for enrollments.
pub struct EnrollmentRepo;

impl EnrollmentRepo {
    /// Insert a fresh enrollment in the `assigned` state.
    ///
    /// `email` must already be normalized. Surfaces the 23505 unique
    /// violation untouched when the (email, campaign) pair exists.
    pub async fn create(
        pool: &PgPool,
        email: &str,
        campaign_id: DbId,
    ) -> Result<Enrollment, sqlx::Error> {
        let query = format!(
            "INSERT INTO enrollments (email, campaign_id) \
             VALUES ($1, $2) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Enrollment>(&query)
            .bind(email)
            .bind(campaign_id)
            .fetch_one(pool)
            .await
    }

    /// Find an enrollment by its primary key.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<Enrollment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM enrollments WHERE id = $1");
        sqlx::query_as::<_, Enrollment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Look up the enrollment for a normalized email within a campaign.
    pub async fn find_by_email_campaign(
        pool: &PgPool,
        email: &str,
        campaign_id: DbId,
    ) -> Result<Option<Enrollment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM enrollments \
             WHERE email = $1 AND campaign_id = $2"
        );
        sqlx::query_as::<_, Enrollment>(&query)
            .bind(email)
            .bind(campaign_id)
            .fetch_optional(pool)
            .await
    }

    /// Admin listing: all enrollments with their campaign name, newest
    /// first.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<EnrollmentSummary>, sqlx::Error> {
        sqlx::query_as::<_, EnrollmentSummary>(
            "SELECT e.id, e.email, e.campaign_id, c.name AS campaign_name, \
                    e.state, e.created_at, e.updated_at \
             FROM enrollments e \
             JOIN campaigns c ON c.id = e.campaign_id \
             ORDER BY e.created_at DESC, e.id DESC",
        )
        .fetch_all(pool)
        .await
    }

    /// Advance an enrollment to a later lifecycle state.
    ///
    /// The `state < $2` guard relies on PostgreSQL ordering enum values
    /// by declaration order, so a state never regresses and a repeated
    /// advance is a no-op. Returns the updated row, or `None` when the
    /// enrollment is missing or already at or past the target state.
    pub async fn advance_state(
        pool: &PgPool,
        id: DbId,
        state: EnrollmentState,
    ) -> Result<Option<Enrollment>, sqlx::Error> {
        let query = format!(
            "UPDATE enrollments \
             SET state = $2, updated_at = NOW() \
             WHERE id = $1 AND state < $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Enrollment>(&query)
            .bind(id)
            .bind(state)
            .fetch_optional(pool)
            .await
    }
}
