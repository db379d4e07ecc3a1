//! Repository for the `assignments` table.

use reviewdrop_core::types::DbId;
use sqlx::PgPool;

use crate::models::assignment::{Assignment, AssignmentDetail};
use crate::models::status::AssignmentStatus;

/// Column list for `assignments` queries.
const COLUMNS: &str = "id, enrollment_id, product_id, text_option_id, \
    text_snapshot_md, status, proof_file_id, notes, created_at";

/// Provides CRUD, proof, and review operations for assignments.
pub struct AssignmentRepo;

impl AssignmentRepo {
    /// Insert an assignment carrying the claimed text snapshot.
    ///
    /// `ON CONFLICT DO NOTHING` on the (enrollment, product) unique
    /// constraint turns a concurrent-creation race into a `None` return;
    /// the caller releases its freshly claimed text option and reads the
    /// winner's row instead.
    pub async fn create(
        pool: &PgPool,
        enrollment_id: DbId,
        product_id: DbId,
        text_option_id: DbId,
        text_snapshot_md: &str,
    ) -> Result<Option<Assignment>, sqlx::Error> {
        let query = format!(
            "INSERT INTO assignments \
                (enrollment_id, product_id, text_option_id, text_snapshot_md) \
             VALUES ($1, $2, $3, $4) \
             ON CONFLICT ON CONSTRAINT uq_assignments_enrollment_product DO NOTHING \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Assignment>(&query)
            .bind(enrollment_id)
            .bind(product_id)
            .bind(text_option_id)
            .bind(text_snapshot_md)
            .fetch_optional(pool)
            .await
    }

    /// Find an assignment by its primary key.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<Assignment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM assignments WHERE id = $1");
        sqlx::query_as::<_, Assignment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// The idempotence lookup for the assignment builder.
    pub async fn find_by_enrollment_product(
        pool: &PgPool,
        enrollment_id: DbId,
        product_id: DbId,
    ) -> Result<Option<Assignment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM assignments \
             WHERE enrollment_id = $1 AND product_id = $2"
        );
        sqlx::query_as::<_, Assignment>(&query)
            .bind(enrollment_id)
            .bind(product_id)
            .fetch_optional(pool)
            .await
    }

    /// List an enrollment's assignments in product-position order.
    pub async fn list_by_enrollment(
        pool: &PgPool,
        enrollment_id: DbId,
    ) -> Result<Vec<Assignment>, sqlx::Error> {
        sqlx::query_as::<_, Assignment>(
            "SELECT a.id, a.enrollment_id, a.product_id, a.text_option_id, \
                    a.text_snapshot_md, a.status, a.proof_file_id, a.notes, \
                    a.created_at \
             FROM assignments a \
             JOIN products p ON p.id = a.product_id \
             WHERE a.enrollment_id = $1 \
             ORDER BY p.position ASC, p.id ASC",
        )
        .bind(enrollment_id)
        .fetch_all(pool)
        .await
    }

    /// List an enrollment's assignments joined with their product, in
    /// product-position order. Feeds the instructions view and the admin
    /// enrollment detail.
    pub async fn list_detail_by_enrollment(
        pool: &PgPool,
        enrollment_id: DbId,
    ) -> Result<Vec<AssignmentDetail>, sqlx::Error> {
        sqlx::query_as::<_, AssignmentDetail>(
            "SELECT a.id, a.enrollment_id, a.product_id, a.text_option_id, \
                    a.text_snapshot_md, a.status, a.proof_file_id, a.notes, \
                    a.created_at, \
                    p.title AS product_title, p.position AS product_position, \
                    p.review_link_url, p.resource_link_url \
             FROM assignments a \
             JOIN products p ON p.id = a.product_id \
             WHERE a.enrollment_id = $1 \
             ORDER BY p.position ASC, p.id ASC",
        )
        .bind(enrollment_id)
        .fetch_all(pool)
        .await
    }

    /// Re-point an assignment at a fresh text option and backfill its
    /// snapshot. Snapshot-repair path only.
    pub async fn repoint(
        pool: &PgPool,
        id: DbId,
        text_option_id: DbId,
        text_snapshot_md: &str,
    ) -> Result<Assignment, sqlx::Error> {
        let query = format!(
            "UPDATE assignments \
             SET text_option_id = $2, text_snapshot_md = $3 \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Assignment>(&query)
            .bind(id)
            .bind(text_option_id)
            .bind(text_snapshot_md)
            .fetch_one(pool)
            .await
    }

    /// Attach an uploaded proof file and move to `proof_uploaded`.
    ///
    /// Re-uploads are allowed until an admin accepts or rejects; the
    /// status filter blocks edits after a decision.
    pub async fn attach_proof(
        pool: &PgPool,
        id: DbId,
        proof_file_id: DbId,
    ) -> Result<Option<Assignment>, sqlx::Error> {
        let query = format!(
            "UPDATE assignments \
             SET proof_file_id = $2, status = $3 \
             WHERE id = $1 AND status IN ($4, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Assignment>(&query)
            .bind(id)
            .bind(proof_file_id)
            .bind(AssignmentStatus::ProofUploaded)
            .bind(AssignmentStatus::Assigned)
            .fetch_optional(pool)
            .await
    }

    /// Record an admin accept/reject decision on a proof.
    ///
    /// Accepting clears any previous rejection notes.
    pub async fn review(
        pool: &PgPool,
        id: DbId,
        status: AssignmentStatus,
        notes: Option<&str>,
    ) -> Result<Option<Assignment>, sqlx::Error> {
        let query = format!(
            "UPDATE assignments \
             SET status = $2, notes = $3 \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Assignment>(&query)
            .bind(id)
            .bind(status)
            .bind(notes)
            .fetch_optional(pool)
            .await
    }
}
