//! Assignment entity models and DTOs.

use reviewdrop_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::status::AssignmentStatus;

/// A row from the `assignments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Assignment {
    pub id: DbId,
    pub enrollment_id: DbId,
    pub product_id: DbId,
    pub text_option_id: DbId,
    pub text_snapshot_md: String,
    pub status: AssignmentStatus,
    pub proof_file_id: Option<DbId>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
}

/// An assignment joined with its product, ordered by product position.
/// This is the shape the instructions view consumes.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AssignmentDetail {
    pub id: DbId,
    pub enrollment_id: DbId,
    pub product_id: DbId,
    pub text_option_id: DbId,
    pub text_snapshot_md: String,
    pub status: AssignmentStatus,
    pub proof_file_id: Option<DbId>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub product_title: String,
    pub product_position: i32,
    pub review_link_url: String,
    pub resource_link_url: String,
}

/// DTO for `POST /assignments/{id}/proof`.
#[derive(Debug, Deserialize)]
pub struct AttachProof {
    pub file_id: DbId,
}

/// Admin decision on an uploaded proof.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewDecision {
    Accepted,
    Rejected,
}

/// DTO for `POST /admin/assignments/{id}/review`.
#[derive(Debug, Deserialize)]
pub struct ReviewProof {
    pub decision: ReviewDecision,
    /// Required when rejecting; shown to the participant.
    pub notes: Option<String>,
}
