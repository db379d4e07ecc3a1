//! Enrollment entity models and DTOs.

use reviewdrop_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::status::EnrollmentState;

/// A row from the `enrollments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Enrollment {
    pub id: DbId,
    pub email: String,
    pub campaign_id: DbId,
    pub state: EnrollmentState,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Admin listing row: an enrollment joined with its campaign name.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct EnrollmentSummary {
    pub id: DbId,
    pub email: String,
    pub campaign_id: DbId,
    pub campaign_name: String,
    pub state: EnrollmentState,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for `POST /admin/enrollments/{id}/state`.
#[derive(Debug, Deserialize)]
pub struct AdvanceEnrollmentState {
    pub state: EnrollmentState,
}
