//! Handlers for the public `/assignments` resource (proof upload).

use axum::extract::{Path, State};
use axum::Json;
use reviewdrop_core::error::CoreError;
use reviewdrop_core::types::DbId;

use reviewdrop_db::models::assignment::{Assignment, AttachProof};
use reviewdrop_db::models::status::EnrollmentState;
use reviewdrop_db::repositories::{AssignmentRepo, EnrollmentRepo, FileRepo};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/v1/assignments/{id}/proof
///
/// Attaches a registered proof file and moves the assignment to
/// `proof_uploaded`. Re-uploads are allowed until an admin decides;
/// afterwards the attempt conflicts. The owning enrollment advances to
/// `in_progress` on first upload (a no-op once it is further along).
pub async fn attach_proof(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<AttachProof>,
) -> AppResult<Json<Assignment>> {
    let assignment = AssignmentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Assignment",
            id,
        }))?;

    FileRepo::find_by_id(&state.pool, input.file_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "File",
            id: input.file_id,
        }))?;

    let updated = AssignmentRepo::attach_proof(&state.pool, assignment.id, input.file_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Conflict(
                "Proof can no longer be changed after review".into(),
            ))
        })?;

    EnrollmentRepo::advance_state(
        &state.pool,
        assignment.enrollment_id,
        EnrollmentState::InProgress,
    )
    .await?;

    Ok(Json(updated))
}
