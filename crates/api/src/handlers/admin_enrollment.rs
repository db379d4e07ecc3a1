//! Handlers for the admin enrollment-review surface.

use axum::extract::{Path, State};
use axum::Json;
use reviewdrop_core::error::CoreError;
use reviewdrop_core::types::DbId;
use serde::Serialize;

use reviewdrop_db::models::assignment::{
    Assignment, AssignmentDetail, ReviewDecision, ReviewProof,
};
use reviewdrop_db::models::enrollment::{
    AdvanceEnrollmentState, Enrollment, EnrollmentSummary,
};
use reviewdrop_db::models::payment::PaymentInfo;
use reviewdrop_db::models::status::{AssignmentStatus, EnrollmentState};
use reviewdrop_db::repositories::{
    AssignmentRepo, EnrollmentRepo, PaymentInfoRepo,
};

use crate::error::{AppError, AppResult};
use crate::middleware::AdminKey;
use crate::state::AppState;

/// GET /api/v1/admin/enrollments
pub async fn list(
    _admin: AdminKey,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<EnrollmentSummary>>> {
    let enrollments = EnrollmentRepo::list_all(&state.pool).await?;
    Ok(Json(enrollments))
}

/// Full admin view of one enrollment.
#[derive(Debug, Serialize)]
pub struct EnrollmentDetailResponse {
    pub enrollment: Enrollment,
    pub assignments: Vec<AssignmentDetail>,
    pub payment: Option<PaymentInfo>,
}

/// GET /api/v1/admin/enrollments/{id}
pub async fn get_by_id(
    _admin: AdminKey,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<EnrollmentDetailResponse>> {
    let enrollment = EnrollmentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Enrollment",
            id,
        }))?;

    let assignments =
        AssignmentRepo::list_detail_by_enrollment(&state.pool, enrollment.id).await?;
    let payment = PaymentInfoRepo::find_by_enrollment(&state.pool, enrollment.id).await?;

    Ok(Json(EnrollmentDetailResponse {
        enrollment,
        assignments,
        payment,
    }))
}

/// POST /api/v1/admin/assignments/{id}/review
///
/// Accepts or rejects an uploaded proof. Rejections must carry notes for
/// the participant; accepting clears any earlier rejection notes.
pub async fn review_proof(
    _admin: AdminKey,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<ReviewProof>,
) -> AppResult<Json<Assignment>> {
    let (status, notes) = match input.decision {
        ReviewDecision::Accepted => (AssignmentStatus::Accepted, None),
        ReviewDecision::Rejected => {
            let notes = input
                .notes
                .as_deref()
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .ok_or_else(|| {
                    AppError::Core(CoreError::Validation(
                        "Rejection requires notes".into(),
                    ))
                })?;
            (AssignmentStatus::Rejected, Some(notes.to_string()))
        }
    };

    let assignment = AssignmentRepo::review(&state.pool, id, status, notes.as_deref())
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Assignment",
            id,
        }))?;
    Ok(Json(assignment))
}

/// POST /api/v1/admin/enrollments/{id}/state
///
/// Advances an enrollment to `approved` or `paid`. Earlier states belong
/// to the participant flow; the monotonic guard refuses regressions.
pub async fn advance_state(
    _admin: AdminKey,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<AdvanceEnrollmentState>,
) -> AppResult<Json<Enrollment>> {
    if !matches!(
        input.state,
        EnrollmentState::Approved | EnrollmentState::Paid
    ) {
        return Err(CoreError::Validation(
            "Admins may only advance enrollments to approved or paid".into(),
        )
        .into());
    }

    EnrollmentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Enrollment",
            id,
        }))?;

    let enrollment = EnrollmentRepo::advance_state(&state.pool, id, input.state)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Conflict(
                "Enrollment state can only move forward".into(),
            ))
        })?;
    Ok(Json(enrollment))
}
