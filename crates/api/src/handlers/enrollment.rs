//! Handlers for the public `/enrollments` resource: signup, the
//! instructions view, and payment submission.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use reviewdrop_core::error::CoreError;
use reviewdrop_core::types::DbId;
use serde::{Deserialize, Serialize};
use validator::Validate;

use reviewdrop_db::models::assignment::{Assignment, AssignmentDetail};
use reviewdrop_db::models::campaign::Campaign;
use reviewdrop_db::models::enrollment::Enrollment;
use reviewdrop_db::models::payment::{PaymentInfo, SubmitPaymentInfo};
use reviewdrop_db::models::status::{CampaignStatus, EnrollmentState};
use reviewdrop_db::repositories::{
    AssignmentRepo, CampaignRepo, EnrollmentRepo, PaymentInfoRepo,
};

use crate::enrollment::{enroll, EnrollmentOutcome};
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Request body for `POST /enrollments`.
///
/// Only the length is bounded here; the email's structural validation
/// runs after normalization inside the orchestrator, so padded or
/// mixed-case input is not rejected prematurely.
#[derive(Debug, Deserialize, Validate)]
pub struct EnrollRequest {
    #[validate(length(min = 3, max = 254))]
    pub email: String,
    /// Omitted means "the sole active campaign" (boundary fallback).
    pub campaign_id: Option<DbId>,
}

/// Response body for `POST /enrollments`.
#[derive(Debug, Serialize)]
pub struct EnrollResponse {
    pub enrollment: Enrollment,
    pub assignments: Vec<Assignment>,
    pub skipped_product_ids: Vec<DbId>,
}

/// The instructions view: enrollment, campaign copy, and per-product
/// assignments with their review texts.
#[derive(Debug, Serialize)]
pub struct InstructionsResponse {
    pub enrollment: Enrollment,
    pub campaign_name: String,
    pub welcome_text_md: String,
    pub payment_instructions_md: Option<String>,
    pub support_email: String,
    pub assignments: Vec<AssignmentDetail>,
}

/// Resolve the campaign an enrollment request targets.
///
/// The core never guesses a campaign; this boundary fallback is the one
/// place "the sole active campaign" is resolved.
async fn resolve_campaign(
    state: &AppState,
    campaign_id: Option<DbId>,
) -> AppResult<Campaign> {
    match campaign_id {
        Some(id) => {
            let campaign = CampaignRepo::find_by_id(&state.pool, id)
                .await?
                .ok_or(AppError::Core(CoreError::NotFound {
                    entity: "Campaign",
                    id,
                }))?;
            if campaign.status != CampaignStatus::Active {
                return Err(CoreError::Conflict("Campaign is not active".into()).into());
            }
            Ok(campaign)
        }
        None => CampaignRepo::find_active(&state.pool)
            .await?
            .ok_or_else(|| CoreError::NoActiveCampaign.into()),
    }
}

/// POST /api/v1/enrollments
///
/// 201 on a fresh signup, 200 on a revisit. Both return the full
/// assignment set so the client can navigate straight to instructions.
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<EnrollRequest>,
) -> AppResult<(StatusCode, Json<EnrollResponse>)> {
    input
        .validate()
        .map_err(|e| CoreError::Validation(e.to_string()))?;

    let campaign = resolve_campaign(&state, input.campaign_id).await?;

    let EnrollmentOutcome {
        enrollment,
        assignments,
        skipped_product_ids,
        created,
    } = enroll(&state.pool, &state.notifier, &campaign, &input.email).await?;

    let status = if created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((
        status,
        Json(EnrollResponse {
            enrollment,
            assignments,
            skipped_product_ids,
        }),
    ))
}

/// GET /api/v1/enrollments/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<InstructionsResponse>> {
    let enrollment = EnrollmentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Enrollment",
            id,
        }))?;

    let campaign = CampaignRepo::find_by_id(&state.pool, enrollment.campaign_id)
        .await?
        .ok_or_else(|| {
            AppError::InternalError(format!(
                "campaign {} missing for enrollment {id}",
                enrollment.campaign_id
            ))
        })?;

    let assignments =
        AssignmentRepo::list_detail_by_enrollment(&state.pool, enrollment.id).await?;

    Ok(Json(InstructionsResponse {
        enrollment,
        campaign_name: campaign.name,
        welcome_text_md: campaign.welcome_text_md,
        payment_instructions_md: campaign.payment_instructions_md,
        support_email: campaign.support_email,
        assignments,
    }))
}

/// POST /api/v1/enrollments/{id}/payment
///
/// Validates the method-specific required fields, records the payout
/// details (one submission per enrollment), advances the enrollment to
/// `submitted`, and fires the submission webhook without awaiting it.
pub async fn submit_payment(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<SubmitPaymentInfo>,
) -> AppResult<(StatusCode, Json<PaymentInfo>)> {
    let enrollment = EnrollmentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Enrollment",
            id,
        }))?;

    let missing = input.missing_fields();
    if !missing.is_empty() {
        return Err(CoreError::Validation(format!(
            "Missing required fields for this payment method: {}",
            missing.join(", ")
        ))
        .into());
    }

    // The uq_payment_info_enrollment violation maps to 409 downstream.
    let payment = PaymentInfoRepo::create(&state.pool, enrollment.id, &input).await?;

    EnrollmentRepo::advance_state(&state.pool, enrollment.id, EnrollmentState::Submitted)
        .await?;

    match CampaignRepo::find_by_id(&state.pool, enrollment.campaign_id).await {
        Ok(Some(campaign)) => state.notifier.spawn_submission(&enrollment, &campaign.name),
        Ok(None) => {}
        Err(err) => tracing::warn!(error = %err, "campaign lookup for submission webhook failed"),
    }

    Ok((StatusCode::CREATED, Json(payment)))
}
