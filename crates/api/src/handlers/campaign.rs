//! Handlers for the `/campaigns` resources: the public active-campaign
//! lookup and the admin campaign management surface.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use reviewdrop_core::error::CoreError;
use reviewdrop_core::types::DbId;
use serde::Serialize;

use reviewdrop_db::models::campaign::{
    Campaign, CloneCampaign, CreateCampaign, UpdateCampaign,
};
use reviewdrop_db::repositories::CampaignRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::AdminKey;
use crate::state::AppState;

/// GET /api/v1/campaigns/active
///
/// Public lookup for the signup page. 404 while no campaign is active.
pub async fn get_active(State(state): State<AppState>) -> AppResult<Json<Campaign>> {
    match CampaignRepo::find_active(&state.pool).await? {
        Some(campaign) => Ok(Json(campaign)),
        None => Err(CoreError::NoActiveCampaign.into()),
    }
}

/// GET /api/v1/admin/campaigns
pub async fn list(
    _admin: AdminKey,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Campaign>>> {
    let campaigns = CampaignRepo::list(&state.pool).await?;
    Ok(Json(campaigns))
}

/// POST /api/v1/admin/campaigns
pub async fn create(
    _admin: AdminKey,
    State(state): State<AppState>,
    Json(input): Json<CreateCampaign>,
) -> AppResult<(StatusCode, Json<Campaign>)> {
    if input.name.trim().is_empty() {
        return Err(CoreError::Validation("name must not be empty".into()).into());
    }
    let campaign = CampaignRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(campaign)))
}

/// PUT /api/v1/admin/campaigns/{id}
pub async fn update(
    _admin: AdminKey,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCampaign>,
) -> AppResult<Json<Campaign>> {
    let campaign = CampaignRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Campaign",
            id,
        }))?;
    Ok(Json(campaign))
}

/// Response body for a clone request.
#[derive(Debug, Serialize)]
pub struct CloneResponse {
    pub new_campaign_id: DbId,
}

/// POST /api/v1/admin/campaigns/{id}/clone
///
/// Duplicates the campaign and, per the flags, its products and text
/// pools. Cloned text options always come back `available`.
pub async fn clone_campaign(
    _admin: AdminKey,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<CloneCampaign>,
) -> AppResult<(StatusCode, Json<CloneResponse>)> {
    let new_campaign_id = CampaignRepo::clone_campaign(
        &state.pool,
        id,
        input.clone_products,
        input.clone_text_options,
    )
    .await?
    .ok_or(AppError::Core(CoreError::NotFound {
        entity: "Campaign",
        id,
    }))?;

    tracing::info!(source_id = id, new_campaign_id, "campaign cloned");
    Ok((StatusCode::CREATED, Json(CloneResponse { new_campaign_id })))
}
