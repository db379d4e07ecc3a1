//! Handlers for the admin `/products` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use reviewdrop_core::error::CoreError;
use reviewdrop_core::stock::ProductStock;
use reviewdrop_core::types::DbId;

use reviewdrop_db::models::product::{CreateProduct, Product, UpdateProduct};
use reviewdrop_db::repositories::{CampaignRepo, ProductRepo, TextOptionRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::AdminKey;
use crate::state::AppState;

/// GET /api/v1/admin/campaigns/{campaign_id}/products
pub async fn list_by_campaign(
    _admin: AdminKey,
    State(state): State<AppState>,
    Path(campaign_id): Path<DbId>,
) -> AppResult<Json<Vec<Product>>> {
    ensure_campaign(&state, campaign_id).await?;
    let products = ProductRepo::list_by_campaign(&state.pool, campaign_id).await?;
    Ok(Json(products))
}

/// GET /api/v1/admin/campaigns/{campaign_id}/stock
///
/// Available-text counts per active product; what the low-stock webhook
/// watches, exposed for the dashboard.
pub async fn stock_by_campaign(
    _admin: AdminKey,
    State(state): State<AppState>,
    Path(campaign_id): Path<DbId>,
) -> AppResult<Json<Vec<ProductStock>>> {
    ensure_campaign(&state, campaign_id).await?;
    let counts =
        TextOptionRepo::available_counts_by_campaign(&state.pool, campaign_id).await?;
    Ok(Json(counts))
}

/// POST /api/v1/admin/campaigns/{campaign_id}/products
pub async fn create(
    _admin: AdminKey,
    State(state): State<AppState>,
    Path(campaign_id): Path<DbId>,
    Json(input): Json<CreateProduct>,
) -> AppResult<(StatusCode, Json<Product>)> {
    ensure_campaign(&state, campaign_id).await?;
    if input.title.trim().is_empty() {
        return Err(CoreError::Validation("title must not be empty".into()).into());
    }
    let product = ProductRepo::create(&state.pool, campaign_id, &input).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// PUT /api/v1/admin/products/{id}
pub async fn update(
    _admin: AdminKey,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProduct>,
) -> AppResult<Json<Product>> {
    let product = ProductRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Product",
            id,
        }))?;
    Ok(Json(product))
}

/// DELETE /api/v1/admin/products/{id}
pub async fn delete(
    _admin: AdminKey,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = ProductRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Product",
            id,
        }))
    }
}

async fn ensure_campaign(state: &AppState, id: DbId) -> AppResult<()> {
    CampaignRepo::find_by_id(&state.pool, id)
        .await?
        .map(|_| ())
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Campaign",
                id,
            })
        })
}
