//! Handlers for the admin text-option inventory.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use reviewdrop_core::error::CoreError;
use reviewdrop_core::types::DbId;
use serde::Serialize;

use reviewdrop_db::models::status::TextOptionStatus;
use reviewdrop_db::models::text_option::{BulkAddTextOptions, TextOption};
use reviewdrop_db::repositories::{ProductRepo, TextOptionRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::AdminKey;
use crate::state::AppState;

/// GET /api/v1/admin/products/{product_id}/text-options
pub async fn list_by_product(
    _admin: AdminKey,
    State(state): State<AppState>,
    Path(product_id): Path<DbId>,
) -> AppResult<Json<Vec<TextOption>>> {
    ensure_product(&state, product_id).await?;
    let options = TextOptionRepo::list_by_product(&state.pool, product_id).await?;
    Ok(Json(options))
}

/// Response body for a bulk insert.
#[derive(Debug, Serialize)]
pub struct BulkAddResponse {
    pub inserted: u64,
}

/// POST /api/v1/admin/products/{product_id}/text-options/bulk
///
/// Inserts a batch of review texts, all `available`.
pub async fn bulk_add(
    _admin: AdminKey,
    State(state): State<AppState>,
    Path(product_id): Path<DbId>,
    Json(input): Json<BulkAddTextOptions>,
) -> AppResult<(StatusCode, Json<BulkAddResponse>)> {
    ensure_product(&state, product_id).await?;

    let texts: Vec<String> = input
        .texts
        .into_iter()
        .filter(|t| !t.trim().is_empty())
        .collect();
    if texts.is_empty() {
        return Err(CoreError::Validation("texts must contain at least one non-empty entry".into()).into());
    }

    let inserted = TextOptionRepo::bulk_add(&state.pool, product_id, &texts).await?;
    tracing::info!(product_id, inserted, "bulk-added text options");
    Ok((StatusCode::CREATED, Json(BulkAddResponse { inserted })))
}

/// POST /api/v1/admin/text-options/{id}/toggle
///
/// Flips an option between `available` and `disabled`. Assigned options
/// are immutable and conflict.
pub async fn toggle(
    _admin: AdminKey,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<TextOption>> {
    let option = TextOptionRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "TextOption",
            id,
        }))?;

    let target = match option.status {
        TextOptionStatus::Available => TextOptionStatus::Disabled,
        TextOptionStatus::Disabled => TextOptionStatus::Available,
        TextOptionStatus::Assigned => {
            return Err(CoreError::Conflict(
                "Assigned texts cannot be enabled or disabled".into(),
            )
            .into());
        }
    };

    let updated = TextOptionRepo::set_status(&state.pool, id, target)
        .await?
        .ok_or_else(|| {
            // Lost a race against a claim between the read and the update.
            AppError::Core(CoreError::Conflict(
                "Text option was claimed concurrently".into(),
            ))
        })?;
    Ok(Json(updated))
}

/// Response body for inventory-wide delete operations.
#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub deleted: u64,
}

/// POST /api/v1/admin/text-options/cleanup-duplicates
///
/// Removes duplicate texts per product, preserving assigned copies.
pub async fn cleanup_duplicates(
    _admin: AdminKey,
    State(state): State<AppState>,
) -> AppResult<Json<DeletedResponse>> {
    let deleted = TextOptionRepo::cleanup_duplicates(&state.pool).await?;
    tracing::info!(deleted, "cleaned up duplicate text options");
    Ok(Json(DeletedResponse { deleted }))
}

/// DELETE /api/v1/admin/text-options
///
/// Wipes the entire inventory. Fails while assignments still reference
/// options; clear enrollments first.
pub async fn delete_all(
    _admin: AdminKey,
    State(state): State<AppState>,
) -> AppResult<Json<DeletedResponse>> {
    let deleted = TextOptionRepo::delete_all(&state.pool).await?;
    tracing::info!(deleted, "deleted all text options");
    Ok(Json(DeletedResponse { deleted }))
}

async fn ensure_product(state: &AppState, id: DbId) -> AppResult<()> {
    ProductRepo::find_by_id(&state.pool, id)
        .await?
        .map(|_| ())
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Product",
                id,
            })
        })
}
