//! Handlers for the `/files` resource (proof-file metadata registry).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use reviewdrop_core::error::CoreError;

use reviewdrop_db::models::file::{CreateProofFile, ProofFile};
use reviewdrop_db::repositories::FileRepo;

use crate::error::AppResult;
use crate::state::AppState;

/// POST /api/v1/files
///
/// Registers an uploaded file's metadata. The bytes themselves go to
/// external storage; this record is what assignments reference.
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateProofFile>,
) -> AppResult<(StatusCode, Json<ProofFile>)> {
    if input.storage_key.trim().is_empty() {
        return Err(CoreError::Validation("storage_key must not be empty".into()).into());
    }
    if input.size_bytes < 0 {
        return Err(CoreError::Validation("size_bytes must not be negative".into()).into());
    }

    let file = FileRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(file)))
}
