//! Handlers for destructive admin maintenance actions.

use axum::extract::State;
use axum::Json;

use reviewdrop_db::repositories::maintenance_repo::PurgeCounts;
use reviewdrop_db::repositories::MaintenanceRepo;

use crate::error::AppResult;
use crate::middleware::AdminKey;
use crate::state::AppState;

/// POST /api/v1/admin/purge-participant-data
///
/// Wipes all enrollments, assignments, payment details, and proof-file
/// records. Campaign configuration and text inventory stay in place.
pub async fn purge_participant_data(
    _admin: AdminKey,
    State(state): State<AppState>,
) -> AppResult<Json<PurgeCounts>> {
    let counts = MaintenanceRepo::purge_participant_data(&state.pool).await?;
    tracing::info!(
        enrollments = counts.enrollments,
        assignments = counts.assignments,
        "purged participant data"
    );
    Ok(Json(counts))
}
