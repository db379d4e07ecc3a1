//! Route definitions for the public participant flow.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{assignment, campaign, enrollment, file};
use crate::state::AppState;

/// Public routes mounted directly under `/api/v1`.
///
/// ```text
/// GET  /campaigns/active          -> campaign::get_active
/// POST /enrollments               -> enrollment::create
/// GET  /enrollments/{id}          -> enrollment::get_by_id
/// POST /enrollments/{id}/payment  -> enrollment::submit_payment
/// POST /assignments/{id}/proof    -> assignment::attach_proof
/// POST /files                     -> file::create
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/campaigns/active", get(campaign::get_active))
        .route("/enrollments", post(enrollment::create))
        .route("/enrollments/{id}", get(enrollment::get_by_id))
        .route("/enrollments/{id}/payment", post(enrollment::submit_payment))
        .route("/assignments/{id}/proof", post(assignment::attach_proof))
        .route("/files", post(file::create))
}
