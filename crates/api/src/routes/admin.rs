//! Route definitions for the admin surface (mounted at `/admin`).
//!
//! Every handler takes the [`AdminKey`](crate::middleware::AdminKey)
//! extractor, so an invalid or missing capability token rejects before
//! any work happens.

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers::{admin_enrollment, campaign, maintenance, product, text_option};
use crate::state::AppState;

/// Admin routes.
pub fn router() -> Router<AppState> {
    Router::new()
        // Campaigns
        .route("/campaigns", get(campaign::list).post(campaign::create))
        .route("/campaigns/{id}", put(campaign::update))
        .route("/campaigns/{id}/clone", post(campaign::clone_campaign))
        // Products
        .route(
            "/campaigns/{id}/products",
            get(product::list_by_campaign).post(product::create),
        )
        .route("/campaigns/{id}/stock", get(product::stock_by_campaign))
        .route(
            "/products/{id}",
            put(product::update).delete(product::delete),
        )
        // Text options
        .route(
            "/products/{id}/text-options",
            get(text_option::list_by_product),
        )
        .route(
            "/products/{id}/text-options/bulk",
            post(text_option::bulk_add),
        )
        .route("/text-options", delete(text_option::delete_all))
        .route("/text-options/{id}/toggle", post(text_option::toggle))
        .route(
            "/text-options/cleanup-duplicates",
            post(text_option::cleanup_duplicates),
        )
        // Enrollment review
        .route("/enrollments", get(admin_enrollment::list))
        .route("/enrollments/{id}", get(admin_enrollment::get_by_id))
        .route(
            "/enrollments/{id}/state",
            post(admin_enrollment::advance_state),
        )
        .route(
            "/assignments/{id}/review",
            post(admin_enrollment::review_proof),
        )
        // Maintenance
        .route(
            "/purge-participant-data",
            post(maintenance::purge_participant_data),
        )
}
