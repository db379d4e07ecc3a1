pub mod admin;
pub mod enrollments;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /campaigns/active                         active campaign (public)
///
/// /enrollments                              enroll / revisit (POST)
/// /enrollments/{id}                         instructions view (GET)
/// /enrollments/{id}/payment                 submit payout details (POST)
/// /assignments/{id}/proof                   attach proof file (POST)
/// /files                                    register proof metadata (POST)
///
/// /admin/campaigns                          list, create
/// /admin/campaigns/{id}                     update
/// /admin/campaigns/{id}/clone               duplicate campaign (POST)
/// /admin/campaigns/{id}/products            list, create
/// /admin/campaigns/{id}/stock               available-text counts
/// /admin/products/{id}                      update, delete
/// /admin/products/{id}/text-options         list
/// /admin/products/{id}/text-options/bulk    bulk insert (POST)
/// /admin/text-options                       delete all (DELETE)
/// /admin/text-options/{id}/toggle           enable/disable (POST)
/// /admin/text-options/cleanup-duplicates    dedupe inventory (POST)
/// /admin/enrollments                        list
/// /admin/enrollments/{id}                   detail
/// /admin/enrollments/{id}/state             approve / mark paid (POST)
/// /admin/assignments/{id}/review            accept/reject proof (POST)
/// /admin/purge-participant-data             wipe enrollments (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(enrollments::router())
        .nest("/admin", admin::router())
}
