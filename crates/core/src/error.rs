//! Domain error type shared across the workspace.

use crate::types::DbId;

/// Domain-level errors produced below the HTTP layer.
///
/// The API crate maps each variant to an HTTP status in its `AppError`
/// `IntoResponse` implementation.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// An entity lookup by id came back empty.
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// Input failed domain validation.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The request conflicts with existing state.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Missing or invalid credentials.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// No campaign is currently accepting enrollments.
    #[error("No active campaign")]
    NoActiveCampaign,

    /// A required product has no available review texts left, so a fresh
    /// enrollment must not be created.
    #[error("Campaign has no review texts left for product {product_id}")]
    CampaignFull { product_id: DbId },

    /// An unexpected internal failure.
    #[error("Internal error: {0}")]
    Internal(String),
}
