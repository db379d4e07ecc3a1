//! Capability-token guard for the admin surface.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use reviewdrop_core::error::CoreError;
use sha2::{Digest, Sha256};

use crate::error::AppError;
use crate::state::AppState;

/// Proof that the request carried the admin capability token.
///
/// Use as an extractor parameter in any handler on the admin surface:
///
/// ```ignore
/// async fn list(_admin: AdminKey, State(state): State<AppState>) -> AppResult<...> { ... }
/// ```
///
/// The presented token is compared against `ADMIN_TOKEN` by SHA-256
/// digest so the comparison does not leak a length or prefix through
/// timing. With no token configured the surface is closed entirely.
#[derive(Debug, Clone, Copy)]
pub struct AdminKey;

impl FromRequestParts<AppState> for AdminKey {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(expected) = state.config.admin_token.as_deref() else {
            return Err(AppError::Core(CoreError::Unauthorized(
                "Admin access is not configured".into(),
            )));
        };

        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing Authorization header".into(),
                ))
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            ))
        })?;

        if Sha256::digest(token.as_bytes()) != Sha256::digest(expected.as_bytes()) {
            return Err(AppError::Core(CoreError::Unauthorized(
                "Invalid admin token".into(),
            )));
        }

        Ok(AdminKey)
    }
}
