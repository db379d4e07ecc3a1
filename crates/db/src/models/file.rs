//! Proof-file metadata models.
//!
//! Only metadata is tracked here; the file bytes live in external storage
//! under `storage_key`.

use reviewdrop_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `files` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProofFile {
    pub id: DbId,
    pub storage_key: String,
    pub original_filename: String,
    pub mime_type: String,
    pub size_bytes: i64,
    pub created_at: Timestamp,
}

/// DTO for registering an uploaded proof file.
#[derive(Debug, Deserialize)]
pub struct CreateProofFile {
    pub storage_key: String,
    pub original_filename: String,
    pub mime_type: String,
    pub size_bytes: i64,
}
