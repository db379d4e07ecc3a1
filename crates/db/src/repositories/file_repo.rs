//! Repository for the `files` table (proof-file metadata).

use reviewdrop_core::types::DbId;
use sqlx::PgPool;

use crate::models::file::{CreateProofFile, ProofFile};

/// Column list for `files` queries.
const COLUMNS: &str = "id, storage_key, original_filename, mime_type, size_bytes, created_at";

/// Provides operations for the proof-file metadata registry.
pub struct FileRepo;

impl FileRepo {
    /// Register an uploaded file, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateProofFile,
    ) -> Result<ProofFile, sqlx::Error> {
        let query = format!(
            "INSERT INTO files (storage_key, original_filename, mime_type, size_bytes) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProofFile>(&query)
            .bind(&input.storage_key)
            .bind(&input.original_filename)
            .bind(&input.mime_type)
            .bind(input.size_bytes)
            .fetch_one(pool)
            .await
    }

    /// Find a file record by its primary key.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ProofFile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM files WHERE id = $1");
        sqlx::query_as::<_, ProofFile>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
