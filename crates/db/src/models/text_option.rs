//! Review-text pool entity models and DTOs.

use reviewdrop_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::status::TextOptionStatus;

/// A row from the `product_text_options` table.
///
/// At rest, `status == Assigned` holds exactly when `assigned_to_email`
/// and `assigned_at` are both set; the table CHECK constraint enforces it.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TextOption {
    pub id: DbId,
    pub product_id: DbId,
    pub text_md: String,
    pub status: TextOptionStatus,
    pub assigned_to_email: Option<String>,
    pub assigned_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// DTO for `POST /admin/products/{id}/text-options/bulk`.
#[derive(Debug, Deserialize)]
pub struct BulkAddTextOptions {
    /// One markdown review text per entry; all inserted as `available`.
    pub texts: Vec<String>,
}
