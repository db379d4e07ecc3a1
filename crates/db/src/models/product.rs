//! Product entity models and DTOs.

use reviewdrop_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::status::ProductStatus;

/// A row from the `products` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Product {
    pub id: DbId,
    pub campaign_id: DbId,
    pub title: String,
    pub position: i32,
    pub resource_link_url: String,
    pub review_link_url: String,
    pub status: ProductStatus,
    pub created_at: Timestamp,
}

/// DTO for creating a product under a campaign.
#[derive(Debug, Deserialize)]
pub struct CreateProduct {
    pub title: String,
    pub position: i32,
    pub resource_link_url: String,
    pub review_link_url: String,
    pub status: Option<ProductStatus>,
}

/// DTO for patching a product. All fields optional.
#[derive(Debug, Deserialize)]
pub struct UpdateProduct {
    pub title: Option<String>,
    pub position: Option<i32>,
    pub resource_link_url: Option<String>,
    pub review_link_url: Option<String>,
    pub status: Option<ProductStatus>,
}
