//! Campaign entity models and DTOs.

use reviewdrop_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::status::CampaignStatus;

/// A row from the `campaigns` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Campaign {
    pub id: DbId,
    pub name: String,
    pub status: CampaignStatus,
    pub required_products_count: i32,
    pub welcome_text_md: String,
    pub payment_instructions_md: Option<String>,
    pub support_email: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a campaign via the admin API.
#[derive(Debug, Deserialize)]
pub struct CreateCampaign {
    pub name: String,
    pub status: Option<CampaignStatus>,
    pub required_products_count: Option<i32>,
    pub welcome_text_md: Option<String>,
    pub payment_instructions_md: Option<String>,
    pub support_email: Option<String>,
}

/// DTO for patching a campaign. All fields optional.
#[derive(Debug, Deserialize)]
pub struct UpdateCampaign {
    pub name: Option<String>,
    pub status: Option<CampaignStatus>,
    pub required_products_count: Option<i32>,
    pub welcome_text_md: Option<String>,
    pub payment_instructions_md: Option<String>,
    pub support_email: Option<String>,
}

/// DTO for `POST /admin/campaigns/{id}/clone`.
///
/// `clone_text_options` only has an effect when `clone_products` is also
/// set; there are no destination products to seed otherwise.
#[derive(Debug, Deserialize)]
pub struct CloneCampaign {
    #[serde(default)]
    pub clone_products: bool,
    #[serde(default)]
    pub clone_text_options: bool,
}
