//! Payout detail models and per-method validation.

use reviewdrop_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::status::PaymentMethod;

/// A row from the `payment_info` table. One per enrollment.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PaymentInfo {
    pub id: DbId,
    pub enrollment_id: DbId,
    pub method: PaymentMethod,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub bank_account_number: Option<String>,
    pub bank_details: Option<String>,
    pub address_full: Option<String>,
    pub submitted_at: Timestamp,
}

/// DTO for `POST /enrollments/{id}/payment`.
#[derive(Debug, Deserialize)]
pub struct SubmitPaymentInfo {
    pub method: PaymentMethod,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub bank_account_number: Option<String>,
    pub bank_details: Option<String>,
    pub address_full: Option<String>,
}

impl SubmitPaymentInfo {
    /// Names of required fields that are missing or blank for the chosen
    /// method. Empty means the submission is acceptable.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        let blank = |f: &Option<String>| f.as_deref().map_or(true, |s| s.trim().is_empty());

        match self.method {
            PaymentMethod::Paypal => {
                if blank(&self.email) {
                    missing.push("email");
                }
            }
            PaymentMethod::Wise => {
                if blank(&self.email) {
                    missing.push("email");
                }
                if blank(&self.full_name) {
                    missing.push("full_name");
                }
            }
            PaymentMethod::BankWire => {
                if blank(&self.full_name) {
                    missing.push("full_name");
                }
                if blank(&self.bank_account_number) {
                    missing.push("bank_account_number");
                }
                if blank(&self.bank_details) {
                    missing.push("bank_details");
                }
                if blank(&self.address_full) {
                    missing.push("address_full");
                }
            }
        }

        missing
    }
}
