//! Status enums mapping to the PostgreSQL enum types created in
//! `db/migrations/0001_create_status_enums.sql`.
//!
//! Variant order matters for `enrollment_state`: PostgreSQL compares enum
//! values by declaration order, and the monotonic state-advance query
//! relies on `state < $new` working natively.

use serde::{Deserialize, Serialize};

/// Campaign lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "campaign_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum CampaignStatus {
    Active,
    Paused,
    Archived,
}

/// Product visibility on the enrollment flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "product_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ProductStatus {
    Active,
    Hidden,
}

/// Review text pool state.
///
/// `Available` rows are claimable; `Assigned` rows are functionally
/// immutable (the claim fields are set); `Disabled` rows are parked by an
/// admin and never handed out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text_option_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TextOptionStatus {
    Available,
    Assigned,
    Disabled,
}

/// Participant progress through a campaign. Advances monotonically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "enrollment_state", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum EnrollmentState {
    Assigned,
    InProgress,
    Submitted,
    Approved,
    Paid,
}

impl EnrollmentState {
    /// Position in the lifecycle, mirroring the database enum order.
    pub fn rank(self) -> u8 {
        match self {
            EnrollmentState::Assigned => 0,
            EnrollmentState::InProgress => 1,
            EnrollmentState::Submitted => 2,
            EnrollmentState::Approved => 3,
            EnrollmentState::Paid => 4,
        }
    }
}

/// Per-product assignment review state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "assignment_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum AssignmentStatus {
    Assigned,
    ProofUploaded,
    Accepted,
    Rejected,
}

/// Payout channel chosen by the participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "payment_method", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Paypal,
    Wise,
    BankWire,
}
