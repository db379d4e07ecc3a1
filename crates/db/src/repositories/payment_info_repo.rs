//! Repository for the `payment_info` table.

use reviewdrop_core::types::DbId;
use sqlx::PgPool;

use crate::models::payment::{PaymentInfo, SubmitPaymentInfo};

/// Column list for `payment_info` queries.
const COLUMNS: &str = "id, enrollment_id, method, email, full_name, \
    bank_account_number, bank_details, address_full, submitted_at";

/// Provides operations for payout details. One row per enrollment,
/// enforced by `uq_payment_info_enrollment`.
pub struct PaymentInfoRepo;

impl PaymentInfoRepo {
    /// Insert payout details for an enrollment.
    ///
    /// A second submission surfaces the 23505 unique violation, which
    /// the API layer maps to 409.
    pub async fn create(
        pool: &PgPool,
        enrollment_id: DbId,
        input: &SubmitPaymentInfo,
    ) -> Result<PaymentInfo, sqlx::Error> {
        let query = format!(
            "INSERT INTO payment_info \
                (enrollment_id, method, email, full_name, \
                 bank_account_number, bank_details, address_full) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PaymentInfo>(&query)
            .bind(enrollment_id)
            .bind(input.method)
            .bind(&input.email)
            .bind(&input.full_name)
            .bind(&input.bank_account_number)
            .bind(&input.bank_details)
            .bind(&input.address_full)
            .fetch_one(pool)
            .await
    }

    /// Fetch the payout details submitted for an enrollment, if any.
    pub async fn find_by_enrollment(
        pool: &PgPool,
        enrollment_id: DbId,
    ) -> Result<Option<PaymentInfo>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM payment_info WHERE enrollment_id = $1");
        sqlx::query_as::<_, PaymentInfo>(&query)
            .bind(enrollment_id)
            .fetch_optional(pool)
            .await
    }
}
