//! Bulk admin maintenance operations spanning multiple tables.

use serde::Serialize;
use sqlx::PgPool;

/// Row counts removed by a participant-data purge.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PurgeCounts {
    pub payment_info: u64,
    pub assignments: u64,
    pub enrollments: u64,
    pub files: u64,
}

/// Destructive inventory-reset helpers. Admin surface only.
pub struct MaintenanceRepo;

impl MaintenanceRepo {
    /// Delete every enrollment and everything hanging off it: payment
    /// details, assignments, and proof-file records, in foreign-key
    /// order inside one transaction.
    ///
    /// Campaigns, products, and text options survive, but claimed text
    /// options are NOT released; wipe or re-seed the text inventory
    /// afterwards if the campaign is being reset for a fresh run.
    pub async fn purge_participant_data(pool: &PgPool) -> Result<PurgeCounts, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let payment_info = sqlx::query("DELETE FROM payment_info")
            .execute(&mut *tx)
            .await?
            .rows_affected();
        let assignments = sqlx::query("DELETE FROM assignments")
            .execute(&mut *tx)
            .await?
            .rows_affected();
        let enrollments = sqlx::query("DELETE FROM enrollments")
            .execute(&mut *tx)
            .await?
            .rows_affected();
        let files = sqlx::query("DELETE FROM files")
            .execute(&mut *tx)
            .await?
            .rows_affected();

        tx.commit().await?;
        Ok(PurgeCounts {
            payment_info,
            assignments,
            enrollments,
            files,
        })
    }
}
