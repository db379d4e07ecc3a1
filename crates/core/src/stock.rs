//! Low-stock detection for per-product text pools.

use crate::types::DbId;

/// A product's available-text count drops below this before the admin is
/// pinged. Matches the alerting threshold used by the original campaign
/// operators.
pub const LOW_STOCK_THRESHOLD: i64 = 5;

/// One product's remaining inventory.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ProductStock {
    pub product_id: DbId,
    pub available: i64,
}

/// Filter a campaign's per-product counts down to the ones worth alerting
/// about. Order of the input is preserved.
pub fn low_stock(counts: &[ProductStock]) -> Vec<&ProductStock> {
    counts
        .iter()
        .filter(|s| s.available < LOW_STOCK_THRESHOLD)
        .collect()
}
