//! Pure domain helpers shared by the data and API layers.
//!
//! Nothing in this crate performs I/O; everything here is unit-testable
//! without a database.

pub mod email;
pub mod error;
pub mod stock;
pub mod types;
