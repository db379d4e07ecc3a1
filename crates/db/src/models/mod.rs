//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches

pub mod assignment;
pub mod campaign;
pub mod enrollment;
pub mod file;
pub mod payment;
pub mod product;
pub mod status;
pub mod text_option;
