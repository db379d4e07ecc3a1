//! Request guards applied at the routing layer.

pub mod admin;

pub use admin::AdminKey;
