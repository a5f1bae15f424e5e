//! Domain aggregates exposed by the property catalog service layer.

pub mod filter;
pub mod property;
pub mod types;
