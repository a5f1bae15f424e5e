//! Database and configuration models shared across the catalog.

pub mod config;
pub mod property;
