//! DTO modules that shape domain records for catalog callers.

pub mod property;
