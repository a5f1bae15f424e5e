//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::thread;
use std::time::Duration;

use property_catalog::db::{DbPool, establish_connection_pool, run_migrations};
use property_catalog::domain::property::NewProperty;
use property_catalog::domain::types::{
    ImageUrl, OwnerId, Price, PropertyAddress, PropertyName, PropertyType,
};
use tempfile::TempDir;

/// A migrated SQLite database living in its own temporary directory.
///
/// The directory and every file SQLite creates in it (WAL, SHM) are removed
/// when the value is dropped.
pub struct TestDb {
    _dir: TempDir,
    pool: DbPool,
}

impl TestDb {
    pub fn new(filename: &str) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join(filename);
        let url = path.to_str().expect("utf-8 temp path").to_string();

        let pool = establish_connection_pool(&url).expect("create pool");
        run_migrations(&pool).expect("run migrations");

        Self { _dir: dir, pool }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }
}

pub fn listing(name: &str, address: &str, price: f64, kind: PropertyType) -> NewProperty {
    NewProperty::new(
        OwnerId::new("owner-1").unwrap(),
        PropertyName::new(name).unwrap(),
        PropertyAddress::new(address).unwrap(),
        Price::from_amount(price).unwrap(),
        ImageUrl::new("https://images.example.com/listing.jpg").unwrap(),
        kind,
    )
}

/// Keeps consecutive inserts on distinct `created_at` values.
pub fn tick() {
    thread::sleep(Duration::from_millis(5));
}
