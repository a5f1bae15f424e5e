//! Runs one catalog search and prints the resulting page as JSON.
//!
//! Usage: `search_properties "name=loft&minPrice=500000&pageNumber=2"`

use std::env;

use dotenvy::dotenv;
use serde_json::json;

use property_catalog::db::{establish_configured_pool, run_migrations};
use property_catalog::domain::filter::FilterSpec;
use property_catalog::forms::property::SearchQuery;
use property_catalog::models::config::ServerConfig;
use property_catalog::repository::DieselRepository;
use property_catalog::services::property::list_properties;

fn main() {
    dotenv().ok(); // Load .env file
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let server_config = match ServerConfig::load() {
        Ok(server_config) => server_config,
        Err(err) => {
            log::error!("Error loading server config: {err}");
            std::process::exit(1);
        }
    };

    let raw_query = env::args().nth(1).unwrap_or_default();
    let query = match SearchQuery::parse(&raw_query) {
        Ok(query) => query,
        Err(err) => {
            log::error!("Invalid search query `{raw_query}`: {err}");
            std::process::exit(2);
        }
    };

    let pool = match establish_configured_pool(&server_config) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };

    if server_config.run_migrations {
        if let Err(e) = run_migrations(&pool) {
            log::error!("Failed to run migrations: {e}");
            std::process::exit(1);
        }
    }

    let repo = DieselRepository::new(pool);

    let page = match list_properties(&repo, &FilterSpec::from(query)) {
        Ok(page) => page,
        Err(e) => {
            log::error!("Search failed: {e}");
            std::process::exit(1);
        }
    };

    let output = json!({
        "items": page.items,
        "pageNumber": page.page_number,
        "pageSize": page.page_size,
        "totalCount": page.total_count,
        "totalPages": page.total_pages(),
        "pages": page.pages(),
    });

    match serde_json::to_string_pretty(&output) {
        Ok(text) => println!("{text}"),
        Err(e) => {
            log::error!("Failed to render results: {e}");
            std::process::exit(1);
        }
    }
}
