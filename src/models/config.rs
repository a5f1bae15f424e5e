//! Configuration model loaded from external sources.

use serde::Deserialize;

/// Default location of the layered configuration files.
pub const CONFIG_DIR: &str = "config";

fn default_pool_max_size() -> u32 {
    10
}

fn default_connection_timeout_secs() -> u64 {
    30
}

fn default_busy_timeout_secs() -> u64 {
    30
}

#[derive(Clone, Debug, Deserialize)]
/// Settings for the property store and its connection pool.
pub struct ServerConfig {
    pub database_url: String,
    /// Maximum number of pooled SQLite connections.
    #[serde(default = "default_pool_max_size")]
    pub pool_max_size: u32,
    /// How long a caller waits for a pooled connection before failing.
    #[serde(default = "default_connection_timeout_secs")]
    pub connection_timeout_secs: u64,
    /// How long SQLite waits on a locked database before failing.
    #[serde(default = "default_busy_timeout_secs")]
    pub busy_timeout_secs: u64,
    /// Apply pending embedded migrations on startup.
    #[serde(default)]
    pub run_migrations: bool,
}

#[cfg(feature = "cli")]
impl ServerConfig {
    /// Loads `config/default.yaml`, the optional `config/{APP_ENV}.yaml`
    /// overlay and `APP_*` environment variables, in that order of priority.
    pub fn load() -> Result<Self, config::ConfigError> {
        let app_env = std::env::var("APP_ENV").unwrap_or_else(|_| "local".into());

        config::Config::builder()
            .add_source(config::File::with_name(&format!("{CONFIG_DIR}/default")))
            .add_source(config::File::with_name(&format!("{CONFIG_DIR}/{app_env}")).required(false))
            .add_source(config::Environment::with_prefix("APP").try_parsing(true))
            .build()?
            .try_deserialize()
    }
}
