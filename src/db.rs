//! SQLite pool setup and embedded schema migrations for the catalog store.

use std::time::Duration;

use diesel::connection::SimpleConnection;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool, PoolError, PooledConnection};
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

use crate::models::config::ServerConfig;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::property::register_sql_functions;

pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;
pub type DbConnection = PooledConnection<ConnectionManager<SqliteConnection>>;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(30);

/// Pragmas and SQL functions applied to every connection the pool opens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlitePragmas {
    /// Enables write-ahead logging.
    pub wal: bool,
    /// How long a statement waits on a locked database before failing.
    pub busy_timeout: Duration,
}

impl SqlitePragmas {
    pub fn new(busy_timeout: Duration) -> Self {
        Self {
            wal: true,
            busy_timeout,
        }
    }

    /// The batch executed on acquire.
    pub fn to_sql(&self) -> String {
        let mut sql = String::new();
        if self.wal {
            sql.push_str("PRAGMA journal_mode = WAL; PRAGMA synchronous = NORMAL; ");
        }
        sql.push_str(&format!(
            "PRAGMA busy_timeout = {};",
            self.busy_timeout.as_millis()
        ));
        sql
    }
}

impl Default for SqlitePragmas {
    fn default() -> Self {
        Self::new(DEFAULT_BUSY_TIMEOUT)
    }
}

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for SqlitePragmas {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        conn.batch_execute(&self.to_sql())
            .and_then(|()| register_sql_functions(conn))
            .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Pool for `database_url` with r2d2's default sizing.
pub fn establish_connection_pool(database_url: &str) -> Result<DbPool, PoolError> {
    Pool::builder()
        .connection_customizer(Box::new(SqlitePragmas::default()))
        .build(ConnectionManager::<SqliteConnection>::new(database_url))
}

/// Pool sized and timed according to `config`.
pub fn establish_configured_pool(config: &ServerConfig) -> Result<DbPool, PoolError> {
    log::info!(
        "Opening property store at {} (max {} connections)",
        config.database_url,
        config.pool_max_size
    );

    Pool::builder()
        .max_size(config.pool_max_size.max(1))
        .connection_timeout(Duration::from_secs(config.connection_timeout_secs))
        .connection_customizer(Box::new(SqlitePragmas::new(Duration::from_secs(
            config.busy_timeout_secs,
        ))))
        .build(ConnectionManager::<SqliteConnection>::new(&config.database_url))
}

pub fn get_connection(pool: &DbPool) -> Result<DbConnection, PoolError> {
    pool.get().map_err(|e| {
        log::error!("Failed to get connection from pool: {e}");
        e
    })
}

/// Applies pending embedded migrations and returns how many ran.
pub fn run_migrations(pool: &DbPool) -> RepositoryResult<usize> {
    let mut conn = get_connection(pool)?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| RepositoryError::DatabaseError(format!("Migration failed: {e}")))?;

    for version in &applied {
        log::info!("Applied migration {version}");
    }

    Ok(applied.len())
}
