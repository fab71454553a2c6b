//! `SQLite` connection pool setup and migration runner.

use std::str::FromStr;
use std::time::Duration;

use sqlx::SqlitePool;
use sqlx::sqlite::SqliteConnectOptions;

use crate::error::StorageError;

/// Bound applied to every storage round trip unless configured otherwise.
pub const DEFAULT_OPERATION_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for the `SQLite` storage adapter.
pub struct Config {
    /// `SQLite` connection URL (e.g. `sqlite:wardhub.db` or `sqlite::memory:`).
    pub database_url: String,
    /// Upper bound for connecting and for each query.
    pub operation_timeout: Duration,
}

impl Config {
    /// Configuration for `database_url` with the default operation timeout.
    #[must_use]
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            operation_timeout: DEFAULT_OPERATION_TIMEOUT,
        }
    }

    /// Build a [`Database`] from this configuration.
    ///
    /// Creates the connection pool, creates the database file if missing,
    /// and runs all pending migrations. A migration failure is fatal: the
    /// unique constraints on domain identities live there.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the connection or migrations fail.
    pub async fn build(self) -> Result<Database, StorageError> {
        Database::initialize(&self.database_url, self.operation_timeout).await
    }
}

/// Holds the `SQLite` connection pool and provides access to it.
///
/// Construct exactly one per process and hand clones of [`Database::pool`]
/// to the repositories.
pub struct Database {
    pool: SqlitePool,
    operation_timeout: Duration,
}

impl Database {
    /// Connect to the database and run migrations.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the connection or migrations fail.
    async fn initialize(
        database_url: &str,
        operation_timeout: Duration,
    ) -> Result<Self, StorageError> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

        let pool =
            crate::error::bounded(operation_timeout, SqlitePool::connect_with(options)).await?;

        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("database ready, migrations applied");

        Ok(Self {
            pool,
            operation_timeout,
        })
    }

    /// Borrow the underlying connection pool.
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Bound configured for every storage round trip.
    #[must_use]
    pub fn operation_timeout(&self) -> Duration {
        self.operation_timeout
    }

    /// Close every pooled connection, waiting for checked-out ones to return.
    pub async fn close(self) {
        self.pool.close().await;
        tracing::info!("database connections closed");
    }
}
