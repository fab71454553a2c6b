//! Storage-specific error type wrapping sqlx errors.

use std::future::Future;
use std::time::Duration;

use wardhub_domain::error::WardHubError;

/// Errors originating from the `SQLite` storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// A query or connection failed.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Failed to run migrations.
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// The operation did not complete within the configured bound.
    #[error("operation timed out after {0:?}")]
    Timeout(Duration),
}

impl From<StorageError> for WardHubError {
    fn from(err: StorageError) -> Self {
        Self::Storage(Box::new(err))
    }
}

/// Run a storage operation, failing with [`StorageError::Timeout`] once
/// `limit` elapses.
pub(crate) async fn bounded<T, F>(limit: Duration, operation: F) -> Result<T, StorageError>
where
    F: Future<Output = Result<T, sqlx::Error>>,
{
    match tokio::time::timeout(limit, operation).await {
        Ok(result) => result.map_err(StorageError::from),
        Err(_) => {
            tracing::warn!(?limit, "storage operation timed out");
            Err(StorageError::Timeout(limit))
        }
    }
}
