//! Storage trait for the collector's click log.

use crate::domain::log_entry::LogEntry;
use crate::error::AppError;
use async_trait::async_trait;

/// Append-only storage for tracked clicks.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::FileClickLog`] - file-append log
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClickLog: Send + Sync {
    /// Appends one timestamped entry to the log.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] when the entry cannot be written.
    async fn append(&self, entry: &LogEntry) -> Result<(), AppError>;

    /// Removes the log storage entirely. Resetting a log that does not exist
    /// is a success.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] when existing storage cannot be removed.
    async fn reset(&self) -> Result<(), AppError>;

    /// Whether the storage is currently able to accept entries.
    ///
    /// Used by the health check endpoint.
    async fn health_check(&self) -> bool;
}
