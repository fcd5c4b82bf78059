//! Beacon transport trait and error types.

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur while sending a tracking beacon.
#[derive(Debug, Error)]
pub enum BeaconError {
    #[error("Beacon client error: {0}")]
    Client(String),
    #[error("Beacon request error: {0}")]
    Request(String),
}

/// Result type for beacon operations.
pub type BeaconResult<T> = Result<T, BeaconError>;

/// Transport for asynchronous (fire-and-forget) tracking requests.
///
/// Implementations must be thread-safe. Callers never await a response body
/// and never retry; a failed send is logged and dropped, since tracking must
/// not disturb the user's navigation.
///
/// # Implementations
///
/// - [`crate::infrastructure::beacon::HttpBeacon`] - HTTP GET via reqwest
/// - [`crate::infrastructure::beacon::NullBeacon`] - No-op for tests and
///   tracking-disabled setups
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Beacon: Send + Sync {
    /// Issues a non-blocking GET to the tracking URL.
    ///
    /// # Errors
    ///
    /// Returns [`BeaconError`] when the request cannot be sent. Callers treat
    /// errors as droppable.
    async fn send(&self, url: &str) -> BeaconResult<()>;
}
