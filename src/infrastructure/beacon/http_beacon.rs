//! HTTP beacon implementation backed by reqwest.

use super::service::{Beacon, BeaconError, BeaconResult};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// Sends tracking beacons as plain HTTP GET requests.
///
/// The classic implementation of this transport is a 1x1 tracking pixel; any
/// non-blocking GET works, so the response body is never read. Requests carry
/// a short timeout so a slow collector cannot pile up in-flight tasks.
pub struct HttpBeacon {
    client: reqwest::Client,
}

impl HttpBeacon {
    /// Creates a beacon client with the given request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`BeaconError::Client`] if the underlying HTTP client cannot
    /// be constructed.
    pub fn new(timeout: Duration) -> BeaconResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BeaconError::Client(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Beacon for HttpBeacon {
    async fn send(&self, url: &str) -> BeaconResult<()> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| BeaconError::Request(e.to_string()))?;

        debug!(status = %response.status(), %url, "beacon sent");
        Ok(())
    }
}
