//! No-op beacon implementation for tests or disabled tracking.

use super::service::{Beacon, BeaconResult};
use async_trait::async_trait;
use tracing::debug;

/// A beacon that drops every request on the floor.
///
/// # Use Cases
///
/// - Unit tests that exercise classification without network I/O
/// - Deployments where async tracking is disabled but the sync path stays on
pub struct NullBeacon;

impl NullBeacon {
    /// Creates a new NullBeacon instance.
    pub fn new() -> Self {
        debug!("Using NullBeacon (async tracking disabled)");
        Self
    }
}

impl Default for NullBeacon {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Beacon for NullBeacon {
    async fn send(&self, _url: &str) -> BeaconResult<()> {
        Ok(())
    }
}
