//! DTOs for the click tracking endpoint.

use serde::Deserialize;

/// Query parameters accepted by `GET /track`.
///
/// Everything is optional on the wire; the collector defaults missing values
/// rather than rejecting the request, matching the log-entry defaulting rules
/// in [`crate::domain::log_entry::LogEntry::from_params`].
#[derive(Debug, Deserialize)]
pub struct TrackParams {
    /// `log` or `reset`; anything else answers "unknown action".
    pub action: Option<String>,
    /// Destination the user followed.
    pub url: Option<String>,
    /// Button vocabulary: `left`, `middle`, `right`, `key`.
    pub button: Option<String>,
    /// `"1"` requests a redirect response to `url`.
    pub redirect: Option<String>,
    /// Caller-chosen correlation reference.
    pub logref: Option<String>,
}
