//! Tracker configuration, merged over defaults at construction.

use std::collections::HashSet;

use crate::domain::classification::TrackingLevel;
use crate::domain::element::Element;

/// Configuration for a [`crate::application::services::LinkTracker`].
///
/// Start from [`TrackerConfig::default`] and override what you need; the
/// config is immutable once the tracker is constructed.
///
/// ```
/// use link_tracker::domain::classification::TrackingLevel;
/// use link_tracker::domain::tracker_config::TrackerConfig;
///
/// let config = TrackerConfig::default()
///     .tracking_level(TrackingLevel::SameSite)
///     .track_middle_clicks(false);
/// ```
#[derive(Debug, Clone)]
pub struct TrackerConfig {
    /// Restricts tracking to events whose target lies inside this element.
    /// `None` tracks the whole tree.
    pub root: Option<Element>,
    /// Track right-click activations. Off by default: a right click fires for
    /// any context-menu use regardless of whether the link is followed, so
    /// the signal is noisy.
    pub track_right_clicks: bool,
    /// Track middle-click activations (background-tab opens). On by default.
    pub track_middle_clicks: bool,
    /// How local a link may be before it is exempted from tracking.
    pub tracking_level: TrackingLevel,
    /// Allow-list of destination schemes, lowercase.
    pub protocols: HashSet<String>,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            root: None,
            track_right_clicks: false,
            track_middle_clicks: true,
            tracking_level: TrackingLevel::default(),
            protocols: ["http", "https", "ftp"]
                .into_iter()
                .map(str::to_string)
                .collect(),
        }
    }
}

impl TrackerConfig {
    /// Restricts tracking to the subtree rooted at `root`.
    pub fn root(mut self, root: Element) -> Self {
        self.root = Some(root);
        self
    }

    pub fn track_right_clicks(mut self, enabled: bool) -> Self {
        self.track_right_clicks = enabled;
        self
    }

    pub fn track_middle_clicks(mut self, enabled: bool) -> Self {
        self.track_middle_clicks = enabled;
        self
    }

    pub fn tracking_level(mut self, level: TrackingLevel) -> Self {
        self.tracking_level = level;
        self
    }

    /// Replaces the scheme allow-list. Schemes are stored lowercase.
    pub fn protocols<I, S>(mut self, schemes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.protocols = schemes
            .into_iter()
            .map(|s| s.as_ref().to_ascii_lowercase())
            .collect();
        self
    }
}
