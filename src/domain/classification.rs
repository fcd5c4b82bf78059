//! Tracking-level decision procedure for link activations.
//!
//! Given a link destination, the current page, the activating button, and the
//! tracker configuration, [`classify`] decides whether the activation is
//! tracked at all and, if so, whether the tracking request rides on the
//! navigation itself (sync) or fires as a background beacon (async).

use url::Url;

use crate::domain::activation::ActivationButton;
use crate::domain::tracker_config::TrackerConfig;
use crate::utils::url_match::{path_and_query, resolve_href, same_host};

/// How "local" a link may be before it is exempted from tracking.
///
/// Levels are cumulative: each admits everything the previous level admits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum TrackingLevel {
    /// Track links leaving the current site only (level 0).
    #[default]
    ExternalOnly,
    /// Additionally track links to other pages on the current site (level 1).
    SameSite,
    /// Additionally track same-page fragment links (level 2).
    SamePage,
}

impl TryFrom<u8> for TrackingLevel {
    type Error = u8;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        match level {
            0 => Ok(Self::ExternalOnly),
            1 => Ok(Self::SameSite),
            2 => Ok(Self::SamePage),
            other => Err(other),
        }
    }
}

/// Outcome of classifying a single link activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackDecision {
    /// Do not track this activation.
    Skip,
    /// Track by rewriting the link destination so the navigation itself
    /// carries the tracking request.
    Sync,
    /// Track with a fire-and-forget background request.
    Async,
}

/// Classifies a link activation against the current page.
///
/// The destination is resolved against `page` first, so relative hrefs
/// behave the way navigation would. Unparsable destinations are never
/// tracked.
///
/// Skip rules, applied in order:
///
/// 1. destination scheme not in `config.protocols`;
/// 2. http/https destination on the page's host, below
///    [`TrackingLevel::SameSite`];
/// 3. same host and same path+query, below [`TrackingLevel::SamePage`].
///
/// Surviving activations are async when the destination is the page itself
/// (fragment navigation, no page load to ride on) or when the button was
/// right (the navigation, if any, happens via the context menu and cannot be
/// redirected); sync otherwise.
pub fn classify(
    href: &str,
    page: &Url,
    button: ActivationButton,
    config: &TrackerConfig,
) -> TrackDecision {
    let Some(dest) = resolve_href(page, href) else {
        return TrackDecision::Skip;
    };

    if !config.protocols.contains(dest.scheme()) {
        return TrackDecision::Skip;
    }

    let is_http = matches!(dest.scheme(), "http" | "https");
    let on_page_host = is_http && same_host(&dest, page);
    let on_page_path = on_page_host && path_and_query(&dest) == path_and_query(page);

    if on_page_host && config.tracking_level < TrackingLevel::SameSite {
        return TrackDecision::Skip;
    }
    if on_page_path && config.tracking_level < TrackingLevel::SamePage {
        return TrackDecision::Skip;
    }

    if on_page_path || button == ActivationButton::Right {
        TrackDecision::Async
    } else {
        TrackDecision::Sync
    }
}

/// Whether `href` points at the current page, differing only by fragment.
pub fn is_same_page_link(href: &str, page: &Url) -> bool {
    let Some(dest) = resolve_href(page, href) else {
        return false;
    };

    matches!(dest.scheme(), "http" | "https")
        && same_host(&dest, page)
        && path_and_query(&dest) == path_and_query(page)
}
