//! Link activation tracking service.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tracing::debug;
use url::Url;

use crate::domain::activation::{
    ActivationButton, ActivationState, InputEvent, LinkActivation, MouseButton,
};
use crate::domain::buttons::{ButtonNormalizer, W3cButtons};
use crate::domain::classification::{self, TrackDecision, classify};
use crate::domain::element::{Element, parent_link_for};
use crate::domain::tracker_config::TrackerConfig;
use crate::infrastructure::beacon::Beacon;

/// How long a sync-tracked link keeps the tracking URL before its original
/// destination is restored.
///
/// Long enough for the navigation to pick up the rewritten destination, short
/// enough that the visible (and copyable) link reverts almost immediately.
pub const RESTORE_DELAY: Duration = Duration::from_millis(100);

/// Caller-supplied callback that turns a qualifying activation into a
/// tracking URL.
///
/// `redirect_needed` is `true` for sync dispatches, where the returned URL
/// must eventually redirect to the link's real destination. Returning `None`
/// skips tracking for this activation.
pub type UrlBuilder = dyn Fn(&LinkActivation, bool) -> Option<String> + Send + Sync;

/// Classifies input events into link activations and dispatches tracking
/// requests.
///
/// The tracker consumes already-dispatched input notifications via
/// [`LinkTracker::handle_event`]; it does not subscribe to anything itself.
/// Feed it keyboard-release, mouse-release, and click events for the subtree
/// it should watch and it takes care of the rest: button normalization,
/// ancestor walking to the activated anchor, the skip/sync/async decision,
/// and dispatch.
///
/// Dispatch schedules work (the destination-restore timer, the beacon
/// request) on the ambient Tokio runtime, so events must be handled from
/// within one.
///
/// # Failure Policy
///
/// Tracking must never break navigation. Malformed destinations, missing
/// anchors, a declining URL builder, and beacon failures all end the same
/// way: nothing happens.
pub struct LinkTracker {
    build_url: Arc<UrlBuilder>,
    page: Url,
    config: TrackerConfig,
    buttons: Arc<dyn ButtonNormalizer>,
    beacon: Arc<dyn Beacon>,
    state: Mutex<ActivationState>,
}

impl LinkTracker {
    /// Creates a tracker with the default W3C button normalizer.
    ///
    /// # Arguments
    ///
    /// - `build_url` - maps qualifying activations to tracking URLs
    /// - `page` - the URL of the page the tracked tree belongs to;
    ///   classification compares every destination against it
    /// - `config` - tracker options, see [`TrackerConfig`]
    /// - `beacon` - transport for async (fire-and-forget) dispatches
    pub fn new<F>(build_url: F, page: Url, config: TrackerConfig, beacon: Arc<dyn Beacon>) -> Self
    where
        F: Fn(&LinkActivation, bool) -> Option<String> + Send + Sync + 'static,
    {
        Self::with_normalizer(build_url, page, config, beacon, Arc::new(W3cButtons))
    }

    /// Creates a tracker with an explicit button normalizer for host
    /// environments that report legacy button codes.
    pub fn with_normalizer<F>(
        build_url: F,
        page: Url,
        config: TrackerConfig,
        beacon: Arc<dyn Beacon>,
        buttons: Arc<dyn ButtonNormalizer>,
    ) -> Self
    where
        F: Fn(&LinkActivation, bool) -> Option<String> + Send + Sync + 'static,
    {
        Self {
            build_url: Arc::new(build_url),
            page,
            config,
            buttons,
            beacon,
            state: Mutex::new(ActivationState::default()),
        }
    }

    /// Feeds one input notification to the tracker.
    ///
    /// Events whose target lies outside the configured root subtree are
    /// ignored. At most one tracking request is dispatched per qualifying
    /// activation.
    pub fn handle_event(&self, event: InputEvent) {
        match event {
            InputEvent::KeyRelease => self.on_key_release(),
            InputEvent::MouseRelease { button, target } => {
                if self.in_scope(&target) {
                    self.on_mouse_release(button, target);
                }
            }
            InputEvent::Click { target } => {
                if self.in_scope(&target) {
                    self.on_click(&target);
                }
            }
        }
    }

    fn in_scope(&self, target: &Element) -> bool {
        self.config
            .root
            .as_ref()
            .is_none_or(|root| target.is_within(root))
    }

    fn on_key_release(&self) {
        self.state.lock().last_was_keyboard = true;
    }

    fn on_mouse_release(&self, raw_button: u8, target: Element) {
        let Some(button) = self.buttons.normalize(raw_button) else {
            debug!(raw_button, "ignoring release of unrecognized button");
            return;
        };

        {
            let mut state = self.state.lock();
            state.last_mouse_button = Some(button);
            state.last_target = Some(target.clone());
            state.last_was_keyboard = false;
        }

        // A left release is not an activation by itself; the click event that
        // follows it carries the activation. Middle and right activations
        // only ever surface here, since browsers do not fire click reliably
        // for those buttons.
        match button {
            MouseButton::Left => return,
            MouseButton::Middle if !self.config.track_middle_clicks => return,
            MouseButton::Right if !self.config.track_right_clicks => return,
            _ => {}
        }

        self.activate(&target, button.into());
    }

    fn on_click(&self, target: &Element) {
        let button = {
            let state = self.state.lock();
            if state.last_was_keyboard {
                ActivationButton::Key
            } else if state.last_mouse_button == Some(MouseButton::Left) {
                ActivationButton::Left
            } else {
                return;
            }
        };

        self.activate(target, button);
    }

    /// Resolves the activated anchor and dispatches according to the
    /// classification.
    fn activate(&self, target: &Element, button: ActivationButton) {
        let Some(link) = parent_link_for(target) else {
            return;
        };
        let Some(href) = link.href() else {
            return;
        };

        match classify(&href, &self.page, button, &self.config) {
            TrackDecision::Skip => {}
            TrackDecision::Sync => {
                let activation = LinkActivation {
                    link,
                    button,
                    is_same_page_link: false,
                };
                self.dispatch_sync(activation, href);
            }
            TrackDecision::Async => {
                let is_same_page_link = classification::is_same_page_link(&href, &self.page);
                let activation = LinkActivation {
                    link,
                    button,
                    is_same_page_link,
                };
                self.dispatch_async(activation);
            }
        }
    }

    /// Rewrites the link destination to the tracking URL so the navigation
    /// carries the tracking request, then restores the original after
    /// [`RESTORE_DELAY`].
    ///
    /// The per-element rewrite guard makes overlapping dispatches on the same
    /// element a no-op: the first restore wins and later activations during
    /// the window are dropped rather than double-scheduled.
    fn dispatch_sync(&self, activation: LinkActivation, original: String) {
        let Some(tracking_url) = (self.build_url)(&activation, true) else {
            return;
        };

        let link = activation.link;
        if !link.begin_rewrite() {
            debug!("sync dispatch dropped: element already mid-rewrite");
            return;
        }

        link.set_href(&tracking_url);
        debug!(%tracking_url, "sync dispatch: destination rewritten");

        tokio::spawn(async move {
            tokio::time::sleep(RESTORE_DELAY).await;
            link.set_href(&original);
            link.end_rewrite();
        });
    }

    /// Fires a background beacon request for activations that do not trigger
    /// a full navigation. Failures are logged and dropped; there is no retry
    /// and no response handling.
    fn dispatch_async(&self, activation: LinkActivation) {
        let Some(tracking_url) = (self.build_url)(&activation, false) else {
            return;
        };

        let beacon = Arc::clone(&self.beacon);
        tokio::spawn(async move {
            if let Err(e) = beacon.send(&tracking_url).await {
                debug!("tracking beacon failed: {e}");
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::beacon::NullBeacon;

    /// Records every builder invocation and returns a fixed tracking URL.
    fn recording_builder() -> (
        Arc<Mutex<Vec<(ActivationButton, bool)>>>,
        impl Fn(&LinkActivation, bool) -> Option<String> + Send + Sync + 'static,
    ) {
        let calls: Arc<Mutex<Vec<(ActivationButton, bool)>>> = Arc::new(Mutex::new(Vec::new()));
        let recorded = Arc::clone(&calls);
        let builder = move |activation: &LinkActivation, redirect: bool| {
            recorded.lock().push((activation.button, redirect));
            Some("http://collector.test/track?logref=1".to_string())
        };
        (calls, builder)
    }

    fn page() -> Url {
        Url::parse("http://site.com/a").unwrap()
    }

    fn external_anchor() -> Element {
        Element::new("a").with_attr("href", "http://other.com/b")
    }

    fn tracker_with(
        config: TrackerConfig,
    ) -> (Arc<Mutex<Vec<(ActivationButton, bool)>>>, LinkTracker) {
        let (calls, builder) = recording_builder();
        let tracker = LinkTracker::new(builder, page(), config, Arc::new(NullBeacon::new()));
        (calls, tracker)
    }

    #[tokio::test]
    async fn test_left_click_dispatches_after_release() {
        let (calls, tracker) = tracker_with(TrackerConfig::default());
        let anchor = external_anchor();

        tracker.handle_event(InputEvent::MouseRelease {
            button: 0,
            target: anchor.clone(),
        });
        // the release alone is not an activation
        assert!(calls.lock().is_empty());

        tracker.handle_event(InputEvent::Click { target: anchor });
        assert_eq!(calls.lock().as_slice(), &[(ActivationButton::Left, true)]);
    }

    #[tokio::test]
    async fn test_keyboard_activation_reports_key_button() {
        let (calls, tracker) = tracker_with(TrackerConfig::default());
        let anchor = external_anchor();

        tracker.handle_event(InputEvent::KeyRelease);
        tracker.handle_event(InputEvent::Click { target: anchor });

        assert_eq!(calls.lock().as_slice(), &[(ActivationButton::Key, true)]);
    }

    #[tokio::test]
    async fn test_click_without_prior_activation_is_ignored() {
        let (calls, tracker) = tracker_with(TrackerConfig::default());

        tracker.handle_event(InputEvent::Click {
            target: external_anchor(),
        });

        assert!(calls.lock().is_empty());
    }

    #[tokio::test]
    async fn test_middle_click_rejected_when_disabled() {
        let (calls, tracker) = tracker_with(TrackerConfig::default().track_middle_clicks(false));

        tracker.handle_event(InputEvent::MouseRelease {
            button: 1,
            target: external_anchor(),
        });

        assert!(calls.lock().is_empty());
    }

    #[tokio::test]
    async fn test_middle_click_tracked_by_default() {
        let (calls, tracker) = tracker_with(TrackerConfig::default());

        tracker.handle_event(InputEvent::MouseRelease {
            button: 1,
            target: external_anchor(),
        });

        assert_eq!(calls.lock().as_slice(), &[(ActivationButton::Middle, true)]);
    }

    #[tokio::test]
    async fn test_right_click_rejected_by_default() {
        let (calls, tracker) = tracker_with(TrackerConfig::default());

        tracker.handle_event(InputEvent::MouseRelease {
            button: 2,
            target: external_anchor(),
        });

        assert!(calls.lock().is_empty());
    }

    #[tokio::test]
    async fn test_stray_click_after_middle_release_is_ignored() {
        let (calls, tracker) = tracker_with(TrackerConfig::default().track_middle_clicks(false));
        let anchor = external_anchor();

        tracker.handle_event(InputEvent::MouseRelease {
            button: 1,
            target: anchor.clone(),
        });
        tracker.handle_event(InputEvent::Click { target: anchor });

        assert!(calls.lock().is_empty());
    }

    #[tokio::test]
    async fn test_unrecognized_button_code_is_ignored() {
        let (calls, tracker) = tracker_with(TrackerConfig::default());

        tracker.handle_event(InputEvent::MouseRelease {
            button: 7,
            target: external_anchor(),
        });

        assert!(calls.lock().is_empty());
    }

    #[tokio::test]
    async fn test_event_outside_root_scope_is_ignored() {
        let root = Element::new("div");
        let inside = Element::new("a")
            .with_attr("href", "http://other.com/b")
            .child_of(&root);
        let outside = external_anchor();

        let (calls, tracker) = tracker_with(TrackerConfig::default().root(root));

        tracker.handle_event(InputEvent::MouseRelease {
            button: 0,
            target: outside.clone(),
        });
        tracker.handle_event(InputEvent::Click { target: outside });
        assert!(calls.lock().is_empty());

        tracker.handle_event(InputEvent::MouseRelease {
            button: 0,
            target: inside.clone(),
        });
        tracker.handle_event(InputEvent::Click { target: inside });
        assert_eq!(calls.lock().len(), 1);
    }

    #[tokio::test]
    async fn test_activation_resolves_nested_target_to_anchor() {
        let anchor = external_anchor();
        let span = Element::new("span").child_of(&anchor);

        let (calls, tracker) = tracker_with(TrackerConfig::default());

        tracker.handle_event(InputEvent::MouseRelease {
            button: 0,
            target: span.clone(),
        });
        tracker.handle_event(InputEvent::Click { target: span });

        assert_eq!(calls.lock().len(), 1);
        // the tracking URL landed on the anchor, not the span
        assert_eq!(
            anchor.href(),
            Some("http://collector.test/track?logref=1".to_string())
        );
    }

    #[tokio::test]
    async fn test_no_anchor_in_chain_is_noop() {
        let div = Element::new("div");
        let span = Element::new("span").child_of(&div);

        let (calls, tracker) = tracker_with(TrackerConfig::default());

        tracker.handle_event(InputEvent::MouseRelease {
            button: 0,
            target: span.clone(),
        });
        tracker.handle_event(InputEvent::Click { target: span });

        assert!(calls.lock().is_empty());
    }

    #[tokio::test]
    async fn test_anchor_without_href_is_noop() {
        let anchor = Element::new("a");

        let (calls, tracker) = tracker_with(TrackerConfig::default());

        tracker.handle_event(InputEvent::MouseRelease {
            button: 0,
            target: anchor.clone(),
        });
        tracker.handle_event(InputEvent::Click { target: anchor });

        assert!(calls.lock().is_empty());
    }

    #[tokio::test]
    async fn test_async_dispatch_sends_built_url_through_beacon() {
        use crate::infrastructure::beacon::MockBeacon;
        use tokio::sync::mpsc;

        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut beacon = MockBeacon::new();
        beacon.expect_send().times(1).returning(move |url| {
            let _ = tx.send(url.to_string());
            Ok(())
        });

        let (calls, builder) = recording_builder();
        let tracker = LinkTracker::new(
            builder,
            page(),
            TrackerConfig::default().track_right_clicks(true),
            Arc::new(beacon),
        );

        tracker.handle_event(InputEvent::MouseRelease {
            button: 2,
            target: external_anchor(),
        });

        let sent = rx.recv().await.unwrap();
        assert_eq!(sent, "http://collector.test/track?logref=1");
        assert_eq!(calls.lock().as_slice(), &[(ActivationButton::Right, false)]);
    }

    #[tokio::test]
    async fn test_declining_builder_leaves_link_untouched() {
        let tracker = LinkTracker::new(
            |_, _| None,
            page(),
            TrackerConfig::default(),
            Arc::new(NullBeacon::new()),
        );
        let anchor = external_anchor();

        tracker.handle_event(InputEvent::MouseRelease {
            button: 0,
            target: anchor.clone(),
        });
        tracker.handle_event(InputEvent::Click {
            target: anchor.clone(),
        });

        assert_eq!(anchor.href(), Some("http://other.com/b".to_string()));
        assert!(!anchor.is_rewriting());
    }
}
