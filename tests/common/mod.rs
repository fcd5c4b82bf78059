#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use axum::routing::get;
use axum_test::TestServer;
use parking_lot::Mutex;
use tokio::sync::mpsc;
use url::Url;

use link_tracker::api::handlers::{health_handler, track_handler};
use link_tracker::domain::activation::{ActivationButton, LinkActivation};
use link_tracker::domain::element::Element;
use link_tracker::infrastructure::beacon::{Beacon, BeaconResult};
use link_tracker::infrastructure::persistence::FileClickLog;
use link_tracker::state::AppState;

/// Collector state writing to a fresh temp-dir click log.
///
/// The `TempDir` guard must stay alive for the duration of the test.
pub fn create_test_state() -> (AppState, tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("clicks.log");
    let state = AppState::new(Arc::new(FileClickLog::new(&path)));
    (state, dir, path)
}

/// Test server with the collector routes.
pub fn create_test_server(state: AppState) -> TestServer {
    let app = Router::new()
        .route("/track", get(track_handler))
        .route("/health", get(health_handler))
        .with_state(state);

    TestServer::new(app).unwrap()
}

/// Beacon double that forwards every sent URL to a channel.
pub struct RecordingBeacon {
    tx: mpsc::UnboundedSender<String>,
}

#[async_trait]
impl Beacon for RecordingBeacon {
    async fn send(&self, url: &str) -> BeaconResult<()> {
        let _ = self.tx.send(url.to_string());
        Ok(())
    }
}

pub fn recording_beacon() -> (Arc<RecordingBeacon>, mpsc::UnboundedReceiver<String>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (Arc::new(RecordingBeacon { tx }), rx)
}

/// One observed URL-builder invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuilderCall {
    pub button: ActivationButton,
    pub redirect_needed: bool,
    pub is_same_page_link: bool,
}

/// URL builder that records its invocations and returns numbered tracking
/// URLs (`http://collector.test/track?n=1`, `?n=2`, ...).
pub fn recording_builder() -> (
    Arc<Mutex<Vec<BuilderCall>>>,
    impl Fn(&LinkActivation, bool) -> Option<String> + Send + Sync + 'static,
) {
    let calls: Arc<Mutex<Vec<BuilderCall>>> = Arc::new(Mutex::new(Vec::new()));
    let recorded = Arc::clone(&calls);
    let builder = move |activation: &LinkActivation, redirect_needed: bool| {
        let mut calls = recorded.lock();
        calls.push(BuilderCall {
            button: activation.button,
            redirect_needed,
            is_same_page_link: activation.is_same_page_link,
        });
        Some(format!("http://collector.test/track?n={}", calls.len()))
    };
    (calls, builder)
}

pub fn page() -> Url {
    Url::parse("http://site.com/a").unwrap()
}

pub fn anchor_to(href: &str) -> Element {
    Element::new("a").with_attr("href", href)
}
