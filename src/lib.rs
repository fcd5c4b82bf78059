//! # Link Tracker
//!
//! A link click tracking library with a small Axum-based collector service.
//!
//! The library side classifies input events (keyboard releases, mouse
//! releases, clicks) against an in-memory element tree and decides, per
//! activation, whether to track it and how: synchronously, by temporarily
//! rewriting the link destination so the navigation itself carries the
//! tracking request, or asynchronously, with a fire-and-forget beacon. The
//! collector side receives those tracking requests and appends them to a log
//! file.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - Element tree, activation model,
//!   classification rules, and storage traits
//! - **Application Layer** ([`application`]) - The [`prelude::LinkTracker`]
//!   service orchestrating classification and dispatch
//! - **Infrastructure Layer** ([`infrastructure`]) - Beacon transport and
//!   file-backed click log
//! - **API Layer** ([`api`]) - Collector HTTP handlers, DTOs, and middleware
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//! use url::Url;
//!
//! use link_tracker::domain::tracker_config::TrackerConfig;
//! use link_tracker::infrastructure::beacon::HttpBeacon;
//! use link_tracker::prelude::*;
//!
//! # fn main() -> anyhow::Result<()> {
//! let beacon = Arc::new(HttpBeacon::new(Duration::from_secs(5))?);
//! let page = Url::parse("http://site.com/a")?;
//!
//! let tracker = LinkTracker::new(
//!     |activation: &LinkActivation, redirect| {
//!         Some(format!(
//!             "http://collector.example/track?action=log&url={}&button={}&redirect={}",
//!             activation.link.href()?,
//!             activation.button,
//!             u8::from(redirect),
//!         ))
//!     },
//!     page,
//!     TrackerConfig::default(),
//!     beacon,
//! );
//! # let _ = tracker;
//! # Ok(())
//! # }
//! ```
//!
//! Feed the tracker [`prelude::InputEvent`]s from your event source and it
//! does the rest.
//!
//! ## Collector
//!
//! The binary serves `GET /track` (actions `log` and `reset`) and
//! `GET /health`. Configuration is loaded from environment variables via
//! [`config::Config`]; see the [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{LinkTracker, RESTORE_DELAY};
    pub use crate::domain::activation::{ActivationButton, InputEvent, LinkActivation};
    pub use crate::domain::classification::{TrackDecision, TrackingLevel, classify};
    pub use crate::domain::element::Element;
    pub use crate::domain::tracker_config::TrackerConfig;
    pub use crate::error::AppError;
    pub use crate::state::AppState;
}
