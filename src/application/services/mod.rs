//! Business logic services for the application layer.

pub mod tracker;

pub use tracker::{LinkTracker, RESTORE_DELAY, UrlBuilder};
