//! Storage implementations for the collector.
//!
//! Concrete implementations of domain storage traits.
//!
//! # Implementations
//!
//! - [`FileClickLog`] - append-only text file click log

pub mod file_click_log;

pub use file_click_log::FileClickLog;
