//! Storage trait definitions for the domain layer.
//!
//! Traits define the contract for persistence operations; concrete
//! implementations live in `crate::infrastructure::persistence`, and mock
//! implementations are auto-generated via `mockall` for testing.

pub mod click_log;

pub use click_log::ClickLog;

#[cfg(test)]
pub use click_log::MockClickLog;
