use std::sync::Arc;

use crate::domain::repositories::ClickLog;

/// Shared application state injected into collector handlers.
#[derive(Clone)]
pub struct AppState {
    pub click_log: Arc<dyn ClickLog>,
}

impl AppState {
    pub fn new(click_log: Arc<dyn ClickLog>) -> Self {
        Self { click_log }
    }
}
