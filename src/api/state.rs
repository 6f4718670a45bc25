//! Shared application state for the HTTP layer

use crate::app::services::analytics::Analytics;
use std::sync::Arc;

/// State handed to every request handler.
#[derive(Clone)]
pub struct AppState {
    pub analytics: Arc<Analytics>,
}

impl AppState {
    pub fn new(analytics: Arc<Analytics>) -> Self {
        Self { analytics }
    }
}
