//! Application state for the web layer.

use std::sync::Arc;

use crate::cache::CachedTicketQuery;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Cached ticket query runner (owns the station directory)
    pub tickets: Arc<CachedTicketQuery>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(tickets: CachedTicketQuery) -> Self {
        Self {
            tickets: Arc::new(tickets),
        }
    }
}
