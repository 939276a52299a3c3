//! Application state for the web layer.

use std::sync::Arc;

use crate::fetch::FetchController;
use crate::routes::RouteListResponse;

use super::screens::Theme;

/// Fetch controller for the KMB route list.
pub type RouteDirectory = FetchController<RouteListResponse>;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Route list fetch, owned by the bus list screen
    pub routes: Arc<RouteDirectory>,

    /// Theme, fixed at startup
    pub theme: Arc<Theme>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(routes: Arc<RouteDirectory>, theme: Theme) -> Self {
        Self {
            routes,
            theme: Arc::new(theme),
        }
    }
}
