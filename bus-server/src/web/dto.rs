//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::fetch::FetchState;
use crate::routes::{RouteListResponse, RouteRecord, SearchQuery, filter_records};

/// Query string for the route list.
#[derive(Debug, Default, Deserialize)]
pub struct RouteQuery {
    /// Search text matched against the route number
    pub q: Option<String>,
}

impl RouteQuery {
    pub fn search(&self) -> SearchQuery {
        SearchQuery::from(self.q.clone())
    }
}

/// JSON view of the route list fetch.
#[derive(Debug, Serialize)]
pub struct RoutesResponse {
    /// Whether a request is in flight
    pub loading: bool,

    /// Failure message of the last request
    pub error: Option<String>,

    /// Timestamp reported by the upstream API
    pub generated_timestamp: Option<String>,

    /// Number of routes after filtering
    pub count: usize,

    /// Filtered routes, in upstream order
    pub routes: Vec<RouteRecord>,
}

impl RoutesResponse {
    /// Build from the current fetch state and search text.
    pub fn from_state(state: &FetchState<RouteListResponse>, query: &SearchQuery) -> Self {
        let data = state.data();
        let routes: Vec<RouteRecord> = filter_records(data.map(|d| d.data.as_slice()), query)
            .into_iter()
            .cloned()
            .collect();

        Self {
            loading: state.is_loading(),
            error: state.error().map(str::to_string),
            generated_timestamp: data.map(|d| d.generated_timestamp.clone()),
            count: routes.len(),
            routes,
        }
    }
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
