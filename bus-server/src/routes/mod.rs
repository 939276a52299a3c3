//! KMB route records and list filtering.
//!
//! The route list payload comes from the Hong Kong transport open-data
//! API. Only the route number is searched; everything else is display data.

mod filter;
mod record;

pub use filter::{SearchQuery, Searchable, filter_records, route_key};
pub use record::{Bound, RouteListResponse, RouteRecord};

/// Public KMB route list endpoint.
pub const KMB_ROUTE_LIST_URL: &str = "https://data.etabus.gov.hk/v1/transport/kmb/route/";
