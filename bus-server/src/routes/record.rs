//! KMB route payload types.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Direction of a route.
///
/// Codes other than "O" and "I" are kept as-is and shown as inbound, so a
/// single odd record never fails the whole list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Bound {
    Outbound,
    Inbound,
    Other(String),
}

impl Bound {
    /// Wire code, e.g. "O".
    pub fn code(&self) -> &str {
        match self {
            Bound::Outbound => "O",
            Bound::Inbound => "I",
            Bound::Other(code) => code,
        }
    }

    pub fn is_outbound(&self) -> bool {
        matches!(self, Bound::Outbound)
    }

    /// Traditional Chinese badge label.
    pub fn label(&self) -> &'static str {
        if self.is_outbound() { "往程" } else { "返程" }
    }
}

impl From<String> for Bound {
    fn from(code: String) -> Self {
        match code.as_str() {
            "O" => Bound::Outbound,
            "I" => Bound::Inbound,
            _ => Bound::Other(code),
        }
    }
}

impl From<Bound> for String {
    fn from(bound: Bound) -> Self {
        match bound {
            Bound::Other(code) => code,
            known => known.code().to_string(),
        }
    }
}

/// One bus route entry from the route list endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteRecord {
    /// Route number, e.g. "269B"
    pub route: String,
    pub bound: Bound,
    /// Service type ("1" is the normal service)
    pub service_type: String,
    pub orig_en: String,
    pub orig_tc: String,
    pub orig_sc: String,
    pub dest_en: String,
    pub dest_tc: String,
    pub dest_sc: String,
}

/// Envelope returned by `GET /v1/transport/kmb/route/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteListResponse {
    #[serde(rename = "type")]
    pub kind: String,
    pub version: String,
    pub generated_timestamp: String,
    pub data: Vec<RouteRecord>,
}

impl RouteListResponse {
    /// When the payload was generated, if the timestamp is valid RFC 3339.
    pub fn generated_at(&self) -> Option<DateTime<FixedOffset>> {
        DateTime::parse_from_rfc3339(&self.generated_timestamp).ok()
    }
}
