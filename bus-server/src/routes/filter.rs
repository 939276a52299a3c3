//! Search filtering for route lists.

use std::fmt;

use super::record::RouteRecord;

/// A record that can be matched against a search query.
pub trait Searchable {
    /// The single field the search string is matched against.
    fn search_key(&self) -> &str;
}

impl Searchable for RouteRecord {
    fn search_key(&self) -> &str {
        &self.route
    }
}

/// Free-text search string, stored as typed.
///
/// # Examples
///
/// ```
/// use bus_server::routes::SearchQuery;
///
/// assert!(SearchQuery::new("   ").is_blank());
/// assert_eq!(SearchQuery::new(" 1A").as_str(), " 1A");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery(String);

impl SearchQuery {
    pub fn new(query: impl Into<String>) -> Self {
        Self(query.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Empty or whitespace only.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Case-insensitive substring match on the raw (untrimmed) query.
    pub fn matches(&self, key: &str) -> bool {
        key.to_lowercase().contains(&self.0.to_lowercase())
    }
}

impl fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Option<String>> for SearchQuery {
    fn from(query: Option<String>) -> Self {
        Self(query.unwrap_or_default())
    }
}

/// Records to display for the current data and search string.
///
/// No data gives an empty list, a blank query gives every record, and
/// otherwise the matching records are kept in their original order.
pub fn filter_records<'a, T: Searchable>(data: Option<&'a [T]>, query: &SearchQuery) -> Vec<&'a T> {
    let Some(data) = data else {
        return Vec::new();
    };

    if query.is_blank() {
        return data.iter().collect();
    }

    data.iter()
        .filter(|record| query.matches(record.search_key()))
        .collect()
}

/// Stable list key for a record, e.g. `1A-O-0`.
pub fn route_key(record: &RouteRecord, index: usize) -> String {
    format!("{}-{}-{}", record.route, record.bound.code(), index)
}
