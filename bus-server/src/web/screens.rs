//! Screen registration, theme, and the bus list screen decision.

use crate::fetch::{FetchState, FetchStatus};
use crate::routes::{RouteListResponse, RouteRecord, SearchQuery, filter_records};

/// How a screen is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presentation {
    /// Reachable from the tab bar.
    Tab,
    /// Shown over the tabs, without a header.
    Modal,
}

/// One entry in the routing table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Screen {
    pub name: &'static str,
    pub path: &'static str,
    pub title: &'static str,
    pub presentation: Presentation,
}

/// Every screen in the app, tabs first in tab-bar order.
pub const SCREENS: &[Screen] = &[
    Screen {
        name: "index",
        path: "/",
        title: "常用路線",
        presentation: Presentation::Tab,
    },
    Screen {
        name: "bus",
        path: "/bus",
        title: "九巴列表",
        presentation: Presentation::Tab,
    },
    Screen {
        name: "bus-detail",
        path: "/bus-detail/{id}",
        title: "路線詳情",
        presentation: Presentation::Modal,
    },
];

/// Look up a screen by name.
pub fn screen(name: &str) -> Option<&'static Screen> {
    SCREENS.iter().find(|s| s.name == name)
}

/// Screens shown in the tab bar.
pub fn tabs() -> impl Iterator<Item = &'static Screen> {
    SCREENS
        .iter()
        .filter(|s| s.presentation == Presentation::Tab)
}

/// Path of the detail screen for a route id.
pub fn detail_path(id: &str) -> String {
    format!("/bus-detail/{id}")
}

/// Visual configuration, created once at startup and shared read-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub header_color: String,
    pub tab_bar_color: String,
    pub active_tint: String,
    pub inactive_tint: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            header_color: "#e7305b".to_string(),
            tab_bar_color: "#e7305b".to_string(),
            active_tint: "white".to_string(),
            inactive_tint: "black".to_string(),
        }
    }
}

/// What the bus list screen should show.
#[derive(Debug, PartialEq)]
pub enum BusScreen<'a> {
    /// Nothing to show yet, or a request is in flight.
    Loading,
    /// The last request failed.
    Failed { message: String },
    /// Routes to list, already filtered.
    List { routes: Vec<&'a RouteRecord> },
}

/// Decide the bus list screen from the fetch state and search text.
///
/// Loading wins over stale data, matching a pull-to-refresh that hides
/// the list until the new result arrives.
pub fn present<'a>(state: &'a FetchState<RouteListResponse>, query: &SearchQuery) -> BusScreen<'a> {
    match state.status() {
        FetchStatus::Idle | FetchStatus::Loading => BusScreen::Loading,
        FetchStatus::Failure => BusScreen::Failed {
            message: state.error().unwrap_or_default().to_string(),
        },
        FetchStatus::Success => BusScreen::List {
            routes: filter_records(state.data().map(|d| d.data.as_slice()), query),
        },
    }
}
