//! Askama templates for the web frontend.

use std::sync::Arc;

use askama::Template;

use crate::routes::{RouteRecord, SearchQuery, route_key};

use super::screens::{Theme, detail_path, tabs};

// ============================================================================
// Page Templates (extend base.html)
// ============================================================================

/// Favourites tab.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub theme: Arc<Theme>,
    pub tabs: Vec<TabView>,
}

/// Bus list tab while the route list is loading.
#[derive(Template)]
#[template(path = "bus_loading.html")]
pub struct BusLoadingTemplate {
    pub theme: Arc<Theme>,
    pub tabs: Vec<TabView>,
}

/// Bus list tab after a failed request.
#[derive(Template)]
#[template(path = "bus_error.html")]
pub struct BusErrorTemplate {
    pub theme: Arc<Theme>,
    pub tabs: Vec<TabView>,
    pub message: String,
}

/// Bus list tab with search results.
#[derive(Template)]
#[template(path = "bus_list.html")]
pub struct BusListTemplate {
    pub theme: Arc<Theme>,
    pub tabs: Vec<TabView>,
    pub routes: Vec<RouteView>,
    pub query: String,
    pub searching: bool,
}

/// Route detail modal.
#[derive(Template)]
#[template(path = "bus_detail.html")]
pub struct BusDetailTemplate {
    pub theme: Arc<Theme>,
    pub tabs: Vec<TabView>,
    pub id: String,
}

// ============================================================================
// View Models (for templates)
// ============================================================================

/// Tab bar entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabView {
    pub title: &'static str,
    pub path: &'static str,
    pub active: bool,
}

impl TabView {
    /// Tab bar with the named screen highlighted.
    pub fn bar(active: &str) -> Vec<Self> {
        tabs()
            .map(|s| TabView {
                title: s.title,
                path: s.path,
                active: s.name == active,
            })
            .collect()
    }
}

/// Route card view model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteView {
    pub key: String,
    pub route: String,
    pub bound_label: &'static str,
    pub is_outbound: bool,
    pub origin: String,
    pub destination: String,
    pub detail_path: String,
}

impl RouteView {
    /// Create from a route record at `index` in the displayed list.
    pub fn from_record(record: &RouteRecord, index: usize) -> Self {
        Self {
            key: route_key(record, index),
            route: record.route.clone(),
            bound_label: record.bound.label(),
            is_outbound: record.bound.is_outbound(),
            origin: record.orig_tc.clone(),
            destination: record.dest_tc.clone(),
            detail_path: detail_path(&record.route),
        }
    }
}

impl BusListTemplate {
    /// Build the list page from filtered records.
    pub fn new(
        theme: Arc<Theme>,
        routes: &[&RouteRecord],
        query: &SearchQuery,
    ) -> Self {
        Self {
            theme,
            tabs: TabView::bar("bus"),
            routes: routes
                .iter()
                .enumerate()
                .map(|(i, r)| RouteView::from_record(r, i))
                .collect(),
            query: query.as_str().to_string(),
            searching: !query.is_blank(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::Bound;

    fn record(route: &str, bound: Bound) -> RouteRecord {
        RouteRecord {
            route: route.to_string(),
            bound,
            service_type: "1".into(),
            orig_en: "STAR FERRY".into(),
            orig_tc: "尖沙咀碼頭".into(),
            orig_sc: "尖沙咀码头".into(),
            dest_en: "SAU MAU PING".into(),
            dest_tc: "秀茂坪".into(),
            dest_sc: "秀茂坪".into(),
        }
    }

    #[test]
    fn tab_bar_marks_active() {
        let bar = TabView::bar("bus");
        assert_eq!(bar.len(), 2);
        assert!(!bar[0].active);
        assert!(bar[1].active);
        assert_eq!(bar[1].path, "/bus");
    }

    #[test]
    fn route_view_from_record() {
        let view = RouteView::from_record(&record("1A", Bound::Inbound), 2);
        assert_eq!(view.key, "1A-I-2");
        assert_eq!(view.bound_label, "返程");
        assert!(!view.is_outbound);
        assert_eq!(view.origin, "尖沙咀碼頭");
        assert_eq!(view.destination, "秀茂坪");
        assert_eq!(view.detail_path, "/bus-detail/1A");
    }

    #[test]
    fn list_page_renders_count_and_search() {
        let a = record("1A", Bound::Outbound);
        let b = record("11", Bound::Inbound);
        let template = BusListTemplate::new(
            Arc::new(Theme::default()),
            &[&a, &b],
            &SearchQuery::new("1"),
        );

        assert_eq!(template.routes.len(), 2);
        let html = template.render().unwrap();
        assert!(html.contains("顯示 2 條路線"));
        assert!(html.contains("搜尋: 1"));
        assert!(html.contains("往程"));
        assert!(html.contains("返程"));
    }

    #[test]
    fn empty_list_page() {
        let template = BusListTemplate::new(
            Arc::new(Theme::default()),
            &[],
            &SearchQuery::new("zzz"),
        );
        let html = template.render().unwrap();
        assert!(html.contains("找不到相關路線"));
    }

    #[test]
    fn blank_search_hides_search_label() {
        let a = record("1A", Bound::Outbound);
        let template =
            BusListTemplate::new(Arc::new(Theme::default()), &[&a], &SearchQuery::new("  "));
        assert!(!template.searching);
        assert!(!template.render().unwrap().contains("搜尋:"));
    }

    #[test]
    fn unknown_bound_is_listed_as_inbound() {
        let a = record("N216", Bound::Other("C".into()));
        let view = RouteView::from_record(&a, 0);
        assert_eq!(view.key, "N216-C-0");
        assert!(!view.is_outbound);

        let template =
            BusListTemplate::new(Arc::new(Theme::default()), &[&a], &SearchQuery::default());
        let html = template.render().unwrap();
        assert!(html.contains("N216"));
        assert!(html.contains("返程"));
    }

    #[test]
    fn error_page_shows_message() {
        let template = BusErrorTemplate {
            theme: Arc::new(Theme::default()),
            tabs: TabView::bar("bus"),
            message: "HTTP error! status: 503".into(),
        };
        let html = template.render().unwrap();
        assert!(html.contains("載入失敗"));
        assert!(html.contains("HTTP error! status: 503"));
        assert!(html.contains("/bus/refresh"));
    }

    #[test]
    fn theme_colour_in_page() {
        let template = IndexTemplate {
            theme: Arc::new(Theme::default()),
            tabs: TabView::bar("index"),
        };
        assert!(template.render().unwrap().contains("#e7305b"));
    }
}
