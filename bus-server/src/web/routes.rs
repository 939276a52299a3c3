//! HTTP route handlers.

use std::path::Path as FsPath;

use askama::Template;
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{StatusCode, Uri},
    response::{Html, IntoResponse, Redirect},
    routing::{get, post},
};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::routes::SearchQuery;

use super::dto::*;
use super::screens::{BusScreen, present};
use super::state::AppState;
use super::templates::*;

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router(state: AppState, static_dir: impl AsRef<FsPath>) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/health", get(health))
        .route("/bus", get(bus_page))
        .route("/bus/refresh", post(refresh_routes))
        .route("/bus-detail/:id", get(bus_detail_page))
        .route("/api/routes", get(list_routes))
        .nest_service("/static", ServeDir::new(static_dir.as_ref()))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Unknown paths.
async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound {
        message: format!("No screen at {uri}"),
    }
}

/// Favourites tab.
async fn index_page(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let template = IndexTemplate {
        theme: state.theme.clone(),
        tabs: TabView::bar("index"),
    };
    render(&template)
}

/// Bus list tab: loading, error, or the filtered route list.
async fn bus_page(
    State(state): State<AppState>,
    Query(req): Query<RouteQuery>,
) -> Result<Html<String>, AppError> {
    let query = req.search();
    let snapshot = state.routes.snapshot();

    match present(&snapshot, &query) {
        BusScreen::Loading => render(&BusLoadingTemplate {
            theme: state.theme.clone(),
            tabs: TabView::bar("bus"),
        }),
        BusScreen::Failed { message } => render(&BusErrorTemplate {
            theme: state.theme.clone(),
            tabs: TabView::bar("bus"),
            message,
        }),
        BusScreen::List { routes } => {
            render(&BusListTemplate::new(state.theme.clone(), &routes, &query))
        }
    }
}

/// Re-issue the route list request, then go back to the list.
async fn refresh_routes(State(state): State<AppState>) -> Redirect {
    info!("refreshing route list");
    state.routes.refetch().await;
    Redirect::to("/bus")
}

/// Route detail modal. Shows whatever id it was given.
async fn bus_detail_page(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, AppError> {
    render(&BusDetailTemplate {
        theme: state.theme.clone(),
        tabs: Vec::new(),
        id,
    })
}

/// JSON view of the route list.
async fn list_routes(
    State(state): State<AppState>,
    Query(req): Query<RouteQuery>,
) -> Json<RoutesResponse> {
    let query: SearchQuery = req.search();
    let snapshot = state.routes.snapshot();
    Json(RoutesResponse::from_state(&snapshot, &query))
}

fn render(template: &impl Template) -> Result<Html<String>, AppError> {
    template.render().map(Html).map_err(|e| AppError::Internal {
        message: format!("Template error: {e}"),
    })
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    NotFound { message: String },
    Internal { message: String },
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, %message, "request failed");
        } else {
            warn!(%status, %message, "request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::fetch::{FetchController, FetchOptions, MockReply, MockTransport};
    use crate::web::Theme;

    const FIXTURE: &str = "data/mock_routes.json";

    fn state_with(mock: MockTransport) -> AppState {
        let routes = FetchController::new("http://mock/route/", FetchOptions::default(), Arc::new(mock));
        AppState::new(Arc::new(routes), Theme::default())
    }

    async fn loaded_state() -> AppState {
        let state = state_with(MockTransport::from_file(FIXTURE).unwrap());
        state.routes.refetch().await;
        state
    }

    fn query(q: &str) -> Query<RouteQuery> {
        Query(RouteQuery {
            q: Some(q.to_string()),
        })
    }

    #[tokio::test]
    async fn health_ok() {
        assert_eq!(health().await, "ok");
    }

    #[tokio::test]
    async fn bus_page_before_first_fetch_is_loading() {
        let state = state_with(MockTransport::new());
        let Html(html) = bus_page(State(state), query("")).await.unwrap();
        assert!(html.contains("載入中..."));
        assert!(html.contains("http-equiv=\"refresh\""));
    }

    #[tokio::test]
    async fn bus_page_lists_filtered_routes() {
        let state = loaded_state().await;

        let Html(html) = bus_page(State(state.clone()), query("")).await.unwrap();
        assert!(html.contains("顯示 8 條路線"));

        let Html(html) = bus_page(State(state), query("x")).await.unwrap();
        assert!(html.contains("顯示 1 條路線"));
        assert!(html.contains("2X"));
        assert!(html.contains("搜尋: x"));
    }

    #[tokio::test]
    async fn bus_page_shows_error_view() {
        let mock = MockTransport::new();
        mock.push(MockReply::status(404, "")).await;
        let state = state_with(mock);
        state.routes.refetch().await;

        let Html(html) = bus_page(State(state), query("")).await.unwrap();
        assert!(html.contains("載入失敗"));
        assert!(html.contains("HTTP error! status: 404"));
    }

    #[tokio::test]
    async fn refresh_recovers_from_failure() {
        let mock = MockTransport::always(MockReply::ok(std::fs::read(FIXTURE).unwrap()));
        mock.push(MockReply::failure("connection refused")).await;
        let state = state_with(mock.clone());
        state.routes.refetch().await;
        assert!(state.routes.snapshot().error().is_some());

        let response = refresh_routes(State(state.clone())).await.into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let snapshot = state.routes.snapshot();
        assert!(snapshot.error().is_none());
        assert_eq!(snapshot.data().map(|d| d.data.len()), Some(8));
        assert_eq!(mock.request_count().await, 2);
    }

    #[tokio::test]
    async fn detail_page_shows_id() {
        let state = loaded_state().await;
        let Html(html) = bus_detail_page(State(state), Path("269B".to_string()))
            .await
            .unwrap();
        assert!(html.contains("269B"));
        assert!(html.contains("Back"));
    }

    #[tokio::test]
    async fn detail_page_escapes_any_id() {
        let state = loaded_state().await;
        let Html(html) = bus_detail_page(State(state), Path("1A<script>".to_string()))
            .await
            .unwrap();
        assert!(html.contains("1A&lt;script&gt;"));
        assert!(!html.contains("1A<script>"));
    }

    #[tokio::test]
    async fn api_routes_json() {
        let state = loaded_state().await;
        let Json(response) = list_routes(State(state), query("1")).await;

        assert!(!response.loading);
        assert!(response.error.is_none());
        assert_eq!(
            response.generated_timestamp.as_deref(),
            Some("2024-05-10T05:10:03+08:00")
        );
        let routes: Vec<_> = response.routes.iter().map(|r| r.route.as_str()).collect();
        assert_eq!(routes, vec!["1", "1", "1A", "1A", "11"]);
        assert_eq!(response.count, 5);
    }

    #[tokio::test]
    async fn index_page_has_tabs() {
        let state = state_with(MockTransport::new());
        let Html(html) = index_page(State(state)).await.unwrap();
        assert!(html.contains("常用路線"));
        assert!(html.contains("九巴列表"));
    }

    #[tokio::test]
    async fn unknown_path_is_not_found() {
        let err = not_found(Uri::from_static("/settings")).await;
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn app_error_status() {
        let err = AppError::NotFound {
            message: "missing".into(),
        };
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);

        let err = AppError::Internal {
            message: "boom".into(),
        };
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn router_builds() {
        let state = state_with(MockTransport::new());
        let _router = create_router(state, "static");
    }
}
