use std::sync::Arc;

use bus_server::config::AppConfig;
use bus_server::fetch::{
    FetchController, FetchOptions, MockTransport, ReqwestTransport, Transport, TransportConfig,
};
use bus_server::web::{AppState, RouteDirectory, Theme, create_router};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Log filter used when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "bus_server=info,tower_http=info";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let config = AppConfig::from_env()?;

    // Pick the transport: fixture file for offline runs, live API otherwise
    let transport: Arc<dyn Transport> = match &config.mock_data {
        Some(path) => {
            info!(path = %path.display(), "serving mock route data");
            Arc::new(MockTransport::from_file(path)?)
        }
        None => Arc::new(ReqwestTransport::new(
            TransportConfig::new().with_timeout(config.timeout_secs),
        )?),
    };

    let routes: Arc<RouteDirectory> = Arc::new(FetchController::new(
        config.route_url.clone(),
        FetchOptions::default(),
        transport,
    ));
    info!(url = %config.route_url, "fetching route list");
    routes.mount().await;

    if let Some(interval) = config.refresh_interval {
        let refresher = Arc::clone(&routes);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.tick().await; // First tick is immediate, skip it
            loop {
                ticker.tick().await;
                if refresher.is_closed() {
                    break;
                }
                refresher.refetch().await;

                let snapshot = refresher.snapshot();
                match snapshot.error() {
                    Some(error) => warn!(%error, "scheduled refresh failed"),
                    None => info!(
                        routes = snapshot.data().map_or(0, |d| d.data.len()),
                        "refreshed route list"
                    ),
                }
            }
        });
    }

    let state = AppState::new(Arc::clone(&routes), Theme::default());
    let app = create_router(state, &config.static_dir);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!(addr = %config.bind_addr, "KMB route browser listening");
    info!("  GET  /                - Favourites tab");
    info!("  GET  /bus?q=          - Bus route list");
    info!("  POST /bus/refresh     - Re-fetch the route list");
    info!("  GET  /bus-detail/{{id}} - Route detail");
    info!("  GET  /api/routes?q=   - Route list as JSON");
    info!("  GET  /health          - Health check");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    routes.close().await;
    info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}
