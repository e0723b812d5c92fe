//! HTTP interface: router, shared state, and the serve loop.

mod allow_list;
mod error;
mod routes;

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use shade_api::GatewayClient;
use shade_config::ServerSettings;
use shade_core::Dispatcher;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::error::CliError;
use crate::report::ReportLog;

pub use allow_list::AllowList;

/// State shared by every handler. Everything inside is read-only except
/// the report log, which serializes its own writes.
#[derive(Debug, Clone)]
pub struct AppState {
    pub dispatcher: Arc<Dispatcher<GatewayClient>>,
    pub reports: Arc<ReportLog>,
}

/// Build the application router.
///
/// `/`, `/register` and `/control` sit behind the allow-list; report
/// submission and the static frontend do not.
pub fn router(state: AppState, allow_list: Arc<AllowList>, static_dir: &Path) -> Router {
    let gated = Router::new()
        .route("/", get(routes::root))
        .route("/register/:room", get(routes::register))
        .route("/control/:room/:action", get(routes::control))
        .route_layer(axum::middleware::from_fn_with_state(
            allow_list,
            allow_list::guard,
        ));

    Router::new()
        .merge(gated)
        .route("/submit-report", post(routes::submit_report))
        .nest_service("/Frontend", ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind and serve until Ctrl-C.
pub async fn run(settings: &ServerSettings, state: AppState) -> Result<(), CliError> {
    let allow_list = Arc::new(AllowList::new(settings.allowed_networks.clone()));
    let app = router(state, allow_list, &settings.static_dir);

    let listener = TcpListener::bind(settings.bind)
        .await
        .map_err(|source| CliError::Bind {
            bind: settings.bind.to_string(),
            source,
        })?;

    info!(
        bind = %settings.bind,
        allowed_networks = settings.allowed_networks.len(),
        "listening"
    );

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    info!("server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to install Ctrl-C handler");
        std::future::pending::<()>().await;
    }
    info!("shutdown requested");
}
