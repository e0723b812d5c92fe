//! Route handlers.

use std::net::SocketAddr;

use axum::Json;
use axum::extract::{ConnectInfo, Path, Query, State};
use axum::response::Redirect;
use serde::{Deserialize, Serialize};
use tracing::error;

use super::AppState;
use super::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct ControlQuery {
    pub direction: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ControlResponse {
    pub status: &'static str,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct ReportQuery {
    pub report: String,
}

#[derive(Debug, Serialize)]
pub struct ReportResponse {
    pub message: &'static str,
}

/// `GET /` → the web frontend.
pub async fn root() -> Redirect {
    Redirect::temporary("/Frontend/index.html")
}

/// `GET /register/:room` → direction labels in catalog order.
pub async fn register(
    State(state): State<AppState>,
    Path(room): Path<String>,
) -> Result<Json<Vec<String>>, ApiError> {
    Ok(Json(state.dispatcher.register(&room)?))
}

/// `GET /control/:room/:action?direction=`
pub async fn control(
    State(state): State<AppState>,
    Path((room, action)): Path<(String, String)>,
    Query(query): Query<ControlQuery>,
) -> Result<Json<ControlResponse>, ApiError> {
    // `?direction=` with no value means no direction.
    let direction = query.direction.as_deref().filter(|d| !d.is_empty());
    let outcome = state.dispatcher.control(&room, &action, direction).await?;
    Ok(Json(ControlResponse {
        status: "success",
        message: outcome.message,
    }))
}

/// `POST /submit-report?report=`
pub async fn submit_report(
    State(state): State<AppState>,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<ReportResponse>, ApiError> {
    let client = connect_info.map(|ConnectInfo(addr)| addr.ip());
    state
        .reports
        .append(client, &query.report)
        .await
        .map_err(|e| {
            error!(error = %e, path = %state.reports.path().display(), "failed to write report");
            ApiError::internal("failed to record report")
        })?;
    Ok(Json(ReportResponse {
        message: "Report submitted successfully",
    }))
}
