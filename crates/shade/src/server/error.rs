//! HTTP error responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use shade_core::CoreError;

/// JSON error body: `{"detail": ..., "code": ...}`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: &'static str,
    pub detail: String,
    /// Gateway response body, forwarded verbatim.
    pub upstream_body: Option<String>,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    detail: &'a str,
    code: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    upstream_body: Option<&'a str>,
}

impl ApiError {
    pub fn new(status: StatusCode, code: &'static str, detail: impl Into<String>) -> Self {
        Self {
            status,
            code,
            detail: detail.into(),
            upstream_body: None,
        }
    }

    pub fn forbidden(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, "forbidden", detail)
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "internal_error", detail)
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::RoomNotFound { .. } => {
                Self::new(StatusCode::NOT_FOUND, "room_not_found", "Room not found")
            }
            CoreError::InvalidBuilding { segment } => Self::new(
                StatusCode::NOT_FOUND,
                "invalid_building",
                format!("incorrect building {segment}"),
            ),
            err @ CoreError::InvalidAction { .. } => {
                Self::new(StatusCode::BAD_REQUEST, "invalid_action", err.to_string())
            }
            CoreError::Gateway { status, body } => Self {
                status: upstream_status(status),
                code: "gateway_error",
                detail: format!("Failed to send command {body}"),
                upstream_body: Some(body),
            },
            err @ CoreError::TransportFailure { .. } => {
                Self::new(StatusCode::BAD_GATEWAY, "transport_failure", err.to_string())
            }
            err @ CoreError::Timeout { .. } => {
                Self::new(StatusCode::GATEWAY_TIMEOUT, "gateway_timeout", err.to_string())
            }
            err @ CoreError::Config { .. } => Self::internal(err.to_string()),
        }
    }
}

/// Error statuses pass through; a non-200 success or redirect from the
/// gateway still failed, so it becomes 502.
fn upstream_status(status: u16) -> StatusCode {
    StatusCode::from_u16(status)
        .ok()
        .filter(|s| s.is_client_error() || s.is_server_error())
        .unwrap_or(StatusCode::BAD_GATEWAY)
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            detail: &self.detail,
            code: self.code,
            upstream_body: self.upstream_body.as_deref(),
        };
        (self.status, Json(body)).into_response()
    }
}
