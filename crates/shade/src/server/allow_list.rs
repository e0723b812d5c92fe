//! Client IP allow-list in front of the curtain routes.

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use axum::body::Body;
use axum::extract::{ConnectInfo, State};
use axum::http::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use shade_config::{IpNet, network_contains};
use tracing::warn;

use super::error::ApiError;

/// Networks allowed to use the control routes. Empty allows everyone.
#[derive(Debug, Clone, Default)]
pub struct AllowList {
    networks: Vec<IpNet>,
}

impl AllowList {
    pub fn new(networks: Vec<IpNet>) -> Self {
        Self { networks }
    }

    /// Whether a peer may pass. Unknown peers only pass an open list.
    pub fn permits(&self, peer: Option<IpAddr>) -> bool {
        if self.networks.is_empty() {
            return true;
        }
        peer.is_some_and(|ip| self.networks.iter().any(|net| network_contains(net, ip)))
    }
}

/// Middleware rejecting peers outside the allow-list with 403.
pub async fn guard(
    State(allow_list): State<Arc<AllowList>>,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let peer = connect_info.map(|ConnectInfo(addr)| addr.ip());
    if allow_list.permits(peer) {
        return next.run(request).await;
    }

    warn!(
        peer = ?peer,
        path = %request.uri().path(),
        "rejected client outside allowed networks"
    );
    ApiError::forbidden("client network is not allowed").into_response()
}
