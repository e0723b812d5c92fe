// ── Command dispatch ──
//
// Ties the resolver to a gateway transport. One resolved command, one
// outbound call, one classified result. No retries, no shared mutable
// state: concurrent calls are fully independent.

use std::future::Future;
use std::sync::Arc;

use shade_api::{GatewayAck, GatewayClient, GatewayEndpoint, GatewayRequest};
use tracing::info;

use crate::catalog::RoomCatalog;
use crate::command::{Action, CommandOutcome};
use crate::config::GatewayConfig;
use crate::error::CoreError;
use crate::resolver::CommandResolver;

/// Something that can deliver an encoded command to a gateway.
///
/// `GatewayClient` is the production implementation.
pub trait Gateway: Send + Sync {
    fn deliver(
        &self,
        endpoint: &GatewayEndpoint,
        request: &GatewayRequest,
    ) -> impl Future<Output = Result<GatewayAck, shade_api::Error>> + Send;
}

impl Gateway for GatewayClient {
    fn deliver(
        &self,
        endpoint: &GatewayEndpoint,
        request: &GatewayRequest,
    ) -> impl Future<Output = Result<GatewayAck, shade_api::Error>> + Send {
        self.send(endpoint, request)
    }
}

/// Entry point for `register` and `control` requests.
#[derive(Debug, Clone)]
pub struct Dispatcher<G> {
    resolver: CommandResolver,
    gateway: G,
}

impl<G: Gateway> Dispatcher<G> {
    pub fn new(catalog: Arc<RoomCatalog>, config: Arc<GatewayConfig>, gateway: G) -> Self {
        Self {
            resolver: CommandResolver::new(catalog, config),
            gateway,
        }
    }

    pub fn resolver(&self) -> &CommandResolver {
        &self.resolver
    }

    /// Direction labels a client can offer for `room`.
    pub fn register(&self, room: &str) -> Result<Vec<String>, CoreError> {
        self.resolver.catalog().directions(room)
    }

    /// Resolve and send one command.
    pub async fn control(
        &self,
        room: &str,
        action: &str,
        direction: Option<&str>,
    ) -> Result<CommandOutcome, CoreError> {
        let command = self.resolver.resolve(room, action, direction)?;

        match command.action {
            Action::Up => info!(room = %command.room, "Curtain going up"),
            Action::Down => info!(room = %command.room, "Curtain going down"),
            Action::Stop => info!(room = %command.room, "Curtain stopping"),
        }

        let request = command.gateway_request(&self.resolver.config().md5);
        self.gateway.deliver(&command.endpoint, &request).await?;

        Ok(CommandOutcome::sent(command.room, command.action))
    }
}
