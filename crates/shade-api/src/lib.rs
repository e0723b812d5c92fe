// shade-api: Async Rust client for curtain gateway controllers.

pub mod client;
pub mod error;
pub mod request;
pub mod transport;

pub use client::{GatewayAck, GatewayClient, GatewayEndpoint};
pub use error::Error;
pub use request::GatewayRequest;
pub use transport::{DEFAULT_USER_AGENT, TlsMode, TransportConfig};
