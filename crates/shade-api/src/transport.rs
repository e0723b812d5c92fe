// Transport configuration for building the gateway's reqwest::Client.
//
// Client-wide settings live here so the client module only deals with
// request mechanics.

use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::{Certificate, ClientBuilder};

use crate::error::Error;

/// User-Agent the gateways expect from the vendor's phone app.
pub const DEFAULT_USER_AGENT: &str = "XXter/1.0";

/// TLS verification mode (api-level mirror of core's `TlsVerification`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TlsMode {
    /// Use the system certificate store.
    System,
    /// Use a custom CA certificate from the given PEM file.
    CustomCa(PathBuf),
    /// Accept any certificate (gateways ship self-signed certs).
    DangerAcceptInvalid,
}

/// Transport configuration for building the gateway HTTP client.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub tls: TlsMode,
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            tls: TlsMode::DangerAcceptInvalid,
            timeout: Duration::from_secs(10),
            user_agent: DEFAULT_USER_AGENT.into(),
        }
    }
}

impl TransportConfig {
    /// Build the `reqwest::Client` shared by every segment's gateway.
    ///
    /// Gateways are small HTTP/1.1 appliances that handle one command per
    /// connection, so the pool keeps at most one idle socket per host.
    pub fn build_client(&self) -> Result<reqwest::Client, Error> {
        let builder = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(self.user_agent.as_str())
            .http1_only()
            .pool_max_idle_per_host(1);

        self.tls
            .apply(builder)?
            .build()
            .map_err(|e| Error::Tls(format!("failed to build HTTP client: {e}")))
    }
}

impl TlsMode {
    fn apply(&self, builder: ClientBuilder) -> Result<ClientBuilder, Error> {
        Ok(match self {
            Self::System => builder,
            Self::CustomCa(path) => builder.add_root_certificate(load_ca(path)?),
            Self::DangerAcceptInvalid => builder.danger_accept_invalid_certs(true),
        })
    }
}

fn load_ca(path: &Path) -> Result<Certificate, Error> {
    let pem = std::fs::read(path)
        .map_err(|e| Error::Tls(format!("cannot read CA file {}: {e}", path.display())))?;
    Certificate::from_pem(&pem)
        .map_err(|e| Error::Tls(format!("CA file {} is not PEM: {e}", path.display())))
}
