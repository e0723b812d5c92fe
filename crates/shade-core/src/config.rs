// ── Runtime gateway configuration ──
//
// These types describe *how* to reach the building gateways. They carry
// credential data and connection tuning, but never touch disk.
// shade-config constructs a `GatewayConfig` once at startup and hands it in.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use shade_api::{GatewayEndpoint, TlsMode, TransportConfig};

use crate::error::CoreError;
use crate::model::Segment;

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(PathBuf),
    /// Skip verification (`insecure_skip_verify`). Gateways ship self-signed certs.
    #[default]
    DangerAcceptInvalid,
}

impl From<&TlsVerification> for TlsMode {
    fn from(tls: &TlsVerification) -> Self {
        match tls {
            TlsVerification::SystemDefaults => TlsMode::System,
            TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
            TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
        }
    }
}

/// Process-wide gateway settings. Immutable after startup.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// URL scheme (`https` in production).
    pub scheme: String,
    /// Gateway host shared by every segment.
    pub host: String,
    /// Gateway port per building segment.
    pub ports: BTreeMap<Segment, u16>,
    /// Username prefix; the segment tag is appended.
    pub username_base: String,
    /// Password shared across segments.
    pub password: SecretString,
    /// Static `md5` field value sent with every command.
    pub md5: SecretString,
    pub tls: TlsVerification,
    /// Per-call timeout.
    pub timeout: Duration,
    pub user_agent: String,
}

impl GatewayConfig {
    /// Port configured for `segment`.
    pub fn port(&self, segment: Segment) -> Result<u16, CoreError> {
        self.ports
            .get(&segment)
            .copied()
            .ok_or_else(|| CoreError::Config {
                message: format!("no gateway port configured for segment {segment}"),
            })
    }

    /// Gateway endpoint serving `segment`.
    pub fn endpoint(&self, segment: Segment) -> Result<GatewayEndpoint, CoreError> {
        Ok(GatewayEndpoint::new(
            self.scheme.as_str(),
            self.host.as_str(),
            self.port(segment)?,
        ))
    }

    /// Transport settings for building the shared `GatewayClient`.
    pub fn transport(&self) -> TransportConfig {
        TransportConfig {
            tls: TlsMode::from(&self.tls),
            timeout: self.timeout,
            user_agent: self.user_agent.clone(),
        }
    }
}
