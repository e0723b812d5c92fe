// Gateway HTTP client
//
// Wraps `reqwest::Client` with the gateway's URL layout and response
// classification. Exactly one POST per command; retrying is the caller's
// business and nothing in this crate does it.

use std::fmt;
use std::time::Duration;

use reqwest::StatusCode;
use reqwest::header::CONTENT_TYPE;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::request::GatewayRequest;
use crate::transport::TransportConfig;

/// Path every gateway exposes for phone-app commands.
pub const SEND_PATH: &str = "/iphone/send";

/// Network address of one building segment's gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayEndpoint {
    pub scheme: String,
    pub host: String,
    pub port: u16,
}

impl GatewayEndpoint {
    pub fn new(scheme: impl Into<String>, host: impl Into<String>, port: u16) -> Self {
        Self {
            scheme: scheme.into(),
            host: host.into(),
            port,
        }
    }

    /// HTTPS endpoint, the only scheme production gateways serve.
    pub fn https(host: impl Into<String>, port: u16) -> Self {
        Self::new("https", host, port)
    }

    /// `{scheme}://{host}:{port}/iphone/send`
    pub fn send_url(&self) -> Result<Url, Error> {
        Ok(Url::parse(&format!("{self}{SEND_PATH}"))?)
    }
}

impl fmt::Display for GatewayEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Bare IPv6 literals need brackets before the port separator.
        if self.host.contains(':') && !self.host.starts_with('[') {
            write!(f, "{}://[{}]:{}", self.scheme, self.host, self.port)
        } else {
            write!(f, "{}://{}:{}", self.scheme, self.host, self.port)
        }
    }
}

/// Successful gateway answer (HTTP 200).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayAck {
    pub body: String,
}

/// HTTP client for the gateway command endpoint.
///
/// Cheap to clone; the inner `reqwest::Client` shares its connection pool.
#[derive(Debug, Clone)]
pub struct GatewayClient {
    http: reqwest::Client,
    timeout: Duration,
}

impl GatewayClient {
    /// Create a client from a `TransportConfig`.
    pub fn new(transport: &TransportConfig) -> Result<Self, Error> {
        Ok(Self {
            http: transport.build_client()?,
            timeout: transport.timeout,
        })
    }

    /// POST one encoded command and classify the answer.
    ///
    /// HTTP 200 is the only success. Any other status comes back as
    /// `Error::Gateway` with the body untouched.
    pub async fn send(
        &self,
        endpoint: &GatewayEndpoint,
        request: &GatewayRequest,
    ) -> Result<GatewayAck, Error> {
        let url = endpoint.send_url()?;
        debug!(%url, body = %request.redacted(), "POST gateway command");

        let resp = self
            .http
            .post(url)
            .header(CONTENT_TYPE, "text/plain")
            .body(request.encode())
            .send()
            .await
            .map_err(|e| self.classify_transport(e))?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| self.classify_transport(e))?;
        debug!(status = status.as_u16(), "gateway answered");

        if status == StatusCode::OK {
            Ok(GatewayAck { body })
        } else {
            Err(Error::Gateway {
                status: status.as_u16(),
                body,
            })
        }
    }

    fn classify_transport(&self, err: reqwest::Error) -> Error {
        if err.is_timeout() {
            Error::Timeout {
                timeout_secs: self.timeout.as_secs(),
            }
        } else {
            Error::Transport(err)
        }
    }
}
