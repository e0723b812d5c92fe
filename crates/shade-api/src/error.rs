use thiserror::Error;

/// Top-level error type for the `shade-api` crate.
///
/// Covers the transport and the gateway's own answer. `shade-core` maps
/// these into the command-level taxonomy.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL construction error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Request timed out.
    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// TLS setup or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Gateway ─────────────────────────────────────────────────────
    /// The gateway answered with anything other than HTTP 200.
    /// Status and body are kept exactly as received.
    #[error("Gateway rejected command (HTTP {status}): {body}")]
    Gateway { status: u16, body: String },
}

impl Error {
    /// Returns `true` if the failure happened before the gateway answered.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Timeout { .. })
    }

    /// The upstream HTTP status, when the gateway answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Gateway { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
