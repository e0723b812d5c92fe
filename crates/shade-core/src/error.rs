// ── Core error types ──
//
// Command-level errors from shade-core. Resolution errors (room, building,
// action) are raised before any network call; gateway and transport errors
// only after the single outbound call. The `From<shade_api::Error>` impl
// translates transport-layer errors into this taxonomy.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Resolution errors ────────────────────────────────────────────
    #[error("Room not found: {room}")]
    RoomNotFound { room: String },

    #[error("incorrect building '{segment}'")]
    InvalidBuilding { segment: String },

    #[error("Invalid action '{action}'. Choose 'up', 'down', or 'stop'.")]
    InvalidAction { action: String },

    // ── Gateway errors ───────────────────────────────────────────────
    /// Non-200 answer. Status and body are carried verbatim.
    #[error("Gateway rejected command (HTTP {status}): {body}")]
    Gateway { status: u16, body: String },

    #[error("Cannot reach gateway at {url}: {reason}")]
    TransportFailure { url: String, reason: String },

    #[error("Gateway did not answer within {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CoreError {
    /// Returns `true` for errors raised before any network call.
    pub fn is_resolution(&self) -> bool {
        matches!(
            self,
            Self::RoomNotFound { .. } | Self::InvalidBuilding { .. } | Self::InvalidAction { .. }
        )
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<shade_api::Error> for CoreError {
    fn from(err: shade_api::Error) -> Self {
        match err {
            shade_api::Error::Gateway { status, body } => CoreError::Gateway { status, body },
            shade_api::Error::Timeout { timeout_secs } => CoreError::Timeout { timeout_secs },
            shade_api::Error::Transport(e) => CoreError::TransportFailure {
                url: e
                    .url()
                    .map_or_else(|| "<unknown>".into(), ToString::to_string),
                reason: e.to_string(),
            },
            shade_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid gateway URL: {e}"),
            },
            shade_api::Error::Tls(msg) => CoreError::Config {
                message: format!("TLS error: {msg}"),
            },
        }
    }
}
