//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text and stable exit codes.

use miette::Diagnostic;
use thiserror::Error;

use shade_config::ConfigError;
use shade_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
    pub const REJECTED: i32 = 6;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
    pub const CONFIG: i32 = 9;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Resolution ───────────────────────────────────────────────────
    #[error("Room '{room}' not found")]
    #[diagnostic(
        code(shade::room_not_found),
        help("Run: shade rooms to see the rooms in the catalog")
    )]
    RoomNotFound { room: String },

    #[error("Incorrect building '{segment}'")]
    #[diagnostic(
        code(shade::invalid_building),
        help("The second character of a room identifier must be A, B, or C.")
    )]
    InvalidBuilding { segment: String },

    #[error("Invalid action '{action}'")]
    #[diagnostic(code(shade::invalid_action), help("Choose 'up', 'down', or 'stop'."))]
    InvalidAction { action: String },

    // ── Gateway ──────────────────────────────────────────────────────
    #[error("Gateway rejected the command (HTTP {status})")]
    #[diagnostic(code(shade::gateway_rejected), help("Gateway said: {body}"))]
    GatewayRejected { status: u16, body: String },

    #[error("Could not reach gateway at {url}")]
    #[diagnostic(
        code(shade::connection_failed),
        help(
            "Check that the gateway is running and reachable.\n\
             Reason: {reason}"
        )
    )]
    ConnectionFailed { url: String, reason: String },

    #[error("Gateway did not answer within {seconds}s")]
    #[diagnostic(
        code(shade::timeout),
        help("Raise gateway.timeout_secs or check the gateway's responsiveness.")
    )]
    Timeout { seconds: u64 },

    // ── Configuration ────────────────────────────────────────────────
    #[error(transparent)]
    #[diagnostic(
        code(shade::config),
        help(
            "Check the configuration file and SHADE_* / legacy environment variables.\n\
             Run: shade default-config for an example."
        )
    )]
    Config(#[from] ConfigError),

    #[error("Configuration error: {message}")]
    #[diagnostic(code(shade::config))]
    InvalidSetup { message: String },

    // ── Server ───────────────────────────────────────────────────────
    #[error("Failed to listen on {bind}")]
    #[diagnostic(code(shade::bind), help("Is another process using the port?"))]
    Bind {
        bind: String,
        #[source]
        source: std::io::Error,
    },

    // ── IO / Serialization ────────────────────────────────────────────
    #[error(transparent)]
    #[diagnostic(code(shade::io))]
    Io(#[from] std::io::Error),

    #[error("Failed to render output: {0}")]
    #[diagnostic(code(shade::json))]
    Json(#[from] serde_json::Error),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::RoomNotFound { .. } | Self::InvalidBuilding { .. } => exit_code::NOT_FOUND,
            Self::InvalidAction { .. } => exit_code::USAGE,
            Self::GatewayRejected { .. } => exit_code::REJECTED,
            Self::ConnectionFailed { .. } | Self::Bind { .. } => exit_code::CONNECTION,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::Config(_) | Self::InvalidSetup { .. } => exit_code::CONFIG,
            Self::Io(_) | Self::Json(_) => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::RoomNotFound { room } => CliError::RoomNotFound { room },
            CoreError::InvalidBuilding { segment } => CliError::InvalidBuilding { segment },
            CoreError::InvalidAction { action } => CliError::InvalidAction { action },
            CoreError::Gateway { status, body } => CliError::GatewayRejected { status, body },
            CoreError::TransportFailure { url, reason } => CliError::ConnectionFailed { url, reason },
            CoreError::Timeout { timeout_secs } => CliError::Timeout {
                seconds: timeout_secs,
            },
            CoreError::Config { message } => CliError::InvalidSetup { message },
        }
    }
}

impl From<shade_api::Error> for CliError {
    fn from(err: shade_api::Error) -> Self {
        CoreError::from(err).into()
    }
}
