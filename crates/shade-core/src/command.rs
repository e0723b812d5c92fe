// ── Command types ──
//
// Actions a caller can request, the fully resolved gateway call a
// resolver produces, and the outcome handed back after dispatch.

use std::fmt;
use std::str::FromStr;

use secrecy::SecretString;
use serde::Serialize;
use shade_api::{GatewayEndpoint, GatewayRequest};

use crate::error::CoreError;
use crate::model::RoomId;

/// Requested curtain movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Up,
    Down,
    Stop,
}

impl Action {
    /// Motion code sent in the `value` field. Stop sends none.
    pub fn motion_code(self) -> Option<u8> {
        match self {
            Self::Up => Some(0),
            Self::Down => Some(1),
            Self::Stop => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Stop => "stop",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = CoreError;

    /// Case-sensitive: only the lowercase tokens are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            "stop" => Ok(Self::Stop),
            other => Err(CoreError::InvalidAction {
                action: other.to_owned(),
            }),
        }
    }
}

/// A command with every gateway-facing detail worked out.
#[derive(Debug, Clone)]
pub struct ResolvedCommand {
    pub room: RoomId,
    pub action: Action,
    /// The descriptor's `start` code for up/down, `stop` code for stop.
    pub group: String,
    pub motion: Option<u8>,
    pub username: String,
    pub password: SecretString,
    pub endpoint: GatewayEndpoint,
}

impl ResolvedCommand {
    /// Wire request for this command.
    pub fn gateway_request(&self, md5: &SecretString) -> GatewayRequest {
        GatewayRequest {
            username: self.username.clone(),
            password: self.password.clone(),
            md5: md5.clone(),
            group: self.group.clone(),
            value: self.motion,
        }
    }
}

/// Result of a command the gateway accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandOutcome {
    pub room: RoomId,
    pub action: Action,
    pub message: String,
}

impl CommandOutcome {
    pub fn sent(room: RoomId, action: Action) -> Self {
        let message = format!("Curtain in room {room} {action} command sent successfully.");
        Self {
            room,
            action,
            message,
        }
    }
}
