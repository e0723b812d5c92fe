// ── Command resolution ──
//
// Pure logic: room identifier + action + optional direction in, a fully
// resolved gateway call out. No I/O happens here.
//
// Check order matters. The building segment is validated first, before
// the catalog is consulted, then the action token.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::catalog::RoomCatalog;
use crate::command::{Action, ResolvedCommand};
use crate::config::GatewayConfig;
use crate::error::CoreError;
use crate::model::{RoomId, Segment, StateDescriptor};

/// Resolves raw command requests against the catalog and gateway settings.
#[derive(Debug, Clone)]
pub struct CommandResolver {
    catalog: Arc<RoomCatalog>,
    config: Arc<GatewayConfig>,
}

impl CommandResolver {
    pub fn new(catalog: Arc<RoomCatalog>, config: Arc<GatewayConfig>) -> Self {
        Self { catalog, config }
    }

    pub fn catalog(&self) -> &RoomCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Building segment for `room`.
    pub fn segment(&self, room: &str) -> Result<Segment, CoreError> {
        RoomId::new(room).segment()
    }

    /// Gateway username: the configured base followed by the segment tag.
    pub fn get_username(&self, room: &str) -> Result<String, CoreError> {
        let segment = self.segment(room)?;
        let username = format!("{}{}", self.config.username_base, segment.tag());
        debug!(%username, "resolved gateway username");
        Ok(username)
    }

    /// Gateway port serving `room`'s segment.
    pub fn get_server_port(&self, room: &str) -> Result<u16, CoreError> {
        self.config.port(self.segment(room)?)
    }

    /// Pick the descriptor for `direction`.
    ///
    /// Only rooms with several descriptors look at `direction`. An exact,
    /// case-sensitive match on `name` wins; anything else falls back to the
    /// first descriptor.
    pub fn get_states_by_direction(
        &self,
        room: &str,
        direction: Option<&str>,
    ) -> Result<&StateDescriptor, CoreError> {
        let states = self.catalog.get_states(room)?;
        // `get_states` never returns an empty slice; the catalog rejects those.
        let first = states.first().ok_or_else(|| CoreError::RoomNotFound {
            room: RoomId::new(room).to_string(),
        })?;

        if let Some(wanted) = direction.filter(|_| states.len() > 1) {
            if let Some(state) = states.iter().find(|s| s.name == wanted) {
                return Ok(state);
            }
            warn!(
                room = %RoomId::new(room),
                direction = wanted,
                fallback = %first.name,
                "direction not found in room, using first descriptor"
            );
        }

        Ok(first)
    }

    /// Resolve a full command. Nothing here touches the network.
    pub fn resolve(
        &self,
        room: &str,
        action: &str,
        direction: Option<&str>,
    ) -> Result<ResolvedCommand, CoreError> {
        let room_id = RoomId::new(room);
        let segment = room_id.segment()?;
        let username = self.get_username(room_id.as_str())?;
        let endpoint = self.config.endpoint(segment)?;
        let state = self.get_states_by_direction(room_id.as_str(), direction)?;
        let action: Action = action.parse()?;

        let group = match action {
            Action::Up | Action::Down => state.start.clone(),
            Action::Stop => state.stop.clone(),
        };

        Ok(ResolvedCommand {
            room: room_id,
            action,
            group,
            motion: action.motion_code(),
            username,
            password: self.config.password.clone(),
            endpoint,
        })
    }
}
