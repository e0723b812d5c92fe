// ── Room catalog ──
//
// Read-only mapping from room identifier to its state descriptors.
// Built once from an externally supplied source; replaced wholesale on
// restart, never mutated in place.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use crate::error::CoreError;
use crate::model::{RoomId, StateDescriptor};

/// Room identifier → ordered state descriptors.
#[derive(Debug, Clone, Default)]
pub struct RoomCatalog {
    rooms: HashMap<RoomId, Vec<StateDescriptor>>,
}

impl RoomCatalog {
    /// Build a catalog, upper-casing keys.
    ///
    /// Rejects rooms without descriptors and keys that collide once
    /// upper-cased.
    pub fn from_rooms(
        rooms: impl IntoIterator<Item = (String, Vec<StateDescriptor>)>,
    ) -> Result<Self, CoreError> {
        let mut map = HashMap::new();
        for (raw, states) in rooms {
            let id = RoomId::new(&raw);
            if states.is_empty() {
                return Err(CoreError::Config {
                    message: format!("room {id} has no state descriptors"),
                });
            }
            match map.entry(id) {
                Entry::Occupied(e) => {
                    return Err(CoreError::Config {
                        message: format!("room {} is listed more than once", e.key()),
                    });
                }
                Entry::Vacant(e) => {
                    e.insert(states);
                }
            }
        }
        Ok(Self { rooms: map })
    }

    /// Parse the catalog's JSON form: `{"1A1": [{"name": "", "start": "G1", "stop": "G2"}]}`.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let rooms: HashMap<String, Vec<StateDescriptor>> =
            serde_json::from_str(json).map_err(|e| CoreError::Config {
                message: format!("invalid room catalog: {e}"),
            })?;
        Self::from_rooms(rooms)
    }

    /// State descriptors for `room`, in catalog order.
    pub fn get_states(&self, room: &str) -> Result<&[StateDescriptor], CoreError> {
        let id = RoomId::new(room);
        self.rooms
            .get(&id)
            .map(Vec::as_slice)
            .ok_or_else(|| CoreError::RoomNotFound {
                room: id.to_string(),
            })
    }

    /// Direction labels for `room`, in catalog order.
    pub fn directions(&self, room: &str) -> Result<Vec<String>, CoreError> {
        Ok(self
            .get_states(room)?
            .iter()
            .map(|state| state.name.clone())
            .collect())
    }

    /// All room identifiers, sorted.
    pub fn rooms(&self) -> Vec<&RoomId> {
        let mut ids: Vec<_> = self.rooms.keys().collect();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}
