// ── Domain model ──
//
// Room identifiers, building segments, and the per-motor state codes
// stored in the room catalog.

mod room;
mod state;

pub use room::{RoomId, Segment};
pub use state::StateDescriptor;
