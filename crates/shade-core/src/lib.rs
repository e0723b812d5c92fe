// shade-core: Room catalog, command resolution, and gateway dispatch.

pub mod catalog;
pub mod command;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod model;
pub mod resolver;

// ── Primary re-exports ──────────────────────────────────────────────
pub use catalog::RoomCatalog;
pub use command::{Action, CommandOutcome, ResolvedCommand};
pub use config::{GatewayConfig, TlsVerification};
pub use dispatcher::{Dispatcher, Gateway};
pub use error::CoreError;
pub use model::{RoomId, Segment, StateDescriptor};
pub use resolver::CommandResolver;
pub use shade_api::DEFAULT_USER_AGENT;
