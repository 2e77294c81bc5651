//! Room orchestration on top of the pure domain.

pub mod registry;
pub mod room;

pub use registry::RoomRegistry;
pub use room::{Action, Room, RoomSummary};
