pub mod room;
pub mod validated_json;

pub use room::CurrentRoom;
pub use validated_json::ValidatedJson;
