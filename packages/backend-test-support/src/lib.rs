//! Shared helpers for spyroom integration tests: log setup and a websocket
//! client that speaks the room protocol's JSON frames.

pub mod logging;
pub mod ws_client;

pub use ws_client::WsClient;
