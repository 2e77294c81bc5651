#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod config;
pub mod domain;
pub mod error;
pub mod errors;
pub mod extractors;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod state;
pub mod telemetry;
pub mod trace_ctx;
pub mod utils;
pub mod ws;


// Re-exports for public API
pub use config::rooms::{RoomSettings, RoomsConfig};
pub use config::server::ServerConfig;
pub use error::AppError;
pub use errors::{ErrorCode, GameError};
pub use middleware::cors::cors_middleware;
pub use middleware::request_trace::RequestTrace;
pub use middleware::trace_span::TraceSpan;
pub use services::registry::RoomRegistry;
pub use services::room::{Action, Room};
pub use state::app_state::AppState;

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_bootstrap::logging::init();
}
