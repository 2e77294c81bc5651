use actix_web::web;

pub mod health;
pub mod rooms;

/// Registers every HTTP route and the websocket endpoint.
///
/// `main.rs` wraps the result with CORS and tracing middleware; tests mount it
/// bare.
pub fn configure(cfg: &mut web::ServiceConfig) {
    // Health check: /health
    cfg.configure(health::configure_routes);

    // Room management for the bot caller: /api/rooms/**
    cfg.service(web::scope("/api/rooms").configure(rooms::configure_routes));

    // Websocket: /ws?room=CODE&user_id=ID
    cfg.route("/ws", web::get().to(crate::ws::upgrade));
}
