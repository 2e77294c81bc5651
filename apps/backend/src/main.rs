use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use spyroom::config::rooms::RoomsConfig;
use spyroom::config::server::ServerConfig;
use spyroom::middleware::{cors_middleware, RequestTrace, TraceSpan};
use spyroom::services::registry::RoomRegistry;
use spyroom::state::app_state::AppState;
use spyroom::{routes, telemetry};
use tracing::{error, info};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    let (server, rooms) = match (ServerConfig::from_env(), RoomsConfig::from_env()) {
        (Ok(server), Ok(rooms)) => (server, rooms),
        (Err(e), _) | (_, Err(e)) => {
            error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };

    let deck = match rooms.load_deck() {
        Ok(deck) => deck,
        Err(e) => {
            error!(error = %e, "failed to load word deck");
            std::process::exit(1);
        }
    };
    info!(words = deck.len(), "word deck loaded");

    let registry = Arc::new(RoomRegistry::new(deck, rooms.settings.clone()));
    let sweeper = registry.spawn_sweeper(rooms.settings.sweep_interval);
    let data = web::Data::new(AppState::new(registry.clone()));

    info!(host = %server.host, port = server.port, "starting spyroom");

    let result = HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware())
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((server.host.as_str(), server.port))?
    .run()
    .await;

    sweeper.abort();
    registry.shutdown();
    result
}
