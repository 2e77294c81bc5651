use std::sync::Arc;

use crate::config::rooms::RoomSettings;
use crate::domain::deck::WordDeck;
use crate::services::registry::RoomRegistry;

/// Shared state handed to every handler and websocket session.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<RoomRegistry>,
}

impl AppState {
    pub fn new(registry: Arc<RoomRegistry>) -> Self {
        Self { registry }
    }

    /// Built-in deck and default room settings.
    pub fn with_defaults() -> Self {
        Self::new(Arc::new(RoomRegistry::new(
            WordDeck::builtin(),
            RoomSettings::default(),
        )))
    }
}
