//! Room codes to rooms: creation, lookup and eviction.

use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::config::rooms::RoomSettings;
use crate::domain::deck::WordDeck;
use crate::domain::membership::{Member, ParticipantId};
use crate::errors::domain::GameError;
use crate::services::room::{Room, RoomSummary};
use crate::utils::room_code::{generate_room_code, normalize_room_code};

pub struct RoomRegistry {
    rooms: DashMap<String, Arc<Room>>,
    deck: Arc<WordDeck>,
    settings: RoomSettings,
}

impl RoomRegistry {
    pub fn new(deck: WordDeck, settings: RoomSettings) -> Self {
        Self {
            rooms: DashMap::new(),
            deck: Arc::new(deck),
            settings,
        }
    }

    /// Creates a room under a fresh code.
    ///
    /// The capacity check is a soft cap: concurrent creations racing past it may
    /// overshoot by a few rooms.
    pub fn create(&self) -> Result<Arc<Room>, GameError> {
        if self.rooms.len() >= self.settings.max_rooms {
            warn!(max_rooms = self.settings.max_rooms, "room limit reached");
            return Err(GameError::RegistryFull(self.settings.max_rooms));
        }
        loop {
            let code = generate_room_code();
            if let Entry::Vacant(slot) = self.rooms.entry(code.clone()) {
                let room = Arc::new(Room::new(code.clone(), self.deck.clone())?);
                slot.insert(room.clone());
                info!(room = %code, "room created");
                return Ok(room);
            }
        }
    }

    /// Looks a room up by code, case-insensitively.
    pub fn get(&self, code: &str) -> Result<Arc<Room>, GameError> {
        let code = normalize_room_code(code);
        self.rooms
            .get(&code)
            .map(|entry| entry.value().clone())
            .ok_or(GameError::RoomNotFound(code))
    }

    pub fn join(
        &self,
        code: &str,
        identity: ParticipantId,
        display_name: &str,
    ) -> Result<Member, GameError> {
        self.get(code)?.join(identity, display_name)
    }

    /// Removes and closes a room.
    pub fn remove(&self, code: &str) -> Option<Arc<Room>> {
        let (_, room) = self.rooms.remove(&normalize_room_code(code))?;
        room.close();
        Some(room)
    }

    pub fn list(&self) -> Vec<RoomSummary> {
        let mut rooms: Vec<RoomSummary> = self.rooms.iter().map(|e| e.value().summary()).collect();
        rooms.sort_by(|a, b| a.room_code.cmp(&b.room_code));
        rooms
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// Evicts rooms past their maximum age, and finished rooms nobody is
    /// watching once the grace period has passed. Returns how many were evicted.
    pub fn sweep(&self, now: Instant) -> usize {
        let max_age = self.settings.max_age;
        let grace = self.settings.finished_grace;
        let evictable =
            |room: &Room| room.is_expired(now, max_age) || room.is_idle_finished(now, grace);

        let candidates: Vec<String> = self
            .rooms
            .iter()
            .filter(|e| evictable(e.value()))
            .map(|e| e.key().clone())
            .collect();

        let mut evicted = 0;
        for code in candidates {
            if let Some((_, room)) = self.rooms.remove_if(&code, |_, room| evictable(room)) {
                room.close();
                evicted += 1;
            }
        }
        if evicted > 0 {
            info!(evicted, remaining = self.rooms.len(), "swept rooms");
        }
        evicted
    }

    /// Runs `sweep` every `interval` until the task is aborted.
    pub fn spawn_sweeper(self: &Arc<Self>, interval: Duration) -> JoinHandle<()> {
        let registry = Arc::clone(self);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // First tick fires immediately.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                registry.sweep(Instant::now());
            }
        })
    }

    /// Closes every room.
    pub fn shutdown(&self) {
        let codes: Vec<String> = self.rooms.iter().map(|e| e.key().clone()).collect();
        let closed = codes.iter().filter_map(|code| self.remove(code)).count();
        info!(closed, "registry shut down");
    }
}
