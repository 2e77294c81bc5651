//! Per-room subscriber set and ordered fan-out.
//!
//! The hub lock is only ever taken while the room state lock is held or with no
//! other lock held, never the other way round. Rooms take it before releasing
//! their state lock so that deliveries leave in the order mutations were applied.

use actix::Recipient;
use parking_lot::{Mutex, MutexGuard};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::domain::colors::{CardColor, Team};
use crate::domain::membership::ParticipantId;
use crate::domain::view::RoomSnapshot;
use crate::ws::protocol::{Envelope, RoomEvent, ServerMsg};

/// One attached connection.
#[derive(Clone)]
pub struct Subscriber {
    pub conn_id: Uuid,
    pub identity: ParticipantId,
    pub recipient: Recipient<RoomEvent>,
}

/// A room event before it is projected for a particular viewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Init,
    CardRevealed {
        index: usize,
        color: CardColor,
        user_id: ParticipantId,
    },
    TurnSwitch {
        current_team: Team,
        current_turn: u32,
    },
    GameOver {
        winner: Team,
    },
    GameStarted,
    HintGiven {
        team: Team,
        word: String,
        count: u8,
        guesses_left: u8,
    },
    State,
    Presence {
        players_count: usize,
        online_count: usize,
    },
    RoomClosed,
}

impl Notice {
    /// Builds the message `viewer` receives. Snapshot-carrying notices are
    /// projected through the viewer's own role.
    pub fn render(&self, snapshot: &RoomSnapshot, viewer: ParticipantId) -> ServerMsg {
        let view = || snapshot.view_for(Some(viewer));
        match self {
            Notice::Init => ServerMsg::Init {
                room: snapshot.room_code.clone(),
                game_state: view(),
            },
            Notice::CardRevealed {
                index,
                color,
                user_id,
            } => ServerMsg::CardRevealed {
                index: *index,
                color: *color,
                user_id: *user_id,
            },
            Notice::TurnSwitch {
                current_team,
                current_turn,
            } => ServerMsg::TurnSwitch {
                current_team: *current_team,
                current_turn: *current_turn,
            },
            Notice::GameOver { winner } => ServerMsg::GameOver {
                winner: *winner,
                game_state: view(),
            },
            Notice::GameStarted => ServerMsg::GameStarted { game_state: view() },
            Notice::HintGiven {
                team,
                word,
                count,
                guesses_left,
            } => ServerMsg::HintGiven {
                team: *team,
                word: word.clone(),
                count: *count,
                guesses_left: *guesses_left,
            },
            Notice::State => ServerMsg::State { game_state: view() },
            Notice::Presence {
                players_count,
                online_count,
            } => ServerMsg::Presence {
                players_count: *players_count,
                online_count: *online_count,
            },
            Notice::RoomClosed => ServerMsg::RoomClosed {
                room: snapshot.room_code.clone(),
            },
        }
    }
}

#[derive(Default)]
pub struct ConnectionHub {
    subscribers: Mutex<Vec<Subscriber>>,
}

/// Exclusive access to the subscriber list for one delivery round.
pub struct Fanout<'a> {
    subscribers: MutexGuard<'a, Vec<Subscriber>>,
}

impl ConnectionHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lock(&self) -> Fanout<'_> {
        Fanout {
            subscribers: self.subscribers.lock(),
        }
    }

    pub fn len(&self) -> usize {
        self.subscribers.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops subscribers whose session has gone away. Returns how many were removed.
    pub fn prune(&self) -> usize {
        let mut subscribers = self.subscribers.lock();
        let before = subscribers.len();
        subscribers.retain(|s| s.recipient.connected());
        let removed = before - subscribers.len();
        if removed > 0 {
            debug!(removed, "pruned disconnected subscribers");
        }
        removed
    }
}

impl Fanout<'_> {
    pub fn add(&mut self, subscriber: Subscriber) {
        self.subscribers.push(subscriber);
    }

    pub fn remove(&mut self, conn_id: Uuid) -> Option<Subscriber> {
        let pos = self.subscribers.iter().position(|s| s.conn_id == conn_id)?;
        Some(self.subscribers.remove(pos))
    }

    pub fn has_identity(&self, identity: ParticipantId) -> bool {
        self.subscribers.iter().any(|s| s.identity == identity)
    }

    pub fn clear(&mut self) {
        self.subscribers.clear();
    }

    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }

    /// Sends every notice, in order, to every live subscriber.
    pub fn broadcast(&self, snapshot: &RoomSnapshot, notices: &[Notice]) {
        if notices.is_empty() {
            return;
        }
        for subscriber in self.subscribers.iter() {
            if !subscriber.recipient.connected() {
                continue;
            }
            for notice in notices {
                Self::deliver(subscriber, snapshot, notice);
            }
        }
    }

    /// Sends a single notice to one connection.
    pub fn send_to(&self, conn_id: Uuid, snapshot: &RoomSnapshot, notice: &Notice) {
        match self.subscribers.iter().find(|s| s.conn_id == conn_id) {
            Some(subscriber) => Self::deliver(subscriber, snapshot, notice),
            None => warn!(%conn_id, "send_to unknown connection"),
        }
    }

    fn deliver(subscriber: &Subscriber, snapshot: &RoomSnapshot, notice: &Notice) {
        let msg = notice.render(snapshot, subscriber.identity);
        subscriber.recipient.do_send(RoomEvent(Envelope::now(msg)));
    }
}
