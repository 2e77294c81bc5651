use actix::Message;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::domain::colors::{CardColor, Team};
use crate::domain::membership::ParticipantId;
use crate::domain::view::RoomView;

/// Inbound client actions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ClientMsg {
    ClickCard { index: i64 },
    GetState,
    Ping,
    StartGame,
    GiveHint { word: String, count: i64 },
    EndTurn,
    ResetGame,
}

#[allow(clippy::large_enum_variant)]
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMsg {
    Init {
        room: String,
        game_state: RoomView,
    },

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
        game_state: RoomView,
    },

    GameStarted {
        game_state: RoomView,
    },

    HintGiven {
        team: Team,
        word: String,
        count: u8,
        guesses_left: u8,
    },

    State {
        game_state: RoomView,
    },

    Presence {
        players_count: usize,
        online_count: usize,
    },

    RoomClosed {
        room: String,
    },

    Error {
        kind: String,
        message: String,
    },

    Pong,
}

/// A server message stamped with the time it was produced.
#[derive(Debug, Clone, Serialize)]
pub struct Envelope {
    #[serde(flatten)]
    pub msg: ServerMsg,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}

impl Envelope {
    pub fn now(msg: ServerMsg) -> Self {
        Self {
            msg,
            timestamp: OffsetDateTime::now_utc(),
        }
    }
}

/// Delivered to each attached connection's mailbox by the room hub.
#[derive(Message, Debug, Clone)]
#[rtype(result = "()")]
pub struct RoomEvent(pub Envelope);

impl RoomEvent {
    pub fn closes_connection(&self) -> bool {
        matches!(self.0.msg, ServerMsg::RoomClosed { .. })
    }
}
