//! Role-based projection of room state.
//!
//! Everything a client ever sees about a board goes through [`RoomSnapshot::view_for`].
//! The full ownership array is attached only when the viewer is a recorded captain with
//! the spymaster role in the very snapshot being projected; nothing the client sends can
//! influence that decision.

use serde::Serialize;

use crate::domain::colors::{CardColor, Team};
use crate::domain::membership::{Membership, ParticipantId, Role};
use crate::domain::state::{GameState, Hint, Remaining, Status};

/// Immutable copy of a room taken under the room lock and projected outside it.
#[derive(Debug, Clone)]
pub struct RoomSnapshot {
    pub room_code: String,
    pub game: GameState,
    pub members: Membership,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CaptainSeats {
    pub red: bool,
    pub blue: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewerInfo {
    pub user_id: ParticipantId,
    pub team: Team,
    pub role: Role,
}

/// What any participant may see.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublicView {
    pub room_id: String,
    pub words: Vec<String>,
    pub revealed: Vec<bool>,
    pub revealed_colors: Vec<Option<CardColor>>,
    pub current_team: Team,
    pub current_turn: u32,
    pub remaining: Remaining,
    pub game_status: Status,
    pub winner: Option<Team>,
    pub hint: Option<Hint>,
    pub guesses_left: u8,
    pub players_count: usize,
    pub online_count: usize,
    pub captains: CaptainSeats,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub viewer: Option<ViewerInfo>,
}

/// Public view plus, for spymasters only, the hidden key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoomView {
    #[serde(flatten)]
    pub public: PublicView,
    #[serde(rename = "colors", skip_serializing_if = "Option::is_none")]
    pub ownership: Option<Vec<CardColor>>,
}

impl RoomView {
    pub fn has_ownership(&self) -> bool {
        self.ownership.is_some()
    }
}

impl RoomSnapshot {
    pub fn public_view(&self, viewer: Option<ParticipantId>) -> PublicView {
        let board = self.game.board();
        let captains = self.members.captains();
        PublicView {
            room_id: self.room_code.clone(),
            words: board.words().to_vec(),
            revealed: board.revealed().to_vec(),
            revealed_colors: board.revealed_colors(),
            current_team: self.game.current_team(),
            current_turn: self.game.turn_number(),
            remaining: self.game.remaining(),
            game_status: self.game.status(),
            winner: self.game.winner(),
            hint: self.game.hint().cloned(),
            guesses_left: self.game.guesses_left(),
            players_count: self.members.len(),
            online_count: self.members.online_count(),
            captains: CaptainSeats {
                red: captains.red.is_some(),
                blue: captains.blue.is_some(),
            },
            viewer: viewer
                .and_then(|id| self.members.get(id))
                .map(|m| ViewerInfo {
                    user_id: m.user_id,
                    team: m.team,
                    role: m.role,
                }),
        }
    }

    /// The view `viewer` is entitled to.
    pub fn view_for(&self, viewer: Option<ParticipantId>) -> RoomView {
        let ownership = viewer
            .filter(|&id| self.members.is_spymaster(id))
            .map(|_| self.game.board().ownership().to_vec());
        RoomView {
            public: self.public_view(viewer),
            ownership,
        }
    }
}
