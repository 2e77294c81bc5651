//! A single game room: board, game state, roster and attached connections.
//!
//! Every mutation runs under the room's state lock. Notices produced by a
//! mutation are handed to the connection hub before that lock is released.

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use actix::Recipient;
use parking_lot::{Mutex, MutexGuard};
use serde::Serialize;
use time::OffsetDateTime;
use tracing::{debug, info};
use uuid::Uuid;

use crate::domain::board::{Board, BOARD_SIZE};
use crate::domain::colors::Team;
use crate::domain::deck::WordDeck;
use crate::domain::membership::{Member, Membership, ParticipantId, Role};
use crate::domain::state::{GameState, Status};
use crate::domain::view::{RoomSnapshot, RoomView};
use crate::errors::domain::GameError;
use crate::ws::hub::{ConnectionHub, Notice, Subscriber};
use crate::ws::protocol::RoomEvent;

/// Something a participant asks the room to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Reveal { index: i64 },
    Start,
    Hint { word: String, count: i64 },
    EndTurn,
    Reset,
}

#[derive(Debug, Clone, Serialize)]
pub struct RoomSummary {
    pub room_code: String,
    pub game_status: Status,
    pub winner: Option<Team>,
    pub players_count: usize,
    pub online_count: usize,
    pub connections: usize,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

struct RoomInner {
    game: GameState,
    members: Membership,
    closed: bool,
    finished_at: Option<Instant>,
}

impl RoomInner {
    fn snapshot(&self, room_code: &str) -> RoomSnapshot {
        RoomSnapshot {
            room_code: room_code.to_string(),
            game: self.game.clone(),
            members: self.members.clone(),
        }
    }

    fn presence(&self) -> Notice {
        Notice::Presence {
            players_count: self.members.len(),
            online_count: self.members.online_count(),
        }
    }
}

pub struct Room {
    code: String,
    created_at: Instant,
    created_at_utc: OffsetDateTime,
    deck: Arc<WordDeck>,
    state: Mutex<RoomInner>,
    hub: ConnectionHub,
}

impl Room {
    /// Creates a room with a freshly dealt board.
    pub fn new(code: String, deck: Arc<WordDeck>) -> Result<Self, GameError> {
        let board = deal(&deck)?;
        Ok(Self::with_board(code, deck, board))
    }

    /// Creates a room around a given board. Later resets still deal from `deck`.
    pub fn with_board(code: String, deck: Arc<WordDeck>, board: Board) -> Self {
        Self {
            code,
            created_at: Instant::now(),
            created_at_utc: OffsetDateTime::now_utc(),
            deck,
            state: Mutex::new(RoomInner {
                game: GameState::new(board),
                members: Membership::new(),
                closed: false,
                finished_at: None,
            }),
            hub: ConnectionHub::new(),
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    /// Registers a connection for `identity` and sends it the initial snapshot.
    pub fn attach(
        &self,
        conn_id: Uuid,
        identity: ParticipantId,
        recipient: Recipient<RoomEvent>,
    ) -> Result<(), GameError> {
        let mut inner = self.lock_open()?;
        inner.members.require(identity)?;
        inner.members.set_online(identity, true);
        let snapshot = inner.snapshot(&self.code);
        let presence = inner.presence();

        let mut fanout = self.hub.lock();
        drop(inner);
        fanout.add(Subscriber {
            conn_id,
            identity,
            recipient,
        });
        fanout.send_to(conn_id, &snapshot, &Notice::Init);
        fanout.broadcast(&snapshot, &[presence]);
        info!(room = %self.code, user_id = identity, %conn_id, "connection attached");
        Ok(())
    }

    /// Removes a connection. Unknown or repeated detaches are ignored.
    pub fn detach(&self, conn_id: Uuid) {
        let mut inner = self.state.lock();
        let mut fanout = self.hub.lock();
        let Some(gone) = fanout.remove(conn_id) else {
            return;
        };
        if inner.closed {
            return;
        }
        if !fanout.has_identity(gone.identity) {
            inner.members.set_online(gone.identity, false);
        }
        let snapshot = inner.snapshot(&self.code);
        let presence = inner.presence();
        drop(inner);
        fanout.broadcast(&snapshot, &[presence]);
        info!(room = %self.code, user_id = gone.identity, %conn_id, "connection detached");
    }

    /// Applies `action` for `identity` and broadcasts the resulting notices.
    pub fn submit(&self, identity: ParticipantId, action: Action) -> Result<Vec<Notice>, GameError> {
        let mut inner = self.lock_open()?;
        let member = inner.members.require(identity)?;
        let team = member.team;
        let notices = match action {
            Action::Reveal { index } => {
                let outcome = match usize::try_from(index) {
                    Ok(index) => inner.game.apply_reveal(index, team)?,
                    Err(_) => {
                        inner.game.ensure_turn(team)?;
                        return Err(GameError::OutOfRange { index });
                    }
                };
                let mut notices = vec![Notice::CardRevealed {
                    index: outcome.index,
                    color: outcome.color,
                    user_id: identity,
                }];
                if let Some(winner) = outcome.winner {
                    inner.finished_at = Some(Instant::now());
                    info!(room = %self.code, %winner, "game over");
                    notices.push(Notice::GameOver { winner });
                } else if outcome.turn_switched {
                    notices.push(Notice::TurnSwitch {
                        current_team: outcome.current_team,
                        current_turn: outcome.turn_number,
                    });
                }
                notices
            }
            Action::Start => {
                let captains = *inner.members.captains();
                inner.game.start(&captains)?;
                vec![Notice::GameStarted]
            }
            Action::Hint { word, count } => {
                if !inner.members.is_spymaster(identity) {
                    return Err(GameError::NotSpymaster);
                }
                inner.game.give_hint(&word, count, team)?;
                let hint = inner
                    .game
                    .hint()
                    .cloned()
                    .ok_or_else(|| GameError::invalid_hint("hint was not recorded"))?;
                vec![Notice::HintGiven {
                    team,
                    word: hint.word,
                    count: hint.count,
                    guesses_left: inner.game.guesses_left(),
                }]
            }
            Action::EndTurn => {
                inner.game.end_turn(team)?;
                vec![Notice::TurnSwitch {
                    current_team: inner.game.current_team(),
                    current_turn: inner.game.turn_number(),
                }]
            }
            Action::Reset => {
                let board = deal(&self.deck)?;
                inner.game.reset(board);
                inner.finished_at = None;
                info!(room = %self.code, user_id = identity, "game reset");
                vec![Notice::State]
            }
        };
        debug!(room = %self.code, user_id = identity, ?notices, "action applied");
        self.commit(inner, notices.clone());
        Ok(notices)
    }

    /// The view `viewer` is entitled to right now.
    pub fn view_for(&self, viewer: Option<ParticipantId>) -> Result<RoomView, GameError> {
        let inner = self.lock_open()?;
        Ok(inner.snapshot(&self.code).view_for(viewer))
    }

    pub fn is_member(&self, identity: ParticipantId) -> bool {
        self.state.lock().members.get(identity).is_some()
    }

    pub fn join(&self, identity: ParticipantId, display_name: &str) -> Result<Member, GameError> {
        let mut inner = self.lock_open()?;
        if let Some(existing) = inner.members.get(identity) {
            return Ok(existing.clone());
        }
        let member = inner.members.join(identity, display_name).clone();
        info!(room = %self.code, user_id = identity, team = %member.team, "member joined");
        let presence = inner.presence();
        self.commit(inner, vec![Notice::State, presence]);
        Ok(member)
    }

    /// Seats `identity` as `team`'s spymaster. Filling the second seat while
    /// waiting starts the game.
    pub fn assign_captain(&self, team: Team, identity: ParticipantId) -> Result<Member, GameError> {
        let mut inner = self.lock_open()?;
        let member = inner.members.assign(team, identity, Role::Spymaster)?.clone();
        let mut notices = vec![Notice::State];
        if inner.game.status() == Status::Waiting && inner.members.captains().both_filled() {
            let captains = *inner.members.captains();
            inner.game.start(&captains)?;
            info!(room = %self.code, "both captains seated, game started");
            notices.push(Notice::GameStarted);
        }
        info!(room = %self.code, user_id = identity, %team, "captain assigned");
        self.commit(inner, notices);
        Ok(member)
    }

    pub fn leave(&self, identity: ParticipantId) -> Result<Option<Member>, GameError> {
        let mut inner = self.lock_open()?;
        let Some(member) = inner.members.leave(identity) else {
            return Ok(None);
        };
        info!(room = %self.code, user_id = identity, "member left");
        let presence = inner.presence();
        self.commit(inner, vec![Notice::State, presence]);
        Ok(Some(member))
    }

    pub fn summary(&self) -> RoomSummary {
        let inner = self.state.lock();
        RoomSummary {
            room_code: self.code.clone(),
            game_status: inner.game.status(),
            winner: inner.game.winner(),
            players_count: inner.members.len(),
            online_count: inner.members.online_count(),
            connections: self.hub.len(),
            created_at: self.created_at_utc,
        }
    }

    /// Marks the room closed and tells every attached connection. Returns false
    /// if it was already closed.
    pub fn close(&self) -> bool {
        let mut inner = self.state.lock();
        if inner.closed {
            return false;
        }
        inner.closed = true;
        let snapshot = inner.snapshot(&self.code);
        let mut fanout = self.hub.lock();
        drop(inner);
        fanout.broadcast(&snapshot, &[Notice::RoomClosed]);
        fanout.clear();
        info!(room = %self.code, "room closed");
        true
    }

    pub fn is_closed(&self) -> bool {
        self.state.lock().closed
    }

    pub fn is_expired(&self, now: Instant, max_age: Duration) -> bool {
        now.saturating_duration_since(self.created_at) >= max_age
    }

    /// Finished for at least `grace` with nobody attached.
    pub fn is_idle_finished(&self, now: Instant, grace: Duration) -> bool {
        let inner = self.state.lock();
        let finished_long_ago = inner
            .finished_at
            .is_some_and(|at| now.saturating_duration_since(at) >= grace);
        finished_long_ago && self.hub.is_empty()
    }

    fn lock_open(&self) -> Result<MutexGuard<'_, RoomInner>, GameError> {
        let inner = self.state.lock();
        if inner.closed {
            return Err(GameError::room_not_found(self.code.clone()));
        }
        Ok(inner)
    }

    /// Hands the notices to the hub, then releases the state lock, then delivers.
    fn commit(&self, inner: MutexGuard<'_, RoomInner>, notices: Vec<Notice>) {
        let snapshot = inner.snapshot(&self.code);
        let fanout = self.hub.lock();
        drop(inner);
        fanout.broadcast(&snapshot, &notices);
        drop(fanout);
        self.hub.prune();
    }
}

impl fmt::Debug for Room {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Room")
            .field("code", &self.code)
            .field("connections", &self.hub.len())
            .finish_non_exhaustive()
    }
}

fn deal(deck: &WordDeck) -> Result<Board, GameError> {
    let mut rng = rand::rng();
    let words = deck.draw(&mut rng, BOARD_SIZE)?;
    Board::new(words, &mut rng)
}
