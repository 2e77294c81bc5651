//! Game-level error type used by the domain and room services.
//!
//! This error type is HTTP- and transport-agnostic. Websocket sessions relay it to the
//! submitting connection as `{kind, message}`; HTTP handlers convert it into
//! `crate::error::AppError` through the provided `From` implementation.

use thiserror::Error;

use crate::domain::board::BOARD_SIZE;

/// Every rejected room operation maps to exactly one of these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("card index {index} is outside the board (0..{BOARD_SIZE})")]
    OutOfRange { index: i64 },
    #[error("card {index} is already revealed")]
    AlreadyRevealed { index: usize },
    #[error("game is not active")]
    NotActive,
    #[error("game has already started")]
    AlreadyStarted,
    #[error("it is not your team's turn")]
    WrongTurn,
    #[error("both captain seats must be filled before the game can start")]
    CaptainsMissing,
    #[error("unknown team: {0}")]
    InvalidTeam(String),
    #[error("user {0} is not a member of this room")]
    NotAMember(i64),
    #[error("captain seat is already taken")]
    SeatTaken,
    #[error("only a spymaster can do that")]
    NotSpymaster,
    #[error("invalid hint: {0}")]
    InvalidHint(String),
    #[error("room {0} not found")]
    RoomNotFound(String),
    #[error("word deck must hold at least {needed} distinct words, found {found}")]
    InvalidDeckSize { needed: usize, found: usize },
    #[error("invalid board: {0}")]
    InvalidBoard(String),
    #[error("room limit of {0} reached")]
    RegistryFull(usize),
}

impl GameError {
    /// Stable snake_case kind used in websocket `error` payloads.
    pub fn kind(&self) -> &'static str {
        match self {
            GameError::OutOfRange { .. } => "out_of_range",
            GameError::AlreadyRevealed { .. } => "already_revealed",
            GameError::NotActive => "not_active",
            GameError::AlreadyStarted => "already_started",
            GameError::WrongTurn => "wrong_turn",
            GameError::CaptainsMissing => "captains_missing",
            GameError::InvalidTeam(_) => "invalid_team",
            GameError::NotAMember(_) => "not_a_member",
            GameError::SeatTaken => "seat_taken",
            GameError::NotSpymaster => "not_spymaster",
            GameError::InvalidHint(_) => "invalid_hint",
            GameError::RoomNotFound(_) => "room_not_found",
            GameError::InvalidDeckSize { .. } => "invalid_deck_size",
            GameError::InvalidBoard(_) => "invalid_board",
            GameError::RegistryFull(_) => "registry_full",
        }
    }

    pub fn room_not_found(code: impl Into<String>) -> Self {
        Self::RoomNotFound(code.into())
    }

    pub fn invalid_hint(detail: impl Into<String>) -> Self {
        Self::InvalidHint(detail.into())
    }
}
