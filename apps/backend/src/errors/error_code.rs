//! Error codes for the spyroom HTTP API.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! All codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings
//! that appear in problem-details responses.

use core::fmt;

use crate::errors::domain::GameError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Request validation
    /// Malformed request body, path or query
    BadRequest,
    /// Team label is not red/blue
    InvalidTeam,
    /// Card index outside the board
    OutOfRange,
    /// Hint word/count rejected
    InvalidHint,

    // Membership
    /// Identity has not joined the room
    NotAMember,
    /// Action reserved for spymasters
    NotSpymaster,

    // Resource not found
    /// Room code unknown or room evicted
    RoomNotFound,

    // Game rule conflicts
    /// Card was already revealed
    AlreadyRevealed,
    /// Game is not in the Active state
    NotActive,
    /// Game was already started
    AlreadyStarted,
    /// Acting team does not hold the turn
    WrongTurn,
    /// Both captain seats must be filled
    CaptainsMissing,
    /// Captain seat held by someone else
    SeatTaken,

    // Capacity / system
    /// Registry refuses new rooms
    RegistryFull,
    /// Word deck too small to build a board
    InvalidDeckSize,
    /// Board words or color layout malformed
    InvalidBoard,
    /// Configuration error
    ConfigError,
    /// Internal server error
    Internal,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::BadRequest => "BAD_REQUEST",
            Self::InvalidTeam => "INVALID_TEAM",
            Self::OutOfRange => "OUT_OF_RANGE",
            Self::InvalidHint => "INVALID_HINT",

            Self::NotAMember => "NOT_A_MEMBER",
            Self::NotSpymaster => "NOT_SPYMASTER",

            Self::RoomNotFound => "ROOM_NOT_FOUND",

            Self::AlreadyRevealed => "ALREADY_REVEALED",
            Self::NotActive => "NOT_ACTIVE",
            Self::AlreadyStarted => "ALREADY_STARTED",
            Self::WrongTurn => "WRONG_TURN",
            Self::CaptainsMissing => "CAPTAINS_MISSING",
            Self::SeatTaken => "SEAT_TAKEN",

            Self::RegistryFull => "REGISTRY_FULL",
            Self::InvalidDeckSize => "INVALID_DECK_SIZE",
            Self::InvalidBoard => "INVALID_BOARD",
            Self::ConfigError => "CONFIG_ERROR",
            Self::Internal => "INTERNAL",
        }
    }
}

impl From<&GameError> for ErrorCode {
    fn from(err: &GameError) -> Self {
        match err {
            GameError::OutOfRange { .. } => Self::OutOfRange,
            GameError::AlreadyRevealed { .. } => Self::AlreadyRevealed,
            GameError::NotActive => Self::NotActive,
            GameError::AlreadyStarted => Self::AlreadyStarted,
            GameError::WrongTurn => Self::WrongTurn,
            GameError::CaptainsMissing => Self::CaptainsMissing,
            GameError::InvalidTeam(_) => Self::InvalidTeam,
            GameError::NotAMember(_) => Self::NotAMember,
            GameError::SeatTaken => Self::SeatTaken,
            GameError::NotSpymaster => Self::NotSpymaster,
            GameError::InvalidHint(_) => Self::InvalidHint,
            GameError::RoomNotFound(_) => Self::RoomNotFound,
            GameError::InvalidDeckSize { .. } => Self::InvalidDeckSize,
            GameError::InvalidBoard(_) => Self::InvalidBoard,
            GameError::RegistryFull(_) => Self::RegistryFull,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
