//! Domain layer: pure game logic types and helpers.

pub mod board;
pub mod colors;
pub mod deck;
pub mod fixtures;
pub mod membership;
pub mod state;
pub mod view;

#[cfg(test)]
mod tests_board;
#[cfg(test)]
mod tests_membership;
#[cfg(test)]
mod tests_state;

// Re-exports for ergonomics
pub use board::{Board, BOARD_SIZE};
pub use colors::{CardColor, Team};
pub use deck::WordDeck;
pub use membership::{Captains, Member, Membership, ParticipantId, Role};
pub use state::{GameState, Hint, Remaining, RevealOutcome, Status};
pub use view::{PublicView, RoomSnapshot, RoomView};
