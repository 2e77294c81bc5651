use super::board::{Board, BOARD_SIZE};
use super::colors::standard_layout;

/// Deterministic boards for tests and demos.
///
/// The layout is the standard color multiset in canonical order, so every card's
/// color is known from its index alone.
pub struct BoardFixtures;

impl BoardFixtures {
    pub const RED: std::ops::Range<usize> = 0..9;
    pub const BLUE: std::ops::Range<usize> = 9..17;
    pub const ASSASSIN: usize = 17;
    pub const NEUTRAL: std::ops::Range<usize> = 18..25;

    pub fn words() -> Vec<String> {
        (0..BOARD_SIZE).map(|i| format!("word{i:02}")).collect()
    }

    pub fn ordered() -> Board {
        // SAFETY: canonical words and layout always satisfy the board invariants.
        #[allow(clippy::expect_used)]
        Board::from_layout(Self::words(), standard_layout()).expect("canonical fixture board")
    }
}
