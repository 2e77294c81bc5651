use serde::Serialize;

use crate::domain::board::Board;
use crate::domain::colors::{CardColor, Team};
use crate::domain::membership::Captains;
use crate::errors::domain::GameError;

/// Largest clue number a spymaster may give.
pub const MAX_HINT_COUNT: u8 = 9;

/// Overall game progression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// Board dealt, waiting for both captains.
    Waiting,
    /// Teams take turns revealing cards.
    Active,
    /// A winner has been decided. Terminal until reset.
    Finished,
}

/// Cached count of each team's hidden cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Remaining {
    pub red: u8,
    pub blue: u8,
}

impl Remaining {
    fn fresh() -> Self {
        Self {
            red: Team::Red.card_count(),
            blue: Team::Blue.card_count(),
        }
    }

    pub fn get(&self, team: Team) -> u8 {
        match team {
            Team::Red => self.red,
            Team::Blue => self.blue,
        }
    }

    fn decrement(&mut self, team: Team) {
        let slot = match team {
            Team::Red => &mut self.red,
            Team::Blue => &mut self.blue,
        };
        *slot = slot.saturating_sub(1);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Hint {
    pub word: String,
    pub count: u8,
}

/// Result of a successful reveal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevealOutcome {
    pub index: usize,
    pub color: CardColor,
    pub game_over: bool,
    pub winner: Option<Team>,
    pub turn_switched: bool,
    pub current_team: Team,
    pub turn_number: u32,
}

/// Turn, score and status state machine for one board.
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    current_team: Team,
    turn_number: u32,
    remaining: Remaining,
    status: Status,
    winner: Option<Team>,
    hint: Option<Hint>,
    guesses_left: u8,
}

impl GameState {
    pub fn new(board: Board) -> Self {
        Self {
            board,
            current_team: Team::Red,
            turn_number: 1,
            remaining: Remaining::fresh(),
            status: Status::Waiting,
            winner: None,
            hint: None,
            guesses_left: 0,
        }
    }

    /// Waiting -> Active once both captain seats are filled.
    pub fn start(&mut self, captains: &Captains) -> Result<(), GameError> {
        if self.status != Status::Waiting {
            return Err(GameError::AlreadyStarted);
        }
        if !captains.both_filled() {
            return Err(GameError::CaptainsMissing);
        }
        self.status = Status::Active;
        Ok(())
    }

    /// Reveals a card on behalf of `acting_team`.
    ///
    /// All checks run before the board is touched; the board reveal is the last
    /// point that can fail, and counters move only after it succeeds.
    pub fn apply_reveal(
        &mut self,
        index: usize,
        acting_team: Team,
    ) -> Result<RevealOutcome, GameError> {
        self.ensure_turn(acting_team)?;
        let color = self.board.reveal(index)?;

        if let Some(team) = color.team() {
            self.remaining.decrement(team);
        }
        if self.hint.is_some() {
            self.guesses_left = self.guesses_left.saturating_sub(1);
        }

        let winner = if color == CardColor::Assassin {
            Some(self.current_team.other())
        } else if self.remaining.red == 0 {
            Some(Team::Red)
        } else if self.remaining.blue == 0 {
            Some(Team::Blue)
        } else {
            None
        };

        let mut turn_switched = false;
        if let Some(team) = winner {
            self.status = Status::Finished;
            self.winner = Some(team);
        } else if color == acting_team.other().color() {
            self.switch_turn();
            turn_switched = true;
        }

        Ok(RevealOutcome {
            index,
            color,
            game_over: winner.is_some(),
            winner,
            turn_switched,
            current_team: self.current_team,
            turn_number: self.turn_number,
        })
    }

    /// Records a clue; the team may then guess `count + 1` cards.
    pub fn give_hint(&mut self, word: &str, count: i64, acting_team: Team) -> Result<(), GameError> {
        self.ensure_turn(acting_team)?;
        let word = word.trim();
        if word.is_empty() {
            return Err(GameError::invalid_hint("hint word must not be blank"));
        }
        let count = u8::try_from(count)
            .ok()
            .filter(|&c| c <= MAX_HINT_COUNT)
            .ok_or_else(|| {
                GameError::invalid_hint(format!(
                    "hint count must be between 0 and {MAX_HINT_COUNT}, got {count}"
                ))
            })?;
        self.hint = Some(Hint {
            word: word.to_string(),
            count,
        });
        self.guesses_left = count + 1;
        Ok(())
    }

    /// Voluntarily passes the turn to the other team.
    pub fn end_turn(&mut self, acting_team: Team) -> Result<(), GameError> {
        self.ensure_turn(acting_team)?;
        self.switch_turn();
        Ok(())
    }

    /// Deals a new board and returns to Waiting.
    pub fn reset(&mut self, board: Board) {
        *self = Self::new(board);
    }

    /// Fails with `NotActive` or `WrongTurn` unless `acting_team` may move now.
    pub fn ensure_turn(&self, acting_team: Team) -> Result<(), GameError> {
        if self.status != Status::Active {
            return Err(GameError::NotActive);
        }
        if acting_team != self.current_team {
            return Err(GameError::WrongTurn);
        }
        Ok(())
    }

    fn switch_turn(&mut self) {
        self.current_team = self.current_team.other();
        self.turn_number += 1;
        self.hint = None;
        self.guesses_left = 0;
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_team(&self) -> Team {
        self.current_team
    }

    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    pub fn remaining(&self) -> Remaining {
        self.remaining
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn winner(&self) -> Option<Team> {
        self.winner
    }

    pub fn hint(&self) -> Option<&Hint> {
        self.hint.as_ref()
    }

    pub fn guesses_left(&self) -> u8 {
        self.guesses_left
    }

    /// Test hook: puts a freshly built state straight into Active.
    #[cfg(test)]
    pub(crate) fn activated(board: Board) -> Self {
        let mut state = Self::new(board);
        state.status = Status::Active;
        state
    }
}
