//! The 25-card grid with hidden ownership.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::domain::colors::{standard_layout, CardColor};
use crate::errors::domain::GameError;

pub const BOARD_SIZE: usize = 25;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    words: Vec<String>,
    ownership: Vec<CardColor>,
    revealed: Vec<bool>,
}

impl Board {
    /// Builds a board from 25 distinct words and a freshly shuffled color layout.
    pub fn new<R: Rng + ?Sized>(words: Vec<String>, rng: &mut R) -> Result<Self, GameError> {
        check_words(&words)?;
        let mut ownership = standard_layout();
        ownership.shuffle(rng);
        Ok(Self {
            words,
            ownership,
            revealed: vec![false; BOARD_SIZE],
        })
    }

    /// Builds a board with a caller-chosen layout. The layout must still be a
    /// permutation of the standard color multiset.
    pub fn from_layout(words: Vec<String>, ownership: Vec<CardColor>) -> Result<Self, GameError> {
        check_words(&words)?;
        let mut expected = standard_layout();
        let mut given = ownership.clone();
        expected.sort_by_key(|c| *c as u8);
        given.sort_by_key(|c| *c as u8);
        if expected != given {
            return Err(GameError::InvalidBoard(format!(
                "color layout must be 9 red, 8 blue, 1 assassin and 7 neutral over \
                 {BOARD_SIZE} cards, got {} cards",
                ownership.len()
            )));
        }
        Ok(Self {
            words,
            ownership,
            revealed: vec![false; BOARD_SIZE],
        })
    }

    /// Reveals a card and returns its color.
    ///
    /// A second reveal of the same card is always an error, never a no-op.
    pub fn reveal(&mut self, index: usize) -> Result<CardColor, GameError> {
        let color = self.color_at(index).ok_or(GameError::OutOfRange {
            index: index as i64,
        })?;
        let slot = &mut self.revealed[index];
        if *slot {
            return Err(GameError::AlreadyRevealed { index });
        }
        *slot = true;
        Ok(color)
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn ownership(&self) -> &[CardColor] {
        &self.ownership
    }

    pub fn revealed(&self) -> &[bool] {
        &self.revealed
    }

    pub fn color_at(&self, index: usize) -> Option<CardColor> {
        self.ownership.get(index).copied()
    }

    /// Colors of revealed cards only; hidden cards stay `None`.
    pub fn revealed_colors(&self) -> Vec<Option<CardColor>> {
        self.ownership
            .iter()
            .zip(&self.revealed)
            .map(|(color, &open)| open.then_some(*color))
            .collect()
    }

    pub fn unrevealed_count(&self, color: CardColor) -> usize {
        self.ownership
            .iter()
            .zip(&self.revealed)
            .filter(|(c, &open)| **c == color && !open)
            .count()
    }
}

fn check_words(words: &[String]) -> Result<(), GameError> {
    let distinct: HashSet<&str> = words.iter().map(String::as_str).collect();
    if words.len() != BOARD_SIZE || distinct.len() != BOARD_SIZE {
        return Err(GameError::InvalidBoard(format!(
            "expected exactly {BOARD_SIZE} distinct words, got {} words ({} distinct)",
            words.len(),
            distinct.len()
        )));
    }
    Ok(())
}
