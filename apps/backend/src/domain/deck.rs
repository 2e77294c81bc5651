//! Word pool boards are drawn from.

use std::collections::HashSet;
use std::path::Path;

use rand::seq::SliceRandom;
use rand::Rng;
use thiserror::Error;

use crate::errors::domain::GameError;

const BUILTIN_WORDS: &[&str] = &[
    "apple", "mountain", "bridge", "doctor", "moon", "book", "fire", "river", "clock", "snow",
    "eye", "house", "snake", "ring", "ship", "lion", "forest", "car", "bear", "nose", "ocean",
    "feather", "saw", "field", "bullet", "work", "rose", "hand", "boot", "juice", "table",
    "theater", "shadow", "fountain", "bread", "school", "hat", "box", "needle", "yogurt",
    "umbrella", "copier", "echo", "top", "anchor", "airport", "ballerina", "fan", "thermometer",
    "tree", "hedgehog", "iron", "castle", "toy", "cabbage", "lamp", "subway", "laptop", "cloud",
    "coat", "rocket", "plane", "phone", "street", "lantern", "hockey", "flower", "person", "cap",
    "pike", "screen", "skirt", "tongue", "pharmacy", "gasoline", "bicycle", "newspaper",
    "piano", "glacier", "compass", "harbor", "mirror", "pyramid", "satellite", "violin",
];

#[derive(Debug, Error)]
pub enum DeckLoadError {
    #[error("cannot read word file: {0}")]
    Io(#[from] std::io::Error),
    #[error("word file is not a JSON array of strings: {0}")]
    Parse(#[from] serde_json::Error),
}

/// An ordered, de-duplicated pool of playable words.
#[derive(Debug, Clone)]
pub struct WordDeck {
    words: Vec<String>,
}

impl WordDeck {
    pub fn builtin() -> Self {
        Self::from_words(BUILTIN_WORDS.iter().copied())
    }

    /// Trims each word, drops blanks, and keeps the first occurrence of duplicates.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let words = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_string())
            .filter(|w| !w.is_empty())
            .filter(|w| seen.insert(w.to_lowercase()))
            .collect();
        Self { words }
    }

    /// Loads a JSON array of strings, e.g. `["apple", "bridge", ...]`.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, DeckLoadError> {
        let raw = std::fs::read_to_string(path)?;
        let words: Vec<String> = serde_json::from_str(&raw)?;
        Ok(Self::from_words(words))
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Draws `count` distinct words in random order.
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R, count: usize) -> Result<Vec<String>, GameError> {
        if self.words.len() < count {
            return Err(GameError::InvalidDeckSize {
                needed: count,
                found: self.words.len(),
            });
        }
        let mut pool: Vec<&String> = self.words.iter().collect();
        pool.shuffle(rng);
        Ok(pool.into_iter().take(count).cloned().collect())
    }
}
