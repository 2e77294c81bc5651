//! Teams and card colors.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::domain::GameError;

/// The two competing teams. Red always moves first and owns one extra card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Team {
    Red,
    Blue,
}

impl Team {
    pub const ALL: [Team; 2] = [Team::Red, Team::Blue];

    pub fn other(self) -> Team {
        match self {
            Team::Red => Team::Blue,
            Team::Blue => Team::Red,
        }
    }

    /// The color of the cards this team must find.
    pub fn color(self) -> CardColor {
        match self {
            Team::Red => CardColor::Red,
            Team::Blue => CardColor::Blue,
        }
    }

    /// Number of cards the team owns on a fresh board.
    pub fn card_count(self) -> u8 {
        match self {
            Team::Red => 9,
            Team::Blue => 8,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Team::Red => "red",
            Team::Blue => "blue",
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Team {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "red" => Ok(Team::Red),
            "blue" => Ok(Team::Blue),
            _ => Err(GameError::InvalidTeam(s.to_string())),
        }
    }
}

/// Hidden ownership of a single card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardColor {
    Red,
    Blue,
    Assassin,
    Neutral,
}

impl CardColor {
    /// The team owning a card of this color, if any.
    pub fn team(self) -> Option<Team> {
        match self {
            CardColor::Red => Some(Team::Red),
            CardColor::Blue => Some(Team::Blue),
            CardColor::Assassin | CardColor::Neutral => None,
        }
    }
}

/// Color multiset every board is dealt from: 9 red, 8 blue, 1 assassin, 7 neutral.
pub fn standard_layout() -> Vec<CardColor> {
    let mut colors = Vec::with_capacity(25);
    colors.extend(std::iter::repeat_n(CardColor::Red, 9));
    colors.extend(std::iter::repeat_n(CardColor::Blue, 8));
    colors.push(CardColor::Assassin);
    colors.extend(std::iter::repeat_n(CardColor::Neutral, 7));
    colors
}
