use std::path::PathBuf;
use std::time::Duration;

use crate::config::{env_lookup, parse_or};
use crate::domain::deck::WordDeck;
use crate::error::AppError;

/// Limits and timings for the room registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomSettings {
    pub max_rooms: usize,
    pub max_age: Duration,
    pub finished_grace: Duration,
    pub sweep_interval: Duration,
}

impl Default for RoomSettings {
    fn default() -> Self {
        Self {
            max_rooms: 1000,
            max_age: Duration::from_secs(24 * 60 * 60),
            finished_grace: Duration::from_secs(30),
            sweep_interval: Duration::from_secs(60),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RoomsConfig {
    pub settings: RoomSettings,
    pub words_file: Option<PathBuf>,
}

impl RoomsConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = RoomSettings::default();
        let secs = |name: &str, default: Duration| -> Result<Duration, AppError> {
            parse_or(&lookup, name, default.as_secs()).map(Duration::from_secs)
        };

        let settings = RoomSettings {
            max_rooms: parse_or(&lookup, "MAX_ROOMS", defaults.max_rooms)?,
            max_age: secs("ROOM_MAX_AGE_SECS", defaults.max_age)?,
            finished_grace: secs("FINISHED_ROOM_GRACE_SECS", defaults.finished_grace)?,
            sweep_interval: secs("ROOM_SWEEP_INTERVAL_SECS", defaults.sweep_interval)?,
        };
        if settings.max_rooms == 0 {
            return Err(AppError::config("MAX_ROOMS must be at least 1"));
        }
        if settings.sweep_interval.is_zero() {
            return Err(AppError::config("ROOM_SWEEP_INTERVAL_SECS must be at least 1"));
        }

        let words_file = lookup("WORDS_FILE")
            .map(|raw| raw.trim().to_string())
            .filter(|raw| !raw.is_empty())
            .map(PathBuf::from);

        Ok(Self {
            settings,
            words_file,
        })
    }

    /// Loads the configured word file, or the built-in deck when none is set.
    pub fn load_deck(&self) -> Result<WordDeck, AppError> {
        match &self.words_file {
            Some(path) => WordDeck::from_json_file(path).map_err(|e| {
                AppError::config(format!("WORDS_FILE {}: {e}", path.display()))
            }),
            None => Ok(WordDeck::builtin()),
        }
    }
}
