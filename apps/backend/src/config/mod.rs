//! Environment-driven configuration.
//!
//! Values are read once at startup. Parsing goes through a lookup function so
//! tests can supply variables without touching the process environment.

pub mod rooms;
pub mod server;

use std::str::FromStr;

use crate::error::AppError;

/// Parses `name` with `FromStr`, falling back to `default` when unset or blank.
pub(crate) fn parse_or<T, F>(lookup: &F, name: &str, default: T) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(name).map(|raw| raw.trim().to_string()) {
        Some(raw) if !raw.is_empty() => raw
            .parse()
            .map_err(|e| AppError::config(format!("{name} has invalid value '{raw}': {e}"))),
        _ => Ok(default),
    }
}

pub(crate) fn env_lookup(name: &str) -> Option<String> {
    std::env::var(name).ok()
}
