use crate::config::{env_lookup, parse_or};
use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            host: parse_or(&lookup, "SPYROOM_HOST", "0.0.0.0".to_string())?,
            port: parse_or(&lookup, "SPYROOM_PORT", 3001)?,
        })
    }
}
