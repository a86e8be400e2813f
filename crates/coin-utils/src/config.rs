//! Environment configuration helpers

use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Errors raised while reading configuration from the environment
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EnvError {
    /// A required variable is unset or blank
    #[error("{0} not set")]
    Missing(String),

    /// A variable is set but does not parse
    #[error("{name} has invalid value {value:?}")]
    Invalid { name: String, value: String },
}

/// Read a variable, treating blank values as unset
pub fn env_var(name: &str) -> Option<String> {
    non_blank(std::env::var(name).ok())
}

/// Read a variable that must be present
pub fn require_env(name: &str) -> Result<String, EnvError> {
    env_var(name).ok_or_else(|| EnvError::Missing(name.to_string()))
}

/// Read and parse an optional variable
pub fn env_parse<T: FromStr>(name: &str) -> Result<Option<T>, EnvError> {
    parse_value(name, env_var(name))
}

/// Read an optional variable holding a whole number of seconds
pub fn env_duration_secs(name: &str) -> Result<Option<Duration>, EnvError> {
    Ok(env_parse::<u64>(name)?.map(Duration::from_secs))
}

fn non_blank(raw: Option<String>) -> Option<String> {
    raw.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn parse_value<T: FromStr>(name: &str, raw: Option<String>) -> Result<Option<T>, EnvError> {
    match non_blank(raw) {
        None => Ok(None),
        Some(value) => value.parse().map(Some).map_err(|_| EnvError::Invalid {
            name: name.to_string(),
            value,
        }),
    }
}
