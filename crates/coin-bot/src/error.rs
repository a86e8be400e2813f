//! Error types for the coin bot

use thiserror::Error;

/// Coin bot specific errors
#[derive(Debug, Error)]
pub enum BotError {
    /// Price provider answered with an error status or unusable payload
    #[error("API error: {0}")]
    ApiError(String),

    /// Network or HTTP error
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// No coin matches the user's query
    #[error("Coin not found: {0}")]
    CoinNotFound(String),

    /// A command was sent without its required argument
    #[error("Missing argument for /{0}")]
    MissingArgument(String),

    /// Command name not known to the router
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    /// Nothing usable in the message
    #[error("Empty input")]
    EmptyInput,

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type alias for coin bot operations
pub type Result<T> = std::result::Result<T, BotError>;

impl From<coin_utils::EnvError> for BotError {
    fn from(err: coin_utils::EnvError) -> Self {
        BotError::ConfigError(err.to_string())
    }
}

impl BotError {
    /// Whether the failure came from talking to the price provider
    pub fn is_provider_failure(&self) -> bool {
        matches!(
            self,
            BotError::ApiError(_) | BotError::NetworkError(_) | BotError::JsonError(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BotError::CoinNotFound("NOPE".to_string());
        assert_eq!(err.to_string(), "Coin not found: NOPE");

        let err = BotError::MissingArgument("price".to_string());
        assert_eq!(err.to_string(), "Missing argument for /price");
    }

    #[test]
    fn test_env_error_conversion() {
        let err: BotError = coin_utils::EnvError::Missing("BOT_TOKEN".to_string()).into();
        match err {
            BotError::ConfigError(msg) => assert_eq!(msg, "BOT_TOKEN not set"),
            other => panic!("Expected ConfigError, got {other:?}"),
        }
    }

    #[test]
    fn test_provider_failure_classification() {
        assert!(BotError::ApiError("500".to_string()).is_provider_failure());
        assert!(!BotError::CoinNotFound("x".to_string()).is_provider_failure());
        assert!(!BotError::EmptyInput.is_provider_failure());
    }
}
