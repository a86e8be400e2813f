//! Core response abstractions shared by every platform

use serde::{Deserialize, Serialize};

/// Platform identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BotPlatform {
    /// Interactive terminal session
    Cli,

    /// Telegram bot
    Telegram,
}

/// Type of bot response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResponseType {
    /// Price report or listing
    Report,

    /// Welcome, help and usage text
    Info,

    /// Something went wrong or nothing matched
    Error,
}

/// Bot response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotResponse {
    /// Response content, already rendered for the platform
    pub content: String,

    /// Response type
    pub response_type: ResponseType,
}

impl BotResponse {
    pub fn report(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            response_type: ResponseType::Report,
        }
    }

    pub fn info(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            response_type: ResponseType::Info,
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            response_type: ResponseType::Error,
        }
    }

    pub fn is_error(&self) -> bool {
        self.response_type == ResponseType::Error
    }
}

impl std::fmt::Display for BotPlatform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BotPlatform::Cli => write!(f, "CLI"),
            BotPlatform::Telegram => write!(f, "Telegram"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bot_response_creation() {
        let response = BotResponse::report("BTC $1");
        assert_eq!(response.response_type, ResponseType::Report);
        assert_eq!(response.content, "BTC $1");
        assert!(!response.is_error());
        assert!(BotResponse::error("nope").is_error());
    }

    #[test]
    fn test_platform_display() {
        assert_eq!(BotPlatform::Telegram.to_string(), "Telegram");
        assert_eq!(BotPlatform::Cli.to_string(), "CLI");
    }
}
