//! Command parsing for the coin bot

use crate::error::{BotError, Result};

/// Parsed command from user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Welcome message
    Start,
    /// Command list
    Help,
    /// Price report for a coin
    Price { query: String },
    /// Same report, reached through `/analyze` or `/analysis`
    Analyze { query: String },
    /// Directory substring search
    Search { term: String },
    /// Free text, treated as a price query
    Query { text: String },
}

impl Command {
    /// Parse a command from user input.
    ///
    /// Text not starting with `/` becomes [`Command::Query`]. A Telegram
    /// `@botname` suffix on the command word is accepted for any bot; use
    /// [`Command::parse_addressed`] when the bot's own username is known.
    pub fn parse(input: &str) -> Result<Self> {
        Self::parse_addressed(input, None)
    }

    /// Parse a command, rejecting ones addressed to a different bot.
    ///
    /// `/price@OtherBot btc` is [`BotError::UnknownCommand`] when
    /// `bot_username` is `Some("CoinSignalBot")`. The comparison ignores case.
    pub fn parse_addressed(input: &str, bot_username: Option<&str>) -> Result<Self> {
        let input = input.trim();

        if input.is_empty() {
            return Err(BotError::EmptyInput);
        }

        let Some(body) = input.strip_prefix('/') else {
            return Ok(Command::Query {
                text: input.to_string(),
            });
        };

        let (word, rest) = match body.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (body, ""),
        };
        let (name, addressee) = match word.split_once('@') {
            Some((name, addressee)) => (name, Some(addressee)),
            None => (word, None),
        };
        if let (Some(addressee), Some(own)) = (addressee, bot_username) {
            if !addressee.eq_ignore_ascii_case(own.trim_start_matches('@')) {
                return Err(BotError::UnknownCommand(word.to_string()));
            }
        }
        let cmd = name.to_lowercase();

        let argument = |name: &str| -> Result<String> {
            if rest.is_empty() {
                Err(BotError::MissingArgument(name.to_string()))
            } else {
                Ok(rest.split_whitespace().collect::<Vec<_>>().join(" "))
            }
        };

        match cmd.as_str() {
            "start" => Ok(Command::Start),
            "help" => Ok(Command::Help),
            "price" => Ok(Command::Price {
                query: argument("price")?,
            }),
            "analyze" | "analysis" => Ok(Command::Analyze {
                query: argument(&cmd)?,
            }),
            "search" => Ok(Command::Search {
                term: argument("search")?,
            }),
            "" => Err(BotError::UnknownCommand("/".to_string())),
            other => Err(BotError::UnknownCommand(other.to_string())),
        }
    }

    /// Get a short description of the command
    pub fn description(&self) -> &'static str {
        match self {
            Command::Start => "Welcome message",
            Command::Help => "Show help",
            Command::Price { .. } => "Price report",
            Command::Analyze { .. } => "Price analysis",
            Command::Search { .. } => "Search coins",
            Command::Query { .. } => "Free text price query",
        }
    }
}
