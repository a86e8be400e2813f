//! Coin Bot
//!
//! Routes chat input to the price pipeline:
//!
//! 1. [`Command::parse`] turns a message into a command or a free-text query
//! 2. the [`CoinDirectory`] resolves the query to a coin id
//! 3. the quote is fetched (or served from the [`QuoteCache`])
//! 4. [`signal::generate`] labels the move and the [`Formatter`] renders it
//!
//! Every failure becomes a reply; nothing here aborts the caller.
//!
//! # Example
//!
//! ```rust,ignore
//! use coin_bot::{BotConfig, CoinBot, CoinGeckoClient, interface::BotPlatform};
//! use std::sync::Arc;
//!
//! let config = BotConfig::default();
//! let source = Arc::new(CoinGeckoClient::new(&config)?);
//! let bot = CoinBot::new(source, &config, BotPlatform::Cli);
//! if let Some(reply) = bot.handle("price of bitcoin").await {
//!     println!("{}", reply.content);
//! }
//! ```

pub mod commands;

use crate::api::{MarketData, PriceQuote};
use crate::cache::QuoteCache;
use crate::config::BotConfig;
use crate::directory::CoinDirectory;
use crate::error::{BotError, Result};
use crate::interface::{BotPlatform, BotResponse, Formatter, FormatterFactory};
use crate::resolver;
use crate::signal::{self, Signal};
use std::sync::Arc;

pub use commands::Command;

/// Outcome of a successful price lookup
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub coin_id: String,
    pub quote: PriceQuote,
    pub signal: Signal,
}

/// Message router and price pipeline
pub struct CoinBot {
    source: Arc<dyn MarketData>,
    directory: CoinDirectory,
    quotes: QuoteCache,
    formatter: Box<dyn Formatter>,
    search_limit: usize,
    bot_username: Option<String>,
}

impl CoinBot {
    pub fn new(source: Arc<dyn MarketData>, config: &BotConfig, platform: BotPlatform) -> Self {
        Self {
            directory: CoinDirectory::new(Arc::clone(&source)),
            source,
            quotes: QuoteCache::new(config.quote_cache_ttl),
            formatter: FormatterFactory::create(platform),
            search_limit: config.search_limit,
            bot_username: None,
        }
    }

    /// Only answer `/command@name` when `name` is this bot
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.bot_username = Some(username.into());
        self
    }

    pub fn platform(&self) -> BotPlatform {
        self.formatter.platform()
    }

    pub fn directory(&self) -> &CoinDirectory {
        &self.directory
    }

    /// Load the coin directory ahead of the first message
    pub async fn warm_up(&self) -> usize {
        self.directory.load().await.len()
    }

    /// Handle one incoming message.
    ///
    /// Returns `None` for input the bot does not answer (unknown commands).
    pub async fn handle(&self, input: &str) -> Option<BotResponse> {
        match Command::parse_addressed(input, self.bot_username.as_deref()) {
            Ok(command) => Some(self.execute(command).await),
            Err(BotError::EmptyInput) => Some(BotResponse::info(self.formatter.format_usage(None))),
            Err(BotError::MissingArgument(cmd)) => {
                Some(BotResponse::info(self.formatter.format_usage(Some(cmd.as_str()))))
            }
            Err(e) => {
                tracing::debug!(error = %e, "ignoring message");
                None
            }
        }
    }

    /// Execute a parsed command
    pub async fn execute(&self, command: Command) -> BotResponse {
        tracing::debug!(command = command.description(), "executing");
        match command {
            Command::Start => BotResponse::info(self.formatter.format_welcome()),
            Command::Help => BotResponse::info(self.formatter.format_help()),
            Command::Price { query } | Command::Analyze { query } | Command::Query { text: query } => {
                self.lookup(&query).await
            }
            Command::Search { term } => {
                let hits = self.directory.search(&term, self.search_limit).await;
                BotResponse::report(self.formatter.format_search(&term, &hits))
            }
        }
    }

    /// Run the price pipeline and render the outcome, including failures
    pub async fn lookup(&self, query: &str) -> BotResponse {
        match self.analyze(query).await {
            Ok(analysis) => BotResponse::report(self.formatter.format_report(
                &analysis.coin_id,
                &analysis.quote,
                &analysis.signal,
            )),
            Err(BotError::EmptyInput) => BotResponse::info(self.formatter.format_usage(None)),
            Err(BotError::CoinNotFound(_)) => {
                BotResponse::error(self.formatter.format_not_found(query))
            }
            Err(e) => {
                tracing::warn!(error = %e, query, "price lookup failed");
                BotResponse::error(self.formatter.format_fetch_error())
            }
        }
    }

    /// Resolve, fetch and label one query
    pub async fn analyze(&self, query: &str) -> Result<Analysis> {
        if resolver::clean_input(query).is_none() {
            return Err(BotError::EmptyInput);
        }

        let coin_id = self
            .directory
            .resolve(query)
            .await
            .ok_or_else(|| BotError::CoinNotFound(query.trim().to_string()))?;

        let source = Arc::clone(&self.source);
        let id = coin_id.clone();
        let quote = self
            .quotes
            .get_or_fetch(&coin_id, || async move { source.simple_price(&id).await })
            .await?
            .ok_or_else(|| BotError::CoinNotFound(query.trim().to_string()))?;

        let signal = signal::generate(quote.change_or_zero(), quote.market_cap);
        tracing::info!(coin_id = %quote.coin_id, signal = %signal.kind, "analysis ready");

        Ok(Analysis {
            coin_id: quote.coin_id.clone(),
            quote,
            signal,
        })
    }
}
