//! Crypto price signal bot
//!
//! Answers chat messages that name a cryptocurrency with a templated report:
//!
//! - Coin directory built from the CoinGecko catalogue, keyed by id, symbol and name
//! - Natural-language query cleanup ("what is the price of BTC?" resolves to `bitcoin`)
//! - Live USD quotes with 24h change and market cap, cached for a short TTL
//! - Rule-based signal, risk level and outlook derived from the 24h move
//! - Telegram long-polling front end and an interactive terminal session
//!
//! # Architecture
//!
//! [`CoinBot`] owns the pipeline. It parses the message into a [`Command`],
//! resolves the query through the [`CoinDirectory`], fetches a quote through
//! the [`MarketData`] trait, labels it with [`generate`] and renders it with
//! the platform's [`interface::Formatter`].
//!
//! # Example
//!
//! ```rust,ignore
//! use coin_bot::{BotConfig, CoinBot, CoinGeckoClient, interface::BotPlatform};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = BotConfig::from_env()?;
//!     let source = Arc::new(CoinGeckoClient::new(&config)?);
//!     let bot = CoinBot::new(source, &config, BotPlatform::Cli);
//!
//!     if let Some(reply) = bot.handle("/price eth").await {
//!         println!("{}", reply.content);
//!     }
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod bot;
pub mod cache;
pub mod config;
pub mod directory;
pub mod error;
pub mod interface;
pub mod platforms;
pub mod resolver;
pub mod signal;

// Re-export main types for convenience
pub use api::{CoinGeckoClient, CoinListing, MarketData, PriceQuote};
pub use bot::{Analysis, CoinBot, Command};
pub use config::BotConfig;
pub use directory::CoinDirectory;
pub use error::{BotError, Result};
pub use signal::{RiskLevel, Signal, SignalKind, generate};
