//! Crypto Signal Bot
//!
//! Runs the Telegram bot, or an interactive terminal session with `--cli`.
//!
//! # Usage
//!
//! ```bash
//! # Telegram (reads BOT_TOKEN from the environment or a .env file)
//! export BOT_TOKEN="123456:ABC..."
//! cargo run --bin coin-bot -p coin-bot
//!
//! # Terminal session, no token needed
//! cargo run --bin coin-bot -p coin-bot -- --cli
//! ```

use clap::Parser;
use coin_bot::interface::BotPlatform;
use coin_bot::platforms::{CliBot, TelegramBot, TelegramConfig};
use coin_bot::{BotConfig, CoinBot, CoinGeckoClient};
use coin_utils::{LogFormat, init_tracing};
use std::sync::Arc;

#[derive(Debug, Parser)]
#[command(name = "coin-bot", version, about = "Crypto price signal bot")]
struct Args {
    /// Chat in the terminal instead of connecting to Telegram
    #[arg(long)]
    cli: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let args = Args::parse();

    let format = if args.json_logs {
        LogFormat::Json
    } else {
        LogFormat::Pretty
    };
    init_tracing("warn,coin_bot=info", format);

    let config = BotConfig::from_env()?;
    let platform = if args.cli {
        BotPlatform::Cli
    } else {
        BotPlatform::Telegram
    };

    // Check the token before touching the network.
    let telegram = match platform {
        BotPlatform::Telegram => match TelegramConfig::from_env() {
            Ok(telegram) => Some(telegram),
            Err(e) => {
                tracing::error!(error = %e, "BOT_TOKEN is required to run the Telegram bot");
                return Err(e.into());
            }
        },
        BotPlatform::Cli => None,
    };

    tracing::info!(api_base = %config.api_base, %platform, "starting coin bot");

    let source = Arc::new(CoinGeckoClient::new(&config)?);
    let router = CoinBot::new(source, &config, platform);

    let coins = router.warm_up().await;
    if coins == 0 {
        tracing::warn!("coin directory is empty; lookups will report not found until it loads");
    } else {
        tracing::info!(coins, "coin directory ready");
    }

    match telegram {
        Some(telegram) => TelegramBot::new(telegram, router).run().await,
        None => CliBot::new(router).run().await?,
    }

    Ok(())
}
