//! Telegram bot implementation
//!
//! Long-polls Telegram through teloxide and answers every text message with
//! whatever [`CoinBot::handle`] produces.

use crate::bot::CoinBot;
use crate::error::Result;
use crate::interface::strip_markdown;
use coin_utils::require_env;
use std::sync::Arc;
use teloxide::payloads::SendMessageSetters;
use teloxide::prelude::*;
use teloxide::types::{BotCommand, ParseMode};

/// Telegram bot configuration
#[derive(Clone)]
pub struct TelegramConfig {
    /// Bot token from BotFather
    pub token: String,
}

impl TelegramConfig {
    /// Create config from the `BOT_TOKEN` environment variable
    pub fn from_env() -> Result<Self> {
        let token = require_env("BOT_TOKEN")?;
        Ok(Self { token })
    }
}

impl std::fmt::Debug for TelegramConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramConfig")
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Commands advertised in the Telegram client's command menu
fn command_menu() -> Vec<BotCommand> {
    vec![
        BotCommand::new("start", "Welcome message"),
        BotCommand::new("price", "Price report for a coin"),
        BotCommand::new("analyze", "Trading analysis for a coin"),
        BotCommand::new("search", "Find coin ids by name or symbol"),
        BotCommand::new("help", "Show help"),
    ]
}

/// Telegram bot
pub struct TelegramBot {
    config: TelegramConfig,
    router: CoinBot,
}

impl TelegramBot {
    /// Create a new Telegram bot
    pub fn new(config: TelegramConfig, router: CoinBot) -> Self {
        Self { config, router }
    }

    /// Poll for updates until Ctrl-C
    pub async fn run(self) {
        let bot = Bot::new(self.config.token);

        if let Err(e) = bot.set_my_commands(command_menu()).await {
            tracing::warn!(error = %e, "could not register the command menu");
        }

        let router = match bot.get_me().await {
            Ok(me) => match me.user.username.clone() {
                Some(username) => {
                    tracing::debug!(%username, "bot identity");
                    self.router.with_username(username)
                }
                None => self.router,
            },
            Err(e) => {
                tracing::warn!(error = %e, "could not fetch bot identity; answering commands for any @name");
                self.router
            }
        };

        tracing::info!("Telegram bot polling for updates");

        let handler = Update::filter_message().endpoint(handle_message);
        Dispatcher::builder(bot, handler)
            .dependencies(dptree::deps![Arc::new(router)])
            .enable_ctrlc_handler()
            .build()
            .dispatch()
            .await;
    }
}

async fn handle_message(bot: Bot, msg: Message, router: Arc<CoinBot>) -> ResponseResult<()> {
    let Some(text) = msg.text() else {
        return Ok(());
    };

    let Some(reply) = router.handle(text).await else {
        return Ok(());
    };

    #[allow(deprecated)]
    let mode = ParseMode::Markdown;

    let chat_id = msg.chat.id;
    let Err(e) = bot
        .send_message(chat_id, reply.content.as_str())
        .parse_mode(mode)
        .await
    else {
        return Ok(());
    };

    // Telegram rejects malformed markup; the user still gets the text.
    tracing::warn!(%chat_id, error = %e, "Markdown reply rejected, resending as plain text");
    if let Err(e) = bot
        .send_message(chat_id, strip_markdown(&reply.content))
        .await
    {
        tracing::warn!(%chat_id, error = %e, "failed to send reply");
    }

    Ok(())
}
