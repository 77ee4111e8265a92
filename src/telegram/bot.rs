//! Bot construction and command definitions

use secrecy::ExposeSecret;
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;

use crate::core::config::{self, BotConfig};

/// Bot commands enum with descriptions
#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "Я умею:")]
pub enum Command {
    // Deep-link payload after `/start`, empty for a plain `/start`
    #[command(description = "начать и поделиться контактом")]
    Start(String),
}

/// Whether `text` is a `/start` meant for this bot.
///
/// `/start@otherbot` is not ours; without a known username only the
/// unmentioned form counts.
pub fn is_start_command(text: &str, bot_username: Option<&str>) -> bool {
    matches!(
        Command::parse(text, bot_username.unwrap_or_default()),
        Ok(Command::Start(_))
    )
}

/// Creates a Bot instance with custom or default API URL
///
/// # Returns
/// * `Ok(Bot)` - Successfully created bot instance
/// * `Err(anyhow::Error)` - Failed to build the HTTP client
pub fn create_bot(bot_config: &BotConfig) -> anyhow::Result<Bot> {
    let client = teloxide::net::default_reqwest_settings()
        .timeout(config::network::timeout())
        .build()?;
    let bot = Bot::with_client(bot_config.token.expose_secret(), client);

    let bot = match &bot_config.api_url {
        Some(url) => {
            log::info!("Using custom Bot API URL: {}", url);
            bot.set_api_url(url.clone())
        }
        None => bot,
    };

    Ok(bot)
}

/// Username of the bot (without @), used to recognize `/start@username`
pub async fn fetch_bot_username(bot: &Bot) -> Option<String> {
    match bot.get_me().await {
        Ok(me) => {
            let username = me.user.username.clone();
            log::info!("Authorized as @{}", username.as_deref().unwrap_or("<no username>"));
            username
        }
        Err(e) => {
            log::warn!("getMe failed, /start@mentions will not be recognized: {}", e);
            None
        }
    }
}

/// Sets up bot commands in Telegram UI
pub async fn setup_bot_commands(bot: &Bot) -> Result<(), teloxide::RequestError> {
    bot.set_my_commands(Command::bot_commands()).await?;
    Ok(())
}
