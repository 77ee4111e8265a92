use anyhow::Result;
use dotenvy::dotenv;

use phonegate::cli::{Cli, Commands};
use phonegate::core::{config, init_logger, install_panic_hook, BotConfig, WebhookConfig};
use phonegate::telegram::{run_delete_webhook, run_polling, run_webhook};

/// Main entry point for the Telegram bot
///
/// Parses CLI arguments and dispatches to the selected run mode.
///
/// # Errors
/// Returns an error if configuration is missing or invalid, or if the bot
/// cannot talk to Telegram at startup.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse_args();

    // Load environment variables from .env if present
    let _ = dotenv();

    init_logger(&config::LOG_FILE_PATH)?;
    install_panic_hook();

    let mut bot_config = BotConfig::from_env()?;

    match cli.command {
        Some(Commands::Run { drop_pending }) => {
            bot_config.drop_pending_updates |= drop_pending;
            run_polling(bot_config).await
        }
        Some(Commands::Webhook {
            port,
            no_verify_secret_header,
            drop_pending,
        }) => {
            bot_config.drop_pending_updates |= drop_pending;
            let mut webhook_config = WebhookConfig::from_env()?;
            if let Some(port) = port {
                webhook_config.port = port;
            }
            if no_verify_secret_header {
                webhook_config.verify_secret_header = false;
            }
            run_webhook(bot_config, webhook_config).await
        }
        Some(Commands::DeleteWebhook { keep_pending }) => run_delete_webhook(bot_config, !keep_pending).await,
        None => {
            log::info!("No command specified, running bot in polling mode");
            run_polling(bot_config).await
        }
    }
}
