//! Removes the bot's webhook and drops queued updates, without starting a
//! server. Run it before switching a deployment back to polling.
//!
//! Usage: BOT_TOKEN=... delete-webhook

use anyhow::Result;

use phonegate::core::BotConfig;
use phonegate::telegram::run_delete_webhook;

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    simplelog::SimpleLogger::init(simplelog::LevelFilter::Info, simplelog::Config::default())?;

    let config = BotConfig::from_env()?;
    run_delete_webhook(config, true).await
}
