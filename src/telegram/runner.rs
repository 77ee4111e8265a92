//! Entry points for the three run modes: polling, webhook, webhook removal

use std::future::Future;
use std::sync::Arc;

use anyhow::Result;
use teloxide::prelude::*;
use teloxide::update_listeners::Polling;
use tokio::signal;

use crate::core::config::{BotConfig, WebhookConfig};
use crate::gate::RegistrationGate;
use crate::storage::JsonFileStore;
use crate::telegram::bot::{create_bot, fetch_bot_username, setup_bot_commands};
use crate::telegram::handlers::{schema, HandlerDeps};
use crate::telegram::lifecycle::{deregister_webhook, register_webhook};
use crate::telegram::webhook::{bind_webhook, serve_webhook, WebhookState};

/// Gate over the configured record file plus the bot's identity
async fn build_deps(bot: &Bot, config: &BotConfig) -> HandlerDeps {
    log::info!("User records file: {}", config.users_db_path.display());
    let store = Arc::new(JsonFileStore::new(config.users_db_path.clone()));
    let gate = RegistrationGate::new(store);

    let bot_username = fetch_bot_username(bot).await;
    if let Err(e) = setup_bot_commands(bot).await {
        log::warn!("Failed to set bot commands: {}", e);
    }

    HandlerDeps::new(gate, bot_username)
}

/// Long polling until Ctrl-C.
pub async fn run_polling(config: BotConfig) -> Result<()> {
    let bot = create_bot(&config)?;
    let deps = build_deps(&bot, &config).await;
    let handler = schema(deps);

    log::info!(
        "Starting bot in long polling mode (drop pending: {})",
        config.drop_pending_updates
    );

    let mut polling = Polling::builder(bot.clone());
    if config.drop_pending_updates {
        polling = polling.drop_pending_updates();
    }
    let listener = polling.build();

    Dispatcher::builder(bot, handler)
        .enable_ctrlc_handler()
        .build()
        .dispatch_with_listener(
            listener,
            LoggingErrorHandler::with_custom_text("An error from the update listener"),
        )
        .await;

    log::info!("Dispatcher shutdown gracefully");
    Ok(())
}

/// Registers the webhook, serves it until Ctrl-C/SIGTERM, then deregisters.
pub async fn run_webhook(config: BotConfig, webhook: WebhookConfig) -> Result<()> {
    run_webhook_until(config, webhook, shutdown_signal()).await
}

/// Webhook mode with a caller-supplied shutdown trigger.
///
/// The port is bound before setWebhook so Telegram never pushes to a closed
/// port, and a failed bind leaves the current registration alone.
pub async fn run_webhook_until<F>(config: BotConfig, webhook: WebhookConfig, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let bot = create_bot(&config)?;
    let deps = build_deps(&bot, &config).await;

    let listener = bind_webhook(webhook.port).await?;
    register_webhook(&bot, &webhook, config.drop_pending_updates).await?;

    let state = WebhookState::new(Arc::new(bot.clone()), deps, Arc::new(webhook));
    let served = serve_webhook(listener, state, shutdown).await;

    if let Err(e) = deregister_webhook(&bot, false).await {
        log::warn!("Failed to delete webhook on shutdown: {}", e);
    }

    served?;
    Ok(())
}

/// Deletes the webhook without starting anything; used when moving between
/// webhook and polling deployments.
pub async fn run_delete_webhook(config: BotConfig, drop_pending_updates: bool) -> Result<()> {
    let bot = create_bot(&config)?;
    deregister_webhook(&bot, drop_pending_updates).await?;
    println!("delete_webhook: true");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            log::error!("Failed to listen for Ctrl-C: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                log::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    log::info!("Shutting down gracefully...");
}
