//! Webhook registration with the Bot API

use teloxide::prelude::*;

use crate::core::config::WebhookConfig;
use crate::core::error::AppResult;

/// Points Telegram at our webhook URL.
///
/// The secret token is only supplied when the server verifies the header,
/// otherwise Telegram would send a header nobody checks.
pub async fn register_webhook(bot: &Bot, config: &WebhookConfig, drop_pending_updates: bool) -> AppResult<()> {
    let url = config.url()?;
    let mut request = bot.set_webhook(url).drop_pending_updates(drop_pending_updates);
    if let Some(token) = config.secret_token() {
        request = request.secret_token(token.to_string());
    }
    request.await?;

    log::info!(
        "Webhook set to {}{}/*** (secret header: {}, drop pending: {})",
        config.base_url.as_str().trim_end_matches('/'),
        crate::core::config::webhook::PATH_PREFIX,
        config.verify_secret_header,
        drop_pending_updates
    );
    Ok(())
}

/// Removes the webhook so the bot can be polled again.
pub async fn deregister_webhook(bot: &Bot, drop_pending_updates: bool) -> AppResult<()> {
    bot.delete_webhook().drop_pending_updates(drop_pending_updates).await?;
    log::info!("Webhook deleted (drop pending: {})", drop_pending_updates);
    Ok(())
}
