//! Telegram transport: bot setup, message conversion, polling dispatcher,
//! webhook endpoint and webhook lifecycle

pub mod adapter;
pub mod bot;
pub mod handlers;
pub mod lifecycle;
pub mod runner;
pub mod webhook;

pub use teloxide::Bot;

// Re-exports for convenience
pub use adapter::{incoming_message, reply_markup, ReplySender};
pub use bot::{create_bot, Command};
pub use handlers::{dispatch, process_message, schema, HandlerDeps, HandlerError};
pub use lifecycle::{deregister_webhook, register_webhook};
pub use runner::{run_delete_webhook, run_polling, run_webhook, run_webhook_until};
pub use webhook::{bind_webhook, create_webhook_router, secret_token_matches, serve_webhook, WebhookState};
