//! Telegram bot handler tree configuration
//!
//! The same message path serves the polling dispatcher and the webhook
//! endpoint, so integration tests exercise production code.

mod schema;
mod types;

pub use schema::{dispatch, process_message, schema};
pub use types::{HandlerDeps, HandlerError};
