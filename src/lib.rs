//! phonegate - Telegram bot that gates access behind phone-number sharing
//!
//! # Module Structure
//!
//! - `core`: configuration, errors and logging
//! - `storage`: JSON-file user records behind the `RecordStore` trait
//! - `gate`: the registration gate (no Telegram types)
//! - `telegram`: polling dispatcher, webhook endpoint and webhook lifecycle

pub mod cli;
pub mod core;
pub mod gate;
pub mod storage;
pub mod telegram;

// Re-export commonly used types for convenience
pub use crate::core::{AppError, AppResult, BotConfig, WebhookConfig};
pub use crate::gate::{classify, Decision, IncomingMessage, MessageKind, Outcome, RegistrationGate, Rule};
pub use crate::storage::{JsonFileStore, ProfileRecord, RecordStore};
