//! Common test utilities
//!
//! Shared across the integration tests: Telegram JSON fixtures, a reply
//! recorder standing in for the Bot API, and a gate over a scratch file.

#![allow(dead_code)]

pub mod fixtures;
pub mod recorder;

#[allow(unused_imports)]
pub use fixtures::{contact_message, message_json, text_message, update_json, TestEnvironment};
#[allow(unused_imports)]
pub use recorder::RecordingSender;
