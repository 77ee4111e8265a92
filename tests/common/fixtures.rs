//! Test fixtures: Telegram message JSON and a gate over a temp directory

#![allow(dead_code)]
#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::path::PathBuf;
use std::sync::Arc;

use phonegate::gate::RegistrationGate;
use phonegate::storage::JsonFileStore;
use phonegate::telegram::HandlerDeps;
use serde_json::{json, Value};
use teloxide::types::Message;
use tempfile::TempDir;

pub const BOT_USERNAME: &str = "gate_bot";

/// Gate, handler deps and the scratch directory holding `users.json`
pub struct TestEnvironment {
    pub dir: TempDir,
    pub deps: HandlerDeps,
}

impl TestEnvironment {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("failed to create tempdir");
        let store = Arc::new(JsonFileStore::new(dir.path().join("users.json")));
        let deps = HandlerDeps::new(RegistrationGate::new(store), Some(BOT_USERNAME.to_string()));
        Self { dir, deps }
    }

    pub fn users_path(&self) -> PathBuf {
        self.dir.path().join("users.json")
    }

    /// Parsed contents of the record file, `Value::Null` if it does not exist
    pub fn users_file(&self) -> Value {
        match std::fs::read_to_string(self.users_path()) {
            Ok(raw) => serde_json::from_str(&raw).unwrap(),
            Err(_) => Value::Null,
        }
    }
}

/// Message JSON from user `user_id` in their private chat, merged with `extra`
pub fn message_json(user_id: u64, extra: Value) -> Value {
    let mut value = json!({
        "message_id": 1,
        "date": 1700000000,
        "chat": {"id": user_id, "type": "private", "first_name": "Ann"},
        "from": {"id": user_id, "is_bot": false, "first_name": "Ann", "username": "ann"}
    });
    for (key, field) in extra.as_object().unwrap() {
        value[key] = field.clone();
    }
    value
}

pub fn text_message(user_id: u64, text: &str) -> Message {
    serde_json::from_value(message_json(user_id, json!({ "text": text }))).unwrap()
}

pub fn contact_message(user_id: u64, owner_id: Option<u64>, phone: &str) -> Message {
    let mut contact = json!({"phone_number": phone, "first_name": "Ann"});
    if let Some(owner_id) = owner_id {
        contact["user_id"] = json!(owner_id);
    }
    serde_json::from_value(message_json(user_id, json!({ "contact": contact }))).unwrap()
}

/// Webhook body for a message update
pub fn update_json(update_id: u32, message: Value) -> Value {
    json!({"update_id": update_id, "message": message})
}
