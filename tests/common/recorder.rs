//! Reply recorder used instead of the Bot API

#![allow(dead_code)]
#![allow(clippy::unwrap_used)]

use std::sync::Mutex;

use async_trait::async_trait;
use phonegate::core::AppResult;
use phonegate::gate::Reply;
use phonegate::telegram::ReplySender;

/// Keeps every `(chat_id, reply)` it was asked to send
#[derive(Default)]
pub struct RecordingSender {
    sent: Mutex<Vec<(i64, Reply)>>,
}

impl RecordingSender {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<(i64, Reply)> {
        self.sent.lock().unwrap().clone()
    }

    /// Removes and returns everything recorded so far
    pub fn take(&self) -> Vec<(i64, Reply)> {
        std::mem::take(&mut *self.sent.lock().unwrap())
    }
}

#[async_trait]
impl ReplySender for RecordingSender {
    async fn send_reply(&self, chat_id: i64, reply: &Reply) -> AppResult<()> {
        self.sent.lock().unwrap().push((chat_id, reply.clone()));
        Ok(())
    }
}
