//! Registration gate: the per-message decision between prompting, saving a
//! contact, acknowledging an opt-out, blocking, or letting the message through.
//!
//! Nothing in here knows about Telegram. The transport converts its own
//! message type into [`IncomingMessage`] and renders the returned [`Reply`].

pub mod replies;

use std::sync::Arc;

use crate::core::error::AppResult;
use crate::core::logging::mask_phone;
use crate::storage::{ProfileRecord, RecordStore};

pub use replies::{Button, Keyboard, Reply, OPT_OUT_LABEL, SHARE_CONTACT_LABEL};

/// Who sent the message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sender {
    pub id: u64,
    pub first_name: Option<String>,
    pub username: Option<String>,
}

/// Transport-independent shape of an inbound message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageKind {
    /// `/start` addressed to this bot, with or without payload
    StartCommand,
    /// A shared contact card
    Contact {
        /// Platform id of the person on the card, if they are a platform user
        owner_id: Option<u64>,
        phone: String,
    },
    /// Any other text, including unknown commands
    Text(String),
    /// Media, stickers, locations and everything without text
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingMessage {
    pub chat_id: i64,
    pub sender: Sender,
    pub kind: MessageKind,
}

/// The one rule that handles a message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Start,
    Contact,
    OptOut,
    CatchAll,
}

impl Rule {
    pub fn as_str(self) -> &'static str {
        match self {
            Rule::Start => "start",
            Rule::Contact => "contact",
            Rule::OptOut => "opt_out",
            Rule::CatchAll => "catch_all",
        }
    }
}

/// Picks the rule for a message.
///
/// Precedence is start command, contact, opt-out label, catch-all. Every
/// message maps to exactly one rule; text that only resembles the start
/// command or the opt-out label falls to the catch-all.
pub fn classify(kind: &MessageKind) -> Rule {
    match kind {
        MessageKind::StartCommand => Rule::Start,
        MessageKind::Contact { .. } => Rule::Contact,
        MessageKind::Text(text) if text == OPT_OUT_LABEL => Rule::OptOut,
        MessageKind::Text(_) | MessageKind::Other => Rule::CatchAll,
    }
}

/// What the transport should do with a message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Reply(Reply),
    /// Registered user; later features handle the message
    Passthrough,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    pub rule: Rule,
    pub outcome: Outcome,
}

/// Gate in front of every bot feature: nothing but `/start`, the contact
/// button and the opt-out button works until a phone number is on file.
#[derive(Clone)]
pub struct RegistrationGate {
    store: Arc<dyn RecordStore>,
}

impl RegistrationGate {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn RecordStore> {
        &self.store
    }

    /// Decides the reply for one message, writing the record on a valid contact.
    ///
    /// # Errors
    /// `StorageUnavailable` when the record file cannot be read or written.
    pub async fn handle(&self, msg: &IncomingMessage) -> AppResult<Decision> {
        let rule = classify(&msg.kind);
        let user_id = msg.sender.id.to_string();

        let outcome = match (&msg.kind, rule) {
            (_, Rule::Start) => {
                if self.store.is_registered(&user_id).await? {
                    Outcome::Reply(Reply::already_registered())
                } else {
                    Outcome::Reply(Reply::prompt())
                }
            }
            (MessageKind::Contact { owner_id, phone }, Rule::Contact) => {
                if *owner_id != Some(msg.sender.id) {
                    log::info!(
                        "User {} shared a contact owned by {:?}, asking for their own",
                        user_id,
                        owner_id
                    );
                    Outcome::Reply(Reply::not_own_contact())
                } else {
                    let record = ProfileRecord::new(
                        phone.clone(),
                        msg.sender.first_name.clone(),
                        msg.sender.username.clone(),
                    );
                    self.store.upsert(&user_id, record).await?;
                    log::info!("Saved phone {} for user {}", mask_phone(phone), user_id);
                    Outcome::Reply(Reply::saved(phone))
                }
            }
            (_, Rule::OptOut) => Outcome::Reply(Reply::opted_out()),
            _ => {
                if self.store.is_registered(&user_id).await? {
                    Outcome::Passthrough
                } else {
                    Outcome::Reply(Reply::blocked())
                }
            }
        };

        Ok(Decision { rule, outcome })
    }
}
