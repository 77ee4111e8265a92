//! Conversion between teloxide types and the gate's transport-free types

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{ButtonRequest, KeyboardButton, KeyboardMarkup, KeyboardRemove, Message, ReplyMarkup};

use crate::core::error::AppResult;
use crate::gate::{IncomingMessage, Keyboard, MessageKind, Reply, Sender};
use crate::telegram::bot::is_start_command;

/// Outbound half of a transport: anything that can deliver a gate reply.
#[async_trait]
pub trait ReplySender: Send + Sync {
    async fn send_reply(&self, chat_id: i64, reply: &Reply) -> AppResult<()>;
}

#[async_trait]
impl ReplySender for Bot {
    async fn send_reply(&self, chat_id: i64, reply: &Reply) -> AppResult<()> {
        self.send_message(ChatId(chat_id), reply.text.clone())
            .reply_markup(reply_markup(&reply.keyboard))
            .await?;
        Ok(())
    }
}

/// Telegram markup for a keyboard descriptor
pub fn reply_markup(keyboard: &Keyboard) -> ReplyMarkup {
    match keyboard {
        Keyboard::Remove => ReplyMarkup::KeyboardRemove(KeyboardRemove::new()),
        Keyboard::Buttons(rows) => {
            let rows: Vec<Vec<KeyboardButton>> = rows
                .iter()
                .map(|row| {
                    row.iter()
                        .map(|button| {
                            let key = KeyboardButton::new(button.label.clone());
                            if button.requests_contact {
                                key.request(ButtonRequest::Contact)
                            } else {
                                key
                            }
                        })
                        .collect()
                })
                .collect();
            ReplyMarkup::Keyboard(KeyboardMarkup::new(rows).resize_keyboard().one_time_keyboard())
        }
    }
}

/// Gate input for a Telegram message; `None` when there is no sender to gate
/// (channel posts, anonymous admins).
pub fn incoming_message(msg: &Message, bot_username: Option<&str>) -> Option<IncomingMessage> {
    let from = msg.from.as_ref()?;
    if from.is_bot {
        return None;
    }

    let kind = if let Some(contact) = msg.contact() {
        MessageKind::Contact {
            owner_id: contact.user_id.map(|id| id.0),
            phone: contact.phone_number.clone(),
        }
    } else if let Some(text) = msg.text() {
        if is_start_command(text, bot_username) {
            MessageKind::StartCommand
        } else {
            MessageKind::Text(text.to_string())
        }
    } else {
        MessageKind::Other
    };

    Some(IncomingMessage {
        chat_id: msg.chat.id.0,
        sender: Sender {
            id: from.id.0,
            first_name: Some(from.first_name.clone()).filter(|n| !n.is_empty()),
            username: from.username.clone(),
        },
        kind,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn message(extra: serde_json::Value) -> Message {
        let mut value = json!({
            "message_id": 1,
            "date": 1700000000,
            "chat": {"id": 42, "type": "private", "first_name": "Ann"},
            "from": {"id": 42, "is_bot": false, "first_name": "Ann", "username": "ann"}
        });
        for (key, field) in extra.as_object().unwrap() {
            value[key] = field.clone();
        }
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_text_and_start() {
        let msg = message(json!({"text": "/start"}));
        let incoming = incoming_message(&msg, Some("gate_bot")).unwrap();
        assert_eq!(incoming.kind, MessageKind::StartCommand);
        assert_eq!(incoming.chat_id, 42);
        assert_eq!(
            incoming.sender,
            Sender {
                id: 42,
                first_name: Some("Ann".into()),
                username: Some("ann".into()),
            }
        );

        let msg = message(json!({"text": "hello"}));
        let incoming = incoming_message(&msg, Some("gate_bot")).unwrap();
        assert_eq!(incoming.kind, MessageKind::Text("hello".into()));
    }

    #[test]
    fn test_contact() {
        let msg = message(json!({"contact": {"phone_number": "+15550001", "first_name": "Ann", "user_id": 42}}));
        let incoming = incoming_message(&msg, None).unwrap();
        assert_eq!(
            incoming.kind,
            MessageKind::Contact {
                owner_id: Some(42),
                phone: "+15550001".into(),
            }
        );

        let msg = message(json!({"contact": {"phone_number": "+15550002", "first_name": "Bob"}}));
        let incoming = incoming_message(&msg, None).unwrap();
        assert_eq!(
            incoming.kind,
            MessageKind::Contact {
                owner_id: None,
                phone: "+15550002".into(),
            }
        );
    }

    #[test]
    fn test_non_text_is_other() {
        let msg = message(json!({"location": {"latitude": 55.75, "longitude": 37.61}}));
        assert_eq!(incoming_message(&msg, None).unwrap().kind, MessageKind::Other);
    }

    #[test]
    fn test_bot_sender_is_dropped() {
        let msg = message(json!({
            "text": "/start",
            "from": {"id": 7, "is_bot": true, "first_name": "Other"}
        }));
        assert!(incoming_message(&msg, Some("gate_bot")).is_none());
    }

    #[test]
    fn test_keyboard_markup() {
        assert!(matches!(
            reply_markup(&Keyboard::Remove),
            ReplyMarkup::KeyboardRemove(_)
        ));

        let ReplyMarkup::Keyboard(markup) = reply_markup(&Keyboard::contact_request()) else {
            panic!("expected a reply keyboard");
        };
        assert_eq!(markup.keyboard.len(), 2);
        assert!(matches!(markup.keyboard[0][0].request, Some(ButtonRequest::Contact)));
        assert!(markup.keyboard[1][0].request.is_none());
        assert_eq!(markup.keyboard[1][0].text, crate::gate::OPT_OUT_LABEL);
    }
}
