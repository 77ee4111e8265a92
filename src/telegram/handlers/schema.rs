//! Dispatcher schema and the message path shared by polling and webhook mode

use teloxide::dispatching::{UpdateFilterExt, UpdateHandler};
use teloxide::prelude::*;
use teloxide::types::Message;

use super::types::{HandlerDeps, HandlerError};
use crate::core::error::AppResult;
use crate::gate::{Decision, IncomingMessage, Outcome, RegistrationGate};
use crate::telegram::adapter::{incoming_message, ReplySender};
use crate::telegram::Bot;

/// Creates the dispatcher schema used in polling mode.
///
/// Every message update goes through the registration gate; rule precedence
/// lives in the gate, not in the order of dptree branches.
pub fn schema(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    dptree::entry().branch(message_handler(deps))
}

fn message_handler(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    Update::filter_message().endpoint(move |bot: Bot, msg: Message| {
        let deps = deps.clone();
        async move {
            if let Err(e) = process_message(&bot, &deps, &msg).await {
                log::error!("Failed to handle message in chat {}: {}", msg.chat.id.0, e);
            }
            Ok(())
        }
    })
}

/// Runs one Telegram message through the gate and sends the reply.
///
/// Returns `Ok(None)` for messages without a sender to gate.
pub async fn process_message<S>(sender: &S, deps: &HandlerDeps, msg: &Message) -> AppResult<Option<Decision>>
where
    S: ReplySender + ?Sized,
{
    let Some(incoming) = incoming_message(msg, deps.bot_username.as_deref()) else {
        log::debug!("Ignoring message {} in chat {}: no user sender", msg.id.0, msg.chat.id.0);
        return Ok(None);
    };
    dispatch(sender, &deps.gate, &incoming).await.map(Some)
}

/// Gate decision plus outbound reply for an already converted message
pub async fn dispatch<S>(sender: &S, gate: &RegistrationGate, incoming: &IncomingMessage) -> AppResult<Decision>
where
    S: ReplySender + ?Sized,
{
    let decision = gate.handle(incoming).await?;

    match &decision.outcome {
        Outcome::Reply(reply) => {
            log::info!(
                "User {}: rule={}, replying in chat {}",
                incoming.sender.id,
                decision.rule.as_str(),
                incoming.chat_id
            );
            sender.send_reply(incoming.chat_id, reply).await?;
        }
        Outcome::Passthrough => {
            log::debug!("User {}: registered, passing message through", incoming.sender.id);
        }
    }

    Ok(decision)
}
