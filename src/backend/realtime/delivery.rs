/**
 * Message Delivery
 *
 * Both operations are fire-and-forget: a message that fails validation or
 * storage is logged and dropped, and the client hears nothing back. Each
 * returns what it delivered so callers and tests can observe the outcome.
 */

use crate::backend::chat::db as chat_db;
use crate::backend::messaging::db as messaging_db;
use crate::backend::middleware::auth::AuthenticatedUser;
use crate::backend::realtime::broadcast::broadcast_event;
use crate::backend::realtime::presence::ConnectionHandle;
use crate::backend::server::state::AppState;
use crate::shared::messaging::{ChatMessage, ChatMessageInput, PrivateMessage, PrivateMessageInput};
use crate::shared::ServerEvent;

/// Broadcast a public chat message
///
/// Authenticated messages are stored first and carry the author's username;
/// anonymous ones are broadcast as "anon" and never stored.
pub async fn deliver_chat_message(
    state: &AppState,
    sender: Option<&AuthenticatedUser>,
    input: &ChatMessageInput,
) -> Option<ChatMessage> {
    let Some(content) = input.normalized() else {
        tracing::debug!("[Delivery] Dropping empty chat message");
        return None;
    };

    let message = match sender {
        Some(user) => match chat_db::save_message(&state.db_pool, user.user_id, &content).await {
            Ok(message) => message,
            Err(e) => {
                tracing::error!("[Delivery] Failed to store chat message from {}: {}", user.user_id, e);
                return None;
            }
        },
        None => ChatMessage::anonymous(content),
    };

    broadcast_event(&state.realtime_broadcast, ServerEvent::ChatMessage(message.clone()));
    Some(message)
}

/// Store a private message, push it to the recipient if online and
/// acknowledge it on the sender's own connection
pub async fn deliver_private_message(
    state: &AppState,
    sender: Option<&AuthenticatedUser>,
    own_connection: &ConnectionHandle,
    input: PrivateMessageInput,
) -> Option<PrivateMessage> {
    let Some(sender) = sender else {
        tracing::debug!("[Delivery] Dropping private message from anonymous connection {}", own_connection.id());
        return None;
    };

    let outgoing = match input.validate() {
        Ok(outgoing) => outgoing,
        Err(e) => {
            tracing::debug!("[Delivery] Dropping private message from {}: {}", sender.user_id, e);
            return None;
        }
    };

    let stored = messaging_db::create_private_message(
        &state.db_pool,
        sender.user_id,
        outgoing.recipient_id,
        &outgoing.content,
        outgoing.image_url.as_deref(),
    )
    .await;

    let message = match stored {
        Ok(message) => message,
        Err(e) => {
            let unknown_user = e
                .as_database_error()
                .map(|db_err| db_err.is_foreign_key_violation())
                .unwrap_or(false);
            if unknown_user {
                tracing::warn!(
                    "[Delivery] Dropping private message from {} to unknown user {}",
                    sender.user_id,
                    outgoing.recipient_id
                );
            } else {
                tracing::error!("[Delivery] Failed to store private message from {}: {}", sender.user_id, e);
            }
            return None;
        }
    };

    match state.presence.lookup(outgoing.recipient_id) {
        Some(recipient) if recipient.send(ServerEvent::PrivateMessage(message.clone())) => {
            tracing::info!("[Delivery] Private message {} pushed to {}", message.id, outgoing.recipient_id);
        }
        _ => {
            tracing::debug!("[Delivery] Recipient {} offline, message {} stored only", outgoing.recipient_id, message.id);
        }
    }

    if !own_connection.send(ServerEvent::PrivateMessageSent(message.clone())) {
        tracing::debug!("[Delivery] Sender connection {} closed before acknowledgement", own_connection.id());
    }

    Some(message)
}
