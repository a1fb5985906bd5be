/**
 * WebSocket Gateway
 *
 * GET /ws[?token=<jwt>]
 *
 * The token may also come as `Authorization: Bearer <jwt>`. A missing or bad
 * token never rejects the upgrade; the connection just stays anonymous.
 *
 * Connection lifecycle:
 *
 * 1. open: register presence and broadcast `user status` online (if authenticated)
 * 2. active: frames are handled one at a time in arrival order
 * 3. close: release presence and broadcast offline, unless a newer
 *    connection for the same user has taken over
 *
 * Each connection has a writer task that merges the connection's direct
 * queue with the global broadcast channel.
 */

use axum::{
    extract::{
        rejection::QueryRejection,
        ws::{Message, WebSocket, WebSocketUpgrade},
        Query, State,
    },
    http::HeaderMap,
    response::Response,
};
use futures_util::{SinkExt, StreamExt};
use serde::Deserialize;
use tokio::sync::{broadcast::error::RecvError, mpsc};
use uuid::Uuid;

use crate::backend::middleware::auth::{authenticate_lenient, bearer_token, AuthenticatedUser};
use crate::backend::realtime::broadcast::broadcast_event;
use crate::backend::realtime::delivery::{deliver_chat_message, deliver_private_message};
use crate::backend::realtime::presence::ConnectionHandle;
use crate::backend::server::state::AppState;
use crate::shared::{ClientEvent, ServerEvent};

#[derive(Debug, Default, Deserialize)]
pub struct HandshakeQuery {
    #[serde(default)]
    pub token: Option<String>,
}

/// `?token=` wins over `Authorization: Bearer`; an empty query token counts as absent
pub fn handshake_token<'a>(query: &'a HandshakeQuery, headers: &'a HeaderMap) -> Option<&'a str> {
    query
        .token
        .as_deref()
        .filter(|token| !token.is_empty())
        .or_else(|| bearer_token(headers))
}

pub async fn handle_socket_upgrade(
    ws: WebSocketUpgrade,
    State(app_state): State<AppState>,
    handshake: Result<Query<HandshakeQuery>, QueryRejection>,
    headers: HeaderMap,
) -> Response {
    // An unreadable query string is treated like a missing token.
    let handshake = match handshake {
        Ok(Query(query)) => query,
        Err(rejection) => {
            tracing::debug!("[Gateway] Ignoring handshake query: {}", rejection);
            HandshakeQuery::default()
        }
    };
    let token = handshake_token(&handshake, &headers);
    let identity = authenticate_lenient(token, &app_state.config.jwt_secret);

    ws.on_upgrade(move |socket| run_connection(socket, app_state, identity))
}

async fn run_connection(socket: WebSocket, app_state: AppState, identity: Option<AuthenticatedUser>) {
    // Subscribe before opening so this connection sees its own online event.
    let mut broadcast_rx = app_state.realtime_broadcast.subscribe();
    let (session, mut direct_rx) = SocketSession::open(app_state, identity);
    let connection_id = session.connection_id();

    let (mut sender, mut receiver) = socket.split();

    let mut writer = tokio::spawn(async move {
        loop {
            let event = tokio::select! {
                direct = direct_rx.recv() => match direct {
                    Some(event) => event,
                    None => break,
                },
                shared = broadcast_rx.recv() => match shared {
                    Ok(event) => event,
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::warn!("[Gateway] Connection {} lagged, skipped {} events", connection_id, skipped);
                        continue;
                    }
                    Err(RecvError::Closed) => break,
                },
            };

            let frame = match event.to_frame() {
                Ok(frame) => frame,
                Err(e) => {
                    tracing::error!("[Gateway] Failed to encode '{}': {}", event.name(), e);
                    continue;
                }
            };

            if sender.send(Message::Text(frame.into())).await.is_err() {
                break;
            }
        }
    });

    loop {
        tokio::select! {
            incoming = receiver.next() => match incoming {
                Some(Ok(Message::Text(text))) => session.handle_frame(text.as_str()).await,
                Some(Ok(Message::Close(_))) | None => break,
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    tracing::debug!("[Gateway] Connection {} read error: {}", connection_id, e);
                    break;
                }
            },
            _ = &mut writer => break,
        }
    }

    session.close();
    writer.abort();
}

/// State of one socket connection, independent of the transport
pub struct SocketSession {
    state: AppState,
    identity: Option<AuthenticatedUser>,
    handle: ConnectionHandle,
}

impl SocketSession {
    /// Open a session and return the receiver for events addressed to it
    pub fn open(
        state: AppState,
        identity: Option<AuthenticatedUser>,
    ) -> (Self, mpsc::UnboundedReceiver<ServerEvent>) {
        let (handle, direct_rx) = ConnectionHandle::open();

        match &identity {
            Some(user) => {
                tracing::info!("[Gateway] Connection {} opened for {} ({})", handle.id(), user.username, user.user_id);
                state.presence.register(user.user_id, &handle);
                broadcast_event(&state.realtime_broadcast, ServerEvent::online(user.user_id));
            }
            None => tracing::info!("[Gateway] Connection {} opened anonymously", handle.id()),
        }

        (Self { state, identity, handle }, direct_rx)
    }

    pub fn identity(&self) -> Option<&AuthenticatedUser> {
        self.identity.as_ref()
    }

    pub fn connection_id(&self) -> Uuid {
        self.handle.id()
    }

    /// Handle one text frame; malformed or unknown frames are ignored
    pub async fn handle_frame(&self, frame: &str) {
        match ClientEvent::from_frame(frame) {
            Ok(event) => self.dispatch(event).await,
            Err(e) => tracing::debug!("[Gateway] Ignoring frame on {}: {}", self.handle.id(), e),
        }
    }

    pub async fn dispatch(&self, event: ClientEvent) {
        match event {
            ClientEvent::ChatMessage(input) => {
                deliver_chat_message(&self.state, self.identity.as_ref(), &input).await;
            }
            ClientEvent::PrivateMessage(input) => {
                deliver_private_message(&self.state, self.identity.as_ref(), &self.handle, input).await;
            }
        }
    }

    /// Close the session, announcing offline only if this connection still
    /// owned the user's presence entry
    pub fn close(self) {
        if let Some(user) = &self.identity {
            if self.state.presence.release(user.user_id, self.handle.id()) {
                broadcast_event(&self.state.realtime_broadcast, ServerEvent::offline(user.user_id));
            } else {
                tracing::debug!("[Gateway] Connection {} was superseded for {}", self.handle.id(), user.user_id);
            }
        }
        tracing::info!("[Gateway] Connection {} closed", self.handle.id());
    }
}
