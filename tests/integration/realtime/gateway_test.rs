//! Socket session behaviour together with the REST side
//!
//! These drive `SocketSession` directly; the transport loop in the gateway
//! only moves frames between the socket and the session.

use assert_matches::assert_matches;
use pretty_assertions::assert_eq;
use tokio::time::{timeout, Duration};

use plaza::backend::realtime::SocketSession;
use plaza::backend::messaging::conversations::list_conversation;
use plaza::shared::ServerEvent;

use crate::common::{register_user, spawn_app};

const RECV_TIMEOUT: Duration = Duration::from_secs(1);

fn private_frame(recipient: uuid::Uuid, content: &str) -> String {
    serde_json::json!({
        "event": "private message",
        "data": { "recipientId": recipient, "content": content }
    })
    .to_string()
}

#[tokio::test]
async fn test_offline_recipient_gets_stored_message() {
    let app = spawn_app().await;
    let alice = register_user(&app, "alice").await;
    let bob = register_user(&app, "bob").await;

    let (session, mut alice_rx) = SocketSession::open(app.state.clone(), Some(alice.identity()));
    session.handle_frame(&private_frame(bob.id, "hi")).await;

    let message = match timeout(RECV_TIMEOUT, alice_rx.recv()).await.unwrap().unwrap() {
        ServerEvent::PrivateMessageSent(message) => message,
        other => panic!("Expected acknowledgement, got {:?}", other),
    };
    assert_eq!(message.content, "hi");
    assert!(!message.read);

    // Bob reads later over REST, which flips the read flag.
    let view = list_conversation(&app.state.db_pool, bob.id, alice.id).await.unwrap();
    assert_eq!(view.messages.len(), 1);
    assert_eq!(view.messages[0].id, message.id);
    assert_eq!(view.marked_read, 1);

    session.close();
}

#[tokio::test]
async fn test_online_recipient_receives_push() {
    let app = spawn_app().await;
    let alice = register_user(&app, "alice").await;
    let bob = register_user(&app, "bob").await;

    let (alice_session, mut alice_rx) = SocketSession::open(app.state.clone(), Some(alice.identity()));
    let (bob_session, mut bob_rx) = SocketSession::open(app.state.clone(), Some(bob.identity()));

    alice_session.handle_frame(&private_frame(bob.id, "ping")).await;

    let pushed = timeout(RECV_TIMEOUT, bob_rx.recv()).await.unwrap().unwrap();
    let acked = timeout(RECV_TIMEOUT, alice_rx.recv()).await.unwrap().unwrap();
    match (pushed, acked) {
        (ServerEvent::PrivateMessage(to_bob), ServerEvent::PrivateMessageSent(to_alice)) => {
            assert_eq!(to_bob, to_alice);
            assert_eq!(to_bob.sender.username, "alice");
        }
        other => panic!("Unexpected events {:?}", other),
    }

    alice_session.close();
    bob_session.close();
}

#[tokio::test]
async fn test_newest_connection_receives_push() {
    let app = spawn_app().await;
    let alice = register_user(&app, "alice").await;
    let bob = register_user(&app, "bob").await;

    let (alice_session, _alice_rx) = SocketSession::open(app.state.clone(), Some(alice.identity()));
    let (old_bob, mut old_rx) = SocketSession::open(app.state.clone(), Some(bob.identity()));
    let (new_bob, mut new_rx) = SocketSession::open(app.state.clone(), Some(bob.identity()));

    alice_session.handle_frame(&private_frame(bob.id, "which one?")).await;

    let pushed = timeout(RECV_TIMEOUT, new_rx.recv()).await.unwrap().unwrap();
    assert_matches!(pushed, ServerEvent::PrivateMessage(message) if message.content == "which one?");
    assert!(old_rx.try_recv().is_err());

    // The superseded connection closing does not take bob offline.
    old_bob.close();
    assert!(app.state.presence.lookup(bob.id).is_some());

    new_bob.close();
    assert!(app.state.presence.lookup(bob.id).is_none());
    alice_session.close();
}

#[tokio::test]
async fn test_anonymous_connection_chats_but_cannot_message() {
    let app = spawn_app().await;
    let bob = register_user(&app, "bob").await;
    let mut events = app.state.realtime_broadcast.subscribe();

    let (session, mut rx) = SocketSession::open(app.state.clone(), None);

    session.handle_frame(&private_frame(bob.id, "psst")).await;
    assert!(rx.try_recv().is_err());

    session
        .handle_frame(r#"{"event":"chat message","data":{"content":"hello from nowhere"}}"#)
        .await;
    match timeout(RECV_TIMEOUT, events.recv()).await.unwrap().unwrap() {
        ServerEvent::ChatMessage(message) => {
            assert_eq!(message.user, "anon");
            assert!(message.id.is_none());
        }
        other => panic!("Expected chat message, got {:?}", other),
    }

    session.close();
}

#[tokio::test]
async fn test_blank_private_message_is_dropped() {
    let app = spawn_app().await;
    let alice = register_user(&app, "alice").await;
    let bob = register_user(&app, "bob").await;

    let (session, mut rx) = SocketSession::open(app.state.clone(), Some(alice.identity()));
    session.handle_frame(&private_frame(bob.id, "   ")).await;

    assert!(rx.try_recv().is_err());
    let view = list_conversation(&app.state.db_pool, alice.id, bob.id).await.unwrap();
    assert!(view.messages.is_empty());

    session.close();
}

#[tokio::test]
async fn test_health_counts_socket_sessions() {
    let app = spawn_app().await;
    let alice = register_user(&app, "alice").await;

    let (session, _rx) = SocketSession::open(app.state.clone(), Some(alice.identity()));
    let body: serde_json::Value = app.server.get("/health").await.json();
    assert_eq!(body["online"], 1);

    session.close();
    let body: serde_json::Value = app.server.get("/health").await.json();
    assert_eq!(body["online"], 0);
}
