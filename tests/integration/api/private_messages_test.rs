//! Private messaging REST integration tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use uuid::Uuid;

use plaza::shared::{ConversationSummary, PrivateMessage};

use crate::common::{assert_error, register_user, spawn_app, TestApp, TestUser};

async fn send(app: &TestApp, from: &TestUser, to: &TestUser, content: &str) -> PrivateMessage {
    let response = app
        .server
        .post(&format!("/api/private-messages/{}", to.id))
        .authorization_bearer(&from.token)
        .json(&serde_json::json!({ "content": content }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    response.json()
}

async fn conversation(app: &TestApp, me: &TestUser, other: &TestUser) -> Vec<PrivateMessage> {
    let response = app
        .server
        .get(&format!("/api/private-messages/{}", other.id))
        .authorization_bearer(&me.token)
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    response.json()
}

#[tokio::test]
async fn test_send_stores_unread_message() {
    let app = spawn_app().await;
    let alice = register_user(&app, "alice").await;
    let bob = register_user(&app, "bob").await;

    let message = send(&app, &alice, &bob, "  hi  ").await;
    assert_eq!(message.sender.id, alice.id);
    assert_eq!(message.recipient.id, bob.id);
    assert_eq!(message.content, "hi");
    assert!(!message.read);
}

#[tokio::test]
async fn test_send_validation() {
    let app = spawn_app().await;
    let alice = register_user(&app, "alice").await;
    let bob = register_user(&app, "bob").await;

    let blank = app
        .server
        .post(&format!("/api/private-messages/{}", bob.id))
        .authorization_bearer(&alice.token)
        .json(&serde_json::json!({ "content": "   " }))
        .await;
    assert_error(&blank, StatusCode::BAD_REQUEST, "Content required");

    let unknown = app
        .server
        .post(&format!("/api/private-messages/{}", Uuid::new_v4()))
        .authorization_bearer(&alice.token)
        .json(&serde_json::json!({ "content": "hello?" }))
        .await;
    assert_error(&unknown, StatusCode::NOT_FOUND, "User not found");

    let anonymous = app
        .server
        .post(&format!("/api/private-messages/{}", bob.id))
        .json(&serde_json::json!({ "content": "hi" }))
        .await;
    assert_error(&anonymous, StatusCode::UNAUTHORIZED, "No token");
}

#[tokio::test]
async fn test_conversation_is_symmetric_and_marks_read() {
    let app = spawn_app().await;
    let alice = register_user(&app, "alice").await;
    let bob = register_user(&app, "bob").await;

    let first = send(&app, &alice, &bob, "hi bob").await;
    let second = send(&app, &bob, &alice, "hi alice").await;
    let third = send(&app, &alice, &bob, "how are you").await;

    let from_alice = conversation(&app, &alice, &bob).await;
    let ids: Vec<Uuid> = from_alice.iter().map(|m| m.id).collect();
    assert_eq!(ids, vec![first.id, second.id, third.id]);

    // Flags are reported as they were before the read.
    assert!(from_alice.iter().all(|m| !m.read));

    let from_bob = conversation(&app, &bob, &alice).await;
    let bob_ids: Vec<Uuid> = from_bob.iter().map(|m| m.id).collect();
    assert_eq!(bob_ids, ids);
    let second_seen_by_bob = from_bob.iter().find(|m| m.id == second.id).unwrap();
    assert!(second_seen_by_bob.read, "alice's read marked bob's message");
    assert!(from_bob.iter().filter(|m| m.sender.id == alice.id).all(|m| !m.read));

    let again = conversation(&app, &alice, &bob).await;
    assert!(again.iter().all(|m| m.read));

    let contents: Vec<&str> = from_bob.iter().map(|m| m.content.as_str()).collect();
    assert_eq!(contents, vec!["hi bob", "hi alice", "how are you"]);
}

#[tokio::test]
async fn test_mark_read_endpoint() {
    let app = spawn_app().await;
    let alice = register_user(&app, "alice").await;
    let bob = register_user(&app, "bob").await;

    send(&app, &alice, &bob, "one").await;
    send(&app, &alice, &bob, "two").await;

    let path = format!("/api/private-messages/{}/read", alice.id);
    let first: serde_json::Value = app.server.patch(&path).authorization_bearer(&bob.token).await.json();
    assert_eq!(first["message"], "Messages marked as read");
    assert_eq!(first["updated"], 2);

    let second: serde_json::Value = app.server.patch(&path).authorization_bearer(&bob.token).await.json();
    assert_eq!(second["updated"], 0);
}

#[tokio::test]
async fn test_conversation_list() {
    let app = spawn_app().await;
    let alice = register_user(&app, "alice").await;
    let bob = register_user(&app, "bob").await;
    let carol = register_user(&app, "carol").await;

    send(&app, &alice, &bob, "to bob").await;
    send(&app, &carol, &alice, "from carol").await;
    let latest = send(&app, &bob, &alice, "bob again").await;

    let response = app
        .server
        .get("/api/private-messages/conversations/list")
        .authorization_bearer(&alice.token)
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let list: Vec<ConversationSummary> = response.json();
    let counterparts: Vec<Uuid> = list.iter().map(|c| c.user_id).collect();
    assert_eq!(counterparts, vec![bob.id, carol.id]);
    assert_eq!(list[0].last_message.id, latest.id);
    assert_eq!(list[0].user.username, "bob");
}
