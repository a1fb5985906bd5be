//! Posts API integration tests

use assert_matches::assert_matches;
use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use uuid::Uuid;

use plaza::shared::{Post, ServerEvent};

use crate::common::{assert_error, register_user, spawn_app, TestApp, TestUser};

async fn create_post(app: &TestApp, user: &TestUser, content: &str) -> Post {
    let response = app
        .server
        .post("/api/posts")
        .authorization_bearer(&user.token)
        .json(&serde_json::json!({ "content": content }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    response.json()
}

#[tokio::test]
async fn test_create_post_broadcasts() {
    let app = spawn_app().await;
    let alice = register_user(&app, "alice").await;
    let mut events = app.state.realtime_broadcast.subscribe();

    let post = create_post(&app, &alice, "  first post ").await;
    assert_eq!(post.content, "first post");
    assert_eq!(post.author.id, alice.id);
    assert!(post.reactions.is_empty());
    assert!(post.comments.is_empty());

    assert_eq!(events.recv().await.unwrap(), ServerEvent::PostCreated(post));
}

#[tokio::test]
async fn test_create_post_validation() {
    let app = spawn_app().await;
    let alice = register_user(&app, "alice").await;

    let anonymous = app
        .server
        .post("/api/posts")
        .json(&serde_json::json!({ "content": "hi" }))
        .await;
    assert_error(&anonymous, StatusCode::UNAUTHORIZED, "No token");

    let empty = app
        .server
        .post("/api/posts")
        .authorization_bearer(&alice.token)
        .json(&serde_json::json!({ "content": "   " }))
        .await;
    assert_error(&empty, StatusCode::BAD_REQUEST, "Content required");
}

#[tokio::test]
async fn test_feed_is_newest_first_with_comments() {
    let app = spawn_app().await;
    let alice = register_user(&app, "alice").await;
    let bob = register_user(&app, "bob").await;

    let older = create_post(&app, &alice, "older").await;
    let newer = create_post(&app, &bob, "newer").await;

    let comment = app
        .server
        .post(&format!("/api/posts/{}/comments", older.id))
        .authorization_bearer(&bob.token)
        .json(&serde_json::json!({ "content": "nice" }))
        .await;
    assert_eq!(comment.status_code(), StatusCode::OK);

    let feed: Vec<Post> = app.server.get("/api/posts").await.json();
    let ids: Vec<Uuid> = feed.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![newer.id, older.id]);
    assert_eq!(feed[1].comments.len(), 1);
    assert_eq!(feed[1].comments[0].author.username, "bob");
}

#[tokio::test]
async fn test_comment_on_unknown_post() {
    let app = spawn_app().await;
    let alice = register_user(&app, "alice").await;

    let response = app
        .server
        .post(&format!("/api/posts/{}/comments", Uuid::new_v4()))
        .authorization_bearer(&alice.token)
        .json(&serde_json::json!({ "content": "hello?" }))
        .await;
    assert_error(&response, StatusCode::NOT_FOUND, "Post not found");
}

#[tokio::test]
async fn test_reaction_toggle() {
    let app = spawn_app().await;
    let alice = register_user(&app, "alice").await;
    let bob = register_user(&app, "bob").await;
    let post = create_post(&app, &alice, "react to me").await;
    let mut events = app.state.realtime_broadcast.subscribe();

    let path = format!("/api/posts/{}/react", post.id);

    let on: serde_json::Value = app.server.post(&path).authorization_bearer(&bob.token).await.json();
    assert_eq!(on["reacted"], true);
    assert_eq!(on["reactionsCount"], 1);
    assert_eq!(on["postId"], post.id.to_string());
    assert_matches!(events.recv().await.unwrap(), ServerEvent::PostReacted(summary) if summary.post_id == post.id);

    let off: serde_json::Value = app.server.post(&path).authorization_bearer(&bob.token).await.json();
    assert_eq!(off["reacted"], false);
    assert_eq!(off["reactionsCount"], 0);

    let missing = app
        .server
        .post(&format!("/api/posts/{}/react", Uuid::new_v4()))
        .authorization_bearer(&bob.token)
        .await;
    assert_error(&missing, StatusCode::NOT_FOUND, "Post not found");
}

#[tokio::test]
async fn test_only_author_can_edit_or_delete() {
    let app = spawn_app().await;
    let alice = register_user(&app, "alice").await;
    let bob = register_user(&app, "bob").await;
    let post = create_post(&app, &alice, "mine").await;
    let path = format!("/api/posts/{}", post.id);

    let edit = app
        .server
        .put(&path)
        .authorization_bearer(&bob.token)
        .json(&serde_json::json!({ "content": "yours now" }))
        .await;
    assert_error(&edit, StatusCode::FORBIDDEN, "Unauthorized");

    let delete = app.server.delete(&path).authorization_bearer(&bob.token).await;
    assert_error(&delete, StatusCode::FORBIDDEN, "Unauthorized");

    let missing = app
        .server
        .delete(&format!("/api/posts/{}", Uuid::new_v4()))
        .authorization_bearer(&alice.token)
        .await;
    assert_error(&missing, StatusCode::NOT_FOUND, "Post not found");
}

#[tokio::test]
async fn test_update_post() {
    let app = spawn_app().await;
    let alice = register_user(&app, "alice").await;
    let post = create_post(&app, &alice, "draft").await;
    let path = format!("/api/posts/{}", post.id);
    let mut events = app.state.realtime_broadcast.subscribe();

    let with_image: Post = app
        .server
        .put(&path)
        .authorization_bearer(&alice.token)
        .json(&serde_json::json!({ "content": "final", "imageUrl": "http://x/uploads/a.png" }))
        .await
        .json();
    assert_eq!(with_image.content, "final");
    assert_eq!(with_image.image_url.as_deref(), Some("http://x/uploads/a.png"));
    assert!(with_image.updated_at >= post.updated_at);
    assert_eq!(events.recv().await.unwrap(), ServerEvent::PostUpdated(with_image));

    // Empty content keeps the old text; explicit null clears the image.
    let cleared: Post = app
        .server
        .put(&path)
        .authorization_bearer(&alice.token)
        .json(&serde_json::json!({ "content": "", "imageUrl": null }))
        .await
        .json();
    assert_eq!(cleared.content, "final");
    assert_eq!(cleared.image_url, None);
}

#[tokio::test]
async fn test_delete_post() {
    let app = spawn_app().await;
    let alice = register_user(&app, "alice").await;
    let post = create_post(&app, &alice, "short lived").await;
    let mut events = app.state.realtime_broadcast.subscribe();

    let response = app
        .server
        .delete(&format!("/api/posts/{}", post.id))
        .authorization_bearer(&alice.token)
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body["message"], "Post deleted");

    match events.recv().await.unwrap() {
        ServerEvent::PostDeleted(deleted) => assert_eq!(deleted.post_id, post.id),
        other => panic!("Expected post deleted, got {:?}", other),
    }

    let feed: Vec<Post> = app.server.get("/api/posts").await.json();
    assert!(feed.is_empty());
}
