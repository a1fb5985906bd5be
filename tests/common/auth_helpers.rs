//! Authentication test helpers

use axum::http::StatusCode;
use uuid::Uuid;

use plaza::backend::auth::handlers::types::AuthResponse;
use plaza::backend::middleware::auth::AuthenticatedUser;

use super::app::TestApp;

pub const TEST_PASSWORD: &str = "password123";

/// Registered user with a valid token
#[derive(Debug, Clone)]
pub struct TestUser {
    pub id: Uuid,
    pub username: String,
    pub token: String,
}

impl TestUser {
    pub fn identity(&self) -> AuthenticatedUser {
        AuthenticatedUser {
            user_id: self.id,
            username: self.username.clone(),
        }
    }
}

/// Register through the API
pub async fn register_user(app: &TestApp, username: &str) -> TestUser {
    let response = app
        .server
        .post("/api/auth/register")
        .json(&serde_json::json!({ "username": username, "password": TEST_PASSWORD }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK, "register {} failed", username);

    let body: AuthResponse = response.json();
    TestUser {
        id: body.user.id,
        username: body.user.username,
        token: body.token,
    }
}
