/**
 * Registration Handler
 *
 * POST /api/auth/register
 *
 * 1. Validate that username and password are present
 * 2. Reject taken usernames
 * 3. Hash the password and create the user
 * 4. Return a token and the public user fields
 */

use std::sync::Arc;

use axum::{extract::State, response::Json};
use sqlx::SqlitePool;

use crate::backend::auth::handlers::types::{AuthResponse, AuthUserResponse, RegisterRequest};
use crate::backend::auth::sessions::create_token;
use crate::backend::auth::users::{create_user, get_user_by_username, hash_password, is_unique_violation};
use crate::backend::error::BackendError;
use crate::backend::server::config::ServerConfig;

pub async fn register(
    State(pool): State<SqlitePool>,
    State(config): State<Arc<ServerConfig>>,
    Json(request): Json<RegisterRequest>,
) -> Result<Json<AuthResponse>, BackendError> {
    let username = request.username.trim();
    if username.is_empty() || request.password.is_empty() {
        return Err(BackendError::validation("Missing fields"));
    }

    tracing::info!("[Auth] Registration request for: {}", username);

    if get_user_by_username(&pool, username).await?.is_some() {
        tracing::warn!("[Auth] Username already taken: {}", username);
        return Err(BackendError::validation("Username already taken"));
    }

    let password_hash = hash_password(&request.password, config.bcrypt_cost)?;

    // Two concurrent registrations can both pass the lookup above.
    let user = create_user(&pool, username, &password_hash).await.map_err(|e| {
        if is_unique_violation(&e) {
            BackendError::validation("Username already taken")
        } else {
            BackendError::from(e)
        }
    })?;

    let token = create_token(user.id, &user.username, &config.jwt_secret)?;

    tracing::info!("[Auth] User registered: {} ({})", user.username, user.id);

    Ok(Json(AuthResponse {
        token,
        user: AuthUserResponse::from(&user),
    }))
}
