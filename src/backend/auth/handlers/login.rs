/**
 * Login Handler
 *
 * POST /api/auth/login
 *
 * Unknown usernames and wrong passwords both answer 400 "Invalid
 * credentials", so the response does not reveal which usernames exist.
 */

use std::sync::Arc;

use axum::{extract::State, response::Json};
use sqlx::SqlitePool;

use crate::backend::auth::handlers::types::{AuthResponse, AuthUserResponse, LoginRequest};
use crate::backend::auth::sessions::create_token;
use crate::backend::auth::users::{get_user_by_username, verify_password};
use crate::backend::error::BackendError;
use crate::backend::server::config::ServerConfig;

const INVALID_CREDENTIALS: &str = "Invalid credentials";

pub async fn login(
    State(pool): State<SqlitePool>,
    State(config): State<Arc<ServerConfig>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, BackendError> {
    let username = request.username.trim();
    tracing::info!("[Auth] Login request for: {}", username);

    let user = get_user_by_username(&pool, username).await?.ok_or_else(|| {
        tracing::warn!("[Auth] User not found: {}", username);
        BackendError::validation(INVALID_CREDENTIALS)
    })?;

    if !verify_password(&request.password, &user.password_hash)? {
        tracing::warn!("[Auth] Invalid password for user: {}", username);
        return Err(BackendError::validation(INVALID_CREDENTIALS));
    }

    let token = create_token(user.id, &user.username, &config.jwt_secret)?;

    tracing::info!("[Auth] User logged in: {} ({})", user.username, user.id);

    Ok(Json(AuthResponse {
        token,
        user: AuthUserResponse::from(&user),
    }))
}
