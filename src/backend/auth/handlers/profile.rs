/**
 * Profile Handlers
 *
 * - GET /api/auth/profile (auth)
 * - PUT /api/auth/profile (auth)
 * - GET /api/auth/profile/{username}
 * - GET /api/auth/users/list/all (auth)
 */

use axum::{
    extract::{Path, State},
    response::Json,
};
use sqlx::SqlitePool;

use crate::backend::auth::handlers::types::UpdateProfileRequest;
use crate::backend::auth::users::{self, USER_LIST_LIMIT};
use crate::backend::error::BackendError;
use crate::backend::middleware::auth::AuthUser;
use crate::shared::user::UserProfile;

pub async fn get_profile(
    State(pool): State<SqlitePool>,
    AuthUser(auth_user): AuthUser,
) -> Result<Json<UserProfile>, BackendError> {
    let user = users::get_user_by_id(&pool, auth_user.user_id)
        .await?
        .ok_or_else(|| BackendError::not_found("User not found"))?;

    Ok(Json(user.profile()))
}

/// Missing `bio`/`email` become empty, a missing `profileImage` clears it.
pub async fn update_profile(
    State(pool): State<SqlitePool>,
    AuthUser(auth_user): AuthUser,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<Json<UserProfile>, BackendError> {
    let bio = request.bio.unwrap_or_default();
    let email = request.email.unwrap_or_default();
    let profile_image = request.profile_image.filter(|url| !url.is_empty());

    let user = users::update_profile(&pool, auth_user.user_id, &bio, &email, profile_image.as_deref())
        .await?
        .ok_or_else(|| BackendError::not_found("User not found"))?;

    tracing::info!("[Auth] Profile updated for {}", user.username);

    Ok(Json(user.profile()))
}

pub async fn get_profile_by_username(
    State(pool): State<SqlitePool>,
    Path(username): Path<String>,
) -> Result<Json<UserProfile>, BackendError> {
    let user = users::get_user_by_username(&pool, &username)
        .await?
        .ok_or_else(|| BackendError::not_found("User not found"))?;

    Ok(Json(user.profile()))
}

/// Everyone except the caller, capped at 100
pub async fn list_users(
    State(pool): State<SqlitePool>,
    AuthUser(auth_user): AuthUser,
) -> Result<Json<Vec<UserProfile>>, BackendError> {
    let users = users::list_users_except(&pool, auth_user.user_id, USER_LIST_LIMIT).await?;

    Ok(Json(users.iter().map(|user| user.profile()).collect()))
}
