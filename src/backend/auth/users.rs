/**
 * User Model and Database Operations
 */

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::shared::user::{UserProfile, UserSummary};

/// Maximum number of users returned by the directory listing
pub const USER_LIST_LIMIT: i64 = 100;

/// User row. Never serialized directly: it carries the password hash.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    /// Hashed password (bcrypt)
    pub password_hash: String,
    pub email: String,
    pub bio: String,
    pub profile_image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn summary(&self) -> UserSummary {
        UserSummary {
            id: self.id,
            username: self.username.clone(),
            profile_image: self.profile_image.clone(),
        }
    }

    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            username: self.username.clone(),
            email: self.email.clone(),
            bio: self.bio.clone(),
            profile_image: self.profile_image.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Whether the error is a UNIQUE constraint violation
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .map(|db_err| db_err.is_unique_violation())
        .unwrap_or(false)
}

/// Create a new user
pub async fn create_user(
    pool: &SqlitePool,
    username: &str,
    password_hash: &str,
) -> Result<User, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    let user = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (id, username, password_hash, email, bio, profile_image, created_at, updated_at)
        VALUES (?, ?, ?, '', '', NULL, ?, ?)
        RETURNING id, username, password_hash, email, bio, profile_image, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(username)
    .bind(password_hash)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(user)
}

/// Get user by username
pub async fn get_user_by_username(
    pool: &SqlitePool,
    username: &str,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        SELECT id, username, password_hash, email, bio, profile_image, created_at, updated_at
        FROM users
        WHERE username = ?
        "#,
    )
    .bind(username)
    .fetch_optional(pool)
    .await
}

/// Get user by ID
pub async fn get_user_by_id(pool: &SqlitePool, id: Uuid) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        SELECT id, username, password_hash, email, bio, profile_image, created_at, updated_at
        FROM users
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Replace the editable profile fields
///
/// Returns `None` if the user does not exist.
pub async fn update_profile(
    pool: &SqlitePool,
    id: Uuid,
    bio: &str,
    email: &str,
    profile_image: Option<&str>,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        UPDATE users
        SET bio = ?, email = ?, profile_image = ?, updated_at = ?
        WHERE id = ?
        RETURNING id, username, password_hash, email, bio, profile_image, created_at, updated_at
        "#,
    )
    .bind(bio)
    .bind(email)
    .bind(profile_image)
    .bind(Utc::now())
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// List users other than `exclude`, oldest accounts first
pub async fn list_users_except(
    pool: &SqlitePool,
    exclude: Uuid,
    limit: i64,
) -> Result<Vec<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        SELECT id, username, password_hash, email, bio, profile_image, created_at, updated_at
        FROM users
        WHERE id != ?
        ORDER BY created_at ASC, username ASC
        LIMIT ?
        "#,
    )
    .bind(exclude)
    .bind(limit)
    .fetch_all(pool)
    .await
}

/// Hash a password with the given bcrypt cost
pub fn hash_password(password: &str, cost: u32) -> Result<String, bcrypt::BcryptError> {
    bcrypt::hash(password, cost)
}

pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, bcrypt::BcryptError> {
    bcrypt::verify(password, password_hash)
}
