/**
 * Session Management and JWT Tokens
 *
 * Tokens are HS256-signed with the configured secret and carry the user ID
 * and username, so verifying one never needs a database round trip.
 */

use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::backend::middleware::auth::AuthenticatedUser;

/// Token lifetime: 30 days
pub const TOKEN_TTL_SECS: u64 = 30 * 24 * 60 * 60;

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// User ID
    pub sub: String,
    pub username: String,
    /// Expiration time (Unix timestamp)
    pub exp: u64,
    /// Issued at time (Unix timestamp)
    pub iat: u64,
}

fn now_secs() -> u64 {
    Utc::now().timestamp().max(0) as u64
}

/// Create a JWT token for a user
pub fn create_token(
    user_id: Uuid,
    username: &str,
    secret: &str,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = now_secs();
    let claims = Claims {
        sub: user_id.to_string(),
        username: username.to_string(),
        exp: now + TOKEN_TTL_SECS,
        iat: now,
    };

    let key = EncodingKey::from_secret(secret.as_bytes());
    encode(&Header::default(), &claims, &key)
}

/// Verify and decode a JWT token
pub fn verify_token(token: &str, secret: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let key = DecodingKey::from_secret(secret.as_bytes());
    let token_data = decode::<Claims>(token, &key, &Validation::default())?;
    Ok(token_data.claims)
}

/// Resolve the identity carried by a token
pub fn identity_from_token(token: &str, secret: &str) -> Result<AuthenticatedUser, String> {
    let claims = verify_token(token, secret).map_err(|e| format!("Token verification failed: {}", e))?;
    let user_id =
        Uuid::parse_str(&claims.sub).map_err(|e| format!("Invalid user ID in token: {}", e))?;

    Ok(AuthenticatedUser {
        user_id,
        username: claims.username,
    })
}
