/**
 * API Route Table
 *
 * ## Authentication
 * - `POST /api/auth/register` - User registration
 * - `POST /api/auth/login` - User login
 * - `GET  /api/auth/profile` - Own profile (auth)
 * - `PUT  /api/auth/profile` - Update own profile (auth)
 * - `GET  /api/auth/profile/{username}` - Public profile
 * - `GET  /api/auth/users/list/all` - Other users (auth)
 *
 * ## Posts
 * - `GET/POST /api/posts`
 * - `PUT/DELETE /api/posts/{post_id}` (owner only)
 * - `POST /api/posts/{post_id}/comments`
 * - `POST /api/posts/{post_id}/react`
 *
 * ## Chat
 * - `GET /api/messages` - Paginated public chat history
 *
 * ## Private messages (auth)
 * - `GET   /api/private-messages/conversations/list`
 * - `GET   /api/private-messages/{user_id}`
 * - `POST  /api/private-messages/{user_id}`
 * - `PATCH /api/private-messages/{user_id}/read`
 *
 * ## Upload (auth)
 * - `POST /api/upload`
 *
 * Authentication is enforced by the `AuthUser` extractor in each handler.
 */

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, patch, post, put},
    Router,
};

use crate::backend::auth::{get_profile, get_profile_by_username, list_users, login, register, update_profile};
use crate::backend::chat::get_chat_history;
use crate::backend::messaging::{get_conversation, list_conversations, mark_conversation_read, send_private_message};
use crate::backend::posts::{add_comment, create_post, delete_post, list_posts, toggle_reaction, update_post};
use crate::backend::server::state::AppState;
use crate::backend::upload::handlers::{upload_image, UPLOAD_BODY_LIMIT};

/// Add every `/api` route to the router
pub fn configure_api_routes(router: Router<AppState>) -> Router<AppState> {
    router
        // Authentication endpoints
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        .route("/api/auth/profile", get(get_profile).put(update_profile))
        .route("/api/auth/profile/{username}", get(get_profile_by_username))
        .route("/api/auth/users/list/all", get(list_users))
        // Posts
        .route("/api/posts", get(list_posts).post(create_post))
        .route("/api/posts/{post_id}", put(update_post).delete(delete_post))
        .route("/api/posts/{post_id}/comments", post(add_comment))
        .route("/api/posts/{post_id}/react", post(toggle_reaction))
        // Public chat history
        .route("/api/messages", get(get_chat_history))
        // Private messages; the static segment wins over `{user_id}`
        .route("/api/private-messages/conversations/list", get(list_conversations))
        .route(
            "/api/private-messages/{user_id}",
            get(get_conversation).post(send_private_message),
        )
        .route("/api/private-messages/{user_id}/read", patch(mark_conversation_read))
        // Upload
        .route(
            "/api/upload",
            post(upload_image).layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
}
