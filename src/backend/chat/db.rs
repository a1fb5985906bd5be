/**
 * Database Operations for Chat Messages
 *
 * Messages are stored with an optional author. When the author is gone the
 * message is reported as written by "anon".
 */

use chrono::Utc;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use uuid::Uuid;

use crate::shared::messaging::{ChatMessage, ANONYMOUS_DISPLAY_NAME};

fn map_chat_message(row: &SqliteRow) -> Result<ChatMessage, sqlx::Error> {
    let username: Option<String> = row.try_get("username")?;
    Ok(ChatMessage {
        id: Some(row.try_get("id")?),
        user: username.unwrap_or_else(|| ANONYMOUS_DISPLAY_NAME.to_string()),
        content: row.try_get("content")?,
        created_at: row.try_get("created_at")?,
    })
}

/// Save a message and return it with the author's username
pub async fn save_message(pool: &SqlitePool, user_id: Uuid, content: &str) -> Result<ChatMessage, sqlx::Error> {
    let id = Uuid::new_v4();

    sqlx::query(
        r#"
        INSERT INTO chat_messages (id, user_id, content, created_at)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(id)
    .bind(user_id)
    .bind(content)
    .bind(Utc::now())
    .execute(pool)
    .await?;

    let row = sqlx::query(
        r#"
        SELECT m.id, m.content, m.created_at, u.username
        FROM chat_messages m
        LEFT JOIN users u ON u.id = m.user_id
        WHERE m.id = ?
        "#,
    )
    .bind(id)
    .fetch_one(pool)
    .await?;

    map_chat_message(&row)
}

/// Load one page of history counting back from the newest message
///
/// The returned page is ordered oldest to newest.
pub async fn load_page(pool: &SqlitePool, limit: i64, offset: i64) -> Result<Vec<ChatMessage>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT m.id, m.content, m.created_at, u.username
        FROM chat_messages m
        LEFT JOIN users u ON u.id = m.user_id
        ORDER BY m.seq DESC
        LIMIT ? OFFSET ?
        "#,
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    let mut messages = rows.iter().map(map_chat_message).collect::<Result<Vec<_>, _>>()?;
    messages.reverse();
    Ok(messages)
}

pub async fn count_messages(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM chat_messages")
        .fetch_one(pool)
        .await
}
