//! Database operations for private messages
//!
//! Rows are always read joined with both participants so callers get
//! display-ready `PrivateMessage` values. `seq` gives the total order.

use chrono::Utc;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use uuid::Uuid;

use crate::shared::messaging::PrivateMessage;
use crate::shared::user::UserSummary;

fn select_private_messages(filter: &str) -> String {
    format!(
        r#"
        SELECT pm.seq, pm.id, pm.content, pm.image_url, pm.is_read, pm.created_at,
               s.id AS sender_id, s.username AS sender_username, s.profile_image AS sender_profile_image,
               r.id AS recipient_id, r.username AS recipient_username, r.profile_image AS recipient_profile_image
        FROM private_messages pm
        JOIN users s ON s.id = pm.sender_id
        JOIN users r ON r.id = pm.recipient_id
        {}
        "#,
        filter
    )
}

fn map_private_message(row: &SqliteRow) -> Result<PrivateMessage, sqlx::Error> {
    Ok(PrivateMessage {
        id: row.try_get("id")?,
        sender: UserSummary {
            id: row.try_get("sender_id")?,
            username: row.try_get("sender_username")?,
            profile_image: row.try_get("sender_profile_image")?,
        },
        recipient: UserSummary {
            id: row.try_get("recipient_id")?,
            username: row.try_get("recipient_username")?,
            profile_image: row.try_get("recipient_profile_image")?,
        },
        content: row.try_get("content")?,
        image_url: row.try_get("image_url")?,
        read: row.try_get("is_read")?,
        created_at: row.try_get("created_at")?,
    })
}

/// Store a new unread message and return it with both participants resolved
///
/// Fails with a foreign key error if either user does not exist.
pub async fn create_private_message(
    pool: &SqlitePool,
    sender_id: Uuid,
    recipient_id: Uuid,
    content: &str,
    image_url: Option<&str>,
) -> Result<PrivateMessage, sqlx::Error> {
    let id = Uuid::new_v4();

    sqlx::query(
        r#"
        INSERT INTO private_messages (id, sender_id, recipient_id, content, image_url, is_read, created_at)
        VALUES (?, ?, ?, ?, ?, 0, ?)
        "#,
    )
    .bind(id)
    .bind(sender_id)
    .bind(recipient_id)
    .bind(content)
    .bind(image_url)
    .bind(Utc::now())
    .execute(pool)
    .await?;

    get_private_message(pool, id).await?.ok_or(sqlx::Error::RowNotFound)
}

pub async fn get_private_message(pool: &SqlitePool, id: Uuid) -> Result<Option<PrivateMessage>, sqlx::Error> {
    let sql = select_private_messages("WHERE pm.id = ?");
    let row = sqlx::query(&sql).bind(id).fetch_optional(pool).await?;

    row.as_ref().map(map_private_message).transpose()
}

/// Messages between two users, oldest first
#[derive(Debug, Clone, Default)]
pub struct ConversationRows {
    pub messages: Vec<PrivateMessage>,
    /// `seq` of the newest message in `messages`
    pub last_seq: Option<i64>,
}

/// All messages exchanged between two users, oldest first
pub async fn get_messages_between(
    pool: &SqlitePool,
    user_a: Uuid,
    user_b: Uuid,
) -> Result<ConversationRows, sqlx::Error> {
    let sql = select_private_messages(
        r#"
        WHERE (pm.sender_id = ? AND pm.recipient_id = ?)
           OR (pm.sender_id = ? AND pm.recipient_id = ?)
        ORDER BY pm.seq ASC
        "#,
    );

    let rows = sqlx::query(&sql)
        .bind(user_a)
        .bind(user_b)
        .bind(user_b)
        .bind(user_a)
        .fetch_all(pool)
        .await?;

    let last_seq = rows.last().map(|row| row.try_get("seq")).transpose()?;
    let messages = rows.iter().map(map_private_message).collect::<Result<_, _>>()?;

    Ok(ConversationRows { messages, last_seq })
}

/// Mark every unread `sender → recipient` message read
///
/// Returns the number of messages that changed.
pub async fn mark_read(pool: &SqlitePool, sender_id: Uuid, recipient_id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE private_messages
        SET is_read = 1
        WHERE sender_id = ? AND recipient_id = ? AND is_read = 0
        "#,
    )
    .bind(sender_id)
    .bind(recipient_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}

/// Like [`mark_read`], but only for messages up to and including `through_seq`
///
/// Messages stored after a reader's snapshot stay unread.
pub async fn mark_read_through(
    pool: &SqlitePool,
    sender_id: Uuid,
    recipient_id: Uuid,
    through_seq: i64,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE private_messages
        SET is_read = 1
        WHERE sender_id = ? AND recipient_id = ? AND is_read = 0 AND seq <= ?
        "#,
    )
    .bind(sender_id)
    .bind(recipient_id)
    .bind(through_seq)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}

/// Most recent message with each counterpart of `user_id`, newest first
pub async fn get_latest_per_counterpart(
    pool: &SqlitePool,
    user_id: Uuid,
    limit: i64,
) -> Result<Vec<PrivateMessage>, sqlx::Error> {
    let sql = select_private_messages(
        r#"
        WHERE pm.seq IN (
            SELECT MAX(seq)
            FROM private_messages
            WHERE sender_id = ? OR recipient_id = ?
            GROUP BY CASE WHEN sender_id = ? THEN recipient_id ELSE sender_id END
        )
        ORDER BY pm.seq DESC
        LIMIT ?
        "#,
    );

    let rows = sqlx::query(&sql)
        .bind(user_id)
        .bind(user_id)
        .bind(user_id)
        .bind(limit)
        .fetch_all(pool)
        .await?;

    rows.iter().map(map_private_message).collect()
}
