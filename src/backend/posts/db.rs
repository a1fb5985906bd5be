//! Database operations for posts
//!
//! A `Post` is assembled from three queries: the post row joined with its
//! author, the reacting user ids (in reaction order) and the comments joined
//! with their authors (oldest first).

use chrono::Utc;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use uuid::Uuid;

use crate::shared::post::{Comment, Post, ReactionSummary};
use crate::shared::user::UserSummary;

const SELECT_POSTS: &str = r#"
    SELECT p.id, p.content, p.image_url, p.created_at, p.updated_at,
           u.id AS author_id, u.username AS author_username, u.profile_image AS author_profile_image
    FROM posts p
    JOIN users u ON u.id = p.author_id
"#;

fn map_post(row: &SqliteRow) -> Result<Post, sqlx::Error> {
    Ok(Post {
        id: row.try_get("id")?,
        author: UserSummary {
            id: row.try_get("author_id")?,
            username: row.try_get("author_username")?,
            profile_image: row.try_get("author_profile_image")?,
        },
        content: row.try_get("content")?,
        image_url: row.try_get("image_url")?,
        reactions: Vec::new(),
        comments: Vec::new(),
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

fn map_comment(row: &SqliteRow) -> Result<Comment, sqlx::Error> {
    Ok(Comment {
        id: row.try_get("id")?,
        author: UserSummary {
            id: row.try_get("author_id")?,
            username: row.try_get("author_username")?,
            profile_image: row.try_get("author_profile_image")?,
        },
        content: row.try_get("content")?,
        created_at: row.try_get("created_at")?,
    })
}

async fn attach_details(pool: &SqlitePool, mut post: Post) -> Result<Post, sqlx::Error> {
    post.reactions = sqlx::query_scalar("SELECT user_id FROM post_reactions WHERE post_id = ? ORDER BY rowid ASC")
        .bind(post.id)
        .fetch_all(pool)
        .await?;

    let rows = sqlx::query(
        r#"
        SELECT c.id, c.content, c.created_at,
               u.id AS author_id, u.username AS author_username, u.profile_image AS author_profile_image
        FROM comments c
        JOIN users u ON u.id = c.author_id
        WHERE c.post_id = ?
        ORDER BY c.seq ASC
        "#,
    )
    .bind(post.id)
    .fetch_all(pool)
    .await?;
    post.comments = rows.iter().map(map_comment).collect::<Result<_, _>>()?;

    Ok(post)
}

/// One post with reactions and comments
pub async fn load_post(pool: &SqlitePool, post_id: Uuid) -> Result<Option<Post>, sqlx::Error> {
    let sql = format!("{} WHERE p.id = ?", SELECT_POSTS);
    let row = sqlx::query(&sql).bind(post_id).fetch_optional(pool).await?;

    match row {
        Some(row) => Ok(Some(attach_details(pool, map_post(&row)?).await?)),
        None => Ok(None),
    }
}

/// Every post, newest first
pub async fn list_posts(pool: &SqlitePool) -> Result<Vec<Post>, sqlx::Error> {
    let sql = format!("{} ORDER BY p.seq DESC", SELECT_POSTS);
    let rows = sqlx::query(&sql).fetch_all(pool).await?;

    let mut posts = Vec::with_capacity(rows.len());
    for row in &rows {
        posts.push(attach_details(pool, map_post(row)?).await?);
    }
    Ok(posts)
}

pub async fn create_post(
    pool: &SqlitePool,
    author_id: Uuid,
    content: &str,
    image_url: Option<&str>,
) -> Result<Post, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    sqlx::query(
        r#"
        INSERT INTO posts (id, author_id, content, image_url, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(id)
    .bind(author_id)
    .bind(content)
    .bind(image_url)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;

    load_post(pool, id).await?.ok_or(sqlx::Error::RowNotFound)
}

/// Author of a post, `None` if the post does not exist
pub async fn post_author(pool: &SqlitePool, post_id: Uuid) -> Result<Option<Uuid>, sqlx::Error> {
    sqlx::query_scalar("SELECT author_id FROM posts WHERE id = ?")
        .bind(post_id)
        .fetch_optional(pool)
        .await
}

/// Apply a partial update and bump `updated_at`
///
/// `content` replaces only when given; `image_url` replaces when `Some`,
/// including `Some(None)` which clears it.
pub async fn update_post(
    pool: &SqlitePool,
    post_id: Uuid,
    content: Option<&str>,
    image_url: Option<Option<&str>>,
) -> Result<Option<Post>, sqlx::Error> {
    let mut tx = pool.begin().await?;

    if let Some(content) = content {
        sqlx::query("UPDATE posts SET content = ? WHERE id = ?")
            .bind(content)
            .bind(post_id)
            .execute(&mut *tx)
            .await?;
    }

    if let Some(image_url) = image_url {
        sqlx::query("UPDATE posts SET image_url = ? WHERE id = ?")
            .bind(image_url)
            .bind(post_id)
            .execute(&mut *tx)
            .await?;
    }

    sqlx::query("UPDATE posts SET updated_at = ? WHERE id = ?")
        .bind(Utc::now())
        .bind(post_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    load_post(pool, post_id).await
}

/// Delete a post with its comments and reactions
///
/// Returns whether a post was removed.
pub async fn delete_post(pool: &SqlitePool, post_id: Uuid) -> Result<bool, sqlx::Error> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM comments WHERE post_id = ?")
        .bind(post_id)
        .execute(&mut *tx)
        .await?;
    sqlx::query("DELETE FROM post_reactions WHERE post_id = ?")
        .bind(post_id)
        .execute(&mut *tx)
        .await?;
    let result = sqlx::query("DELETE FROM posts WHERE id = ?")
        .bind(post_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(result.rows_affected() > 0)
}

pub async fn create_comment(
    pool: &SqlitePool,
    post_id: Uuid,
    author_id: Uuid,
    content: &str,
) -> Result<Comment, sqlx::Error> {
    let id = Uuid::new_v4();

    sqlx::query(
        r#"
        INSERT INTO comments (id, post_id, author_id, content, created_at)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(id)
    .bind(post_id)
    .bind(author_id)
    .bind(content)
    .bind(Utc::now())
    .execute(pool)
    .await?;

    let row = sqlx::query(
        r#"
        SELECT c.id, c.content, c.created_at,
               u.id AS author_id, u.username AS author_username, u.profile_image AS author_profile_image
        FROM comments c
        JOIN users u ON u.id = c.author_id
        WHERE c.id = ?
        "#,
    )
    .bind(id)
    .fetch_one(pool)
    .await?;

    map_comment(&row)
}

/// Add the user's reaction, or remove it if already present
pub async fn toggle_reaction(pool: &SqlitePool, post_id: Uuid, user_id: Uuid) -> Result<ReactionSummary, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let removed = sqlx::query("DELETE FROM post_reactions WHERE post_id = ? AND user_id = ?")
        .bind(post_id)
        .bind(user_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    if removed == 0 {
        sqlx::query("INSERT INTO post_reactions (post_id, user_id) VALUES (?, ?)")
            .bind(post_id)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;
    }

    let reactions_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM post_reactions WHERE post_id = ?")
        .bind(post_id)
        .fetch_one(&mut *tx)
        .await?;

    tx.commit().await?;

    Ok(ReactionSummary {
        post_id,
        reactions_count,
        reacted: removed == 0,
    })
}
