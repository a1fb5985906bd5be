//! Database migration tests
//!
//! Runs migrations against a file database to check the schema outside
//! the in-memory path used everywhere else.

use plaza::backend::auth::users::create_user;
use plaza::backend::server::config::load_database;
use uuid::Uuid;

#[tokio::test]
async fn test_migrations_run_on_file_database() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}?mode=rwc", dir.path().join("plaza.db").display());

    let pool = load_database(&url).await.expect("Migrations should run successfully");

    for table in ["users", "chat_messages", "private_messages", "posts", "post_reactions", "comments"] {
        let result = sqlx::query(&format!("SELECT 1 FROM {} LIMIT 1", table))
            .execute(&pool)
            .await;
        assert!(result.is_ok(), "{} table should exist", table);
    }

    // Reopening applies nothing new.
    pool.close().await;
    load_database(&url).await.expect("Migrations should be idempotent");
}

#[tokio::test]
async fn test_foreign_keys_are_enforced() {
    let pool = load_database("sqlite::memory:").await.unwrap();
    let alice = create_user(&pool, "alice", "hash").await.unwrap();

    let orphan = sqlx::query(
        "INSERT INTO private_messages (id, sender_id, recipient_id, content, is_read, created_at) VALUES (?, ?, ?, 'x', 0, '2025-01-01T00:00:00Z')",
    )
    .bind(Uuid::new_v4())
    .bind(alice.id)
    .bind(Uuid::new_v4())
    .execute(&pool)
    .await;

    assert!(orphan.is_err(), "Unknown recipient must be rejected");
}
