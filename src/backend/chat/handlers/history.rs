/**
 * Chat History Handler
 *
 * GET /api/messages?limit=&page=
 *
 * Page 1 holds the newest `limit` messages. Unparseable parameters fall back
 * to the defaults.
 */

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use sqlx::SqlitePool;

use crate::backend::chat::db;
use crate::backend::error::BackendError;
use crate::shared::messaging::ChatHistoryPage;

pub const DEFAULT_PAGE_SIZE: i64 = 50;
pub const MAX_PAGE_SIZE: i64 = 200;

#[derive(Debug, Default, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<String>,
    pub page: Option<String>,
}

impl HistoryQuery {
    /// `(limit, page)` after defaults and clamping
    pub fn resolve(&self) -> (i64, i64) {
        let parse = |raw: &Option<String>| raw.as_deref().and_then(|v| v.trim().parse::<i64>().ok());

        let limit = parse(&self.limit)
            .filter(|limit| *limit != 0)
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE);
        let page = parse(&self.page).unwrap_or(1).max(1);

        (limit, page)
    }
}

pub async fn get_chat_history(
    State(pool): State<SqlitePool>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<ChatHistoryPage>, BackendError> {
    let (limit, page) = query.resolve();
    let offset = (page - 1).saturating_mul(limit);

    let messages = db::load_page(&pool, limit, offset).await?;
    let total = db::count_messages(&pool).await?;

    Ok(Json(ChatHistoryPage {
        page,
        limit,
        total,
        messages,
    }))
}
