/**
 * Application State Management
 *
 * `AppState` is the central state container. The `FromRef` implementations
 * let handlers extract only the part they need.
 *
 * # Thread Safety
 *
 * - `SqlitePool` is a cloneable handle to the connection pool
 * - `broadcast::Sender` fans events out to every connection
 * - `PresenceRegistry` guards its map with a mutex held only for lookups
 *
 * ```rust,ignore
 * use axum::extract::State;
 * use sqlx::SqlitePool;
 *
 * async fn handler(State(pool): State<SqlitePool>) { /* ... */ }
 * ```
 */

use std::sync::Arc;

use axum::extract::FromRef;
use sqlx::SqlitePool;
use tokio::sync::broadcast;

use crate::backend::realtime::broadcast::RealtimeEventBroadcast;
use crate::backend::realtime::presence::PresenceRegistry;
use crate::backend::server::config::ServerConfig;

/// Capacity of the broadcast-to-all channel
pub const REALTIME_CHANNEL_CAPACITY: usize = 1000;

#[derive(Clone)]
pub struct AppState {
    pub db_pool: SqlitePool,
    pub config: Arc<ServerConfig>,
    /// Fan-out channel for events every connection receives
    pub realtime_broadcast: RealtimeEventBroadcast,
    /// Online users and their current connection
    pub presence: PresenceRegistry,
}

impl AppState {
    pub fn new(db_pool: SqlitePool, config: ServerConfig) -> Self {
        let (realtime_broadcast, _) = broadcast::channel(REALTIME_CHANNEL_CAPACITY);
        Self {
            db_pool,
            config: Arc::new(config),
            realtime_broadcast,
            presence: PresenceRegistry::new(),
        }
    }
}

impl FromRef<AppState> for SqlitePool {
    fn from_ref(state: &AppState) -> Self {
        state.db_pool.clone()
    }
}

impl FromRef<AppState> for Arc<ServerConfig> {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

impl FromRef<AppState> for RealtimeEventBroadcast {
    fn from_ref(state: &AppState) -> Self {
        state.realtime_broadcast.clone()
    }
}

impl FromRef<AppState> for PresenceRegistry {
    fn from_ref(state: &AppState) -> Self {
        state.presence.clone()
    }
}
