/**
 * Server Initialization
 *
 * 1. Open the database and run migrations
 * 2. Make sure the upload directory exists
 * 3. Create the application state (broadcast channel, presence registry)
 * 4. Create and configure the router
 */

use axum::Router;

use crate::backend::routes::router::create_router;
use crate::backend::server::config::{load_database, ConfigError, ServerConfig};
use crate::backend::server::state::AppState;

/// Create and configure the Axum application
///
/// Fails if the database cannot be opened or migrated, or if the upload
/// directory cannot be created.
pub async fn create_app(config: ServerConfig) -> Result<Router<()>, ConfigError> {
    tracing::info!("Initializing Plaza backend server");

    // Step 1: Database
    let db_pool = load_database(&config.database_url).await?;

    // Step 2: Upload directory
    tokio::fs::create_dir_all(&config.upload_dir).await?;
    tracing::info!("Serving uploads from {}", config.upload_dir.display());

    // Step 3: App state
    let app_state = AppState::new(db_pool, config);
    tracing::info!("Realtime channel and presence registry initialized");

    // Step 4: Router
    let app = create_router(app_state);
    tracing::info!("Router configured");

    Ok(app)
}
