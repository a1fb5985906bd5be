/**
 * Router Configuration
 *
 * Combines the API table, the socket gateway and static uploads into a
 * single Axum router.
 *
 * # Layers
 *
 * - `TraceLayer` traces every HTTP request
 * - `CorsLayer::permissive()` on all routes
 * - `/uploads` responses carry `Cache-Control: public, max-age=86400`
 */

use axum::{
    extract::State,
    http::{header::CACHE_CONTROL, HeaderValue, StatusCode},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer, services::ServeDir, set_header::SetResponseHeaderLayer, trace::TraceLayer,
};

use crate::backend::realtime::{handle_socket_upgrade, PresenceRegistry};
use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::server::state::AppState;

const UPLOAD_CACHE_CONTROL: &str = "public, max-age=86400";

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    /// Users with a registered socket connection
    pub online: usize,
}

async fn health(State(presence): State<PresenceRegistry>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        online: presence.online_count(),
    })
}

async fn not_found() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({ "message": "Not found", "status": 404 })),
    )
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState) -> Router<()> {
    let uploads = ServiceBuilder::new()
        .layer(SetResponseHeaderLayer::overriding(
            CACHE_CONTROL,
            HeaderValue::from_static(UPLOAD_CACHE_CONTROL),
        ))
        .service(ServeDir::new(&app_state.config.upload_dir));

    let router = Router::new()
        .route("/health", get(health))
        .route("/ws", get(handle_socket_upgrade));

    let router = configure_api_routes(router);

    router
        .nest_service("/uploads", uploads)
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}
