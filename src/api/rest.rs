// =============================================================================
// REST API Endpoints — Axum 0.7
// =============================================================================
//
// Four GET routes, no authentication: the dashboard is public-read. CORS is
// configured permissively because the client is served from a different
// origin.
//
// Every data route answers `success: true` — the service layer degrades all
// upstream failures to documented fallback payloads, so an error response
// here would only ever indicate a bug at this boundary, not upstream
// weather.
// =============================================================================

use std::sync::Arc;

use axum::{
    extract::State,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use tower_http::cors::{Any, CorsLayer};

use crate::app_state::AppState;

// =============================================================================
// Router construction
// =============================================================================

/// Build the full REST API router with CORS middleware and shared state.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/api/rates", get(rates))
        .route("/api/news", get(news))
        .route("/api/calendar", get(calendar))
        .layer(cors)
        .with_state(state)
}

// =============================================================================
// Health
// =============================================================================

async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "uptime_secs": state.uptime_secs(),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

// =============================================================================
// Rates — per-instrument analysis payload
// =============================================================================

async fn rates(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let outcome = state.market.get_rates().await;
    Json(serde_json::json!({
        "success": true,
        "data": outcome.data,
        "cached": outcome.cached,
        "source": outcome.source,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

// =============================================================================
// News — classified headline buckets
// =============================================================================

async fn news(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let outcome = state.market.get_news().await;
    Json(serde_json::json!({
        "success": true,
        "data": outcome.buckets,
        "cached": outcome.cached,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

// =============================================================================
// Calendar — today's economic events
// =============================================================================

async fn calendar(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let outcome = state.market.get_calendar().await;
    Json(serde_json::json!({
        "success": true,
        "data": outcome.events,
        "cached": outcome.cached,
        "source": outcome.source,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
