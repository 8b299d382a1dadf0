// =============================================================================
// Meridian FX — Main Entry Point
// =============================================================================
//
// Forex dashboard data service: aggregates spot-rate candles, news
// headlines, and economic-calendar events behind freshness-windowed caches
// and serves the normalized JSON the dashboard client consumes.
// =============================================================================

// ── Module declarations ──────────────────────────────────────────────────────
mod analysis;
mod api;
mod app_state;
mod cache;
mod error;
mod indicators;
mod news;
mod providers;
mod runtime_config;
mod service;
mod types;

use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::app_state::AppState;
use crate::runtime_config::RuntimeConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ── 1. Environment & config ──────────────────────────────────────────
    let _ = dotenv::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("╔══════════════════════════════════════════════════════════╗");
    info!("║        Meridian FX — Starting Up                        ║");
    info!("╚══════════════════════════════════════════════════════════╝");

    let config = RuntimeConfig::load("runtime_config.json").unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load config, using defaults");
        let config = RuntimeConfig::default();
        // Write the defaults out so operators have a file to edit.
        if let Err(e) = config.save("runtime_config.json") {
            warn!(error = %e, "Failed to write default config");
        }
        config
    });

    info!(
        rates_ttl_secs = config.rates_ttl_secs,
        news_ttl_secs = config.news_ttl_secs,
        calendar_ttl_secs = config.calendar_ttl_secs,
        "Cache freshness windows configured"
    );

    // ── 2. Build shared state ────────────────────────────────────────────
    let state = Arc::new(AppState::new(&config));

    // ── 3. Start the API server ──────────────────────────────────────────
    let bind_addr =
        std::env::var("MERIDIAN_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:10000".into());
    let bind_addr_clone = bind_addr.clone();
    let api_state = state.clone();

    tokio::spawn(async move {
        let app = api::rest::router(api_state);
        let listener = tokio::net::TcpListener::bind(&bind_addr_clone)
            .await
            .expect("Failed to bind API server");
        info!(addr = %bind_addr_clone, "API server listening");
        axum::serve(listener, app)
            .await
            .expect("API server failed");
    });

    info!("All pipelines ready. Press Ctrl+C to stop.");

    // ── 4. Graceful shutdown ─────────────────────────────────────────────
    tokio::signal::ctrl_c().await?;
    warn!("Shutdown signal received — stopping gracefully");

    info!("Meridian FX shut down complete.");
    Ok(())
}
