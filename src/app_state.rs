// =============================================================================
// Central Application State — Meridian FX
// =============================================================================
//
// The single shared object behind the API: the market service (providers +
// caches) and process timing. Wrapped in `Arc` at startup and cloned into
// every handler. All interior mutability lives inside the service's caches;
// the state itself is immutable after construction.

use std::time::Instant;

use crate::runtime_config::RuntimeConfig;
use crate::service::MarketService;

/// Shared application state for all request handlers.
pub struct AppState {
    pub market: MarketService,
    /// Instant when the service was started. Used for uptime reporting.
    pub start_time: Instant,
}

impl AppState {
    /// Construct the state from the given runtime configuration.
    pub fn new(config: &RuntimeConfig) -> Self {
        Self {
            market: MarketService::new(config),
            start_time: Instant::now(),
        }
    }

    /// Seconds since the service started.
    pub fn uptime_secs(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
