// =============================================================================
// Runtime Configuration — service settings with atomic save
// =============================================================================
//
// Central configuration for the Meridian FX service: upstream endpoints and
// per-resource cache freshness windows.
//
// Persistence uses an atomic tmp + rename pattern to prevent corruption on
// crash. All fields carry `#[serde(default)]` so that adding new fields
// never breaks loading an older config file.
// =============================================================================

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

// =============================================================================
// Default-value helpers (required by serde `default = "..."` attribute)
// =============================================================================

fn default_rates_base_url() -> String {
    "https://api.fxcandlefeed.com".to_string()
}

fn default_news_feed_url() -> String {
    "https://api.fxcandlefeed.com/news/headlines".to_string()
}

fn default_calendar_url() -> String {
    "https://nfs.faireconomy.media/ff_calendar_thisweek.json".to_string()
}

fn default_rates_ttl_secs() -> u64 {
    300
}

fn default_news_ttl_secs() -> u64 {
    300
}

fn default_calendar_ttl_secs() -> u64 {
    600
}

// =============================================================================
// RuntimeConfig
// =============================================================================

/// Top-level runtime configuration for the Meridian FX service.
///
/// Every field has a serde default so that older JSON files missing new
/// fields will still deserialise correctly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuntimeConfig {
    // --- Upstream endpoints --------------------------------------------------

    /// Base URL of the candle feed (rates pipeline).
    #[serde(default = "default_rates_base_url")]
    pub rates_base_url: String,

    /// URL of the JSON headline feed (news pipeline).
    #[serde(default = "default_news_feed_url")]
    pub news_feed_url: String,

    /// URL of the weekly economic-calendar JSON (calendar pipeline).
    #[serde(default = "default_calendar_url")]
    pub calendar_url: String,

    // --- Cache freshness windows (seconds) -----------------------------------

    /// Rates payload freshness window.
    #[serde(default = "default_rates_ttl_secs")]
    pub rates_ttl_secs: u64,

    /// News payload freshness window.
    #[serde(default = "default_news_ttl_secs")]
    pub news_ttl_secs: u64,

    /// Calendar payload freshness window.
    #[serde(default = "default_calendar_ttl_secs")]
    pub calendar_ttl_secs: u64,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            rates_base_url: default_rates_base_url(),
            news_feed_url: default_news_feed_url(),
            calendar_url: default_calendar_url(),
            rates_ttl_secs: default_rates_ttl_secs(),
            news_ttl_secs: default_news_ttl_secs(),
            calendar_ttl_secs: default_calendar_ttl_secs(),
        }
    }
}

impl RuntimeConfig {
    /// Load configuration from a JSON file at `path`.
    ///
    /// If the file does not exist, returns an error so the caller can fall
    /// back to defaults with a warning.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read runtime config from {}", path.display()))?;

        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse runtime config from {}", path.display()))?;

        info!(
            path = %path.display(),
            rates_ttl_secs = config.rates_ttl_secs,
            news_ttl_secs = config.news_ttl_secs,
            calendar_ttl_secs = config.calendar_ttl_secs,
            "runtime config loaded"
        );

        Ok(config)
    }

    /// Persist the current configuration to `path` using an atomic write
    /// (write to `.tmp`, then rename).
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        let content = serde_json::to_string_pretty(self)
            .context("failed to serialise runtime config to JSON")?;

        let tmp_path = path.with_extension("json.tmp");

        std::fs::write(&tmp_path, &content)
            .with_context(|| format!("failed to write tmp config to {}", tmp_path.display()))?;

        std::fs::rename(&tmp_path, path)
            .with_context(|| format!("failed to rename tmp config to {}", path.display()))?;

        info!(path = %path.display(), "runtime config saved (atomic)");
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_expected_windows() {
        let cfg = RuntimeConfig::default();
        assert_eq!(cfg.rates_ttl_secs, 300);
        assert_eq!(cfg.news_ttl_secs, 300);
        assert_eq!(cfg.calendar_ttl_secs, 600);
        assert!(cfg.rates_base_url.starts_with("https://"));
    }

    #[test]
    fn deserialise_empty_json_uses_defaults() {
        let cfg: RuntimeConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg.rates_ttl_secs, 300);
        assert_eq!(cfg.calendar_ttl_secs, 600);
        assert_eq!(cfg.news_feed_url, default_news_feed_url());
    }

    #[test]
    fn deserialise_partial_json_fills_defaults() {
        let json = r#"{ "news_ttl_secs": 120, "calendar_url": "https://example.com/cal.json" }"#;
        let cfg: RuntimeConfig = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.news_ttl_secs, 120);
        assert_eq!(cfg.calendar_url, "https://example.com/cal.json");
        assert_eq!(cfg.rates_ttl_secs, 300);
    }

    #[test]
    fn roundtrip_serialisation() {
        let cfg = RuntimeConfig::default();
        let json = serde_json::to_string(&cfg).unwrap();
        let cfg2: RuntimeConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(cfg.rates_base_url, cfg2.rates_base_url);
        assert_eq!(cfg.news_ttl_secs, cfg2.news_ttl_secs);
    }
}
