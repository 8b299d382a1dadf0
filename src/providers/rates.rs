// =============================================================================
// Candle Feed Client — spot-rate close series over HTTP
// =============================================================================
//
// Fetches candle arrays from a USD-base upstream. The upstream quotes every
// pair as "units of X per 1 USD", so EUR/USD and GBP/USD are inverted at
// ingestion to satisfy the quote-per-1-base convention; USD/JPY passes
// through unchanged.
//
// Response format (array of arrays, oldest first):
//   [0] openTime, [1] open, [2] high, [3] low, [4] close
// =============================================================================

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::error::FetchError;
use crate::providers::RateSource;
use crate::types::{Instrument, PriceSeries, Timescale};

/// Number of candles requested per series; the analyzer wants >= 100 points.
const SERIES_LIMIT: u32 = 120;

/// HTTP client for the upstream candle feed.
pub struct CandleFeedClient {
    base_url: String,
    client: reqwest::Client,
}

impl CandleFeedClient {
    /// Create a client for `base_url` re-using the shared HTTP client.
    pub fn new(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into(),
            client,
        }
    }

    /// Upstream symbol and whether closes must be inverted on ingest.
    fn upstream_symbol(instrument: Instrument) -> (&'static str, bool) {
        match instrument {
            Instrument::EurUsd => ("USDEUR", true),
            Instrument::GbpUsd => ("USDGBP", true),
            Instrument::UsdJpy => ("USDJPY", false),
        }
    }
}

#[async_trait]
impl RateSource for CandleFeedClient {
    async fn fetch_series(
        &self,
        instrument: Instrument,
        timescale: Timescale,
    ) -> Result<PriceSeries, FetchError> {
        let (symbol, invert) = Self::upstream_symbol(instrument);
        let url = format!(
            "{}/candles?symbol={}&interval={}&limit={}",
            self.base_url,
            symbol,
            timescale.tag(),
            SERIES_LIMIT
        );

        let resp = self.client.get(&url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Upstream(format!(
                "candle feed returned {status} for {symbol}"
            )));
        }

        let body: serde_json::Value = resp.json().await?;
        let raw = body
            .as_array()
            .ok_or_else(|| FetchError::Malformed("candle response is not an array".into()))?;

        let mut closes = Vec::with_capacity(raw.len());
        for entry in raw {
            let Some(arr) = entry.as_array() else {
                return Err(FetchError::Malformed("candle entry is not an array".into()));
            };
            if arr.len() < 5 {
                warn!(
                    instrument = %instrument,
                    elements = arr.len(),
                    "skipping malformed candle entry"
                );
                continue;
            }

            let close = parse_f64(&arr[4]).ok_or_else(|| {
                FetchError::Malformed(format!("unparseable close in candle for {symbol}"))
            })?;

            if invert {
                if close == 0.0 {
                    warn!(instrument = %instrument, "skipping zero close before inversion");
                    continue;
                }
                closes.push(1.0 / close);
            } else {
                closes.push(close);
            }
        }

        if closes.is_empty() {
            return Err(FetchError::Empty);
        }

        debug!(
            instrument = %instrument,
            timescale = %timescale,
            count = closes.len(),
            "candle series fetched"
        );
        Ok(PriceSeries::new(instrument, timescale, closes))
    }
}

/// Accept closes encoded as JSON numbers or numeric strings.
fn parse_f64(value: &serde_json::Value) -> Option<f64> {
    value
        .as_f64()
        .or_else(|| value.as_str().and_then(|s| s.parse().ok()))
}
