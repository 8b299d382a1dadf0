// =============================================================================
// Upstream Providers — opaque fetch collaborators
// =============================================================================
//
// The service core only ever sees these three interfaces. Production
// implementations are thin reqwest clients; tests substitute fakes with call
// counters. Provider selection is a wiring concern — the analysis and
// classification layers never know which upstream produced their input.

pub mod calendar;
pub mod news_feed;
pub mod rates;

use async_trait::async_trait;

use crate::error::FetchError;
use crate::news::NewsItem;
use crate::providers::calendar::CalendarEvent;
use crate::types::{Instrument, PriceSeries, Timescale};

/// Source of candle close series per instrument and timescale.
#[async_trait]
pub trait RateSource: Send + Sync {
    async fn fetch_series(
        &self,
        instrument: Instrument,
        timescale: Timescale,
    ) -> Result<PriceSeries, FetchError>;
}

/// Source of age-labeled news headline items.
#[async_trait]
pub trait NewsSource: Send + Sync {
    async fn fetch_items(&self) -> Result<Vec<NewsItem>, FetchError>;
}

/// Source of today's economic calendar events.
#[async_trait]
pub trait CalendarSource: Send + Sync {
    async fn fetch_events(&self) -> Result<Vec<CalendarEvent>, FetchError>;
}
