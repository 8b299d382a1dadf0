// =============================================================================
// Market Service — fetch → compute/classify → cache → serve orchestration
// =============================================================================
//
// One service instance is shared across all requests. Each resource kind
// (rates, news, calendar) runs the same pipeline shape: ask the cache, on a
// miss call the provider, transform, store, serve. Every failure degrades to
// a documented fallback payload — there is no fatal error path out of this
// module, so the HTTP layer always answers `success: true`.

use std::sync::Arc;
use std::time::Duration;

use futures_util::join;
use serde::Serialize;
use tracing::{debug, warn};

use crate::analysis::{analyze_pair, placeholder, PairInsight};
use crate::cache::TimedCache;
use crate::error::FetchError;
use crate::news::{self, classifier, NewsBuckets};
use crate::providers::calendar::{weekday_fallback, CalendarClient, CalendarEvent};
use crate::providers::news_feed::HeadlineFeedClient;
use crate::providers::rates::CandleFeedClient;
use crate::providers::{CalendarSource, NewsSource, RateSource};
use crate::runtime_config::RuntimeConfig;
use crate::types::{Instrument, Timescale};

// =============================================================================
// Served payload shapes
// =============================================================================

/// Per-instrument insights in the fixed dashboard order.
#[derive(Debug, Clone, Serialize)]
pub struct RatesData {
    pub eurusd: PairInsight,
    pub gbpusd: PairInsight,
    pub usdjpy: PairInsight,
}

impl RatesData {
    /// All-placeholder payload served when no instrument has data.
    fn placeholder() -> Self {
        Self {
            eurusd: placeholder(Instrument::EurUsd),
            gbpusd: placeholder(Instrument::GbpUsd),
            usdjpy: placeholder(Instrument::UsdJpy),
        }
    }
}

/// Cached unit for the rates pipeline: the data plus its provenance label.
#[derive(Debug, Clone, Serialize)]
pub struct RatesPayload {
    pub data: RatesData,
    pub source: String,
}

pub struct RatesOutcome {
    pub data: RatesData,
    pub source: String,
    pub cached: bool,
}

pub struct NewsOutcome {
    pub buckets: NewsBuckets,
    pub cached: bool,
}

pub struct CalendarOutcome {
    pub events: Vec<CalendarEvent>,
    pub source: String,
    pub cached: bool,
}

// =============================================================================
// MarketService
// =============================================================================

/// Owns the three providers and the per-resource caches.
pub struct MarketService {
    rates: Arc<dyn RateSource>,
    news: Arc<dyn NewsSource>,
    calendar: Arc<dyn CalendarSource>,

    rates_cache: TimedCache<RatesPayload>,
    news_cache: TimedCache<NewsBuckets>,
    calendar_cache: TimedCache<Vec<CalendarEvent>>,

    rates_ttl: Duration,
    news_ttl: Duration,
    calendar_ttl: Duration,
}

impl MarketService {
    /// Build the service with production HTTP providers sharing one
    /// bounded-timeout HTTP client.
    pub fn new(config: &RuntimeConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .expect("failed to build reqwest client");

        Self::with_sources(
            Arc::new(CandleFeedClient::new(
                config.rates_base_url.clone(),
                client.clone(),
            )),
            Arc::new(HeadlineFeedClient::new(
                config.news_feed_url.clone(),
                client.clone(),
            )),
            Arc::new(CalendarClient::new(config.calendar_url.clone(), client)),
            config,
        )
    }

    /// Build the service with injected providers (used by tests).
    pub fn with_sources(
        rates: Arc<dyn RateSource>,
        news: Arc<dyn NewsSource>,
        calendar: Arc<dyn CalendarSource>,
        config: &RuntimeConfig,
    ) -> Self {
        Self {
            rates,
            news,
            calendar,
            rates_cache: TimedCache::new(),
            news_cache: TimedCache::new(),
            calendar_cache: TimedCache::new(),
            rates_ttl: Duration::from_secs(config.rates_ttl_secs),
            news_ttl: Duration::from_secs(config.news_ttl_secs),
            calendar_ttl: Duration::from_secs(config.calendar_ttl_secs),
        }
    }

    // ── Rates pipeline ──────────────────────────────────────────────────

    /// Full three-instrument analysis payload. Always well-formed: a failed
    /// recompute degrades to the all-placeholder payload, uncached, so the
    /// next request retries the upstream.
    pub async fn get_rates(&self) -> RatesOutcome {
        match self
            .rates_cache
            .get_or_compute("rates", self.rates_ttl, || self.compute_rates())
            .await
        {
            Ok((payload, cached)) => RatesOutcome {
                data: payload.data,
                source: payload.source,
                cached,
            },
            Err(err) => {
                warn!(error = %err, "rates recompute failed — serving placeholder payload");
                RatesOutcome {
                    data: RatesData::placeholder(),
                    source: "fallback".to_string(),
                    cached: false,
                }
            }
        }
    }

    async fn compute_rates(&self) -> Result<RatesPayload, FetchError> {
        let ((eurusd, eur_live), (gbpusd, gbp_live), (usdjpy, jpy_live)) = join!(
            self.analyze_instrument(Instrument::EurUsd),
            self.analyze_instrument(Instrument::GbpUsd),
            self.analyze_instrument(Instrument::UsdJpy),
        );

        // With every instrument degraded there is nothing worth caching for
        // the full freshness window; report the failure instead.
        if !(eur_live || gbp_live || jpy_live) {
            return Err(FetchError::Upstream(
                "no instrument produced data on any timescale".into(),
            ));
        }

        Ok(RatesPayload {
            data: RatesData {
                eurusd,
                gbpusd,
                usdjpy,
            },
            source: "live".to_string(),
        })
    }

    /// Analyze one instrument from both timescales. Returns the insight and
    /// whether any live series backed it. A fetch failure on either
    /// timescale degrades only this instrument — never the batch.
    async fn analyze_instrument(&self, instrument: Instrument) -> (PairInsight, bool) {
        let (trend, signal) = join!(
            self.rates.fetch_series(instrument, Timescale::H4),
            self.rates.fetch_series(instrument, Timescale::H1),
        );

        let trend_closes = match &trend {
            Ok(series) => series.closes.as_slice(),
            Err(err) => {
                warn!(instrument = %instrument, timescale = %Timescale::H4, error = %err, "series fetch failed");
                &[]
            }
        };
        let signal_closes = match &signal {
            Ok(series) => series.closes.as_slice(),
            Err(err) => {
                warn!(instrument = %instrument, timescale = %Timescale::H1, error = %err, "series fetch failed");
                &[]
            }
        };

        let live = trend.is_ok() || signal.is_ok();
        (analyze_pair(instrument, trend_closes, signal_closes), live)
    }

    // ── News pipeline ───────────────────────────────────────────────────

    /// Classified headline buckets, exactly three entries per instrument.
    /// A feed failure classifies the built-in seed list instead, uncached.
    pub async fn get_news(&self) -> NewsOutcome {
        match self
            .news_cache
            .get_or_compute("news", self.news_ttl, || self.compute_news())
            .await
        {
            Ok((buckets, cached)) => NewsOutcome { buckets, cached },
            Err(err) => {
                warn!(error = %err, "news recompute failed — classifying seed list");
                NewsOutcome {
                    buckets: classifier::classify(&news::seed_items()),
                    cached: false,
                }
            }
        }
    }

    async fn compute_news(&self) -> Result<NewsBuckets, FetchError> {
        let items = self.news.fetch_items().await?;

        // A reachable feed with nothing fresh still classifies the seed list
        // so the buckets are routed through the normal keyword pass.
        if items.is_empty() {
            debug!("headline feed empty — classifying seed list");
            return Ok(classifier::classify(&news::seed_items()));
        }

        Ok(classifier::classify(&items))
    }

    // ── Calendar pipeline ───────────────────────────────────────────────

    /// Today's economic events. Upstream failure serves the static weekday
    /// table, uncached, so the next request retries the upstream.
    pub async fn get_calendar(&self) -> CalendarOutcome {
        match self
            .calendar_cache
            .get_or_compute("calendar", self.calendar_ttl, || async {
                self.calendar.fetch_events().await
            })
            .await
        {
            Ok((events, cached)) => CalendarOutcome {
                events,
                source: "live".to_string(),
                cached,
            },
            Err(err) => {
                warn!(error = %err, "calendar recompute failed — serving weekday fallback");
                CalendarOutcome {
                    events: weekday_fallback(chrono::Utc::now().date_naive()),
                    source: "fallback".to_string(),
                    cached: false,
                }
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::news::NewsItem;
    use crate::types::PriceSeries;

    // ---- fakes ------------------------------------------------------------

    /// Rate source that serves ascending closes for all instruments except
    /// those listed in `dead`, counting every fetch.
    struct FakeRates {
        dead: Vec<Instrument>,
        calls: AtomicUsize,
    }

    impl FakeRates {
        fn new(dead: Vec<Instrument>) -> Self {
            Self {
                dead,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl RateSource for FakeRates {
        async fn fetch_series(
            &self,
            instrument: Instrument,
            timescale: Timescale,
        ) -> Result<PriceSeries, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.dead.contains(&instrument) {
                return Err(FetchError::Upstream("connection refused".into()));
            }
            let closes: Vec<f64> = (0..120).map(|i| 1.05 + i as f64 * 1e-4).collect();
            Ok(PriceSeries::new(instrument, timescale, closes))
        }
    }

    struct FakeNews {
        items: Result<Vec<NewsItem>, ()>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl NewsSource for FakeNews {
        async fn fetch_items(&self) -> Result<Vec<NewsItem>, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.items {
                Ok(items) => Ok(items.clone()),
                Err(()) => Err(FetchError::Upstream("feed down".into())),
            }
        }
    }

    struct FakeCalendar {
        fail: bool,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl CalendarSource for FakeCalendar {
        async fn fetch_events(&self) -> Result<Vec<CalendarEvent>, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(FetchError::Upstream("calendar down".into()));
            }
            Ok(vec![CalendarEvent {
                time: "14:30".to_string(),
                currency: "USD".to_string(),
                event: "US CPI".to_string(),
                impact: "high".to_string(),
                url: "https://example.com".to_string(),
            }])
        }
    }

    fn service(
        rates: Arc<FakeRates>,
        news: Arc<FakeNews>,
        calendar: Arc<FakeCalendar>,
    ) -> MarketService {
        MarketService::with_sources(rates, news, calendar, &RuntimeConfig::default())
    }

    fn healthy_fakes() -> (Arc<FakeRates>, Arc<FakeNews>, Arc<FakeCalendar>) {
        (
            Arc::new(FakeRates::new(vec![])),
            Arc::new(FakeNews {
                items: Ok(vec![NewsItem::new(
                    "Just now",
                    "ECB euro rate decision",
                    "https://example.com/ecb",
                )]),
                calls: AtomicUsize::new(0),
            }),
            Arc::new(FakeCalendar {
                fail: false,
                calls: AtomicUsize::new(0),
            }),
        )
    }

    // ---- rates pipeline ---------------------------------------------------

    #[tokio::test]
    async fn dead_instrument_degrades_alone() {
        let rates = Arc::new(FakeRates::new(vec![Instrument::UsdJpy]));
        let (_, news, calendar) = healthy_fakes();
        let svc = service(rates, news, calendar);

        let outcome = svc.get_rates().await;
        assert_eq!(outcome.source, "live");
        assert_eq!(outcome.data.usdjpy.price, "—");
        assert_eq!(outcome.data.usdjpy.setup_badge, "wait");
        assert_ne!(outcome.data.eurusd.price, "—");
        assert_ne!(outcome.data.gbpusd.price, "—");
    }

    #[tokio::test]
    async fn all_instruments_dead_serves_fallback_uncached() {
        let rates = Arc::new(FakeRates::new(Instrument::ALL.to_vec()));
        let (_, news, calendar) = healthy_fakes();
        let svc = service(rates.clone(), news, calendar);

        let outcome = svc.get_rates().await;
        assert_eq!(outcome.source, "fallback");
        assert!(!outcome.cached);
        assert_eq!(outcome.data.eurusd.price, "—");

        // The failure was not stored: the next request hits the upstream
        // again (3 instruments x 2 timescales per attempt).
        let calls_after_first = rates.calls.load(Ordering::SeqCst);
        let _ = svc.get_rates().await;
        assert_eq!(rates.calls.load(Ordering::SeqCst), calls_after_first + 6);
    }

    #[tokio::test]
    async fn rates_are_cached_within_window() {
        let (rates, news, calendar) = healthy_fakes();
        let svc = service(rates.clone(), news, calendar);

        let first = svc.get_rates().await;
        assert!(!first.cached);
        assert_eq!(rates.calls.load(Ordering::SeqCst), 6);

        let second = svc.get_rates().await;
        assert!(second.cached);
        assert_eq!(second.source, "live");
        assert_eq!(rates.calls.load(Ordering::SeqCst), 6, "cache hit must not fetch");
    }

    // ---- news pipeline ----------------------------------------------------

    #[tokio::test]
    async fn live_headlines_are_classified_and_cached() {
        let (rates, news, calendar) = healthy_fakes();
        let svc = service(rates, news.clone(), calendar);

        let first = svc.get_news().await;
        assert!(!first.cached);
        assert_eq!(first.buckets.eurusd[0].headline, "ECB euro rate decision");
        assert_eq!(first.buckets.eurusd.len(), 3);

        let second = svc.get_news().await;
        assert!(second.cached);
        assert_eq!(news.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn empty_feed_classifies_seed_list() {
        let (rates, _, calendar) = healthy_fakes();
        let news = Arc::new(FakeNews {
            items: Ok(vec![]),
            calls: AtomicUsize::new(0),
        });
        let svc = service(rates, news, calendar);

        let outcome = svc.get_news().await;
        // Seed classification, not nine placeholders.
        assert!(outcome.buckets.eurusd[0].headline.contains("ECB"));
        assert_eq!(outcome.buckets.total_entries(), 9);
    }

    #[tokio::test]
    async fn feed_failure_classifies_seed_list_uncached() {
        let (rates, _, calendar) = healthy_fakes();
        let news = Arc::new(FakeNews {
            items: Err(()),
            calls: AtomicUsize::new(0),
        });
        let svc = service(rates, news.clone(), calendar);

        let outcome = svc.get_news().await;
        assert!(!outcome.cached);
        assert!(outcome.buckets.usdjpy[0].headline.contains("USD/JPY"));

        // Nothing was stored, so the next request retries the feed.
        let _ = svc.get_news().await;
        assert_eq!(news.calls.load(Ordering::SeqCst), 2);
    }

    // ---- calendar pipeline ------------------------------------------------

    #[tokio::test]
    async fn calendar_events_are_cached_within_window() {
        let (rates, news, calendar) = healthy_fakes();
        let svc = service(rates, news, calendar.clone());

        let first = svc.get_calendar().await;
        assert_eq!(first.source, "live");
        assert!(!first.cached);
        assert_eq!(first.events[0].event, "US CPI");

        let second = svc.get_calendar().await;
        assert!(second.cached);
        assert_eq!(calendar.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn calendar_failure_serves_weekday_fallback() {
        let (rates, news, _) = healthy_fakes();
        let calendar = Arc::new(FakeCalendar {
            fail: true,
            calls: AtomicUsize::new(0),
        });
        let svc = service(rates, news, calendar.clone());

        let outcome = svc.get_calendar().await;
        assert_eq!(outcome.source, "fallback");
        assert!(!outcome.cached);
        assert!(!outcome.events.is_empty());

        // Fallback is never stored: the next request retries the upstream.
        let _ = svc.get_calendar().await;
        assert_eq!(calendar.calls.load(Ordering::SeqCst), 2);
    }
}
