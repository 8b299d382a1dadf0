// =============================================================================
// Economic Calendar Client — today's events over HTTP
// =============================================================================
//
// Fetches the week's calendar JSON, keeps only today's entries, normalizes
// the upstream impact labels, and caps the result at 10 events. When the
// upstream is unavailable the service falls back to the static weekday table
// at the bottom of this file.
//
// Response format: array of objects
//   { "date": "YYYY-MM-DD", "time", "country", "title", "impact" }
// =============================================================================

use async_trait::async_trait;
use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::FetchError;
use crate::providers::CalendarSource;

/// Maximum events served per day.
const EVENT_LIMIT: usize = 10;
/// Landing page linked from every event row.
const CALENDAR_URL: &str = "https://www.investing.com/economic-calendar/";

/// A normalized economic-calendar event in served form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub time: String,
    pub currency: String,
    pub event: String,
    /// One of `high`, `medium`, `low`.
    pub impact: String,
    pub url: String,
}

impl CalendarEvent {
    fn new(time: &str, currency: &str, event: &str, impact: &str) -> Self {
        Self {
            time: time.to_string(),
            currency: currency.to_string(),
            event: event.to_string(),
            impact: impact.to_string(),
            url: CALENDAR_URL.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawEvent {
    #[serde(default)]
    date: String,
    #[serde(default = "default_time")]
    time: String,
    #[serde(default = "default_currency")]
    country: String,
    #[serde(default = "default_title")]
    title: String,
    #[serde(default)]
    impact: String,
}

fn default_time() -> String {
    "—".to_string()
}

fn default_currency() -> String {
    "USD".to_string()
}

fn default_title() -> String {
    "Event".to_string()
}

/// HTTP client for the weekly calendar feed.
pub struct CalendarClient {
    url: String,
    client: reqwest::Client,
}

impl CalendarClient {
    /// Create a client for `url` re-using the shared HTTP client.
    pub fn new(url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            url: url.into(),
            client,
        }
    }
}

#[async_trait]
impl CalendarSource for CalendarClient {
    async fn fetch_events(&self) -> Result<Vec<CalendarEvent>, FetchError> {
        let resp = self.client.get(&self.url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Upstream(format!(
                "calendar feed returned {status}"
            )));
        }

        let raw: Vec<RawEvent> = resp
            .json()
            .await
            .map_err(|e| FetchError::Malformed(e.to_string()))?;

        let today = chrono::Utc::now().date_naive();
        let events = todays_events(raw, today);

        if events.is_empty() {
            return Err(FetchError::Empty);
        }

        debug!(count = events.len(), "calendar events fetched");
        Ok(events)
    }
}

/// Filter raw entries down to today's normalized events, capped at
/// [`EVENT_LIMIT`]. Entries with unparseable dates are skipped.
fn todays_events(raw: Vec<RawEvent>, today: NaiveDate) -> Vec<CalendarEvent> {
    let mut events = Vec::new();
    for entry in raw {
        let Ok(date) = NaiveDate::parse_from_str(&entry.date, "%Y-%m-%d") else {
            continue;
        };
        if date != today {
            continue;
        }

        events.push(CalendarEvent {
            time: entry.time,
            currency: entry.country,
            event: entry.title,
            impact: normalize_impact(&entry.impact).to_string(),
            url: CALENDAR_URL.to_string(),
        });

        if events.len() >= EVENT_LIMIT {
            break;
        }
    }
    events
}

/// Map upstream impact labels onto the dashboard's three levels.
fn normalize_impact(raw: &str) -> &'static str {
    match raw.to_lowercase().as_str() {
        "high" | "red" => "high",
        "medium" | "orange" | "yellow" => "medium",
        _ => "low",
    }
}

// =============================================================================
// Weekday fallback table
// =============================================================================

/// Static editorial fallback served when the upstream calendar is
/// unavailable: the recurring headline releases typical for each weekday,
/// preceded by a pointer row to the full listing. Weekends collapse to a
/// single informational row. The order is fixed — nothing here is shuffled.
pub fn weekday_fallback(date: NaiveDate) -> Vec<CalendarEvent> {
    let day_events: &[(&str, &str, &str, &str)] = match date.weekday() {
        Weekday::Mon => &[
            ("10:00", "EUR", "Eurozone Industrial Production", "medium"),
            ("14:30", "USD", "US Retail Sales", "high"),
        ],
        Weekday::Tue => &[
            ("11:00", "EUR", "German ZEW Economic Sentiment", "high"),
            ("14:30", "USD", "US CPI Consumer Prices", "high"),
        ],
        Weekday::Wed => &[
            ("14:30", "USD", "US PPI Producer Prices", "high"),
            ("20:00", "USD", "FOMC Meeting Minutes", "high"),
        ],
        Weekday::Thu => &[
            ("08:00", "GBP", "UK GDP Growth", "high"),
            ("14:30", "USD", "US Initial Jobless Claims", "medium"),
        ],
        Weekday::Fri => &[
            ("14:30", "USD", "US Nonfarm Payrolls", "high"),
            ("16:00", "USD", "US Michigan Consumer Sentiment", "medium"),
        ],
        Weekday::Sat | Weekday::Sun => {
            return vec![CalendarEvent::new(
                "—",
                "INFO",
                "Weekend — no major events scheduled",
                "low",
            )];
        }
    };

    let mut events = vec![CalendarEvent::new(
        "→",
        "INFO",
        "See the full economic calendar",
        "high",
    )];
    for (time, currency, event, impact) in day_events {
        events.push(CalendarEvent::new(time, currency, event, impact));
    }
    events
}
