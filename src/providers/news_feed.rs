// =============================================================================
// Headline Feed Client — forex news over HTTP
// =============================================================================
//
// Fetches a JSON headline feed, labels each item's relative age, and drops
// anything older than one calendar day so stale headlines never reach the
// classifier. At most 20 raw entries are considered per fetch.
//
// Response format: array of objects { "title", "link", "published" } with
// `published` in RFC 3339.
// =============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::FetchError;
use crate::news::NewsItem;
use crate::providers::NewsSource;

/// Raw entries considered per fetch before age filtering.
const FEED_LIMIT: usize = 20;
/// Headlines are truncated to this many characters for the dashboard.
const HEADLINE_MAX_CHARS: usize = 100;

#[derive(Debug, Deserialize)]
struct FeedEntry {
    title: String,
    link: String,
    published: String,
}

/// HTTP client for the upstream headline feed.
pub struct HeadlineFeedClient {
    feed_url: String,
    client: reqwest::Client,
}

impl HeadlineFeedClient {
    /// Create a client for `feed_url` re-using the shared HTTP client.
    pub fn new(feed_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            feed_url: feed_url.into(),
            client,
        }
    }
}

#[async_trait]
impl NewsSource for HeadlineFeedClient {
    async fn fetch_items(&self) -> Result<Vec<NewsItem>, FetchError> {
        let resp = self.client.get(&self.feed_url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Upstream(format!(
                "headline feed returned {status}"
            )));
        }

        let entries: Vec<FeedEntry> = resp
            .json()
            .await
            .map_err(|e| FetchError::Malformed(e.to_string()))?;

        let now = Utc::now();
        let mut items = Vec::new();
        for entry in entries.into_iter().take(FEED_LIMIT) {
            let Ok(published) = DateTime::parse_from_rfc3339(&entry.published) else {
                warn!(link = %entry.link, "skipping headline with unparseable timestamp");
                continue;
            };

            let Some(time) = relative_age(now, published.with_timezone(&Utc)) else {
                // Older than one calendar day: never reaches the classifier.
                continue;
            };

            let headline: String = entry.title.chars().take(HEADLINE_MAX_CHARS).collect();
            items.push(NewsItem::new(time, headline, entry.link));
        }

        debug!(count = items.len(), "headlines fetched");
        Ok(items)
    }
}

/// Relative-age label for a publication time, or `None` when the item is
/// older than one calendar day and must be dropped.
fn relative_age(now: DateTime<Utc>, published: DateTime<Utc>) -> Option<String> {
    let age = now.signed_duration_since(published);
    if age.num_seconds() < 0 {
        // Clock skew: treat future-dated items as fresh.
        return Some("Just now".to_string());
    }

    match age.num_days() {
        0 => {
            if age.num_seconds() < 3600 {
                Some(format!("{} min ago", age.num_minutes()))
            } else {
                Some(format!("{} hr ago", age.num_hours()))
            }
        }
        1 => Some("Yesterday".to_string()),
        _ => None,
    }
}
