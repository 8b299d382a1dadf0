// =============================================================================
// Shared types used across the Meridian FX service
// =============================================================================

use serde::{Deserialize, Serialize};

/// The fixed set of currency pairs served by the dashboard.
///
/// Every instrument is quoted as "quote per 1 unit of base"; providers apply
/// inversion at ingestion when the upstream reports the inverse pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Instrument {
    EurUsd,
    GbpUsd,
    UsdJpy,
}

impl Instrument {
    /// All instruments in the fixed dashboard order.
    pub const ALL: [Instrument; 3] = [Self::EurUsd, Self::GbpUsd, Self::UsdJpy];

    /// Lowercase key used in JSON payloads and cache identifiers.
    pub fn key(&self) -> &'static str {
        match self {
            Self::EurUsd => "eurusd",
            Self::GbpUsd => "gbpusd",
            Self::UsdJpy => "usdjpy",
        }
    }

    /// Human-readable pair name for narratives.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::EurUsd => "EUR/USD",
            Self::GbpUsd => "GBP/USD",
            Self::UsdJpy => "USD/JPY",
        }
    }

    /// Decimal places used when formatting prices for this instrument.
    ///
    /// JPY-quoted pairs conventionally print 3 decimals, everything else 5.
    pub fn quote_precision(&self) -> usize {
        match self {
            Self::UsdJpy => 3,
            _ => 5,
        }
    }

    /// Format a price with this instrument's quote precision.
    pub fn format_price(&self, price: f64) -> String {
        format!("{:.*}", self.quote_precision(), price)
    }

    /// Default landing URL used for synthetic news placeholders.
    pub fn default_news_url(&self) -> &'static str {
        "https://www.forex.com/en-us/news-and-analysis/"
    }
}

impl std::fmt::Display for Instrument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Candle timescales fetched per instrument.
///
/// `H4` is the trend scale (EMA-50 reference), `H1` the signal scale
/// (RSI, support/resistance, latest price).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Timescale {
    H1,
    H4,
}

impl Timescale {
    /// Wire tag used in upstream candle requests.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::H1 => "1h",
            Self::H4 => "4h",
        }
    }
}

impl std::fmt::Display for Timescale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// Directional trend verdict relative to the trend-scale EMA.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trend {
    Bull,
    Bear,
    Neutral,
}

impl Trend {
    /// Dashboard label with direction glyph.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Bull => "Bullish ↑",
            Self::Bear => "Bearish ↓",
            Self::Neutral => "Neutral →",
        }
    }
}

/// Coarse advisory setup classification. Descriptive only — never an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Setup {
    Long,
    Short,
    Wait,
}

impl Setup {
    /// Machine-readable badge value for the dashboard.
    pub fn badge(&self) -> &'static str {
        match self {
            Self::Long => "long",
            Self::Short => "short",
            Self::Wait => "wait",
        }
    }

    /// Plain-language label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Long => "Long setup",
            Self::Short => "Short setup",
            Self::Wait => "Wait",
        }
    }
}

/// A chronological series of closing prices for one instrument/timescale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceSeries {
    pub instrument: Instrument,
    pub timescale: Timescale,
    /// Closes in chronological order, oldest first.
    pub closes: Vec<f64>,
}

impl PriceSeries {
    pub fn new(instrument: Instrument, timescale: Timescale, closes: Vec<f64>) -> Self {
        Self {
            instrument,
            timescale,
            closes,
        }
    }
}
