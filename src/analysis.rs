// =============================================================================
// Pair Analyzer — two-timescale trend / momentum / setup verdict
// =============================================================================
//
// Combines a trend-scale series (H4, EMA-50 reference) with a signal-scale
// series (H1, RSI + support/resistance + latest price) into the insight
// payload served for one instrument.
//
// Decision rules:
//   trend  = bull when latest signal price > EMA-50(trend scale), else bear;
//            neutral when the EMA cannot be computed
//   setup  = long  when trend=bull and 30 < RSI < 60
//            short when trend=bear and 40 < RSI < 70
//            wait  otherwise
//
// The RSI zone bands and the setup bands overlap but are parameterized
// independently — they answer different questions and must not be unified.
//
// A missing upstream series degrades this instrument to the placeholder
// insight; it is never an error and never affects the other instruments.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::indicators::{ema, rsi, support_resistance};
use crate::types::{Instrument, Setup, Trend};

/// Look-back for the trend-scale EMA reference.
const EMA_TREND_PERIOD: usize = 50;
/// Look-back for the signal-scale RSI.
const RSI_PERIOD: usize = 14;
/// Trailing window for support/resistance levels.
const LEVEL_WINDOW: usize = 20;
/// Neutral RSI substituted when the indicator is unavailable.
const RSI_DEFAULT: f64 = 50.0;

/// Full analysis snapshot for a single instrument, in served form.
///
/// String fields carry the dashboard presentation contract: prices use the
/// instrument's quote precision, absent levels print `"N/A"`, an instrument
/// without data prints `price: "—"`. Immutable once returned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PairInsight {
    pub price: String,
    pub trend: String,
    pub rsi: f64,
    pub rsi_zone: String,
    pub rsi_color: String,
    pub support: String,
    pub resistance: String,
    pub setup: String,
    pub setup_badge: String,
    pub analysis: String,
}

/// Analyze one instrument from its two timescale series.
///
/// Either slice may be empty when the upstream fetch failed; both empty
/// yields the placeholder insight. Series shorter than an indicator's
/// look-back degrade that indicator to its documented default rather than
/// failing the instrument.
pub fn analyze_pair(
    instrument: Instrument,
    trend_closes: &[f64],
    signal_closes: &[f64],
) -> PairInsight {
    let last_price = signal_closes
        .last()
        .or_else(|| trend_closes.last())
        .copied();

    let Some(price) = last_price else {
        debug!(instrument = %instrument, "no data on either timescale — placeholder insight");
        return placeholder(instrument);
    };

    // --- Trend: latest price vs EMA-50 on the trend scale ---
    let ema_trend = ema(trend_closes, EMA_TREND_PERIOD);
    let trend = match ema_trend {
        Some(reference) if price > reference => Trend::Bull,
        Some(_) => Trend::Bear,
        None => Trend::Neutral,
    };

    // --- Momentum: RSI-14 on the signal scale ---
    let rsi_value = rsi(signal_closes, RSI_PERIOD);
    let served_rsi = rsi_value.unwrap_or(RSI_DEFAULT);
    let (zone, color) = rsi_zone(trend, rsi_value);

    // --- Range: trailing support/resistance on the signal scale ---
    let levels = support_resistance(signal_closes, LEVEL_WINDOW);

    // Setup classification runs on the served (defaulted) RSI value.
    let setup = classify_setup(trend, served_rsi);

    let analysis = narrative(instrument, trend, served_rsi, levels, setup);

    debug!(
        instrument = %instrument,
        trend = ?trend,
        rsi = served_rsi,
        setup = setup.badge(),
        "pair analysis complete"
    );

    let (support, resistance) = match levels {
        Some((s, r)) => (instrument.format_price(s), instrument.format_price(r)),
        None => ("N/A".to_string(), "N/A".to_string()),
    };

    PairInsight {
        price: instrument.format_price(price),
        trend: trend.label().to_string(),
        rsi: served_rsi,
        rsi_zone: zone.to_string(),
        rsi_color: color.to_string(),
        support,
        resistance,
        setup: setup.label().to_string(),
        setup_badge: setup.badge().to_string(),
        analysis,
    }
}

/// The neutral insight served while an instrument has no data at all.
pub fn placeholder(instrument: Instrument) -> PairInsight {
    PairInsight {
        price: "—".to_string(),
        trend: Trend::Neutral.label().to_string(),
        rsi: RSI_DEFAULT,
        rsi_zone: "unavailable".to_string(),
        rsi_color: "warning".to_string(),
        support: "N/A".to_string(),
        resistance: "N/A".to_string(),
        setup: Setup::Wait.label().to_string(),
        setup_badge: Setup::Wait.badge().to_string(),
        analysis: format!("Market data is still loading for {}.", instrument),
    }
}

/// Map an RSI reading to its zone label and dashboard color.
///
/// The mapping is deliberately asymmetric: the same numeric band reads as a
/// pullback opportunity when it agrees with the trend and as neutral when it
/// does not.
fn rsi_zone(trend: Trend, rsi_value: Option<f64>) -> (&'static str, &'static str) {
    let Some(value) = rsi_value else {
        return ("unavailable", "warning");
    };

    if value < 30.0 {
        ("oversold", "danger")
    } else if value < 50.0 {
        if trend == Trend::Bull {
            ("long-zone", "success")
        } else {
            ("neutral", "warning")
        }
    } else if value < 70.0 {
        if trend == Trend::Bear {
            ("short-zone", "success")
        } else {
            ("neutral", "warning")
        }
    } else {
        ("overbought", "danger")
    }
}

/// Setup bands: long on bull pullbacks (30, 60), short on bear rallies
/// (40, 70), both exclusive at the edges.
fn classify_setup(trend: Trend, rsi_value: f64) -> Setup {
    match trend {
        Trend::Bull if rsi_value > 30.0 && rsi_value < 60.0 => Setup::Long,
        Trend::Bear if rsi_value > 40.0 && rsi_value < 70.0 => Setup::Short,
        _ => Setup::Wait,
    }
}

/// Deterministic narrative: up to four clauses in fixed order, joined by
/// single spaces.
fn narrative(
    instrument: Instrument,
    trend: Trend,
    rsi_value: f64,
    levels: Option<(f64, f64)>,
    setup: Setup,
) -> String {
    let mut clauses: Vec<String> = Vec::with_capacity(4);

    clauses.push(match trend {
        Trend::Bull => format!(
            "{} trades above its 50-period EMA, keeping the bias bullish.",
            instrument
        ),
        Trend::Bear => format!(
            "{} trades below its 50-period EMA, keeping the bias bearish.",
            instrument
        ),
        Trend::Neutral => format!(
            "{} is showing no clear trend against its 50-period EMA.",
            instrument
        ),
    });

    clauses.push(if rsi_value < 35.0 {
        format!("RSI at {rsi_value} points to oversold conditions.")
    } else if rsi_value > 65.0 {
        format!("RSI at {rsi_value} points to overbought conditions.")
    } else {
        format!("RSI at {rsi_value} sits in the neutral range.")
    });

    if let Some((support, resistance)) = levels {
        clauses.push(format!(
            "Support is near {} with resistance at {}.",
            instrument.format_price(support),
            instrument.format_price(resistance)
        ));
    }

    clauses.push(match setup {
        Setup::Long => "Pullbacks toward support favour long entries.".to_string(),
        Setup::Short => "Rallies toward resistance favour short entries.".to_string(),
        Setup::Wait => "No clean setup — better to wait for confirmation.".to_string(),
    });

    clauses.join(" ")
}
