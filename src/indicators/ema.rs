// =============================================================================
// Exponential Moving Average (EMA)
// =============================================================================
//
// EMA gives more weight to recent prices, making it more responsive to new
// information than the Simple Moving Average (SMA).
//
// Formula:
//   k     = 2 / (period + 1)
//   EMA_t = (close_t - EMA_{t-1}) * k + EMA_{t-1}
//
// The very first EMA value is seeded with the SMA of the first `period`
// closes. Only the final value of the trajectory is returned — the dashboard
// never plots the full series.
// =============================================================================

/// Compute the final EMA value for the given `closes` and look-back `period`.
///
/// # Edge cases
/// - `period == 0` => `None` (division by zero guard)
/// - `closes.len() < period` => `None` (insufficient data)
/// - Non-finite intermediate values => `None`; a broken series must not be
///   trusted downstream.
pub fn ema(closes: &[f64], period: usize) -> Option<f64> {
    if period == 0 || closes.len() < period {
        return None;
    }

    let k = 2.0 / (period + 1) as f64;

    // Seed: SMA of the first `period` values.
    let sma: f64 = closes[..period].iter().sum::<f64>() / period as f64;
    if !sma.is_finite() {
        return None;
    }

    let mut prev = sma;
    for &close in &closes[period..] {
        let next = (close - prev) * k + prev;
        if !next.is_finite() {
            return None;
        }
        prev = next;
    }

    Some(prev)
}
