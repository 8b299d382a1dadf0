// =============================================================================
// Support / Resistance Levels
// =============================================================================
//
// Support is the minimum close and resistance the maximum close over the
// trailing `window` elements only — earlier history is ignored so the levels
// track the current range rather than all-time extremes.

/// Compute `(support, resistance)` over the trailing `window` closes.
///
/// # Edge cases
/// - `window == 0` => `None`
/// - `closes.len() < window` => `None` (insufficient data)
/// - Non-finite values inside the window => `None`
pub fn support_resistance(closes: &[f64], window: usize) -> Option<(f64, f64)> {
    if window == 0 || closes.len() < window {
        return None;
    }

    let tail = &closes[closes.len() - window..];

    let mut support = f64::INFINITY;
    let mut resistance = f64::NEG_INFINITY;
    for &close in tail {
        if !close.is_finite() {
            return None;
        }
        support = support.min(close);
        resistance = resistance.max(close);
    }

    Some((support, resistance))
}
