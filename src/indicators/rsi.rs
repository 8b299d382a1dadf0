// =============================================================================
// Relative Strength Index (RSI) — trailing simple averages
// =============================================================================
//
// RSI measures the speed and magnitude of recent price changes to evaluate
// whether an instrument is overbought or oversold.
//
// Step 1 — Compute price changes (deltas) from consecutive closes.
// Step 2 — Average the gains and losses over the trailing `period` deltas.
// Step 3 — RS  = avg_gain / avg_loss
//          RSI = 100 - 100 / (1 + RS)
//
// If the average loss is exactly zero (no down moves in the window), RSI is
// defined as 100 — this avoids the division by zero. The result is rounded
// to one decimal place, which is the precision served to the dashboard.
// =============================================================================

/// Compute the current RSI over the trailing `period` price changes.
///
/// # Edge cases
/// - `period == 0` => `None`
/// - `closes.len() < period + 1` => `None` (need `period` deltas); callers
///   substitute a neutral default of 50.
/// - All-gain window => `Some(100.0)`.
/// - Non-finite input => `None`.
pub fn rsi(closes: &[f64], period: usize) -> Option<f64> {
    if period == 0 || closes.len() < period + 1 {
        return None;
    }

    // Only the trailing `period + 1` closes participate.
    let tail = &closes[closes.len() - period - 1..];

    let mut sum_gain = 0.0_f64;
    let mut sum_loss = 0.0_f64;
    for w in tail.windows(2) {
        let delta = w[1] - w[0];
        if !delta.is_finite() {
            return None;
        }
        if delta > 0.0 {
            sum_gain += delta;
        } else {
            sum_loss += delta.abs();
        }
    }

    let avg_gain = sum_gain / period as f64;
    let avg_loss = sum_loss / period as f64;

    let value = if avg_loss == 0.0 {
        100.0
    } else {
        let rs = avg_gain / avg_loss;
        100.0 - 100.0 / (1.0 + rs)
    };

    if !value.is_finite() {
        return None;
    }

    // One decimal place — the served precision.
    Some((value * 10.0).round() / 10.0)
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rsi_empty_input() {
        assert!(rsi(&[], 14).is_none());
    }

    #[test]
    fn rsi_period_zero() {
        assert!(rsi(&[1.0, 2.0, 3.0], 0).is_none());
    }

    #[test]
    fn rsi_insufficient_data() {
        // 14 closes give only 13 deltas — one short of period 14.
        let closes: Vec<f64> = (1..=14).map(|x| x as f64).collect();
        assert!(rsi(&closes, 14).is_none());
    }

    #[test]
    fn rsi_exactly_enough_data() {
        let closes: Vec<f64> = (1..=15).map(|x| x as f64).collect();
        assert_eq!(rsi(&closes, 14), Some(100.0));
    }

    #[test]
    fn rsi_all_gains_is_100() {
        let closes: Vec<f64> = (1..=30).map(|x| x as f64).collect();
        assert_eq!(rsi(&closes, 14), Some(100.0));
    }

    #[test]
    fn rsi_all_losses_is_0() {
        let closes: Vec<f64> = (1..=30).rev().map(|x| x as f64).collect();
        assert_eq!(rsi(&closes, 14), Some(0.0));
    }

    #[test]
    fn rsi_flat_market_is_100() {
        // No down moves at all, so avg_loss == 0 and the defined value is 100.
        let closes = vec![100.0; 30];
        assert_eq!(rsi(&closes, 14), Some(100.0));
    }

    #[test]
    fn rsi_range_check() {
        let closes = vec![
            44.34, 44.09, 44.15, 43.61, 44.33, 44.83, 45.10, 45.42, 45.84, 46.08,
            45.89, 46.03, 44.18, 44.22, 44.57, 43.42, 42.66, 43.13,
        ];
        let value = rsi(&closes, 14).unwrap();
        assert!((0.0..=100.0).contains(&value), "RSI {value} out of range");
    }

    #[test]
    fn rsi_uses_only_trailing_window() {
        // A wild prefix outside the trailing window must not change the value.
        let mut quiet: Vec<f64> = (1..=15).map(|x| 100.0 + x as f64 * 0.1).collect();
        let baseline = rsi(&quiet, 14).unwrap();

        let mut noisy = vec![500.0, 1.0, 900.0, 2.0];
        noisy.append(&mut quiet);
        assert_eq!(rsi(&noisy, 14), Some(baseline));
    }

    #[test]
    fn rsi_rounded_to_one_decimal() {
        let closes = vec![10.0, 11.0, 10.5, 11.2, 10.8, 11.5, 11.1, 11.9, 11.4, 12.0,
                          11.7, 12.3, 12.0, 12.6, 12.2];
        let value = rsi(&closes, 14).unwrap();
        assert!((value * 10.0 - (value * 10.0).round()).abs() < 1e-9);
    }
}
