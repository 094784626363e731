//! Price trend forecasting by ordinary least squares

/// Most recent price points used for any history-based signal
pub const MAX_HISTORY_POINTS: usize = 15;

/// Fewer points than this carry no usable trend
pub const MIN_TREND_POINTS: usize = 3;

/// Days projected ahead by the forecast
pub const FORECAST_HORIZON_DAYS: f64 = 7.0;

/// Project the percentage price change over the next week.
///
/// Fits `y = a + b·x` over index positions of the most recent
/// [`MAX_HISTORY_POINTS`] prices and extrapolates the slope
/// [`FORECAST_HORIZON_DAYS`] steps past the last price. Returns 0 when there
/// is not enough signal or the last price is not positive.
pub fn forecast_trend_pct(prices: &[f64]) -> f64 {
    if prices.len() < MIN_TREND_POINTS {
        return 0.0;
    }

    let window = &prices[prices.len().saturating_sub(MAX_HISTORY_POINTS)..];
    let Some(slope) = least_squares_slope(window) else {
        return 0.0;
    };

    let current = window[window.len() - 1];
    if current <= 0.0 {
        return 0.0;
    }

    let projected = current + slope * FORECAST_HORIZON_DAYS;
    (projected - current) / current * 100.0
}

/// Slope of the least-squares line through `(i, ys[i])`.
///
/// `None` when the design is degenerate (fewer than two points).
pub fn least_squares_slope(ys: &[f64]) -> Option<f64> {
    let n = ys.len() as f64;
    let (mut sum_x, mut sum_y, mut sum_xy, mut sum_x2) = (0.0, 0.0, 0.0, 0.0);

    for (i, y) in ys.iter().enumerate() {
        let x = i as f64;
        sum_x += x;
        sum_y += y;
        sum_xy += x * y;
        sum_x2 += x * x;
    }

    let denom = n * sum_x2 - sum_x * sum_x;
    if denom == 0.0 {
        return None;
    }
    Some((n * sum_xy - sum_x * sum_y) / denom)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_series() {
        let pct = forecast_trend_pct(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        assert!((pct - 140.0).abs() < 1e-9, "got {}", pct);
    }

    #[test]
    fn test_too_few_points() {
        assert_eq!(forecast_trend_pct(&[]), 0.0);
        assert_eq!(forecast_trend_pct(&[100.0]), 0.0);
        assert_eq!(forecast_trend_pct(&[100.0, 200.0]), 0.0);
    }

    #[test]
    fn test_degenerate_design() {
        assert_eq!(least_squares_slope(&[]), None);
        assert_eq!(least_squares_slope(&[42.0]), None);
    }

    #[test]
    fn test_flat_series_is_zero() {
        assert_eq!(forecast_trend_pct(&[2500.0; 6]), 0.0);
    }

    #[test]
    fn test_non_positive_last_price() {
        assert_eq!(forecast_trend_pct(&[3.0, 2.0, 0.0]), 0.0);
        assert_eq!(forecast_trend_pct(&[3.0, 2.0, -1.0]), 0.0);
    }

    #[test]
    fn test_uses_only_last_fifteen_points() {
        // A wild early segment must not affect the fit
        let mut prices = vec![10_000.0, 1.0, 10_000.0, 1.0, 10_000.0];
        prices.extend((1..=15).map(|p| p as f64));
        let expected = forecast_trend_pct(&(1..=15).map(|p| p as f64).collect::<Vec<_>>());
        assert_eq!(forecast_trend_pct(&prices), expected);
        // slope 1 projected 7 days past 15
        assert!((expected - 7.0 / 15.0 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_falling_series_is_negative() {
        let pct = forecast_trend_pct(&[2500.0, 2480.0, 2420.0, 2380.0, 2350.0]);
        assert!(pct < -2.0, "got {}", pct);
    }
}
