//! Arrival-volume inference from price pressure
//!
//! A sharp drop in recent prices relative to the preceding week implies an
//! arrival glut; a sharp rise implies scarcity.

use crate::models::VolumeTrend;

/// Fewer points than this classify as NORMAL
pub const MIN_VOLUME_POINTS: usize = 5;

/// Recent average at or below this fraction of the past average means HIGH arrivals
pub const GLUT_RATIO: f64 = 0.85;

/// Recent average above this fraction of the past average means LOW arrivals
pub const SCARCITY_RATIO: f64 = 1.15;

const RECENT_WINDOW: usize = 3;
const PAST_WINDOW: usize = 7;

/// Classify the arrival-volume trend of a chronologically ordered price series
pub fn classify_volume_trend(prices: &[f64]) -> VolumeTrend {
    let n = prices.len();
    if n < MIN_VOLUME_POINTS {
        return VolumeTrend::Normal;
    }

    let recent = &prices[n - RECENT_WINDOW..];
    let recent_avg = recent.iter().sum::<f64>() / RECENT_WINDOW as f64;

    let past = &prices[n.saturating_sub(RECENT_WINDOW + PAST_WINDOW)..n - RECENT_WINDOW];
    if past.is_empty() {
        return VolumeTrend::Normal;
    }
    let past_avg = past.iter().sum::<f64>() / past.len() as f64;

    if recent_avg <= past_avg * GLUT_RATIO {
        VolumeTrend::High
    } else if recent_avg > past_avg * SCARCITY_RATIO {
        VolumeTrend::Low
    } else {
        VolumeTrend::Normal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(past: f64, recent: f64) -> Vec<f64> {
        let mut prices = vec![past; 7];
        prices.extend([recent; 3]);
        prices
    }

    #[test]
    fn test_short_series_is_normal() {
        assert_eq!(classify_volume_trend(&[100.0, 50.0, 20.0, 10.0]), VolumeTrend::Normal);
    }

    #[test]
    fn test_price_crash_is_high() {
        assert_eq!(classify_volume_trend(&series(100.0, 84.0)), VolumeTrend::High);
    }

    #[test]
    fn test_exactly_85_percent_is_high() {
        assert_eq!(classify_volume_trend(&series(100.0, 85.0)), VolumeTrend::High);
        assert_eq!(classify_volume_trend(&series(2000.0, 1700.0)), VolumeTrend::High);
    }

    #[test]
    fn test_normal_band() {
        assert_eq!(classify_volume_trend(&series(100.0, 86.0)), VolumeTrend::Normal);
        assert_eq!(classify_volume_trend(&series(100.0, 114.0)), VolumeTrend::Normal);
    }

    #[test]
    fn test_price_spike_is_low() {
        assert_eq!(classify_volume_trend(&series(100.0, 116.0)), VolumeTrend::Low);
    }

    #[test]
    fn test_five_points_use_two_past_points() {
        // past = [100, 100], recent = [80, 80, 80]
        let prices = [100.0, 100.0, 80.0, 80.0, 80.0];
        assert_eq!(classify_volume_trend(&prices), VolumeTrend::High);
    }

    #[test]
    fn test_only_seven_past_points_considered() {
        // The leading outlier sits at n-11 and is outside the past window
        let mut prices = vec![1.0];
        prices.extend(series(100.0, 100.0));
        assert_eq!(classify_volume_trend(&prices), VolumeTrend::Normal);
    }
}
