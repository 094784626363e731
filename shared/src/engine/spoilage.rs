//! Spoilage risk and loss estimation

use crate::models::{CropMaturity, RiskLevel, RoadQuality};

/// Vibration and bruising penalty applied to transit time on unpaved roads
pub const UNPAVED_TRANSIT_MULTIPLIER: f64 = 1.8;

/// Late-harvest produce behaves as if it were this much hotter
pub const LATE_MATURITY_TEMP_OFFSET_C: f64 = 5.0;

/// Late-harvest produce decays this many times faster from ambient heat
pub const LATE_MATURITY_DECAY_MULTIPLIER: f64 = 2.0;

/// Transit time after the road-quality penalty
pub fn effective_transit_hours(transit_hours: f64, road_quality: RoadQuality) -> f64 {
    match road_quality {
        RoadQuality::Unpaved => transit_hours * UNPAVED_TRANSIT_MULTIPLIER,
        RoadQuality::Paved | RoadQuality::Mixed => transit_hours,
    }
}

/// Classify spoilage risk during transit.
///
/// HIGH needs both heat and a long haul; either one alone is MEDIUM.
pub fn classify_risk(
    temp_c: f64,
    transit_hours: f64,
    road_quality: RoadQuality,
    crop_maturity: CropMaturity,
) -> RiskLevel {
    let effective_transit = effective_transit_hours(transit_hours, road_quality);
    let effective_temp = if crop_maturity.is_late() {
        temp_c + LATE_MATURITY_TEMP_OFFSET_C
    } else {
        temp_c
    };

    if effective_temp > 35.0 && effective_transit > 10.0 {
        RiskLevel::High
    } else if effective_temp > 30.0 || effective_transit > 5.0 {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

/// Estimated percentage of value lost over the haul
pub fn estimate_spoilage_pct(
    baseline_rate: f64,
    transit_hours: f64,
    temp_delta: f64,
    road_quality: RoadQuality,
    crop_maturity: CropMaturity,
) -> f64 {
    let effective_transit = effective_transit_hours(transit_hours, road_quality);
    baseline_rate * effective_transit * temperature_factor(temp_delta, crop_maturity)
}

fn temperature_factor(temp_delta: f64, crop_maturity: CropMaturity) -> f64 {
    let factor = 1.0 + temp_delta.abs() / 10.0;
    if crop_maturity.is_late() {
        factor * LATE_MATURITY_DECAY_MULTIPLIER
    } else {
        factor
    }
}
