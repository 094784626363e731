//! WebAssembly module for the Mandi Advisor
//!
//! Provides client-side computation for:
//! - Price trend forecasts and arrival volume trends
//! - Spoilage risk and loss estimates
//! - Confidence bands and distances
//! - Preservation advice

use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::engine::*;
pub use shared::models::*;
pub use shared::types::*;

/// Projected 7-day price change in percent, rounded to 2 decimals
#[wasm_bindgen]
pub fn forecast_price_trend(prices: Vec<f64>) -> f64 {
    round2(forecast_trend_pct(&prices))
}

/// Arrival volume trend ("HIGH", "NORMAL" or "LOW") from recent prices
#[wasm_bindgen]
pub fn classify_arrival_volume(prices: Vec<f64>) -> String {
    classify_volume_trend(&prices).to_string()
}

/// Spoilage risk ("LOW", "MEDIUM" or "HIGH") for a haul
#[wasm_bindgen]
pub fn classify_spoilage_risk(
    temp_c: f64,
    transit_hours: f64,
    road_quality: &str,
    crop_maturity: &str,
) -> String {
    classify_risk(
        temp_c,
        transit_hours,
        RoadQuality::parse_or_default(road_quality),
        CropMaturity::parse_or_default(crop_maturity),
    )
    .to_string()
}

/// Estimated percentage of value lost in transit
#[wasm_bindgen]
pub fn estimate_spoilage(
    baseline_rate: f64,
    transit_hours: f64,
    temp_delta: f64,
    road_quality: &str,
    crop_maturity: &str,
) -> f64 {
    round2(estimate_spoilage_pct(
        baseline_rate,
        transit_hours,
        temp_delta,
        RoadQuality::parse_or_default(road_quality),
        CropMaturity::parse_or_default(crop_maturity),
    ))
}

fn band_bounds(price: f64) -> [f64; 2] {
    let band = confidence_band(price);
    [band.min, band.max]
}

/// ±10% price band as `[min, max]`
#[wasm_bindgen]
pub fn price_confidence_band(price: f64) -> js_sys::Float64Array {
    js_sys::Float64Array::from(&band_bounds(price)[..])
}

/// Great-circle distance in kilometres
#[wasm_bindgen]
pub fn distance_between(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    distance_km(lat1, lon1, lat2, lon2)
}

/// Ranked preservation actions as a JSON array
#[wasm_bindgen]
pub fn preservation_actions(
    crop_name: &str,
    temp_c: f64,
    humidity: f64,
    ideal_temp: f64,
    weather_code: i32,
    transit_hours: f64,
    road_quality: &str,
    crop_maturity: &str,
) -> Result<String, JsValue> {
    let weather = WeatherSnapshot::new(
        temp_c,
        humidity,
        ideal_temp,
        WeatherCondition::from_wmo_code(weather_code),
    );
    let risk = classify_risk(
        temp_c,
        transit_hours,
        RoadQuality::parse_or_default(road_quality),
        CropMaturity::parse_or_default(crop_maturity),
    );
    let actions = advise_preservation(crop_name, risk, &weather, transit_hours);

    serde_json::to_string(&actions)
        .map_err(|e| JsValue::from_str(&format!("Failed to serialize actions: {}", e)))
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::wasm_bindgen_test;

    #[wasm_bindgen_test]
    fn test_price_confidence_band_array() {
        let band = price_confidence_band(2500.0);
        assert_eq!(band.length(), 2);
        assert_eq!(band.get_index(0), 2250.0);
        assert_eq!(band.get_index(1), 2750.0);
    }
}
