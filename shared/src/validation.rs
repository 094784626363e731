//! Input validation for the decision engine
//!
//! Checks run before any scoring so the engine only sees well-formed input.

use crate::models::Crop;

// ============================================================================
// Crop Validations
// ============================================================================

/// Validate crop parameters used by the spoilage model
pub fn validate_crop(crop: &Crop) -> Result<(), &'static str> {
    if !crop.baseline_spoilage_rate.is_finite() {
        return Err("Baseline spoilage rate must be a finite number");
    }
    if crop.baseline_spoilage_rate < 0.0 {
        return Err("Baseline spoilage rate cannot be negative");
    }
    if !crop.ideal_temp.is_finite() {
        return Err("Ideal temperature must be a finite number");
    }
    Ok(())
}

// ============================================================================
// Market Validations
// ============================================================================

/// Validate a market price in currency per quintal
pub fn validate_price(price: f64) -> Result<(), &'static str> {
    if !price.is_finite() {
        return Err("Price must be a finite number");
    }
    if price < 0.0 {
        return Err("Price cannot be negative");
    }
    Ok(())
}

// ============================================================================
// Location Validations
// ============================================================================

/// Validate latitude/longitude ranges
pub fn validate_coordinates(lat: f64, lon: f64) -> Result<(), &'static str> {
    if !(-90.0..=90.0).contains(&lat) {
        return Err("Latitude must be between -90 and 90");
    }
    if !(-180.0..=180.0).contains(&lon) {
        return Err("Longitude must be between -180 and 180");
    }
    Ok(())
}
