//! Preservation advice for the haul

use crate::models::{PreservationAction, RiskLevel, WeatherSnapshot};

/// At most this many actions are shown to the farmer
pub const MAX_PRESERVATION_ACTIONS: usize = 3;

/// Transit hours beyond which fungal growth becomes a concern
pub const ANTI_FUNGAL_TRANSIT_HR: f64 = 8.0;

fn action(name: &str, cost: &str, effectiveness: &str) -> PreservationAction {
    PreservationAction {
        action_name: name.to_string(),
        cost_estimate: cost.to_string(),
        effectiveness: effectiveness.to_string(),
        rank: 0,
    }
}

/// Rank preservation actions in fixed priority order, keeping the top three
pub fn advise_preservation(
    crop_name: &str,
    risk_level: RiskLevel,
    weather: &WeatherSnapshot,
    transit_hours: f64,
) -> Vec<PreservationAction> {
    let mut actions = Vec::new();

    if risk_level == RiskLevel::High {
        actions.push(action(
            "Use Refrigerated Transport (Cold Chain)",
            "₹1500/trip",
            "Very High (Halts rot completely)",
        ));
    }

    if weather.condition.is_rain_class() {
        actions.push(action(
            "Cover with Heavy-Duty Tarpaulin",
            "₹300/trip",
            "High (Prevents waterlogging)",
        ));
    } else if weather.current_temp > 35.0 {
        actions.push(action(
            "Use Reflective Thermal Covers",
            "₹500/trip",
            "Medium (Reduces heat absorption)",
        ));
    }

    if crop_name.eq_ignore_ascii_case("tomato") {
        actions.push(action(
            "Use Ventilated Plastic Crates instead of Sacks",
            "₹50/crate",
            "High (Prevents 80% crushing)",
        ));
    } else if crop_name.eq_ignore_ascii_case("onion") || crop_name.eq_ignore_ascii_case("potato") {
        actions.push(action(
            "Ensure Dry Jute Bags / Mesh Sacks",
            "₹20/bag",
            "High (Allows breathing)",
        ));
    }

    if transit_hours > ANTI_FUNGAL_TRANSIT_HR {
        actions.push(action(
            "Apply Neem-based Anti-fungal spray pre-transit",
            "₹120/acre",
            "Medium (Delays fungal growth)",
        ));
    }

    if actions.is_empty() {
        actions.push(action(
            "Basic Sorting & Grading before Transport",
            "Labor Intensive",
            "Medium (Removes infected crops)",
        ));
    }

    for (i, a) in actions.iter_mut().enumerate() {
        a.rank = i as u32 + 1;
    }
    actions.truncate(MAX_PRESERVATION_ACTIONS);
    actions
}
