//! Price confidence band

use crate::models::ConfidenceBand;
use crate::types::round2;

/// ±10% around the recommended market's current price
pub fn confidence_band(price: f64) -> ConfidenceBand {
    ConfidenceBand {
        min: round2(price * 0.90),
        max: round2(price * 1.10),
    }
}
