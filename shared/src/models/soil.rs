//! Soil health models

use serde::{Deserialize, Serialize};

/// Moisture below this percentage forces an immediate harvest
pub const LOW_SOIL_MOISTURE_PCT: f64 = 20.0;

/// Qualitative soil status derived from moisture
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SoilStatus {
    Good,
    #[serde(rename = "Low Moisture - Irrigate Soon")]
    LowMoisture,
}

impl std::fmt::Display for SoilStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SoilStatus::Good => write!(f, "Good"),
            SoilStatus::LowMoisture => write!(f, "Low Moisture - Irrigate Soon"),
        }
    }
}

/// Soil indicators for the farmer's region
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SoilSnapshot {
    pub moisture_pct: f64,
    pub nitrogen: f64,
    pub phosphorus: f64,
    pub potassium: f64,
    pub status: SoilStatus,
}

impl SoilSnapshot {
    pub fn new(moisture_pct: f64, nitrogen: f64, phosphorus: f64, potassium: f64) -> Self {
        Self {
            moisture_pct,
            nitrogen,
            phosphorus,
            potassium,
            status: classify_soil(moisture_pct),
        }
    }

    pub fn is_low_moisture(&self) -> bool {
        self.moisture_pct < LOW_SOIL_MOISTURE_PCT
    }
}

/// Classify soil status from moisture
pub fn classify_soil(moisture_pct: f64) -> SoilStatus {
    if moisture_pct < LOW_SOIL_MOISTURE_PCT {
        SoilStatus::LowMoisture
    } else {
        SoilStatus::Good
    }
}
