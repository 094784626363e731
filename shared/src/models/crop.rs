//! Crop models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An agricultural crop and its spoilage parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Crop {
    pub id: String,
    pub name: String,
    /// Ideal storage and handling temperature in °C
    pub ideal_temp: f64,
    /// Percentage of value lost per transit hour at ideal conditions
    pub baseline_spoilage_rate: f64,
    pub created_at: DateTime<Utc>,
}

/// Harvest maturity stage reported by the farmer
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum CropMaturity {
    Early,
    #[default]
    Optimal,
    Late,
}

impl CropMaturity {
    /// Parse a maturity label, falling back to `Optimal` for unknown input
    pub fn parse_or_default(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "early" => CropMaturity::Early,
            "late" => CropMaturity::Late,
            _ => CropMaturity::Optimal,
        }
    }

    pub fn is_late(&self) -> bool {
        matches!(self, CropMaturity::Late)
    }
}

impl std::fmt::Display for CropMaturity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CropMaturity::Early => write!(f, "Early"),
            CropMaturity::Optimal => write!(f, "Optimal"),
            CropMaturity::Late => write!(f, "Late"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_maturity() {
        assert_eq!(CropMaturity::parse_or_default("Late"), CropMaturity::Late);
        assert_eq!(CropMaturity::parse_or_default("late"), CropMaturity::Late);
        assert_eq!(CropMaturity::parse_or_default("early"), CropMaturity::Early);
        assert_eq!(CropMaturity::parse_or_default("ripe-ish"), CropMaturity::Optimal);
    }
}
