//! Market (mandi) models

use serde::{Deserialize, Serialize};

use crate::engine::{classify_volume_trend, forecast_trend_pct, MAX_HISTORY_POINTS};
use crate::types::{round2, GpsCoordinates};

/// Road surface between the farm and a market
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum RoadQuality {
    Paved,
    #[default]
    Mixed,
    Unpaved,
}

impl RoadQuality {
    /// Parse a road quality label, falling back to `Mixed` for unknown input
    pub fn parse_or_default(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "paved" => RoadQuality::Paved,
            "unpaved" => RoadQuality::Unpaved,
            _ => RoadQuality::Mixed,
        }
    }
}

impl std::fmt::Display for RoadQuality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RoadQuality::Paved => write!(f, "paved"),
            RoadQuality::Mixed => write!(f, "mixed"),
            RoadQuality::Unpaved => write!(f, "unpaved"),
        }
    }
}

/// Inferred arrival-volume signal at a market
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum VolumeTrend {
    /// Arrival glut depressing prices
    High,
    #[default]
    Normal,
    /// Scarcity lifting prices
    Low,
}

impl std::fmt::Display for VolumeTrend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VolumeTrend::High => write!(f, "HIGH"),
            VolumeTrend::Normal => write!(f, "NORMAL"),
            VolumeTrend::Low => write!(f, "LOW"),
        }
    }
}

/// Crowd-reported price aggregate over the trailing 24 hours
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct GroundTruth {
    pub avg_reported_price: f64,
    pub report_count: u32,
}

/// A market considered for the sale, with its derived signals
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketCandidate {
    pub market_name: String,
    /// Current price per quintal (100 kg)
    pub current_price: f64,
    pub market_lat: f64,
    pub market_lon: f64,
    /// Oldest first, at most 15 points
    pub price_history: Vec<f64>,
    pub arrival_volume_trend: VolumeTrend,
    /// Projected 7-day price change in percent, rounded to 2 decimals
    pub price_trend_pct: f64,
    pub ground_truth: Option<GroundTruth>,
}

impl MarketCandidate {
    /// Build a candidate and derive its volume trend and price forecast from history.
    ///
    /// An empty history is replaced by the current price alone.
    pub fn from_history(
        market_name: impl Into<String>,
        current_price: f64,
        location: GpsCoordinates,
        mut price_history: Vec<f64>,
    ) -> Self {
        if price_history.is_empty() {
            price_history.push(current_price);
        }
        if price_history.len() > MAX_HISTORY_POINTS {
            price_history.drain(..price_history.len() - MAX_HISTORY_POINTS);
        }

        Self {
            market_name: market_name.into(),
            current_price,
            market_lat: location.latitude,
            market_lon: location.longitude,
            arrival_volume_trend: classify_volume_trend(&price_history),
            price_trend_pct: round2(forecast_trend_pct(&price_history)),
            price_history,
            ground_truth: None,
        }
    }

    pub fn with_ground_truth(mut self, ground_truth: GroundTruth) -> Self {
        self.ground_truth = Some(ground_truth);
        self
    }

    pub fn location(&self) -> GpsCoordinates {
        GpsCoordinates::new(self.market_lat, self.market_lon)
    }
}

/// A scored market presented to the farmer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketOption {
    pub market_name: String,
    pub current_price: f64,
    pub distance_km: f64,
    /// Transit hours after the road-quality penalty
    pub transit_time_hr: f64,
    #[serde(rename = "spoilage_loss_pct")]
    pub spoilage_loss: f64,
    pub net_profit_estimate: f64,
    pub market_score: f64,
    pub arrival_volume_trend: VolumeTrend,
    pub price_trend_pct: f64,
    #[serde(rename = "is_ai_recommended")]
    pub is_recommended: bool,
}
