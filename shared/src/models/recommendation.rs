//! Recommendation output models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{MarketOption, SoilSnapshot, StorageOption, WeatherSnapshot};

/// What the farmer should do with the harvest
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum Action {
    #[default]
    #[serde(rename = "Sell at Mandi")]
    SellAtMandi,
    Wait,
    #[serde(rename = "Delay & Store Locally")]
    DelayAndStore,
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::SellAtMandi => write!(f, "Sell at Mandi"),
            Action::Wait => write!(f, "Wait"),
            Action::DelayAndStore => write!(f, "Delay & Store Locally"),
        }
    }
}

/// When to harvest
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum HarvestWindow {
    #[default]
    #[serde(rename = "Harvest Today")]
    HarvestToday,
    #[serde(rename = "Optimal: Next 2-3 Days")]
    OptimalNextDays,
    #[serde(rename = "Delay Harvest (3-5 Days)")]
    DelayForPrice,
    #[serde(rename = "Delay Harvest (4-7 Days)")]
    DelayForWarmth,
}

impl std::fmt::Display for HarvestWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HarvestWindow::HarvestToday => write!(f, "Harvest Today"),
            HarvestWindow::OptimalNextDays => write!(f, "Optimal: Next 2-3 Days"),
            HarvestWindow::DelayForPrice => write!(f, "Delay Harvest (3-5 Days)"),
            HarvestWindow::DelayForWarmth => write!(f, "Delay Harvest (4-7 Days)"),
        }
    }
}

/// Spoilage risk during transit
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "LOW"),
            RiskLevel::Medium => write!(f, "MEDIUM"),
            RiskLevel::High => write!(f, "HIGH"),
        }
    }
}

/// Price range communicated to the farmer
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ConfidenceBand {
    pub min: f64,
    pub max: f64,
}

/// A suggested preservation method, ranked by priority
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PreservationAction {
    pub action_name: String,
    pub cost_estimate: String,
    pub effectiveness: String,
    pub rank: u32,
}

/// The complete advice returned for one request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub farmer_id: String,
    pub crop_name: String,
    pub action: Action,
    pub harvest_window: HarvestWindow,
    pub recommended_market: String,
    pub market_score: f64,
    pub confidence_band: ConfidenceBand,
    /// One-line summary shown above the reasons
    pub headline: String,
    /// Numbered reasons in rule order
    pub reasons: Vec<String>,
    pub risk_level: RiskLevel,
    pub weather: WeatherSnapshot,
    #[serde(rename = "soil_health")]
    pub soil: SoilSnapshot,
    pub markets: Vec<MarketOption>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage: Option<StorageOption>,
    #[serde(rename = "preservation_actions")]
    pub preservation: Vec<PreservationAction>,
    pub generated_at: DateTime<Utc>,
}

impl Recommendation {
    /// Reasons joined one per line
    pub fn why(&self) -> String {
        self.reasons.join("\n")
    }

    /// The market flagged as the top-ranked option
    pub fn best_market(&self) -> Option<&MarketOption> {
        self.markets.iter().find(|m| m.is_recommended)
    }
}
