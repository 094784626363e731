//! Market scoring and ranking

use serde::{Deserialize, Serialize};

use super::spoilage::{effective_transit_hours, estimate_spoilage_pct};
use crate::models::{Crop, CropMaturity, MarketCandidate, MarketOption, RoadQuality, VolumeTrend, WeatherSnapshot};
use crate::types::{round2, GpsCoordinates};

/// Tunable constants of the scoring model
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ScoringConstants {
    /// Fuel, labour and depreciation per transit hour, in currency
    pub transport_cost_per_hour: f64,
    /// Score multiplier for markets with an arrival glut
    pub high_volume_multiplier: f64,
    /// Score multiplier for markets with scarce arrivals
    pub low_volume_multiplier: f64,
    /// Crowd reports needed before they override the official price
    pub min_crowd_reports: u32,
}

impl Default for ScoringConstants {
    fn default() -> Self {
        Self {
            transport_cost_per_hour: 50.0,
            high_volume_multiplier: 0.85,
            low_volume_multiplier: 1.05,
            min_crowd_reports: 3,
        }
    }
}

/// Request-wide inputs shared by every market being scored
#[derive(Debug, Clone, Copy)]
pub struct ScoringContext<'a> {
    pub farmer_location: GpsCoordinates,
    pub crop: &'a Crop,
    pub weather: &'a WeatherSnapshot,
    pub road_quality: RoadQuality,
    pub crop_maturity: CropMaturity,
    pub constants: &'a ScoringConstants,
}

/// A market option together with the unrounded values used for ranking
#[derive(Debug, Clone)]
pub struct ScoredMarket {
    pub option: MarketOption,
    /// Unrounded score; ranking never uses the presentation value
    pub score: f64,
    /// Transit hours as resolved, before the road-quality penalty
    pub raw_transit_hours: f64,
}

/// Score one candidate market given its resolved transit time
pub fn score_market(
    ctx: &ScoringContext<'_>,
    candidate: &MarketCandidate,
    transit_hours: f64,
) -> ScoredMarket {
    let penalized_transit = effective_transit_hours(transit_hours, ctx.road_quality);
    let spoilage_pct = estimate_spoilage_pct(
        ctx.crop.baseline_spoilage_rate,
        transit_hours,
        ctx.weather.temp_delta,
        ctx.road_quality,
        ctx.crop_maturity,
    );

    let transport_penalty = transit_hours * ctx.constants.transport_cost_per_hour;
    let effective_price = candidate.current_price * (1.0 - spoilage_pct / 100.0);
    let net_profit = effective_price - transport_penalty;

    let multiplier = volume_multiplier(candidate.arrival_volume_trend, ctx.constants)
        * ground_truth_ratio(ctx, candidate);
    let score = net_profit * multiplier;
    let net_profit = net_profit * multiplier;

    let distance_km = ctx.farmer_location.distance_km_to(&candidate.location());

    ScoredMarket {
        option: MarketOption {
            market_name: candidate.market_name.clone(),
            current_price: candidate.current_price,
            distance_km: round2(distance_km),
            transit_time_hr: round2(penalized_transit),
            spoilage_loss: round2(spoilage_pct),
            net_profit_estimate: round2(net_profit),
            market_score: round2(score),
            arrival_volume_trend: candidate.arrival_volume_trend,
            price_trend_pct: candidate.price_trend_pct,
            is_recommended: false,
        },
        score,
        raw_transit_hours: transit_hours,
    }
}

fn volume_multiplier(trend: VolumeTrend, constants: &ScoringConstants) -> f64 {
    match trend {
        VolumeTrend::High => constants.high_volume_multiplier,
        VolumeTrend::Low => constants.low_volume_multiplier,
        VolumeTrend::Normal => 1.0,
    }
}

/// Ratio pulling the score toward crowd-observed prices, or 1 when the
/// reports are too few to trust
fn ground_truth_ratio(ctx: &ScoringContext<'_>, candidate: &MarketCandidate) -> f64 {
    let Some(truth) = candidate.ground_truth else {
        return 1.0;
    };
    if truth.report_count < ctx.constants.min_crowd_reports
        || truth.avg_reported_price <= 0.0
        || candidate.current_price <= 0.0
    {
        return 1.0;
    }

    let ratio = truth.avg_reported_price / candidate.current_price;
    tracing::debug!(
        market = %candidate.market_name,
        crop = %ctx.crop.name,
        reports = truth.report_count,
        official_price = candidate.current_price,
        crowd_price = truth.avg_reported_price,
        ratio,
        "Ground truth override active"
    );
    ratio
}

/// Sort by unrounded score, highest first, and flag the winner.
///
/// The sort is stable, so equal scores keep their input order.
pub fn rank_markets(mut scored: Vec<ScoredMarket>) -> Vec<ScoredMarket> {
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    if let Some(best) = scored.first_mut() {
        best.option.is_recommended = true;
    }
    scored
}
