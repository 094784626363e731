//! The decision and scoring engine
//!
//! Everything here is pure: inputs are resolved by the caller, and the same
//! input always yields the same recommendation.

mod confidence;
mod decision;
mod geo;
mod preservation;
mod scoring;
mod spoilage;
mod trend;
mod volume;

pub use confidence::*;
pub use decision::*;
pub use geo::*;
pub use preservation::*;
pub use scoring::*;
pub use spoilage::*;
pub use trend::*;
pub use volume::*;

use chrono::{DateTime, Utc};

use crate::error::{EngineError, EngineResult};
use crate::models::{
    Crop, CropMaturity, Farmer, MarketCandidate, MarketOption, Recommendation, RiskLevel,
    RoadQuality, SoilSnapshot, StorageOption, VolumeTrend, WeatherSnapshot,
};
use crate::types::round2;
use crate::validation::{validate_crop, validate_price};

/// Fully resolved input for one recommendation
#[derive(Debug, Clone)]
pub struct EngineInput {
    pub farmer: Farmer,
    pub crop: Crop,
    pub markets: Vec<MarketCandidate>,
    /// Transit hours per market, index-aligned with `markets`
    pub transit_hours: Vec<f64>,
    pub weather: WeatherSnapshot,
    pub soil: SoilSnapshot,
    pub road_quality: RoadQuality,
    pub crop_maturity: CropMaturity,
    /// Nearest storage facility, used when the best market is glutted
    pub storage: StorageOption,
    pub constants: ScoringConstants,
    pub generated_at: DateTime<Utc>,
}

/// Score, rank and decide for one farmer and crop
pub fn compute_recommendation(input: &EngineInput) -> EngineResult<Recommendation> {
    validate_input(input)?;

    let ctx = ScoringContext {
        farmer_location: input.farmer.location(),
        crop: &input.crop,
        weather: &input.weather,
        road_quality: input.road_quality,
        crop_maturity: input.crop_maturity,
        constants: &input.constants,
    };

    let scored: Vec<ScoredMarket> = input
        .markets
        .iter()
        .zip(&input.transit_hours)
        .map(|(candidate, &hours)| score_market(&ctx, candidate, hours))
        .collect();
    let ranked = rank_markets(scored);

    let Some(best) = ranked.first() else {
        return Err(EngineError::NoCandidateMarkets);
    };
    let best_option = best.option.clone();
    let best_raw_transit = best.raw_transit_hours;

    let band = confidence_band(best_option.current_price);
    let mut decision = decide(&DecisionInputs {
        crop: &input.crop,
        weather: &input.weather,
        soil: &input.soil,
        best: &best_option,
        band,
    });

    let mut storage = None;
    if best_option.arrival_volume_trend == VolumeTrend::High {
        decision = apply_staggering(decision, &best_option, &input.weather, band, &input.storage);
        storage = Some(input.storage.clone());
    }

    let risk_level = classify_risk(
        input.weather.current_temp,
        best_raw_transit,
        input.road_quality,
        input.crop_maturity,
    );
    let preservation = advise_preservation(
        &input.crop.name,
        risk_level,
        &input.weather,
        best_option.transit_time_hr,
    );

    tracing::debug!(
        farmer = %input.farmer.id,
        crop = %input.crop.name,
        market = %best_option.market_name,
        action = %decision.action,
        risk = %risk_level,
        "Recommendation computed"
    );

    Ok(Recommendation {
        farmer_id: input.farmer.id.clone(),
        crop_name: input.crop.name.clone(),
        action: decision.action,
        harvest_window: decision.harvest_window,
        recommended_market: best_option.market_name.clone(),
        market_score: round2(best.score),
        confidence_band: band,
        headline: headline(&best_option, risk_level, &input.weather),
        reasons: decision.numbered_reasons(),
        risk_level,
        weather: input.weather.clone(),
        soil: input.soil.clone(),
        markets: ranked.into_iter().map(|s| s.option).collect(),
        storage,
        preservation,
        generated_at: input.generated_at,
    })
}

/// One-line summary placed above the numbered reasons
pub fn headline(best: &MarketOption, risk_level: RiskLevel, weather: &WeatherSnapshot) -> String {
    format!(
        "Sell at {}. It offers ₹{:.2} more after transport costs. Spoilage risk during transit is {}. Weather context: {}% chance of rain tomorrow.",
        best.market_name,
        best.net_profit_estimate,
        risk_level,
        weather.condition.rain_probability_pct()
    )
}

fn validate_input(input: &EngineInput) -> EngineResult<()> {
    if input.markets.is_empty() {
        return Err(EngineError::NoCandidateMarkets);
    }
    if input.markets.len() != input.transit_hours.len() {
        return Err(EngineError::TransitCountMismatch {
            expected: input.markets.len(),
            actual: input.transit_hours.len(),
        });
    }
    validate_crop(&input.crop).map_err(EngineError::InvalidCrop)?;
    for market in &input.markets {
        if validate_price(market.current_price).is_err() {
            return Err(EngineError::NegativePrice {
                market: market.market_name.clone(),
                price: market.current_price,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Action, ConfidenceBand, WeatherCondition};
    use crate::types::GpsCoordinates;

    fn farmer() -> Farmer {
        Farmer {
            id: "farmer-1".to_string(),
            location_lat: 28.6139,
            location_lon: 77.2090,
            phone: "+919876543210".to_string(),
            created_at: Utc::now(),
        }
    }

    fn tomato() -> Crop {
        Crop {
            id: "tomato".to_string(),
            name: "Tomato".to_string(),
            ideal_temp: 25.0,
            baseline_spoilage_rate: 2.5,
            created_at: Utc::now(),
        }
    }

    fn candidate(name: &str, price: f64, trend: VolumeTrend) -> MarketCandidate {
        let mut m = MarketCandidate::from_history(name, price, GpsCoordinates::new(28.7041, 77.1525), vec![price]);
        m.arrival_volume_trend = trend;
        m
    }

    fn input(markets: Vec<MarketCandidate>, transit_hours: Vec<f64>) -> EngineInput {
        let crop = tomato();
        EngineInput {
            farmer: farmer(),
            weather: WeatherSnapshot::new(32.4, 68.0, crop.ideal_temp, WeatherCondition::PartlyCloudy),
            crop,
            markets,
            transit_hours,
            soil: SoilSnapshot::new(30.0, 40.0, 20.0, 25.0),
            road_quality: RoadQuality::Mixed,
            crop_maturity: CropMaturity::Optimal,
            storage: StorageOption {
                name: "Narela Cold Storage".to_string(),
                distance_km: 27.4,
                price_per_kg: 2.0,
                capacity_mt: 500.0,
            },
            constants: ScoringConstants::default(),
            generated_at: Utc::now(),
        }
    }

    #[test]
    fn test_nearby_market_beats_glutted_distant_one() {
        let rec = compute_recommendation(&input(
            vec![
                candidate("Market A", 2500.0, VolumeTrend::Normal),
                candidate("Market B", 2800.0, VolumeTrend::High),
            ],
            vec![2.0, 6.0],
        ))
        .unwrap();

        assert_eq!(rec.recommended_market, "Market A");
        assert!(rec.markets[0].is_recommended);
        assert!(!rec.markets[1].is_recommended);
        assert_eq!(rec.confidence_band, ConfidenceBand { min: 2250.0, max: 2750.0 });
        assert_eq!(rec.market_score, 2182.5);
        assert!(rec.storage.is_none());
        assert_eq!(rec.action, Action::SellAtMandi);
    }

    #[test]
    fn test_headline() {
        let rec = compute_recommendation(&input(vec![candidate("Market A", 2500.0, VolumeTrend::Normal)], vec![2.0]))
            .unwrap();
        assert_eq!(
            rec.headline,
            "Sell at Market A. It offers ₹2182.50 more after transport costs. Spoilage risk during transit is MEDIUM. Weather context: 20% chance of rain tomorrow."
        );
    }

    #[test]
    fn test_glutted_best_market_attaches_storage() {
        let rec = compute_recommendation(&input(vec![candidate("Market B", 2800.0, VolumeTrend::High)], vec![2.0]))
            .unwrap();
        assert_eq!(rec.action, Action::DelayAndStore);
        assert!(rec.storage.is_some());
        assert_eq!(rec.reasons.len(), 4);
        assert!(rec.reasons[0].starts_with("1. Price is likely between ₹2520 and ₹3080"));
    }

    #[test]
    fn test_glut_always_staggers_into_supplied_storage() {
        // a price crash in the history marks the market as glutted
        let glutted = MarketCandidate::from_history(
            "Market B",
            2800.0,
            GpsCoordinates::new(28.7041, 77.1525),
            vec![3300.0, 3300.0, 3300.0, 3300.0, 3300.0, 3300.0, 3300.0, 2700.0, 2750.0, 2800.0],
        );
        assert_eq!(glutted.arrival_volume_trend, VolumeTrend::High);

        let mut glut_input = input(vec![glutted], vec![2.0]);
        glut_input.storage = StorageOption {
            name: "Village Micro Store".to_string(),
            distance_km: 3.2,
            price_per_kg: 0.5,
            capacity_mt: 20.0,
        };
        let rec = compute_recommendation(&glut_input).unwrap();
        assert_eq!(rec.action, Action::DelayAndStore);
        assert_eq!(rec.storage.as_ref().map(|s| s.name.as_str()), Some("Village Micro Store"));
        assert!(rec.reasons[3].contains("Village Micro Store has 20 MT"));
    }

    #[test]
    fn test_empty_markets_is_an_error() {
        let err = compute_recommendation(&input(vec![], vec![])).unwrap_err();
        assert_eq!(err, EngineError::NoCandidateMarkets);
    }

    #[test]
    fn test_transit_count_mismatch() {
        let err = compute_recommendation(&input(vec![candidate("A", 2500.0, VolumeTrend::Normal)], vec![])).unwrap_err();
        assert_eq!(err, EngineError::TransitCountMismatch { expected: 1, actual: 0 });
    }

    #[test]
    fn test_negative_price_rejected() {
        let err = compute_recommendation(&input(vec![candidate("A", -5.0, VolumeTrend::Normal)], vec![1.0])).unwrap_err();
        assert!(matches!(err, EngineError::NegativePrice { .. }));
    }

    #[test]
    fn test_negative_spoilage_rate_rejected() {
        let mut bad = input(vec![candidate("A", 2500.0, VolumeTrend::Normal)], vec![1.0]);
        bad.crop.baseline_spoilage_rate = -1.0;
        assert!(matches!(compute_recommendation(&bad), Err(EngineError::InvalidCrop(_))));
    }
}
