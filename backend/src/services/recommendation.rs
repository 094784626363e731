//! Recommendation orchestration
//!
//! Resolves every engine input through the collaborators, then runs the
//! pure engine once.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use shared::{
    compute_recommendation, Crop, CropMaturity, EngineInput, GpsCoordinates, MarketCandidate,
    Recommendation, RoadQuality, ScoringConstants,
};
use shared::validation::validate_coordinates;

use crate::error::{AppResult, FetchError, FetchResult};

use super::catalog::StaticCropCatalog;
use super::fallback;
use super::providers::{join_by_index, resolve_or_default, Collaborators};

/// What the farmer asked about
#[derive(Debug, Clone)]
pub struct RecommendationRequest {
    pub farmer_id: String,
    /// Crop id or name
    pub crop: String,
    /// Live GPS latitude, overriding the stored farm location
    pub latitude: Option<f64>,
    /// Live GPS longitude, overriding the stored farm location
    pub longitude: Option<f64>,
    pub road_quality: RoadQuality,
    pub crop_maturity: CropMaturity,
}

/// Orchestrates collaborators and the engine for one request at a time
#[derive(Clone)]
pub struct RecommendationService {
    collaborators: Collaborators,
    timeout: Duration,
    constants: ScoringConstants,
}

impl RecommendationService {
    pub fn new(collaborators: Collaborators, timeout: Duration, constants: ScoringConstants) -> Self {
        Self {
            collaborators,
            timeout,
            constants,
        }
    }

    /// Produce a recommendation, substituting fallbacks for any failed input
    pub async fn recommend(&self, request: &RecommendationRequest) -> AppResult<Recommendation> {
        let c = &self.collaborators;
        let timeout = self.timeout;

        let (farmer, crop) = tokio::join!(
            resolve_or_default("farmer", timeout, c.farmers.farmer(&request.farmer_id), || {
                fallback::farmer(&request.farmer_id)
            }),
            resolve_or_default("crop", timeout, c.crops.crop(&request.crop), || {
                StaticCropCatalog::new().lookup(&request.crop)
            }),
        );

        let overridden = farmer.clone().with_location_override(request.latitude, request.longitude);
        let farmer = match validate_coordinates(overridden.location_lat, overridden.location_lon) {
            Ok(()) => overridden,
            Err(reason) => {
                tracing::warn!(farmer = %farmer.id, reason, "Ignoring live GPS override");
                farmer
            }
        };
        let location = farmer.location();
        tracing::info!(
            farmer = %farmer.id,
            crop = %crop.name,
            lat = location.latitude,
            lon = location.longitude,
            "Using location"
        );

        let (weather, markets, soil, storage) = tokio::join!(
            resolve_or_default(
                "weather",
                timeout,
                c.weather.current_weather(location, crop.ideal_temp),
                || fallback::weather(crop.ideal_temp),
            ),
            resolve_or_default("markets", timeout, self.non_empty_candidates(&crop, location), fallback::markets),
            resolve_or_default("soil", timeout, c.soil.soil(location), || fallback::soil(location)),
            resolve_or_default("storage", timeout, c.storage.nearest_storage(location), || {
                fallback::storage(location)
            }),
        );

        let destinations: Vec<GpsCoordinates> = markets.iter().map(MarketCandidate::location).collect();
        let (transit_hours, markets) = tokio::join!(
            self.resolve_transit_times(location, &destinations),
            self.attach_ground_truth(&crop.name, markets),
        );

        tracing::debug!(
            markets = markets.len(),
            transit_hours = ?transit_hours,
            "Inputs resolved"
        );

        let input = EngineInput {
            farmer,
            crop,
            markets,
            transit_hours,
            weather,
            soil,
            road_quality: request.road_quality,
            crop_maturity: request.crop_maturity,
            storage,
            constants: self.constants,
            generated_at: Utc::now(),
        };

        let recommendation = compute_recommendation(&input)?;
        tracing::info!(
            market = %recommendation.recommended_market,
            action = %recommendation.action,
            risk = %recommendation.risk_level,
            "Recommendation ready"
        );
        Ok(recommendation)
    }

    /// Transit hours per destination, in destination order.
    ///
    /// All lookups run concurrently; a failed or slow lookup becomes the
    /// straight-line estimate.
    pub async fn resolve_transit_times(
        &self,
        origin: GpsCoordinates,
        destinations: &[GpsCoordinates],
    ) -> Vec<f64> {
        let timeout = self.timeout;
        let hours = join_by_index(destinations.len(), |i| {
            let provider = Arc::clone(&self.collaborators.transit);
            let destination = destinations[i];
            async move {
                resolve_or_default(
                    "transit",
                    timeout,
                    provider.transit_hours(origin, destination),
                    || fallback::transit_hours(origin, destination),
                )
                .await
            }
        })
        .await;

        hours
            .into_iter()
            .zip(destinations)
            .map(|(h, &destination)| h.unwrap_or_else(|| fallback::transit_hours(origin, destination)))
            .collect()
    }

    /// An empty candidate list counts as unavailable so the fallback markets apply
    async fn non_empty_candidates(&self, crop: &Crop, location: GpsCoordinates) -> FetchResult<Vec<MarketCandidate>> {
        match self.collaborators.markets.candidates(crop, location).await {
            Ok(candidates) if candidates.is_empty() => Err(FetchError::NotFound(format!(
                "no candidate markets for {} near ({:.4}, {:.4})",
                crop.name, location.latitude, location.longitude
            ))),
            other => other,
        }
    }

    async fn attach_ground_truth(&self, crop: &str, markets: Vec<MarketCandidate>) -> Vec<MarketCandidate> {
        let timeout = self.timeout;
        let truths = join_by_index(markets.len(), |i| {
            let provider = Arc::clone(&self.collaborators.crowd);
            let market = markets[i].market_name.clone();
            let crop = crop.to_string();
            async move {
                resolve_or_default(
                    "crowd_reports",
                    timeout,
                    provider.aggregate(&market, &crop),
                    fallback::ground_truth,
                )
                .await
            }
        })
        .await;

        markets
            .into_iter()
            .zip(truths)
            .map(|(market, truth)| match truth {
                Some(truth) if truth.report_count > 0 => market.with_ground_truth(truth),
                _ => market,
            })
            .collect()
    }
}
