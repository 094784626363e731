//! Documented fallback values for every collaborator
//!
//! These are what the orchestrator substitutes when a collaborator fails or
//! times out, and what `--offline` runs on end to end.

use async_trait::async_trait;
use chrono::Utc;
use shared::{
    round_to, Crop, Farmer, GpsCoordinates, GroundTruth, MarketCandidate, SoilSnapshot,
    StorageFacility, StorageOption, WeatherCondition, WeatherSnapshot,
};

use crate::error::{FetchError, FetchResult};

use super::market::MarketListing;
use super::providers::{
    CrowdReportAggregateProvider, FarmerProvider, MarketCandidateProvider, PriceHistoryProvider,
    SoilProvider, StorageProvider, TransitTimeProvider, WeatherProvider,
};
use super::storage::nearest_storage;

pub const FALLBACK_TEMP_C: f64 = 32.4;
pub const FALLBACK_HUMIDITY_PCT: f64 = 68.0;

/// Average road speed assumed when no routing service answers
pub const FALLBACK_ROAD_SPEED_KMH: f64 = 40.0;

/// New Delhi
pub const FALLBACK_FARMER_LOCATION: GpsCoordinates = GpsCoordinates {
    latitude: 28.6139,
    longitude: 77.2090,
};
pub const FALLBACK_FARMER_PHONE: &str = "+919876543210";

pub fn weather(ideal_temp: f64) -> WeatherSnapshot {
    WeatherSnapshot::new(
        FALLBACK_TEMP_C,
        FALLBACK_HUMIDITY_PCT,
        ideal_temp,
        WeatherCondition::PartlyCloudy,
    )
}

pub fn farmer(farmer_id: &str) -> Farmer {
    Farmer {
        id: farmer_id.to_string(),
        location_lat: FALLBACK_FARMER_LOCATION.latitude,
        location_lon: FALLBACK_FARMER_LOCATION.longitude,
        phone: FALLBACK_FARMER_PHONE.to_string(),
        created_at: Utc::now(),
    }
}

pub fn market_listings() -> Vec<MarketListing> {
    vec![
        MarketListing::new("Azadpur Mandi", 2500.0, GpsCoordinates::new(28.7041, 77.1525)),
        MarketListing::new("Vashi APMC", 2800.0, GpsCoordinates::new(19.0728, 73.0169)),
        MarketListing::new("Ghazipur Mandi", 2350.0, GpsCoordinates::new(28.6233, 77.3230)),
        MarketListing::new("Pune APMC", 2650.0, GpsCoordinates::new(18.5204, 73.8567)),
    ]
}

/// Recent daily prices of the fallback markets, oldest first
pub fn price_history(market: &str) -> Option<Vec<f64>> {
    let history = match market {
        "Azadpur Mandi" => vec![2400.0, 2450.0, 2480.0, 2520.0, 2500.0],
        "Vashi APMC" => vec![2700.0, 2720.0, 2750.0, 2780.0, 2800.0],
        "Ghazipur Mandi" => vec![2500.0, 2480.0, 2420.0, 2380.0, 2350.0],
        "Pune APMC" => vec![2600.0, 2610.0, 2630.0, 2640.0, 2650.0],
        _ => return None,
    };
    Some(history)
}

pub fn markets() -> Vec<MarketCandidate> {
    market_listings()
        .into_iter()
        .map(|listing| {
            let history = price_history(&listing.market_name).unwrap_or_default();
            listing.into_candidate(history)
        })
        .collect()
}

pub fn storage_facilities() -> Vec<StorageFacility> {
    vec![StorageFacility {
        id: "narela-cold-storage".to_string(),
        name: "Narela Cold Storage".to_string(),
        location_lat: 28.8526,
        location_lon: 77.0932,
        capacity_mt: 500.0,
        price_per_kg: 2.0,
    }]
}

pub fn storage(location: GpsCoordinates) -> StorageOption {
    let facilities = storage_facilities();
    match nearest_storage(&facilities, location) {
        Some(option) => option,
        None => StorageOption {
            name: "Narela Cold Storage".to_string(),
            distance_km: 0.0,
            price_per_kg: 2.0,
            capacity_mt: 500.0,
        },
    }
}

pub fn transit_hours(from: GpsCoordinates, to: GpsCoordinates) -> f64 {
    from.distance_km_to(&to) / FALLBACK_ROAD_SPEED_KMH
}

pub fn ground_truth() -> GroundTruth {
    GroundTruth {
        avg_reported_price: 0.0,
        report_count: 0,
    }
}

/// Stable per-location hash used to derive mock soil readings
pub fn geo_hash(location: GpsCoordinates) -> i64 {
    let lat = (location.latitude * 1000.0) as i64;
    let lon = (location.longitude * 1000.0) as i64;
    (lat ^ lon).abs()
}

/// Soil readings derived from the location, optionally with a live moisture value
pub fn soil_with_moisture(location: GpsCoordinates, moisture_pct: Option<f64>) -> SoilSnapshot {
    let hash = geo_hash(location);
    let moisture = moisture_pct.unwrap_or(15.0 + (hash % 5) as f64);
    SoilSnapshot::new(
        round_to(moisture, 1),
        (30 + hash % 25) as f64,
        (15 + (hash / 10) % 15) as f64,
        (20 + (hash / 100) % 20) as f64,
    )
}

pub fn soil(location: GpsCoordinates) -> SoilSnapshot {
    soil_with_moisture(location, None)
}

/// Serves the fallback values as a collaborator
#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackProvider;

#[async_trait]
impl FarmerProvider for FallbackProvider {
    async fn farmer(&self, farmer_id: &str) -> FetchResult<Farmer> {
        Ok(farmer(farmer_id))
    }
}

#[async_trait]
impl WeatherProvider for FallbackProvider {
    async fn current_weather(
        &self,
        _location: GpsCoordinates,
        ideal_temp: f64,
    ) -> FetchResult<WeatherSnapshot> {
        Ok(weather(ideal_temp))
    }
}

#[async_trait]
impl SoilProvider for FallbackProvider {
    async fn soil(&self, location: GpsCoordinates) -> FetchResult<SoilSnapshot> {
        Ok(soil(location))
    }
}

#[async_trait]
impl MarketCandidateProvider for FallbackProvider {
    async fn candidates(
        &self,
        _crop: &Crop,
        _location: GpsCoordinates,
    ) -> FetchResult<Vec<MarketCandidate>> {
        Ok(markets())
    }
}

#[async_trait]
impl PriceHistoryProvider for FallbackProvider {
    async fn price_history(&self, market: &str, _crop: &str) -> FetchResult<Vec<f64>> {
        price_history(market).ok_or_else(|| FetchError::NotFound(format!("price history for {}", market)))
    }
}

#[async_trait]
impl TransitTimeProvider for FallbackProvider {
    async fn transit_hours(&self, from: GpsCoordinates, to: GpsCoordinates) -> FetchResult<f64> {
        Ok(transit_hours(from, to))
    }
}

#[async_trait]
impl StorageProvider for FallbackProvider {
    async fn nearest_storage(&self, location: GpsCoordinates) -> FetchResult<StorageOption> {
        Ok(storage(location))
    }
}

#[async_trait]
impl CrowdReportAggregateProvider for FallbackProvider {
    async fn aggregate(&self, _market: &str, _crop: &str) -> FetchResult<GroundTruth> {
        Ok(ground_truth())
    }
}
