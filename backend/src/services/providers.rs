//! Collaborator traits and the resolve-or-default combinator
//!
//! Every input the engine needs comes from one of these traits. The
//! orchestrator never lets a collaborator failure through: each call is
//! bounded by a timeout and replaced by a documented fallback on error.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use shared::{
    Crop, Farmer, GpsCoordinates, GroundTruth, MarketCandidate, SoilSnapshot, StorageOption,
    WeatherSnapshot,
};
use tokio::task::JoinSet;

use crate::config::Config;
use crate::error::{FetchError, FetchResult};
use crate::external::{OpenMeteoClient, OsrmClient};

use super::catalog::StaticCropCatalog;
use super::crowd::InMemoryCrowdReports;
use super::fallback::{self, FallbackProvider};
use super::market::StaticMarketBoard;
use super::storage::StaticStorageDirectory;

#[async_trait]
pub trait FarmerProvider: Send + Sync {
    async fn farmer(&self, farmer_id: &str) -> FetchResult<Farmer>;
}

#[async_trait]
pub trait CropProvider: Send + Sync {
    /// Look up a crop by id or name
    async fn crop(&self, key: &str) -> FetchResult<Crop>;
}

#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Current conditions, with the delta computed against `ideal_temp`
    async fn current_weather(
        &self,
        location: GpsCoordinates,
        ideal_temp: f64,
    ) -> FetchResult<WeatherSnapshot>;
}

#[async_trait]
pub trait SoilProvider: Send + Sync {
    async fn soil(&self, location: GpsCoordinates) -> FetchResult<SoilSnapshot>;
}

#[async_trait]
pub trait MarketCandidateProvider: Send + Sync {
    /// Candidate markets for a crop near a location, signals already derived
    async fn candidates(
        &self,
        crop: &Crop,
        location: GpsCoordinates,
    ) -> FetchResult<Vec<MarketCandidate>>;
}

#[async_trait]
pub trait PriceHistoryProvider: Send + Sync {
    /// Up to 15 daily prices, oldest first
    async fn price_history(&self, market: &str, crop: &str) -> FetchResult<Vec<f64>>;
}

#[async_trait]
pub trait TransitTimeProvider: Send + Sync {
    /// Driving time in hours
    async fn transit_hours(&self, from: GpsCoordinates, to: GpsCoordinates) -> FetchResult<f64>;
}

#[async_trait]
pub trait StorageProvider: Send + Sync {
    async fn nearest_storage(&self, location: GpsCoordinates) -> FetchResult<StorageOption>;
}

#[async_trait]
pub trait CrowdReportAggregateProvider: Send + Sync {
    /// Average reported price and report count over the trailing 24 hours
    async fn aggregate(&self, market: &str, crop: &str) -> FetchResult<GroundTruth>;
}

/// The full set of collaborators injected into the orchestrator
#[derive(Clone)]
pub struct Collaborators {
    pub farmers: Arc<dyn FarmerProvider>,
    pub crops: Arc<dyn CropProvider>,
    pub weather: Arc<dyn WeatherProvider>,
    pub soil: Arc<dyn SoilProvider>,
    pub markets: Arc<dyn MarketCandidateProvider>,
    pub transit: Arc<dyn TransitTimeProvider>,
    pub storage: Arc<dyn StorageProvider>,
    pub crowd: Arc<dyn CrowdReportAggregateProvider>,
}

impl Collaborators {
    /// Only fallback data and the static crop catalog; no network access
    pub fn offline() -> Self {
        let fallback = Arc::new(FallbackProvider);
        Self {
            farmers: fallback.clone(),
            crops: Arc::new(StaticCropCatalog::new()),
            weather: fallback.clone(),
            soil: fallback.clone(),
            markets: fallback.clone(),
            transit: fallback.clone(),
            storage: fallback.clone(),
            crowd: fallback,
        }
    }

    /// Live weather, soil and routing over HTTP, static directories for the rest.
    ///
    /// The crowd store starts empty. An embedding that accepts farmer reports
    /// shares its own store through [`Collaborators::with_crowd_reports`].
    pub fn online(config: &Config) -> FetchResult<Self> {
        let timeout = config.http.timeout();
        let open_meteo = Arc::new(OpenMeteoClient::with_base_url(
            config.weather.api_endpoint.clone(),
            timeout,
        )?);
        let osrm = OsrmClient::with_base_url(config.routing.api_endpoint.clone(), timeout)?;
        let fallback = Arc::new(FallbackProvider);

        Ok(Self {
            farmers: fallback.clone(),
            crops: Arc::new(StaticCropCatalog::new()),
            weather: open_meteo.clone(),
            soil: open_meteo,
            markets: Arc::new(StaticMarketBoard::new(
                fallback::market_listings(),
                fallback.clone(),
            )),
            transit: Arc::new(osrm),
            storage: Arc::new(StaticStorageDirectory::new(fallback::storage_facilities())),
            crowd: Arc::new(InMemoryCrowdReports::new()),
        })
    }

    /// Use `reports` for crowd aggregates, keeping a handle for submissions
    pub fn with_crowd_reports(mut self, reports: Arc<InMemoryCrowdReports>) -> Self {
        self.crowd = reports;
        self
    }
}

/// Await a collaborator call, substituting `fallback` on error or timeout.
///
/// Failures are logged at warn level and never propagated.
pub async fn resolve_or_default<T, F, D>(label: &str, timeout: Duration, fut: F, fallback: D) -> T
where
    F: Future<Output = FetchResult<T>>,
    D: FnOnce() -> T,
{
    let err = match tokio::time::timeout(timeout, fut).await {
        Ok(Ok(value)) => return value,
        Ok(Err(err)) => err,
        Err(_) => FetchError::Timeout(timeout),
    };
    tracing::warn!(collaborator = label, error = %err, "Collaborator failed, using fallback");
    fallback()
}

/// Run one task per index concurrently and reassemble the outputs by index.
///
/// Completion order does not matter. A slot whose task panicked is `None`.
pub async fn join_by_index<T, F, Fut>(count: usize, mut make: F) -> Vec<Option<T>>
where
    T: Send + 'static,
    F: FnMut(usize) -> Fut,
    Fut: Future<Output = T> + Send + 'static,
{
    let mut tasks = JoinSet::new();
    for index in 0..count {
        let fut = make(index);
        tasks.spawn(async move { (index, fut.await) });
    }

    let mut slots: Vec<Option<T>> = (0..count).map(|_| None).collect();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((index, value)) => slots[index] = Some(value),
            Err(err) => tracing::warn!(error = %err, "Fan-out task failed"),
        }
    }
    slots
}
