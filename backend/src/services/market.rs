//! Candidate market directory

use std::sync::Arc;

use async_trait::async_trait;
use shared::{Crop, GpsCoordinates, MarketCandidate};

use crate::error::FetchResult;

use super::providers::{join_by_index, MarketCandidateProvider, PriceHistoryProvider};

/// Markets considered per request, nearest first
pub const MAX_CANDIDATE_MARKETS: usize = 10;

/// A market's latest quoted price and location
#[derive(Debug, Clone, PartialEq)]
pub struct MarketListing {
    pub market_name: String,
    /// Per quintal
    pub current_price: f64,
    pub location: GpsCoordinates,
}

impl MarketListing {
    pub fn new(market_name: impl Into<String>, current_price: f64, location: GpsCoordinates) -> Self {
        Self {
            market_name: market_name.into(),
            current_price,
            location,
        }
    }

    pub fn into_candidate(self, price_history: Vec<f64>) -> MarketCandidate {
        MarketCandidate::from_history(self.market_name, self.current_price, self.location, price_history)
    }
}

/// Candidates built from fixed listings plus a price-history source
pub struct StaticMarketBoard {
    listings: Vec<MarketListing>,
    histories: Arc<dyn PriceHistoryProvider>,
}

impl StaticMarketBoard {
    pub fn new(listings: Vec<MarketListing>, histories: Arc<dyn PriceHistoryProvider>) -> Self {
        Self { listings, histories }
    }

    /// Listings ordered by distance from `location`, capped at the candidate limit
    pub fn nearest_listings(&self, location: GpsCoordinates) -> Vec<MarketListing> {
        let mut listings = self.listings.clone();
        listings.sort_by(|a, b| {
            location
                .distance_km_to(&a.location)
                .total_cmp(&location.distance_km_to(&b.location))
        });
        listings.truncate(MAX_CANDIDATE_MARKETS);
        listings
    }
}

#[async_trait]
impl MarketCandidateProvider for StaticMarketBoard {
    async fn candidates(
        &self,
        crop: &Crop,
        location: GpsCoordinates,
    ) -> FetchResult<Vec<MarketCandidate>> {
        let listings = self.nearest_listings(location);

        let histories = join_by_index(listings.len(), |i| {
            let provider = Arc::clone(&self.histories);
            let market = listings[i].market_name.clone();
            let crop = crop.name.clone();
            async move {
                match provider.price_history(&market, &crop).await {
                    Ok(history) => history,
                    Err(err) => {
                        tracing::debug!(market = %market, error = %err, "No price history, using current price");
                        Vec::new()
                    }
                }
            }
        })
        .await;

        let candidates: Vec<MarketCandidate> = listings
            .into_iter()
            .zip(histories)
            .map(|(listing, history)| listing.into_candidate(history.unwrap_or_default()))
            .collect();

        tracing::info!(crop = %crop.name, count = candidates.len(), "Resolved candidate markets");
        Ok(candidates)
    }
}
