//! Collaborators and orchestration for the Mandi Advisor

pub mod catalog;
pub mod crowd;
pub mod fallback;
pub mod market;
pub mod providers;
pub mod recommendation;
pub mod storage;

pub use catalog::StaticCropCatalog;
pub use crowd::{CrowdReport, InMemoryCrowdReports};
pub use fallback::FallbackProvider;
pub use market::{MarketListing, StaticMarketBoard};
pub use providers::{
    join_by_index, resolve_or_default, Collaborators, CropProvider, CrowdReportAggregateProvider,
    FarmerProvider, MarketCandidateProvider, PriceHistoryProvider, SoilProvider, StorageProvider,
    TransitTimeProvider, WeatherProvider,
};
pub use recommendation::{RecommendationRequest, RecommendationService};
pub use storage::StaticStorageDirectory;
