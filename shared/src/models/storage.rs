//! Cold storage models

use serde::{Deserialize, Serialize};

use crate::types::GpsCoordinates;

/// A cold storage or micro-storage facility
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageFacility {
    pub id: String,
    pub name: String,
    pub location_lat: f64,
    pub location_lon: f64,
    pub capacity_mt: f64,
    /// Price per kg per day
    pub price_per_kg: f64,
}

impl StorageFacility {
    pub fn location(&self) -> GpsCoordinates {
        GpsCoordinates::new(self.location_lat, self.location_lon)
    }
}

/// The nearest storage facility offered when staggering a sale
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StorageOption {
    pub name: String,
    pub distance_km: f64,
    pub price_per_kg: f64,
    pub capacity_mt: f64,
}
