//! Storage facility directory

use async_trait::async_trait;
use shared::{round_to, GpsCoordinates, StorageFacility, StorageOption};

use crate::error::{FetchError, FetchResult};

use super::providers::StorageProvider;

/// Nearest facility by great-circle distance, distance rounded to 0.1 km
pub fn nearest_storage(facilities: &[StorageFacility], location: GpsCoordinates) -> Option<StorageOption> {
    facilities
        .iter()
        .map(|f| (f, location.distance_km_to(&f.location())))
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(f, distance)| StorageOption {
            name: f.name.clone(),
            distance_km: round_to(distance, 1),
            price_per_kg: f.price_per_kg,
            capacity_mt: f.capacity_mt,
        })
}

/// A fixed list of storage facilities
#[derive(Debug, Clone, Default)]
pub struct StaticStorageDirectory {
    facilities: Vec<StorageFacility>,
}

impl StaticStorageDirectory {
    pub fn new(facilities: Vec<StorageFacility>) -> Self {
        Self { facilities }
    }
}

#[async_trait]
impl StorageProvider for StaticStorageDirectory {
    async fn nearest_storage(&self, location: GpsCoordinates) -> FetchResult<StorageOption> {
        nearest_storage(&self.facilities, location)
            .ok_or_else(|| FetchError::NotFound("storage facility".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn facility(name: &str, lat: f64, lon: f64) -> StorageFacility {
        StorageFacility {
            id: name.to_lowercase(),
            name: name.to_string(),
            location_lat: lat,
            location_lon: lon,
            capacity_mt: 250.0,
            price_per_kg: 1.5,
        }
    }

    #[test]
    fn test_picks_nearest() {
        let facilities = vec![
            facility("Far", 19.07, 73.01),
            facility("Near", 28.70, 77.15),
        ];
        let option = nearest_storage(&facilities, GpsCoordinates::new(28.6139, 77.2090)).unwrap();
        assert_eq!(option.name, "Near");
        assert_eq!(option.capacity_mt, 250.0);
    }

    #[tokio::test]
    async fn test_empty_directory_is_not_found() {
        let directory = StaticStorageDirectory::default();
        let result = directory.nearest_storage(GpsCoordinates::new(28.0, 77.0)).await;
        assert!(matches!(result, Err(FetchError::NotFound(_))));
    }
}
