//! Static crop catalog

use async_trait::async_trait;
use chrono::Utc;
use shared::Crop;

use crate::error::FetchResult;

use super::providers::CropProvider;

/// Name given to crops missing from the catalog
pub const UNKNOWN_CROP_NAME: &str = "Unknown Crop (Default: Tomato)";

/// (id, name, ideal temperature °C, baseline spoilage % per transit hour)
const CROPS: &[(&str, &str, f64, f64)] = &[
    // Vegetables
    ("c3d4e5f6-a7b8-9012-cdef-123456789012", "Tomato", 25.0, 2.5),
    ("d4e5f6a7-b890-12cd-ef12-345678901234", "Onion", 20.0, 1.0),
    ("e5f6a7b8-9012-cdef-1234-567890123456", "Potato", 15.0, 1.5),
    ("f6a7b8c9-0123-def0-2345-678901234567", "Brinjal (Eggplant)", 26.0, 2.2),
    ("a7b8c9d0-1234-ef01-3456-789012345678", "Cabbage", 18.0, 2.8),
    ("b8c9d0e1-2345-f012-4567-890123456789", "Cauliflower", 18.0, 3.0),
    ("c9d0e1f2-3456-0123-5678-901234567890", "Spinach", 16.0, 4.5),
    ("d0e1f2a3-4567-1234-6789-012345678901", "Carrot", 16.0, 1.8),
    ("e1f2a3b4-5678-2345-7890-123456789012", "Radish", 15.0, 2.0),
    ("f2a3b4c5-6789-3456-8901-234567890123", "Garlic", 18.0, 0.8),
    // Fruits
    ("a3b4c5d6-7890-4567-9012-345678901234", "Apple", 4.0, 1.2),
    ("b4c5d6e7-8901-5678-0123-456789012345", "Banana", 14.0, 3.5),
    ("c5d6e7f8-9012-6789-1234-567890123456", "Mango", 12.0, 2.8),
    ("d6e7f8a9-0123-7890-2345-678901234567", "Orange", 8.0, 2.0),
    ("e7f8a9b0-1234-8901-3456-789012345678", "Grapes", 2.0, 3.2),
    ("f8a9b0c1-2345-9012-4567-890123456789", "Papaya", 12.0, 4.0),
    ("a9b0c1d2-3456-0123-5678-901234567890", "Guava", 10.0, 2.5),
    ("b0c1d2e3-4567-1234-6789-012345678901", "Pineapple", 10.0, 1.8),
    ("c1d2e3f4-5678-2345-7890-123456789012", "Pomegranate", 5.0, 1.5),
    // Cash crops and grains
    ("d2e3f4a5-6789-3456-8901-234567890123", "Wheat", 20.0, 0.5),
    ("e3f4a5b6-7890-4567-9012-345678901234", "Rice", 25.0, 0.8),
    ("f4a5b6c7-8901-5678-0123-456789012345", "Sugarcane", 30.0, 2.0),
    ("a5b6c7d8-9012-6789-1234-567890123456", "Cotton", 25.0, 0.4),
    ("b6c7d8e9-0123-7890-2345-678901234567", "Maize", 24.0, 0.9),
    ("c7d8e9f0-1234-8901-3456-789012345678", "Tea", 20.0, 1.0),
    ("d8e9f0a1-2345-9012-4567-890123456789", "Coffee", 22.0, 1.2),
    ("e9f0a1b2-3456-0123-5678-901234567890", "Mustard", 15.0, 0.6),
    // Spices
    ("f0a1b2c3-4567-1234-6789-012345678901", "Ginger", 15.0, 1.5),
    ("a1b2c3d4-5678-2345-7890-123456789012", "Turmeric", 25.0, 0.5),
    ("b2c3d4e5-6789-3456-8901-234567890123", "Coriander", 20.0, 3.5),
    ("c3d4e5f6-7890-4567-9012-345678901234", "Cumin", 25.0, 0.5),
    ("d4e5f6a7-8901-5678-0123-456789012345", "Black Pepper", 25.0, 0.8),
];

/// Built-in catalog of common Indian crops
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticCropCatalog;

impl StaticCropCatalog {
    pub fn new() -> Self {
        Self
    }

    pub fn len(&self) -> usize {
        CROPS.len()
    }

    pub fn is_empty(&self) -> bool {
        CROPS.is_empty()
    }

    /// Find a crop by catalog id or by name (case-insensitive).
    ///
    /// Unknown keys resolve to tomato parameters under a placeholder name.
    pub fn lookup(&self, key: &str) -> Crop {
        let key = key.trim();
        let found = CROPS
            .iter()
            .find(|(id, name, _, _)| *id == key || name.eq_ignore_ascii_case(key));

        match found {
            Some(&(id, name, ideal_temp, baseline_spoilage_rate)) => Crop {
                id: id.to_string(),
                name: name.to_string(),
                ideal_temp,
                baseline_spoilage_rate,
                created_at: Utc::now(),
            },
            None => {
                tracing::debug!(crop = key, "Crop not in catalog, using tomato defaults");
                Crop {
                    id: key.to_string(),
                    name: UNKNOWN_CROP_NAME.to_string(),
                    ideal_temp: 25.0,
                    baseline_spoilage_rate: 2.5,
                    created_at: Utc::now(),
                }
            }
        }
    }
}

#[async_trait]
impl CropProvider for StaticCropCatalog {
    async fn crop(&self, key: &str) -> FetchResult<Crop> {
        Ok(self.lookup(key))
    }
}
