//! Farmer models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::GpsCoordinates;

/// A registered farmer with a home location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Farmer {
    pub id: String,
    pub location_lat: f64,
    pub location_lon: f64,
    pub phone: String,
    pub created_at: DateTime<Utc>,
}

impl Farmer {
    pub fn location(&self) -> GpsCoordinates {
        GpsCoordinates::new(self.location_lat, self.location_lon)
    }

    /// Replace the stored location with live GPS coordinates.
    ///
    /// Each coordinate is overridden independently, so a caller that only
    /// knows the latitude keeps the stored longitude.
    pub fn with_location_override(mut self, lat: Option<f64>, lon: Option<f64>) -> Self {
        if let Some(lat) = lat {
            self.location_lat = lat;
        }
        if let Some(lon) = lon {
            self.location_lon = lon;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn farmer() -> Farmer {
        Farmer {
            id: "f-1".to_string(),
            location_lat: 28.6139,
            location_lon: 77.2090,
            phone: "+919876543210".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_override_both_coordinates() {
        let f = farmer().with_location_override(Some(19.07), Some(72.87));
        assert_eq!(f.location(), GpsCoordinates::new(19.07, 72.87));
    }

    #[test]
    fn test_override_latitude_only() {
        let f = farmer().with_location_override(Some(19.07), None);
        assert_eq!(f.location_lat, 19.07);
        assert_eq!(f.location_lon, 77.2090);
    }
}
