//! OSRM routing client for driving times between farm and market

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use shared::GpsCoordinates;

use crate::error::{FetchError, FetchResult};
use crate::services::providers::TransitTimeProvider;

pub const DEFAULT_OSRM_ENDPOINT: &str = "http://router.project-osrm.org";

const SERVICE: &str = "osrm";

/// OSRM API client
#[derive(Clone)]
pub struct OsrmClient {
    client: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct RouteResponse {
    #[serde(default)]
    routes: Vec<Route>,
}

#[derive(Debug, Deserialize)]
struct Route {
    /// Seconds
    duration: f64,
}

impl RouteResponse {
    fn first_route_hours(&self) -> Option<f64> {
        self.routes.first().map(|r| r.duration / 3600.0)
    }
}

impl OsrmClient {
    /// Create a new OsrmClient against the public demo server
    pub fn new(timeout: Duration) -> FetchResult<Self> {
        Self::with_base_url(DEFAULT_OSRM_ENDPOINT.to_string(), timeout)
    }

    /// Create a new OsrmClient with custom base URL
    pub fn with_base_url(base_url: String, timeout: Duration) -> FetchResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url })
    }

    /// Driving time in hours along the first route OSRM returns
    pub async fn get_driving_hours(
        &self,
        from: GpsCoordinates,
        to: GpsCoordinates,
    ) -> FetchResult<f64> {
        // OSRM takes lon,lat pairs
        let url = format!(
            "{}/route/v1/driving/{:.4},{:.4};{:.4},{:.4}?overview=false",
            self.base_url, from.longitude, from.latitude, to.longitude, to.latitude
        );

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(FetchError::Status {
                service: SERVICE,
                status: response.status().as_u16(),
            });
        }

        let data: RouteResponse = response.json().await.map_err(|e| FetchError::Decode {
            service: SERVICE,
            message: e.to_string(),
        })?;

        data.first_route_hours()
            .ok_or_else(|| FetchError::NotFound(format!("route from {:?} to {:?}", from, to)))
    }
}

#[async_trait]
impl TransitTimeProvider for OsrmClient {
    async fn transit_hours(&self, from: GpsCoordinates, to: GpsCoordinates) -> FetchResult<f64> {
        self.get_driving_hours(from, to).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_duration_in_hours() {
        let body = r#"{"code": "Ok", "routes": [{"duration": 5400.0, "distance": 41000.0}, {"duration": 9000.0}]}"#;
        let data: RouteResponse = serde_json::from_str(body).unwrap();
        assert_eq!(data.first_route_hours(), Some(1.5));
    }

    #[test]
    fn test_no_route() {
        let data: RouteResponse = serde_json::from_str(r#"{"code": "NoRoute", "routes": []}"#).unwrap();
        assert_eq!(data.first_route_hours(), None);
    }
}
