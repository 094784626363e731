//! Open-Meteo client for current weather and surface soil moisture
//!
//! No API key is needed. Weather comes from `current_weather` plus the first
//! hourly relative humidity; soil moisture from the first hourly
//! `soil_moisture_0_to_1cm` value (m³/m³).

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use shared::{GpsCoordinates, SoilSnapshot, WeatherCondition, WeatherSnapshot};

use crate::error::{FetchError, FetchResult};
use crate::services::fallback;
use crate::services::providers::{SoilProvider, WeatherProvider};

pub const DEFAULT_OPEN_METEO_ENDPOINT: &str = "https://api.open-meteo.com/v1/forecast";

/// Humidity assumed when the hourly series is missing
const DEFAULT_HUMIDITY_PCT: f64 = 60.0;

const SERVICE: &str = "open-meteo";

/// Open-Meteo API client
#[derive(Clone)]
pub struct OpenMeteoClient {
    client: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current_weather: CurrentWeather,
    #[serde(default)]
    hourly: HourlyHumidity,
}

#[derive(Debug, Deserialize)]
struct CurrentWeather {
    temperature: f64,
    weathercode: i32,
}

#[derive(Debug, Default, Deserialize)]
struct HourlyHumidity {
    #[serde(default)]
    relative_humidity_2m: Vec<f64>,
}

#[derive(Debug, Deserialize)]
struct SoilResponse {
    #[serde(default)]
    hourly: HourlySoil,
}

#[derive(Debug, Default, Deserialize)]
struct HourlySoil {
    #[serde(default)]
    soil_moisture_0_to_1cm: Vec<Option<f64>>,
}

impl ForecastResponse {
    fn into_snapshot(self, ideal_temp: f64) -> WeatherSnapshot {
        let humidity = self
            .hourly
            .relative_humidity_2m
            .first()
            .copied()
            .unwrap_or(DEFAULT_HUMIDITY_PCT);
        WeatherSnapshot::new(
            self.current_weather.temperature,
            humidity,
            ideal_temp,
            WeatherCondition::from_wmo_code(self.current_weather.weathercode),
        )
    }
}

impl SoilResponse {
    /// Surface moisture as a percentage, if the series has a first value
    fn moisture_pct(&self) -> Option<f64> {
        self.hourly
            .soil_moisture_0_to_1cm
            .first()
            .copied()
            .flatten()
            .map(|m| m * 100.0)
    }
}

impl OpenMeteoClient {
    /// Create a new OpenMeteoClient against the public endpoint
    pub fn new(timeout: Duration) -> FetchResult<Self> {
        Self::with_base_url(DEFAULT_OPEN_METEO_ENDPOINT.to_string(), timeout)
    }

    /// Create a new OpenMeteoClient with custom base URL
    pub fn with_base_url(base_url: String, timeout: Duration) -> FetchResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url })
    }

    async fn get<T: serde::de::DeserializeOwned>(&self, url: &str) -> FetchResult<T> {
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(FetchError::Status {
                service: SERVICE,
                status: response.status().as_u16(),
            });
        }

        response.json().await.map_err(|e| FetchError::Decode {
            service: SERVICE,
            message: e.to_string(),
        })
    }

    /// Fetch current conditions at a location
    pub async fn get_current_weather(
        &self,
        location: GpsCoordinates,
        ideal_temp: f64,
    ) -> FetchResult<WeatherSnapshot> {
        let url = format!(
            "{}?latitude={:.4}&longitude={:.4}&current_weather=true&hourly=relative_humidity_2m",
            self.base_url, location.latitude, location.longitude
        );
        let data: ForecastResponse = self.get(&url).await?;
        Ok(data.into_snapshot(ideal_temp))
    }

    /// Fetch surface soil moisture (percent) at a location
    pub async fn get_soil_moisture(&self, location: GpsCoordinates) -> FetchResult<Option<f64>> {
        let url = format!(
            "{}?latitude={:.4}&longitude={:.4}&hourly=soil_moisture_0_to_1cm",
            self.base_url, location.latitude, location.longitude
        );
        let data: SoilResponse = self.get(&url).await?;
        Ok(data.moisture_pct())
    }
}

#[async_trait]
impl WeatherProvider for OpenMeteoClient {
    async fn current_weather(
        &self,
        location: GpsCoordinates,
        ideal_temp: f64,
    ) -> FetchResult<WeatherSnapshot> {
        self.get_current_weather(location, ideal_temp).await
    }
}

#[async_trait]
impl SoilProvider for OpenMeteoClient {
    /// Live moisture with location-derived NPK indices. A missing or
    /// non-positive reading keeps the location-derived moisture.
    async fn soil(&self, location: GpsCoordinates) -> FetchResult<SoilSnapshot> {
        let moisture = self.get_soil_moisture(location).await?;
        Ok(fallback::soil_with_moisture(location, moisture.filter(|m| *m > 0.0)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forecast_response_conversion() {
        let body = r#"{
            "latitude": 28.625,
            "longitude": 77.25,
            "current_weather": {"temperature": 31.2, "windspeed": 7.4, "weathercode": 61},
            "hourly": {"time": ["2024-06-01T00:00"], "relative_humidity_2m": [74.0, 70.0]}
        }"#;
        let data: ForecastResponse = serde_json::from_str(body).unwrap();
        let snapshot = data.into_snapshot(25.0);
        assert_eq!(snapshot.current_temp, 31.2);
        assert_eq!(snapshot.humidity, 74.0);
        assert_eq!(snapshot.condition, WeatherCondition::Rain);
        assert!((snapshot.temp_delta - 6.2).abs() < 1e-9);
    }

    #[test]
    fn test_missing_humidity_defaults() {
        let body = r#"{"current_weather": {"temperature": 20.0, "weathercode": 0}}"#;
        let data: ForecastResponse = serde_json::from_str(body).unwrap();
        let snapshot = data.into_snapshot(25.0);
        assert_eq!(snapshot.humidity, DEFAULT_HUMIDITY_PCT);
        assert_eq!(snapshot.condition, WeatherCondition::ClearSky);
    }

    #[test]
    fn test_soil_moisture_is_percent() {
        let body = r#"{"hourly": {"soil_moisture_0_to_1cm": [0.234, 0.230]}}"#;
        let data: SoilResponse = serde_json::from_str(body).unwrap();
        assert!((data.moisture_pct().unwrap() - 23.4).abs() < 1e-9);
    }

    #[test]
    fn test_soil_moisture_null_or_empty() {
        let data: SoilResponse = serde_json::from_str(r#"{"hourly": {"soil_moisture_0_to_1cm": [null]}}"#).unwrap();
        assert_eq!(data.moisture_pct(), None);
        let data: SoilResponse = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(data.moisture_pct(), None);
    }
}
