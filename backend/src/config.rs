//! Configuration management for the Mandi Advisor
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (config/development.toml, config/production.toml)
//! 3. Environment variable overrides with MANDI_ prefix

use std::time::Duration;

use config::{ConfigError, Environment, File};
use serde::Deserialize;
use shared::ScoringConstants;

use crate::external::{DEFAULT_OPEN_METEO_ENDPOINT, DEFAULT_OSRM_ENDPOINT};

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Outbound HTTP settings
    pub http: HttpConfig,

    /// Open-Meteo configuration (weather and soil)
    pub weather: WeatherConfig,

    /// OSRM configuration (transit times)
    pub routing: RoutingConfig,

    /// Scoring model constants
    pub scoring: ScoringConstants,

    /// Request defaults
    pub defaults: DefaultsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    /// Per-collaborator timeout in seconds
    pub timeout_secs: u64,
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct WeatherConfig {
    /// Open-Meteo forecast endpoint
    pub api_endpoint: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RoutingConfig {
    /// OSRM server base URL
    pub api_endpoint: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DefaultsConfig {
    /// Road quality used when the request names none
    pub road_quality: String,

    /// Crop maturity used when the request names none
    pub crop_maturity: String,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("MANDI_ENVIRONMENT").unwrap_or_else(|_| "development".into());
        Self::load_from(&environment, Self::env_source())
    }

    /// `MANDI_`-prefixed variables, `__` separating nested keys
    fn env_source() -> Environment {
        Environment::with_prefix("MANDI")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
    }

    /// Layer defaults, the environment's config file and `env` overrides
    fn load_from(environment: &str, env: Environment) -> Result<Self, ConfigError> {
        let scoring = ScoringConstants::default();

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment)?
            .set_default("http.timeout_secs", 5)?
            .set_default("weather.api_endpoint", DEFAULT_OPEN_METEO_ENDPOINT)?
            .set_default("routing.api_endpoint", DEFAULT_OSRM_ENDPOINT)?
            .set_default("scoring.transport_cost_per_hour", scoring.transport_cost_per_hour)?
            .set_default("scoring.high_volume_multiplier", scoring.high_volume_multiplier)?
            .set_default("scoring.low_volume_multiplier", scoring.low_volume_multiplier)?
            .set_default("scoring.min_crowd_reports", scoring.min_crowd_reports)?
            .set_default("defaults.road_quality", "mixed")?
            .set_default("defaults.crop_maturity", "Optimal")?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (MANDI_ prefix)
            .add_source(env)
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> Environment {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::env_source().source(Some(map))
    }

    #[test]
    fn test_defaults_load() {
        let config = Config::load_from("test", vars(&[])).unwrap();
        assert_eq!(config.environment, "test");
        assert_eq!(config.http.timeout(), Duration::from_secs(5));
        assert_eq!(config.scoring, ScoringConstants::default());
        assert_eq!(config.defaults.road_quality, "mixed");
        assert_eq!(config.defaults.crop_maturity, "Optimal");
        assert!(config.routing.api_endpoint.starts_with("http"));
    }

    #[test]
    fn test_env_overrides_nested_keys() {
        let config = Config::load_from(
            "test",
            vars(&[
                ("MANDI_HTTP__TIMEOUT_SECS", "9"),
                ("MANDI_SCORING__TRANSPORT_COST_PER_HOUR", "75.5"),
                ("MANDI_DEFAULTS__ROAD_QUALITY", "unpaved"),
            ]),
        )
        .unwrap();
        assert_eq!(config.http.timeout(), Duration::from_secs(9));
        assert_eq!(config.scoring.transport_cost_per_hour, 75.5);
        assert_eq!(config.defaults.road_quality, "unpaved");
        assert_eq!(config.scoring.min_crowd_reports, 3);
    }
}
