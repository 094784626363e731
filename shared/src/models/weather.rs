//! Weather data models

use serde::{Deserialize, Serialize};

/// Qualitative weather condition
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum WeatherCondition {
    #[serde(rename = "Clear Sky")]
    ClearSky,
    #[serde(rename = "Partly Cloudy")]
    PartlyCloudy,
    Foggy,
    Drizzle,
    Rain,
    #[serde(rename = "Rain Showers")]
    RainShowers,
    Snow,
    #[serde(rename = "Snow Showers")]
    SnowShowers,
    Thunderstorm,
    Unknown,
}

impl WeatherCondition {
    /// Map a WMO weather interpretation code to a condition
    pub fn from_wmo_code(code: i32) -> Self {
        match code {
            0 => WeatherCondition::ClearSky,
            c if c < 0 => WeatherCondition::Unknown,
            1..=3 => WeatherCondition::PartlyCloudy,
            4..=48 => WeatherCondition::Foggy,
            49..=57 => WeatherCondition::Drizzle,
            58..=67 => WeatherCondition::Rain,
            68..=77 => WeatherCondition::Snow,
            78..=82 => WeatherCondition::RainShowers,
            83..=86 => WeatherCondition::SnowShowers,
            87..=99 => WeatherCondition::Thunderstorm,
            _ => WeatherCondition::Unknown,
        }
    }

    /// Rain, rain showers and thunderstorms make transport unsafe
    pub fn is_rain_class(&self) -> bool {
        matches!(
            self,
            WeatherCondition::Rain | WeatherCondition::RainShowers | WeatherCondition::Thunderstorm
        )
    }

    /// Rough chance of rain tomorrow used in the recommendation headline
    pub fn rain_probability_pct(&self) -> u8 {
        match self {
            c if c.is_rain_class() => 80,
            WeatherCondition::Drizzle => 50,
            WeatherCondition::PartlyCloudy => 20,
            _ => 0,
        }
    }
}

impl std::fmt::Display for WeatherCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            WeatherCondition::ClearSky => "Clear Sky",
            WeatherCondition::PartlyCloudy => "Partly Cloudy",
            WeatherCondition::Foggy => "Foggy",
            WeatherCondition::Drizzle => "Drizzle",
            WeatherCondition::Rain => "Rain",
            WeatherCondition::RainShowers => "Rain Showers",
            WeatherCondition::Snow => "Snow",
            WeatherCondition::SnowShowers => "Snow Showers",
            WeatherCondition::Thunderstorm => "Thunderstorm",
            WeatherCondition::Unknown => "Unknown",
        };
        write!(f, "{}", label)
    }
}

/// Weather at the farmer's location, relative to the crop's ideal temperature
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    #[serde(rename = "current_temp_c")]
    pub current_temp: f64,
    #[serde(rename = "humidity_pct")]
    pub humidity: f64,
    #[serde(rename = "temp_delta_from_ideal")]
    pub temp_delta: f64,
    pub condition: WeatherCondition,
}

impl WeatherSnapshot {
    pub fn new(current_temp: f64, humidity: f64, ideal_temp: f64, condition: WeatherCondition) -> Self {
        Self {
            current_temp,
            humidity,
            temp_delta: current_temp - ideal_temp,
            condition,
        }
    }
}
