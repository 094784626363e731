//! Rule-ordered decision policy
//!
//! Rules run in a fixed order. Each appends one reason and may overwrite the
//! action or harvest window, so a later rule wins over an earlier one.

use serde::{Deserialize, Serialize};

use crate::models::{
    Action, ConfidenceBand, Crop, HarvestWindow, MarketOption, SoilSnapshot, StorageOption,
    VolumeTrend, WeatherCondition, WeatherSnapshot,
};

/// Projected 7-day change (percent) beyond which the trend counts as moving
pub const PRICE_TREND_THRESHOLD_PCT: f64 = 2.0;

/// Temperature delta (°C) within which conditions count as near-ideal
pub const TEMP_TOLERANCE_C: f64 = 5.0;

/// Waiting for a better price is only safe on hauls shorter than this
pub const SAFE_WAIT_TRANSIT_HR: f64 = 5.0;

/// Humidity (percent) above which a decay advisory is added
pub const HIGH_HUMIDITY_PCT: f64 = 80.0;

/// A machine-composed justification, rendered to text on demand
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Reason {
    PriceRising {
        market: String,
        trend_pct: f64,
    },
    PriceFalling {
        market: String,
        trend_pct: f64,
    },
    PriceStable {
        market: String,
        trend_pct: f64,
        band: ConfidenceBand,
    },
    LowSoilMoisture {
        moisture_pct: f64,
    },
    NearIdealTemperature {
        current_temp: f64,
        ideal_temp: f64,
        crop: String,
        moisture_pct: f64,
    },
    TooHot {
        delta: f64,
        crop: String,
    },
    TooCold {
        delta: f64,
        crop: String,
    },
    BestMarket {
        market: String,
        price: f64,
        score: f64,
        transit_hr: f64,
        spoilage_pct: f64,
    },
    HighArrivals {
        market: String,
    },
    LowArrivals {
        market: String,
    },
    HighHumidity {
        humidity: f64,
    },
    UnsafeWeather {
        condition: WeatherCondition,
    },
    StorageInsteadOfGlut {
        band: ConfidenceBand,
        market: String,
        storage: String,
        price_per_kg: f64,
    },
    StorageConditions {
        current_temp: f64,
        condition: WeatherCondition,
    },
    SellAfterArrivalsNormalise {
        market: String,
        score: f64,
    },
    StorageAvailability {
        storage: String,
        capacity_mt: f64,
        price_per_kg: f64,
        distance_km: f64,
    },
}

impl std::fmt::Display for Reason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Reason::PriceRising { market, trend_pct } => write!(
                f,
                "Our regression model projects a +{:.1}% price increase over the next 7 days at {}.",
                trend_pct, market
            ),
            Reason::PriceFalling { market, trend_pct } => write!(
                f,
                "Our model projects a {:.1}% price drop over the next 7 days at {}. Selling immediately is advised to lock in profits.",
                trend_pct, market
            ),
            Reason::PriceStable { market, trend_pct, band } => write!(
                f,
                "Prices at {} are projected to remain relatively stable ({:.1}% change) over the next week. Recommended price band: ₹{:.0} to ₹{:.0}.",
                market, trend_pct, band.min, band.max
            ),
            Reason::LowSoilMoisture { moisture_pct } => write!(
                f,
                "Soil moisture is critically low ({:.1}%). Harvest immediately to prevent wilting and preserve crop weight.",
                moisture_pct
            ),
            Reason::NearIdealTemperature { current_temp, ideal_temp, crop, moisture_pct } => write!(
                f,
                "Current temperature ({:.1}°C) is close to the ideal {:.1}°C for {} with good soil moisture ({:.1}%).",
                current_temp, ideal_temp, crop, moisture_pct
            ),
            Reason::TooHot { delta, crop } => write!(
                f,
                "It is {:.1}°C hotter than ideal for {}. Harvesting sooner reduces heat-related spoilage.",
                delta, crop
            ),
            Reason::TooCold { delta, crop } => write!(
                f,
                "Temperatures are {:.1}°C below ideal for {}. Waiting for warmer conditions may improve quality.",
                delta.abs(), crop
            ),
            Reason::BestMarket { market, price, score, transit_hr, spoilage_pct } => write!(
                f,
                "{} offers the best effective price at ₹{:.0}/quintal (Market Score: {:.0}, Transit: {:.1} hrs, Spoilage: {:.1}%).",
                market, price, score, transit_hr, spoilage_pct
            ),
            Reason::HighArrivals { market } => write!(
                f,
                "HIGH arrival volumes detected at {}: risk of price depression due to oversupply.",
                market
            ),
            Reason::LowArrivals { market } => write!(
                f,
                "LOW arrival volumes at {}: favorable conditions for higher realized prices.",
                market
            ),
            Reason::HighHumidity { humidity } => write!(
                f,
                "High humidity ({:.0}%). Consider immediate transport to reduce moisture-related decay.",
                humidity
            ),
            Reason::UnsafeWeather { condition } => write!(
                f,
                "Current weather: {}. Delaying transport until conditions improve.",
                condition
            ),
            Reason::StorageInsteadOfGlut { band, market, storage, price_per_kg } => write!(
                f,
                "Price is likely between ₹{:.0} and ₹{:.0}. However, due to a massive arrival surge at {}, we recommend storing at {} for ₹{:.1}/kg to prevent distress sales.",
                band.min, band.max, market, storage, price_per_kg
            ),
            Reason::StorageConditions { current_temp, condition } => write!(
                f,
                "Current temperature ({:.1}°C) with {} conditions.",
                current_temp, condition
            ),
            Reason::SellAfterArrivalsNormalise { market, score } => write!(
                f,
                "Once arrivals normalise, sell at {} for the best effective return (Market Score: {:.0}).",
                market, score
            ),
            Reason::StorageAvailability { storage, capacity_mt, price_per_kg, distance_km } => write!(
                f,
                "Storage at {} has {:.0} MT capacity available at ₹{:.1}/kg/day, located {:.1} km from your farm.",
                storage, capacity_mt, price_per_kg, distance_km
            ),
        }
    }
}

/// Outcome of the decision policy
#[derive(Debug, Clone, PartialEq)]
pub struct Decision {
    pub action: Action,
    pub harvest_window: HarvestWindow,
    pub reasons: Vec<Reason>,
}

impl Decision {
    /// Reasons rendered as "1. …", "2. …" in rule order
    pub fn numbered_reasons(&self) -> Vec<String> {
        self.reasons
            .iter()
            .enumerate()
            .map(|(i, reason)| format!("{}. {}", i + 1, reason))
            .collect()
    }
}

/// Everything the policy looks at
#[derive(Debug, Clone, Copy)]
pub struct DecisionInputs<'a> {
    pub crop: &'a Crop,
    pub weather: &'a WeatherSnapshot,
    pub soil: &'a SoilSnapshot,
    pub best: &'a MarketOption,
    pub band: ConfidenceBand,
}

/// Evaluate the ordered rules for the chosen market
pub fn decide(inputs: &DecisionInputs<'_>) -> Decision {
    let DecisionInputs { crop, weather, soil, best, band } = *inputs;
    let mut action = Action::SellAtMandi;
    let mut harvest_window = HarvestWindow::HarvestToday;
    let mut reasons = Vec::new();

    // 1. Price trend
    let market = best.market_name.clone();
    let trend_pct = best.price_trend_pct;
    if trend_pct > PRICE_TREND_THRESHOLD_PCT {
        reasons.push(Reason::PriceRising { market, trend_pct });
        if best.transit_time_hr < SAFE_WAIT_TRANSIT_HR && weather.temp_delta < TEMP_TOLERANCE_C {
            action = Action::Wait;
            harvest_window = HarvestWindow::DelayForPrice;
        }
    } else if trend_pct < -PRICE_TREND_THRESHOLD_PCT {
        reasons.push(Reason::PriceFalling { market, trend_pct });
    } else {
        reasons.push(Reason::PriceStable { market, trend_pct, band });
    }

    // 2-3. Soil moisture, then temperature
    if soil.is_low_moisture() {
        harvest_window = HarvestWindow::HarvestToday;
        reasons.push(Reason::LowSoilMoisture { moisture_pct: soil.moisture_pct });
    } else if weather.temp_delta.abs() <= TEMP_TOLERANCE_C {
        if action != Action::Wait {
            harvest_window = HarvestWindow::OptimalNextDays;
        }
        reasons.push(Reason::NearIdealTemperature {
            current_temp: weather.current_temp,
            ideal_temp: crop.ideal_temp,
            crop: crop.name.clone(),
            moisture_pct: soil.moisture_pct,
        });
    } else if weather.temp_delta > TEMP_TOLERANCE_C {
        if action != Action::Wait {
            harvest_window = HarvestWindow::HarvestToday;
            action = Action::SellAtMandi;
        }
        reasons.push(Reason::TooHot { delta: weather.temp_delta, crop: crop.name.clone() });
    } else {
        if action != Action::SellAtMandi {
            action = Action::Wait;
            harvest_window = HarvestWindow::DelayForWarmth;
        }
        reasons.push(Reason::TooCold { delta: weather.temp_delta, crop: crop.name.clone() });
    }

    // 4. Best market restatement
    reasons.push(Reason::BestMarket {
        market: best.market_name.clone(),
        price: best.current_price,
        score: best.market_score,
        transit_hr: best.transit_time_hr,
        spoilage_pct: best.spoilage_loss,
    });

    // 5. Arrival volume
    match best.arrival_volume_trend {
        VolumeTrend::High => reasons.push(Reason::HighArrivals { market: best.market_name.clone() }),
        VolumeTrend::Low => reasons.push(Reason::LowArrivals { market: best.market_name.clone() }),
        VolumeTrend::Normal => {}
    }

    // 6. Humidity
    if weather.humidity > HIGH_HUMIDITY_PCT {
        reasons.push(Reason::HighHumidity { humidity: weather.humidity });
    }

    // 7. Weather safety
    if weather.condition.is_rain_class() {
        action = Action::Wait;
        reasons.push(Reason::UnsafeWeather { condition: weather.condition });
    }

    Decision { action, harvest_window, reasons }
}

/// Stagger the sale when the chosen market is flooded with arrivals.
///
/// The action becomes "Delay & Store Locally" and the reasons are replaced by
/// a storage explanation. Unsafe weather still wins the action: it stays
/// "Wait" and the weather reason is kept as the final reason.
pub fn apply_staggering(
    decision: Decision,
    best: &MarketOption,
    weather: &WeatherSnapshot,
    band: ConfidenceBand,
    storage: &StorageOption,
) -> Decision {
    if best.arrival_volume_trend != VolumeTrend::High {
        return decision;
    }

    let mut reasons = vec![
        Reason::StorageInsteadOfGlut {
            band,
            market: best.market_name.clone(),
            storage: storage.name.clone(),
            price_per_kg: storage.price_per_kg,
        },
        Reason::StorageConditions {
            current_temp: weather.current_temp,
            condition: weather.condition,
        },
        Reason::SellAfterArrivalsNormalise {
            market: best.market_name.clone(),
            score: best.market_score,
        },
        Reason::StorageAvailability {
            storage: storage.name.clone(),
            capacity_mt: storage.capacity_mt,
            price_per_kg: storage.price_per_kg,
            distance_km: storage.distance_km,
        },
    ];

    let action = if weather.condition.is_rain_class() {
        reasons.push(Reason::UnsafeWeather { condition: weather.condition });
        Action::Wait
    } else {
        Action::DelayAndStore
    };

    Decision {
        action,
        harvest_window: decision.harvest_window,
        reasons,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::confidence_band;
    use chrono::Utc;

    fn crop() -> Crop {
        Crop {
            id: "tomato".to_string(),
            name: "Tomato".to_string(),
            ideal_temp: 25.0,
            baseline_spoilage_rate: 2.5,
            created_at: Utc::now(),
        }
    }

    fn option(trend_pct: f64, transit: f64, volume: VolumeTrend) -> MarketOption {
        MarketOption {
            market_name: "Azadpur Mandi".to_string(),
            current_price: 2500.0,
            distance_km: 11.0,
            transit_time_hr: transit,
            spoilage_loss: 4.0,
            net_profit_estimate: 2300.0,
            market_score: 2300.0,
            arrival_volume_trend: volume,
            price_trend_pct: trend_pct,
            is_recommended: true,
        }
    }

    fn run(best: &MarketOption, temp: f64, humidity: f64, condition: WeatherCondition, moisture: f64) -> Decision {
        let crop = crop();
        let weather = WeatherSnapshot::new(temp, humidity, crop.ideal_temp, condition);
        let soil = SoilSnapshot::new(moisture, 30.0, 15.0, 20.0);
        decide(&DecisionInputs {
            crop: &crop,
            weather: &weather,
            soil: &soil,
            best,
            band: confidence_band(best.current_price),
        })
    }

    #[test]
    fn test_defaults_with_stable_prices_and_ideal_weather() {
        let d = run(&option(0.5, 2.0, VolumeTrend::Normal), 26.0, 60.0, WeatherCondition::ClearSky, 30.0);
        assert_eq!(d.action, Action::SellAtMandi);
        assert_eq!(d.harvest_window, HarvestWindow::OptimalNextDays);
        assert!(matches!(d.reasons[0], Reason::PriceStable { .. }));
        assert!(matches!(d.reasons[1], Reason::NearIdealTemperature { .. }));
        assert!(matches!(d.reasons[2], Reason::BestMarket { .. }));
        assert_eq!(d.reasons.len(), 3);
    }

    #[test]
    fn test_rising_price_waits_when_safe() {
        let d = run(&option(3.0, 2.0, VolumeTrend::Normal), 26.0, 60.0, WeatherCondition::ClearSky, 30.0);
        assert_eq!(d.action, Action::Wait);
        // near-ideal temperature does not touch the window while waiting
        assert_eq!(d.harvest_window, HarvestWindow::DelayForPrice);
    }

    #[test]
    fn test_rising_price_long_haul_sells() {
        let d = run(&option(3.0, 6.0, VolumeTrend::Normal), 26.0, 60.0, WeatherCondition::ClearSky, 30.0);
        assert_eq!(d.action, Action::SellAtMandi);
        assert!(matches!(d.reasons[0], Reason::PriceRising { .. }));
    }

    #[test]
    fn test_falling_price_keeps_action() {
        let d = run(&option(-3.0, 2.0, VolumeTrend::Normal), 26.0, 60.0, WeatherCondition::ClearSky, 30.0);
        assert_eq!(d.action, Action::SellAtMandi);
        assert!(matches!(d.reasons[0], Reason::PriceFalling { .. }));
    }

    #[test]
    fn test_low_moisture_forces_harvest_today() {
        let d = run(&option(3.0, 2.0, VolumeTrend::Normal), 26.0, 60.0, WeatherCondition::ClearSky, 12.0);
        assert_eq!(d.action, Action::Wait);
        assert_eq!(d.harvest_window, HarvestWindow::HarvestToday);
        assert!(matches!(d.reasons[1], Reason::LowSoilMoisture { .. }));
    }

    #[test]
    fn test_heat_blocks_price_wait() {
        // delta +5.5 > 5 blocks the price wait, so the action stays Sell
        let d = run(&option(3.0, 2.0, VolumeTrend::Normal), 30.5, 60.0, WeatherCondition::ClearSky, 30.0);
        assert_eq!(d.action, Action::SellAtMandi);
        assert_eq!(d.harvest_window, HarvestWindow::HarvestToday);
        assert!(matches!(d.reasons[1], Reason::TooHot { .. }));
    }

    #[test]
    fn test_cold_keeps_sell_when_already_selling() {
        let d = run(&option(0.0, 2.0, VolumeTrend::Normal), 15.0, 60.0, WeatherCondition::ClearSky, 30.0);
        assert_eq!(d.action, Action::SellAtMandi);
        assert_eq!(d.harvest_window, HarvestWindow::HarvestToday);
        assert!(matches!(d.reasons[1], Reason::TooCold { .. }));
    }

    #[test]
    fn test_cold_extends_price_wait() {
        let d = run(&option(3.0, 2.0, VolumeTrend::Normal), 15.0, 60.0, WeatherCondition::ClearSky, 30.0);
        assert_eq!(d.action, Action::Wait);
        assert_eq!(d.harvest_window, HarvestWindow::DelayForWarmth);
    }

    #[test]
    fn test_reason_order_with_all_advisories() {
        let d = run(&option(0.0, 2.0, VolumeTrend::High), 26.0, 85.0, WeatherCondition::Thunderstorm, 30.0);
        assert_eq!(d.action, Action::Wait);
        let kinds: Vec<&str> = d
            .reasons
            .iter()
            .map(|r| match r {
                Reason::PriceStable { .. } => "price",
                Reason::NearIdealTemperature { .. } => "temperature",
                Reason::BestMarket { .. } => "market",
                Reason::HighArrivals { .. } => "volume",
                Reason::HighHumidity { .. } => "humidity",
                Reason::UnsafeWeather { .. } => "weather",
                _ => "other",
            })
            .collect();
        assert_eq!(kinds, ["price", "temperature", "market", "volume", "humidity", "weather"]);
    }

    #[test]
    fn test_low_arrivals_reason() {
        let d = run(&option(0.0, 2.0, VolumeTrend::Low), 26.0, 60.0, WeatherCondition::ClearSky, 30.0);
        assert!(matches!(d.reasons[3], Reason::LowArrivals { .. }));
    }

    #[test]
    fn test_numbered_reasons() {
        let d = run(&option(0.0, 2.0, VolumeTrend::Normal), 26.0, 60.0, WeatherCondition::ClearSky, 30.0);
        let numbered = d.numbered_reasons();
        assert!(numbered[0].starts_with("1. Prices at Azadpur Mandi"));
        assert!(numbered[2].starts_with("3. Azadpur Mandi offers the best effective price at ₹2500/quintal"));
    }

    fn storage() -> StorageOption {
        StorageOption {
            name: "Narela Cold Storage".to_string(),
            distance_km: 27.4,
            price_per_kg: 2.0,
            capacity_mt: 500.0,
        }
    }

    #[test]
    fn test_staggering_replaces_reasons() {
        let best = option(0.0, 2.0, VolumeTrend::High);
        let d = run(&best, 26.0, 60.0, WeatherCondition::ClearSky, 30.0);
        let weather = WeatherSnapshot::new(26.0, 60.0, 25.0, WeatherCondition::ClearSky);
        let staggered = apply_staggering(d, &best, &weather, confidence_band(2500.0), &storage());
        assert_eq!(staggered.action, Action::DelayAndStore);
        assert_eq!(staggered.reasons.len(), 4);
        assert!(staggered.numbered_reasons()[3].contains("Narela Cold Storage has 500 MT"));
    }

    #[test]
    fn test_staggering_yields_to_unsafe_weather() {
        let best = option(0.0, 2.0, VolumeTrend::High);
        let d = run(&best, 26.0, 60.0, WeatherCondition::Rain, 30.0);
        let weather = WeatherSnapshot::new(26.0, 60.0, 25.0, WeatherCondition::Rain);
        let staggered = apply_staggering(d, &best, &weather, confidence_band(2500.0), &storage());
        assert_eq!(staggered.action, Action::Wait);
        assert_eq!(staggered.reasons.len(), 5);
        assert!(matches!(staggered.reasons[4], Reason::UnsafeWeather { condition: WeatherCondition::Rain }));
    }

    #[test]
    fn test_staggering_ignores_normal_markets() {
        let best = option(0.0, 2.0, VolumeTrend::Normal);
        let d = run(&best, 26.0, 60.0, WeatherCondition::ClearSky, 30.0);
        let weather = WeatherSnapshot::new(26.0, 60.0, 25.0, WeatherCondition::ClearSky);
        let unchanged = apply_staggering(d.clone(), &best, &weather, confidence_band(2500.0), &storage());
        assert_eq!(unchanged, d);
    }
}
