//! Forecast models

use serde::{Deserialize, Serialize};

/// A forecast location (city or town) inside a district
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Location {
    /// IPMA `globalIdLocal`
    pub id: i64,
    pub name: String,
    pub district: String,
}

/// Weather condition resolved from the weather-type lookup table
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeatherCondition {
    pub id: i64,
    pub description: String,
}

/// One forecast entry within a day
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HourlyForecast {
    /// Clock time, `HH:MM`
    pub hour: String,
    pub temperature: f64,
    pub weather_condition: WeatherCondition,
    pub precipitation_probability: Option<f64>,
    pub wind_speed: Option<f64>,
    pub wind_direction: Option<String>,
}

/// Forecast for a single location and day
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyForecast {
    /// Target day, `YYYY-MM-DD`
    pub date: String,
    pub location: String,
    pub district: String,
    pub hourly_forecasts: Vec<HourlyForecast>,
    pub min_temperature: Option<f64>,
    pub max_temperature: Option<f64>,
}

impl DailyForecast {
    /// Number of forecast entries for the day
    pub fn len(&self) -> usize {
        self.hourly_forecasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hourly_forecasts.is_empty()
    }
}

/// Running minimum/maximum over the temperatures seen for a day
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TemperatureRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl TemperatureRange {
    pub fn observe(&mut self, value: f64) {
        self.min = Some(self.min.map_or(value, |m| m.min(value)));
        self.max = Some(self.max.map_or(value, |m| m.max(value)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temperature_range_empty() {
        let range = TemperatureRange::default();
        assert_eq!(range.min, None);
        assert_eq!(range.max, None);
    }

    #[test]
    fn test_temperature_range_tracks_extremes() {
        let mut range = TemperatureRange::default();
        for t in [14.0, 22.5, -1.0, 9.0] {
            range.observe(t);
        }
        assert_eq!(range.min, Some(-1.0));
        assert_eq!(range.max, Some(22.5));
    }
}
