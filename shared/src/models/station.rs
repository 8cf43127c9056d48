//! Weather station models

use serde::{Deserialize, Serialize};

use crate::types::Coordinates;

/// A surface weather station
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherStation {
    pub id: String,
    pub name: String,
    pub coordinates: Coordinates,
    /// Altitude in metres
    pub altitude: Option<f64>,
}

/// A single observation reported by a station
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationObservation {
    pub station_id: String,
    pub station_name: String,
    pub timestamp: String,
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub pressure: Option<f64>,
    pub wind_speed: Option<f64>,
    pub wind_direction: Option<String>,
    pub precipitation: Option<f64>,
    pub visibility: Option<f64>,
}
