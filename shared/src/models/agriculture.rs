//! Agricultural climate data and bivalve harvesting zone models

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ParseLabelError;
use crate::types::Coordinates;

/// Daily/monthly climate metric published per municipality as CSV
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ClimateMetric {
    Evapotranspiration,
    Precipitation,
    TemperatureMin,
    TemperatureMax,
    Pdsi,
}

impl ClimateMetric {
    pub const ALL: [ClimateMetric; 5] = [
        ClimateMetric::Evapotranspiration,
        ClimateMetric::Precipitation,
        ClimateMetric::TemperatureMin,
        ClimateMetric::TemperatureMax,
        ClimateMetric::Pdsi,
    ];

    /// URL segment, shared by the upstream path and the public route
    pub fn slug(&self) -> &'static str {
        match self {
            ClimateMetric::Evapotranspiration => "evapotranspiration",
            ClimateMetric::Precipitation => "precipitation",
            ClimateMetric::TemperatureMin => "temperature-min",
            ClimateMetric::TemperatureMax => "temperature-max",
            ClimateMetric::Pdsi => "pdsi",
        }
    }

    /// Human readable name used in response messages
    pub fn label(&self) -> &'static str {
        match self {
            ClimateMetric::Evapotranspiration => "evapotranspiration",
            ClimateMetric::Precipitation => "precipitation",
            ClimateMetric::TemperatureMin => "minimum temperature",
            ClimateMetric::TemperatureMax => "maximum temperature",
            ClimateMetric::Pdsi => "PDSI (drought index)",
        }
    }
}

impl fmt::Display for ClimateMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for ClimateMetric {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('_', "-");
        ClimateMetric::ALL
            .into_iter()
            .find(|metric| metric.slug() == normalized)
            .ok_or_else(|| ParseLabelError::new("climate metric", s))
    }
}

/// One municipality/date row of a climate metric.
/// Only the field matching the requested metric is populated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AgriculturalData {
    pub date: String,
    pub municipality: String,
    pub evapotranspiration: Option<f64>,
    pub precipitation: Option<f64>,
    pub min_temperature: Option<f64>,
    pub max_temperature: Option<f64>,
    /// Palmer Drought Severity Index
    pub pdsi_index: Option<f64>,
}

impl AgriculturalData {
    pub fn new(date: String, municipality: String, metric: ClimateMetric, value: Option<f64>) -> Self {
        let mut record = Self {
            date,
            municipality,
            evapotranspiration: None,
            precipitation: None,
            min_temperature: None,
            max_temperature: None,
            pdsi_index: None,
        };
        let slot = match metric {
            ClimateMetric::Evapotranspiration => &mut record.evapotranspiration,
            ClimateMetric::Precipitation => &mut record.precipitation,
            ClimateMetric::TemperatureMin => &mut record.min_temperature,
            ClimateMetric::TemperatureMax => &mut record.max_temperature,
            ClimateMetric::Pdsi => &mut record.pdsi_index,
        };
        *slot = value;
        record
    }

    /// Value of the populated metric, whichever it is
    pub fn value(&self) -> Option<f64> {
        self.evapotranspiration
            .or(self.precipitation)
            .or(self.min_temperature)
            .or(self.max_temperature)
            .or(self.pdsi_index)
    }
}

// ============================================================================
// Bivalve mollusk harvesting zones
// ============================================================================

/// Harvesting status of a bivalve production zone
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum WaterQualityStatus {
    Open,
    Closed,
    Conditional,
    Unknown,
}

impl WaterQualityStatus {
    /// Map an upstream status label (Portuguese or English); anything else is `Unknown`
    pub fn from_label(label: &str) -> Self {
        label.parse().unwrap_or(WaterQualityStatus::Unknown)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WaterQualityStatus::Open => "open",
            WaterQualityStatus::Closed => "closed",
            WaterQualityStatus::Conditional => "conditional",
            WaterQualityStatus::Unknown => "unknown",
        }
    }
}

impl fmt::Display for WaterQualityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WaterQualityStatus {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "open" | "aberta" | "aberto" => Ok(WaterQualityStatus::Open),
            "closed" | "fechada" | "fechado" | "interdita" => Ok(WaterQualityStatus::Closed),
            "conditional" | "condicional" => Ok(WaterQualityStatus::Conditional),
            _ => Err(ParseLabelError::new("water quality status", s)),
        }
    }
}

/// Harvesting restriction state of a coastal bivalve zone
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaterQuality {
    pub zone_id: String,
    pub zone_name: String,
    pub status: WaterQualityStatus,
    pub restriction_type: Option<String>,
    pub coordinates: Coordinates,
    pub last_update: String,
}
