//! Marine, fire-risk and UV index models
//!
//! Fire-risk descriptions and UV bands are derived from the raw integer
//! values through fixed tables.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ParseLabelError;

/// Sea state forecast for a coastal location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeaState {
    pub date: String,
    pub location: String,
    /// Significant wave height in metres
    pub wave_height: Option<f64>,
    /// Wave period in seconds
    pub wave_period: Option<f64>,
    pub wave_direction: Option<String>,
    pub sea_temperature: Option<f64>,
    pub coastal_conditions: Option<String>,
}

// ============================================================================
// Fire risk
// ============================================================================

/// Lowest fire-risk level
pub const FIRE_RISK_MIN_LEVEL: i64 = 1;
/// Highest fire-risk level
pub const FIRE_RISK_MAX_LEVEL: i64 = 5;

/// Describe a fire-risk level (1-5)
pub fn fire_risk_description(level: i64) -> &'static str {
    match level {
        1 => "Low",
        2 => "Moderate",
        3 => "High",
        4 => "Very High",
        5 => "Maximum",
        _ => "Unknown",
    }
}

/// Daily fire-risk forecast for a municipality
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FireRisk {
    pub date: String,
    pub location: String,
    pub risk_level: i64,
    pub risk_description: String,
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub wind_speed: Option<f64>,
}

impl FireRisk {
    pub fn new(date: String, location: String, risk_level: i64) -> Self {
        Self {
            date,
            location,
            risk_level,
            risk_description: fire_risk_description(risk_level).to_string(),
            temperature: None,
            humidity: None,
            wind_speed: None,
        }
    }
}

// ============================================================================
// UV index
// ============================================================================

/// UV exposure band
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum UvLevel {
    Low,
    Moderate,
    High,
    #[serde(rename = "Very High")]
    VeryHigh,
    Extreme,
}

impl UvLevel {
    /// Band a UV index: <=2 low, <=5 moderate, <=7 high, <=10 very high
    pub fn from_index(index: i64) -> Self {
        match index {
            i if i <= 2 => UvLevel::Low,
            i if i <= 5 => UvLevel::Moderate,
            i if i <= 7 => UvLevel::High,
            i if i <= 10 => UvLevel::VeryHigh,
            _ => UvLevel::Extreme,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UvLevel::Low => "Low",
            UvLevel::Moderate => "Moderate",
            UvLevel::High => "High",
            UvLevel::VeryHigh => "Very High",
            UvLevel::Extreme => "Extreme",
        }
    }
}

impl fmt::Display for UvLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UvLevel {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', ' '], "_").as_str() {
            "low" | "baixo" => Ok(UvLevel::Low),
            "moderate" | "moderado" => Ok(UvLevel::Moderate),
            "high" | "alto" => Ok(UvLevel::High),
            "very_high" | "muito_alto" => Ok(UvLevel::VeryHigh),
            "extreme" | "extremo" => Ok(UvLevel::Extreme),
            _ => Err(ParseLabelError::new("UV level", s)),
        }
    }
}

/// Minutes of unprotected exposure before sunburn, by UV index.
/// Indices above 11 use the value for 11.
const PROTECTION_MINUTES: [(i64, u32); 11] = [
    (1, 60),
    (2, 45),
    (3, 30),
    (4, 25),
    (5, 20),
    (6, 15),
    (7, 12),
    (8, 10),
    (9, 8),
    (10, 6),
    (11, 5),
];

const DEFAULT_PROTECTION_MINUTES: u32 = 5;

/// Estimated protection time in minutes for a UV index
pub fn protection_time(index: i64) -> u32 {
    let capped = index.min(11);
    PROTECTION_MINUTES
        .iter()
        .find(|(i, _)| *i == capped)
        .map(|(_, minutes)| *minutes)
        .unwrap_or(DEFAULT_PROTECTION_MINUTES)
}

/// Daily UV index forecast for a location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UvIndex {
    pub date: String,
    pub location: String,
    pub uv_index: i64,
    pub uv_level: UvLevel,
    /// Minutes until sunburn without protection
    pub protection_time: u32,
}

impl UvIndex {
    pub fn new(date: String, location: String, uv_index: i64) -> Self {
        Self {
            date,
            location,
            uv_index,
            uv_level: UvLevel::from_index(uv_index),
            protection_time: protection_time(uv_index),
        }
    }
}
