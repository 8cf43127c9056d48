//! Seismic activity models

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::Coordinates;

/// Seismic feed region
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum SeismicRegion {
    #[default]
    Continente,
    Acores,
    Madeira,
}

impl SeismicRegion {
    /// Resolve a `?region=` value. Unrecognized regions fall back to the mainland feed.
    pub fn from_query(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "acores" | "açores" | "azores" => SeismicRegion::Acores,
            "madeira" => SeismicRegion::Madeira,
            _ => SeismicRegion::Continente,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SeismicRegion::Continente => "continente",
            SeismicRegion::Acores => "acores",
            SeismicRegion::Madeira => "madeira",
        }
    }
}

impl fmt::Display for SeismicRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A seismic event from the last 30 days
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeismicEvent {
    pub id: String,
    pub magnitude: f64,
    /// Depth in km
    pub depth: f64,
    pub location: String,
    pub time: String,
    pub coordinates: Coordinates,
    pub intensity: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_from_query() {
        assert_eq!(SeismicRegion::from_query("acores"), SeismicRegion::Acores);
        assert_eq!(SeismicRegion::from_query("Açores"), SeismicRegion::Acores);
        assert_eq!(SeismicRegion::from_query("MADEIRA"), SeismicRegion::Madeira);
        assert_eq!(SeismicRegion::from_query("continente"), SeismicRegion::Continente);
        assert_eq!(SeismicRegion::from_query("atlantis"), SeismicRegion::Continente);
    }
}
