//! Weather warning models

use serde::{Deserialize, Serialize};
use std::fmt;

/// Awareness level of a weather warning
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum WarningLevel {
    Green,
    Yellow,
    Orange,
    Red,
    Unknown,
}

impl WarningLevel {
    /// Map the upstream `awarenessLevelID` code (1-4)
    pub fn from_code(code: i64) -> Self {
        match code {
            1 => WarningLevel::Green,
            2 => WarningLevel::Yellow,
            3 => WarningLevel::Orange,
            4 => WarningLevel::Red,
            _ => WarningLevel::Unknown,
        }
    }

    /// Map a textual level, either a numeric code or a colour name in
    /// English or Portuguese
    pub fn from_label(label: &str) -> Self {
        let label = label.trim().to_lowercase();
        if let Ok(code) = label.parse::<i64>() {
            return Self::from_code(code);
        }
        match label.as_str() {
            "green" | "verde" => WarningLevel::Green,
            "yellow" | "amarelo" => WarningLevel::Yellow,
            "orange" | "laranja" => WarningLevel::Orange,
            "red" | "vermelho" => WarningLevel::Red,
            _ => WarningLevel::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WarningLevel::Green => "green",
            WarningLevel::Yellow => "yellow",
            WarningLevel::Orange => "orange",
            WarningLevel::Red => "red",
            WarningLevel::Unknown => "unknown",
        }
    }

    /// Case-insensitive comparison against a free-text filter
    pub fn matches(&self, filter: &str) -> bool {
        self.as_str().eq_ignore_ascii_case(filter.trim())
    }
}

impl fmt::Display for WarningLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Weather warning issued for a warning area
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherWarning {
    /// Warning area id (`idAreaAviso`)
    pub id: String,
    pub area: String,
    pub warning_type: String,
    pub level: WarningLevel,
    pub start_time: String,
    pub end_time: String,
    pub description: String,
    pub phenomenon: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_codes() {
        assert_eq!(WarningLevel::from_code(1), WarningLevel::Green);
        assert_eq!(WarningLevel::from_code(2), WarningLevel::Yellow);
        assert_eq!(WarningLevel::from_code(3), WarningLevel::Orange);
        assert_eq!(WarningLevel::from_code(4), WarningLevel::Red);
        assert_eq!(WarningLevel::from_code(0), WarningLevel::Unknown);
        assert_eq!(WarningLevel::from_code(99), WarningLevel::Unknown);
    }

    #[test]
    fn test_level_labels() {
        assert_eq!(WarningLevel::from_label("yellow"), WarningLevel::Yellow);
        assert_eq!(WarningLevel::from_label("Laranja"), WarningLevel::Orange);
        assert_eq!(WarningLevel::from_label(" 4 "), WarningLevel::Red);
        assert_eq!(WarningLevel::from_label("purple"), WarningLevel::Unknown);
    }

    #[test]
    fn test_level_serializes_lowercase() {
        assert_eq!(
            serde_json::to_value(WarningLevel::Yellow).unwrap(),
            serde_json::json!("yellow")
        );
        assert_eq!(
            serde_json::to_value(WarningLevel::Unknown).unwrap(),
            serde_json::json!("unknown")
        );
    }

    #[test]
    fn test_level_filter_is_case_insensitive() {
        assert!(WarningLevel::Red.matches("RED"));
        assert!(WarningLevel::Red.matches(" red "));
        assert!(!WarningLevel::Red.matches("orange"));
    }
}
