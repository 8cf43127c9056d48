//! Validation utilities for request inputs
//!
//! Checks run by the request surface before any upstream call is made.

use crate::models::{FIRE_RISK_MAX_LEVEL, FIRE_RISK_MIN_LEVEL};

/// Validate a forecast day against the `YYYY-MM-DD` pattern.
///
/// Only the shape is checked; a well-formed day with no forecast data is a
/// "not found", not a validation failure.
pub fn validate_forecast_day(day: &str) -> Result<(), &'static str> {
    let bytes = day.as_bytes();
    if bytes.len() != 10 {
        return Err("Day must use the YYYY-MM-DD format");
    }
    let well_formed = bytes.iter().enumerate().all(|(i, b)| match i {
        4 | 7 => *b == b'-',
        _ => b.is_ascii_digit(),
    });
    if !well_formed {
        return Err("Day must use the YYYY-MM-DD format");
    }
    Ok(())
}

/// Validate a minimum fire-risk level filter (1-5)
pub fn validate_fire_risk_level(level: i64) -> Result<(), &'static str> {
    if !(FIRE_RISK_MIN_LEVEL..=FIRE_RISK_MAX_LEVEL).contains(&level) {
        return Err("Fire risk level must be between 1 and 5");
    }
    Ok(())
}

/// Validate a minimum magnitude filter
pub fn validate_magnitude(magnitude: f64) -> Result<(), &'static str> {
    if !magnitude.is_finite() {
        return Err("Magnitude must be a finite number");
    }
    Ok(())
}
