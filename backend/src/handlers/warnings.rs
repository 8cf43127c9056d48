//! HTTP handlers for weather warning endpoints

use axum::extract::State;
use shared::WeatherWarning;

use super::{degrade, list_ok, ApiPath, ListResponse};
use crate::AppState;

/// Every active warning
pub async fn list_warnings(State(state): State<AppState>) -> ListResponse<WeatherWarning> {
    match state.warnings.warnings().await {
        Ok(warnings) => Ok(list_ok(
            warnings,
            |n| format!("{} active weather warnings", n),
            "No active weather warnings at the moment",
        )),
        Err(err) => degrade(&state, err, "Weather warnings unavailable"),
    }
}

/// Warnings of one level (green, yellow, orange, red)
pub async fn list_warnings_by_level(
    State(state): State<AppState>,
    ApiPath(level): ApiPath<String>,
) -> ListResponse<WeatherWarning> {
    match state.warnings.warnings_by_level(&level).await {
        Ok(warnings) => {
            let message = format!("{} warnings with level {}", warnings.len(), level);
            Ok(list_ok(warnings, |_| message.clone(), message.clone()))
        }
        Err(err) => degrade(&state, err, "Weather warnings unavailable"),
    }
}
