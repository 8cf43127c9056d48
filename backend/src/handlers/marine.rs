//! HTTP handlers for sea state, fire risk and UV index endpoints

use axum::extract::State;
use shared::{validate_fire_risk_level, FireRisk, SeaState, UvIndex, UvLevel};

use super::{degrade, list_ok, ApiPath, ListResponse};
use crate::error::AppError;
use crate::AppState;

pub async fn list_sea_state(State(state): State<AppState>) -> ListResponse<SeaState> {
    match state.marine.sea_state().await {
        Ok(states) => Ok(list_ok(
            states,
            |n| format!("Sea state forecasts for {} locations", n),
            "Sea state data unavailable",
        )),
        Err(err) => degrade(&state, err, "Sea state data unavailable"),
    }
}

pub async fn list_fire_risk(State(state): State<AppState>) -> ListResponse<FireRisk> {
    match state.marine.fire_risk().await {
        Ok(risks) => Ok(list_ok(
            risks,
            |n| format!("Fire risk forecasts for {} locations", n),
            "Fire risk data unavailable",
        )),
        Err(err) => degrade(&state, err, "Fire risk data unavailable"),
    }
}

/// Locations with fire risk of at least the given level (1-5)
pub async fn list_fire_risk_by_level(
    State(state): State<AppState>,
    ApiPath(min_level): ApiPath<String>,
) -> ListResponse<FireRisk> {
    let min_level = parse_fire_level(&min_level)?;

    match state.marine.fire_risk_at_least(min_level).await {
        Ok(risks) => {
            let message = format!("{} locations with risk >= {}", risks.len(), min_level);
            Ok(list_ok(risks, |_| message.clone(), message.clone()))
        }
        Err(err) => degrade(&state, err, "Fire risk data unavailable"),
    }
}

pub async fn list_uv_index(State(state): State<AppState>) -> ListResponse<UvIndex> {
    match state.marine.uv_index().await {
        Ok(indices) => Ok(list_ok(
            indices,
            |n| format!("UV index forecasts for {} locations", n),
            "UV index data unavailable",
        )),
        Err(err) => degrade(&state, err, "UV index data unavailable"),
    }
}

/// Locations in one UV band (low, moderate, high, very_high, extreme)
pub async fn list_uv_index_by_level(
    State(state): State<AppState>,
    ApiPath(level): ApiPath<String>,
) -> ListResponse<UvIndex> {
    let level: UvLevel = level.parse().map_err(|_| AppError::Validation {
        field: "level".to_string(),
        message: "Invalid UV level. Use: low, moderate, high, very_high, extreme".to_string(),
        message_pt: "Nível UV inválido. Use: baixo, moderado, alto, muito_alto, extremo"
            .to_string(),
    })?;

    match state.marine.uv_index_at_level(level).await {
        Ok(indices) => {
            let message = format!("{} locations with UV {}", indices.len(), level);
            Ok(list_ok(indices, |_| message.clone(), message.clone()))
        }
        Err(err) => degrade(&state, err, "UV index data unavailable"),
    }
}

fn parse_fire_level(raw: &str) -> Result<i64, AppError> {
    let invalid = || AppError::Validation {
        field: "min_level".to_string(),
        message: "Fire risk level must be between 1 and 5".to_string(),
        message_pt: "Nível deve estar entre 1 e 5".to_string(),
    };

    let level: i64 = raw.trim().parse().map_err(|_| invalid())?;
    validate_fire_risk_level(level).map_err(|_| invalid())?;
    Ok(level)
}
