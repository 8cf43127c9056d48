//! HTTP handlers for agricultural data endpoints

use axum::extract::State;
use serde::Deserialize;
use shared::{AgriculturalData, ClimateMetric, WaterQuality, WaterQualityStatus};

use super::{degrade, list_ok, ApiPath, ApiQuery, ListResponse};
use crate::error::AppError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct MunicipalityQuery {
    pub municipality: Option<String>,
}

async fn climate_series(
    state: AppState,
    metric: ClimateMetric,
    query: MunicipalityQuery,
) -> ListResponse<AgriculturalData> {
    let municipality = query.municipality.as_deref().filter(|m| !m.trim().is_empty());

    match state.agriculture.climate_data(metric, municipality).await {
        Ok(records) => {
            let empty = match municipality {
                Some(m) => format!("No {} data found for {}", metric.label(), m),
                None => format!("{} data unavailable", metric.label()),
            };
            Ok(list_ok(
                records,
                |n| format!("{} {} records", n, metric.label()),
                empty,
            ))
        }
        Err(err) => degrade(&state, err, &format!("{} data unavailable", metric.label())),
    }
}

pub async fn get_evapotranspiration(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<MunicipalityQuery>,
) -> ListResponse<AgriculturalData> {
    climate_series(state, ClimateMetric::Evapotranspiration, query).await
}

pub async fn get_precipitation(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<MunicipalityQuery>,
) -> ListResponse<AgriculturalData> {
    climate_series(state, ClimateMetric::Precipitation, query).await
}

pub async fn get_temperature_min(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<MunicipalityQuery>,
) -> ListResponse<AgriculturalData> {
    climate_series(state, ClimateMetric::TemperatureMin, query).await
}

pub async fn get_temperature_max(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<MunicipalityQuery>,
) -> ListResponse<AgriculturalData> {
    climate_series(state, ClimateMetric::TemperatureMax, query).await
}

pub async fn get_pdsi(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<MunicipalityQuery>,
) -> ListResponse<AgriculturalData> {
    climate_series(state, ClimateMetric::Pdsi, query).await
}

/// Harvesting status of the bivalve production zones
pub async fn list_water_quality(State(state): State<AppState>) -> ListResponse<WaterQuality> {
    match state.agriculture.water_quality().await {
        Ok(zones) => Ok(list_ok(
            zones,
            |n| format!("{} bivalve harvesting zones", n),
            "Water quality data unavailable",
        )),
        Err(err) => degrade(&state, err, "Water quality data unavailable"),
    }
}

/// Zones with one status (open, closed, conditional)
pub async fn list_water_quality_by_status(
    State(state): State<AppState>,
    ApiPath(status): ApiPath<String>,
) -> ListResponse<WaterQuality> {
    let status: WaterQualityStatus = status.parse().map_err(|_| AppError::Validation {
        field: "status".to_string(),
        message: "Invalid status. Use: open, closed, conditional".to_string(),
        message_pt: "Estado inválido. Use: aberta, fechada, condicional".to_string(),
    })?;

    match state.agriculture.water_quality_by_status(status).await {
        Ok(zones) => {
            let message = format!("{} zones with status '{}'", zones.len(), status);
            Ok(list_ok(zones, |_| message.clone(), message.clone()))
        }
        Err(err) => degrade(&state, err, "Water quality data unavailable"),
    }
}
