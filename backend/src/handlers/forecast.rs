//! HTTP handlers for forecast endpoints

use axum::{
    extract::State,
    Json,
};
use serde::{Deserialize, Serialize};
use shared::{validate_forecast_day, ApiResponse, DailyForecast, Location};
use std::borrow::Cow;
use validator::{Validate, ValidationError};

use super::{ApiPath, ValidatedQuery};
use crate::error::{AppError, AppResult};
use crate::services::ForecastLookup;
use crate::AppState;

/// Optional target day for a forecast
#[derive(Debug, Deserialize, Validate)]
pub struct ForecastQuery {
    #[validate(custom = "validate_day")]
    pub day: Option<String>,
}

fn validate_day(day: &str) -> Result<(), ValidationError> {
    validate_forecast_day(day).map_err(|msg| {
        let mut err = ValidationError::new("day_format");
        err.message = Some(Cow::Borrowed(msg));
        err
    })
}

/// Forecast for a location, for today or `?day=YYYY-MM-DD`
pub async fn get_forecast(
    State(state): State<AppState>,
    ApiPath((district, location)): ApiPath<(String, String)>,
    ValidatedQuery(query): ValidatedQuery<ForecastQuery>,
) -> AppResult<Json<ApiResponse<DailyForecast>>> {
    let lookup = state
        .forecast
        .forecast_for_location(&district, &location, query.day.as_deref())
        .await?;

    match lookup {
        ForecastLookup::Found(forecast) => Ok(Json(ApiResponse::ok(forecast))),
        ForecastLookup::UnknownDistrict => Err(AppError::DistrictNotFound(district)),
        ForecastLookup::UnknownLocation { available } => Err(AppError::LocationNotFound {
            district,
            location,
            available,
        }),
        ForecastLookup::NoDataForDay { day } => Err(AppError::NoDataForDay(day)),
    }
}

/// Locations available in a district
pub async fn list_locations(
    State(state): State<AppState>,
    ApiPath(district): ApiPath<String>,
) -> AppResult<Json<ApiResponse<Vec<Location>>>> {
    let locations = match state.reference.locations_by_district(&district).await {
        Ok(locations) => locations,
        Err(err) if state.config.upstream.degrade_to_empty => {
            tracing::warn!(error = %err, "District table unavailable");
            Vec::new()
        }
        Err(err) => return Err(err.into()),
    };

    if locations.is_empty() {
        return Err(AppError::DistrictNotFound(district));
    }

    let message = format!("{} locations in {}", locations.len(), district);
    Ok(Json(ApiResponse::ok(locations).with_message(message)))
}

#[derive(Debug, Serialize)]
pub struct DistrictList {
    pub districts: Vec<String>,
    pub total: usize,
}

/// Every district key, sorted
pub async fn list_districts(State(state): State<AppState>) -> AppResult<Json<ApiResponse<DistrictList>>> {
    let districts: Vec<String> = match state.reference.districts_and_locations().await {
        Ok(table) => table.keys().cloned().collect(),
        Err(err) if state.config.upstream.degrade_to_empty => {
            tracing::warn!(error = %err, "District table unavailable");
            Vec::new()
        }
        Err(err) => return Err(err.into()),
    };

    let total = districts.len();
    Ok(Json(
        ApiResponse::ok(DistrictList { districts, total })
            .with_message("To list the locations of a district, use: GET /forecast/{district}"),
    ))
}
