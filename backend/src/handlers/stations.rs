//! HTTP handlers for weather station endpoints

use axum::extract::State;
use serde::Deserialize;
use shared::{StationObservation, WeatherStation};

use super::{degrade, list_ok, ApiQuery, ListResponse};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ObservationQuery {
    pub station_id: Option<String>,
}

pub async fn list_stations(State(state): State<AppState>) -> ListResponse<WeatherStation> {
    match state.stations.stations().await {
        Ok(stations) => Ok(list_ok(
            stations,
            |n| format!("{} weather stations found", n),
            "No weather stations found",
        )),
        Err(err) => degrade(&state, err, "Weather station data unavailable"),
    }
}

/// Observations for every station, or one with `?station_id=`
pub async fn list_observations(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ObservationQuery>,
) -> ListResponse<StationObservation> {
    let station_id = query.station_id.as_deref().filter(|id| !id.trim().is_empty());

    match state.stations.observations(station_id).await {
        Ok(observations) => {
            let empty = match station_id {
                Some(id) => format!("No observations found for station {}", id),
                None => "No weather observations available".to_string(),
            };
            Ok(list_ok(
                observations,
                |n| format!("{} observations found", n),
                empty,
            ))
        }
        Err(err) => degrade(&state, err, "Observation data unavailable"),
    }
}

/// The most recent observations across all stations
pub async fn list_latest_observations(
    State(state): State<AppState>,
) -> ListResponse<StationObservation> {
    match state.stations.latest_observations().await {
        Ok(observations) => Ok(list_ok(
            observations,
            |n| format!("{} most recent observations", n),
            "No recent observations available",
        )),
        Err(err) => degrade(&state, err, "Observation data unavailable"),
    }
}
