//! HTTP handlers for seismic activity endpoints

use axum::extract::State;
use serde::Deserialize;
use shared::{validate_magnitude, SeismicEvent, SeismicRegion};

use super::{degrade, list_ok, ApiPath, ApiQuery, ListResponse};
use crate::error::AppError;
use crate::AppState;

/// `?region=continente|acores|madeira`; anything else means continente
#[derive(Debug, Deserialize)]
pub struct RegionQuery {
    pub region: Option<String>,
}

impl RegionQuery {
    fn region(&self) -> SeismicRegion {
        self.region
            .as_deref()
            .map(SeismicRegion::from_query)
            .unwrap_or_default()
    }
}

/// Seismic events of the last days for a region
pub async fn list_seismic_events(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<RegionQuery>,
) -> ListResponse<SeismicEvent> {
    let region = query.region();
    match state.seismic.events(region).await {
        Ok(events) => Ok(list_ok(
            events,
            |n| format!("{} seismic events found", n),
            format!("No seismic events recorded in region {}", region),
        )),
        Err(err) => degrade(&state, err, "Seismic data unavailable"),
    }
}

/// Seismic events of at least the given magnitude
pub async fn list_seismic_by_magnitude(
    State(state): State<AppState>,
    ApiPath(min_magnitude): ApiPath<String>,
    ApiQuery(query): ApiQuery<RegionQuery>,
) -> ListResponse<SeismicEvent> {
    let min_magnitude = parse_magnitude(&min_magnitude)?;
    let region = query.region();

    match state.seismic.events_above(region, min_magnitude).await {
        Ok(events) => {
            let message = format!("{} events with magnitude >= {}", events.len(), min_magnitude);
            Ok(list_ok(events, |_| message.clone(), message.clone()))
        }
        Err(err) => degrade(&state, err, "Seismic data unavailable"),
    }
}

fn parse_magnitude(raw: &str) -> Result<f64, AppError> {
    let invalid = |message: &str| AppError::Validation {
        field: "min_magnitude".to_string(),
        message: message.to_string(),
        message_pt: format!("Magnitude inválida: {}", raw),
    };

    let magnitude: f64 = raw
        .trim()
        .parse()
        .map_err(|_| invalid("Magnitude must be a number"))?;
    validate_magnitude(magnitude).map_err(invalid)?;
    Ok(magnitude)
}
