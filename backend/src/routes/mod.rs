//! Route definitions for the IPMA proxy
//!
//! Collection roots are served with and without a trailing slash.

use axum::{routing::get, Router};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(forecast_routes())
        .merge(warning_routes())
        .merge(seismic_routes())
        .merge(marine_routes())
        .merge(station_routes())
        .merge(agriculture_routes())
}

/// Forecast, location and district routes
fn forecast_routes() -> Router<AppState> {
    Router::new()
        .route("/forecast", get(handlers::list_districts))
        .route("/forecast/", get(handlers::list_districts))
        .route("/forecast/:district", get(handlers::list_locations))
        .route("/forecast/:district/:location", get(handlers::get_forecast))
        .route("/forecast/:district/:location/", get(handlers::get_forecast))
}

/// Weather warning routes
fn warning_routes() -> Router<AppState> {
    Router::new()
        .route("/warnings", get(handlers::list_warnings))
        .route("/warnings/", get(handlers::list_warnings))
        .route("/warnings/by-level/:level", get(handlers::list_warnings_by_level))
}

/// Seismic activity routes
fn seismic_routes() -> Router<AppState> {
    Router::new()
        .route("/seismic", get(handlers::list_seismic_events))
        .route("/seismic/", get(handlers::list_seismic_events))
        .route(
            "/seismic/magnitude/:min_magnitude",
            get(handlers::list_seismic_by_magnitude),
        )
}

/// Sea state, fire risk and UV routes
fn marine_routes() -> Router<AppState> {
    Router::new()
        .route("/marine/sea-state", get(handlers::list_sea_state))
        .route("/marine/fire-risk", get(handlers::list_fire_risk))
        .route(
            "/marine/fire-risk/level/:min_level",
            get(handlers::list_fire_risk_by_level),
        )
        .route("/marine/uv-index", get(handlers::list_uv_index))
        .route("/marine/uv-index/level/:level", get(handlers::list_uv_index_by_level))
}

/// Weather station routes
fn station_routes() -> Router<AppState> {
    Router::new()
        .route("/stations", get(handlers::list_stations))
        .route("/stations/", get(handlers::list_stations))
        .route("/stations/observations", get(handlers::list_observations))
        .route(
            "/stations/observations/latest",
            get(handlers::list_latest_observations),
        )
}

/// Agricultural climate series and bivalve zone routes
fn agriculture_routes() -> Router<AppState> {
    Router::new()
        .route("/agriculture/evapotranspiration", get(handlers::get_evapotranspiration))
        .route("/agriculture/precipitation", get(handlers::get_precipitation))
        .route("/agriculture/temperature-min", get(handlers::get_temperature_min))
        .route("/agriculture/temperature-max", get(handlers::get_temperature_max))
        .route("/agriculture/pdsi", get(handlers::get_pdsi))
        .route("/agriculture/water-quality", get(handlers::list_water_quality))
        .route(
            "/agriculture/water-quality/status/:status",
            get(handlers::list_water_quality_by_status),
        )
}
