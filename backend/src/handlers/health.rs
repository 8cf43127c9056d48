//! Health check handlers

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub upstream: String,
}

/// Health check endpoint handler
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    // Check upstream reachability through the district table
    let reachable = matches!(
        state.reference.districts_and_locations().await,
        Ok(table) if !table.is_empty()
    );

    let (status, upstream) = if reachable {
        ("healthy", "reachable")
    } else {
        ("degraded", "unreachable")
    };

    Json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        upstream: upstream.to_string(),
    })
}
