//! Agricultural endpoint tests: climate CSV series and bivalve harvesting zones
//!
//! Properties covered:
//! - Property 1: each climate endpoint fills only its own metric column
//! - Property 2: the municipality filter is an exact, case-insensitive match
//! - Property 3: zone statuses map onto open, closed, conditional or unknown
//! - Property 4: CSV parsing never fails, whatever the body

mod common;

use axum::http::StatusCode;
use common::*;
use ipma_proxy::services::agriculture::parse_climate_csv;
use proptest::prelude::*;
use serde_json::{json, Value};
use shared::ClimateMetric;
use wiremock::MockServer;

const PRECIPITATION_CSV: &str = "\
date,municipality,value
2025-04-01,Évora,12.4
2025-04-01,Beja,
2025-04-02,Évora,3.0
2025-04-02,Faro
";

fn zones_fixture() -> Value {
    json!({
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "properties": {
                    "id": "L7c1",
                    "nome": "Lagoa de Óbidos",
                    "estado": "Aberta",
                    "data_atualizacao": "2025-05-02"
                },
                "geometry": {"type": "Point", "coordinates": [-9.21, 39.41]}
            },
            {
                "type": "Feature",
                "properties": {
                    "id": "RIAV1",
                    "nome": "Ria de Aveiro",
                    "estado": "Interdita",
                    "tipo_restricao": "Biotoxinas"
                },
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[-8.70, 40.64], [-8.69, 40.65], [-8.70, 40.64]]]
                }
            },
            {
                "type": "Feature",
                "properties": {"id": "ETJ1", "nome": "Estuário do Tejo", "estado": "condicional"},
                "geometry": null
            },
            {
                "type": "Feature",
                "properties": {"id": "X", "estado": "em avaliação"}
            }
        ]
    })
}

// ============================================================================
// Property 1 and 2: climate series
// ============================================================================

#[tokio::test]
async fn test_precipitation_series() {
    let server = MockServer::start().await;
    mount_text(&server, "/climate/precipitation", PRECIPITATION_CSV).await;
    let app = app_for(&server);

    let (status, body) = get_json(&app, "/agriculture/precipitation").await;
    assert_eq!(status, StatusCode::OK);

    let rows = body["data"].as_array().unwrap();
    // The short Faro row is skipped
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0]["municipality"], "Évora");
    assert_eq!(rows[0]["precipitation"], 12.4);
    assert_eq!(rows[0]["evapotranspiration"], Value::Null);
    assert_eq!(rows[1]["precipitation"], Value::Null);
    assert_eq!(body["message"], "3 precipitation records");
}

#[tokio::test]
async fn test_municipality_filter() {
    let server = MockServer::start().await;
    mount_text(&server, "/climate/precipitation", PRECIPITATION_CSV).await;
    let app = app_for(&server);

    let (status, body) = get_json(&app, "/agriculture/precipitation?municipality=%C3%A9vora").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 2);

    let (status, body) = get_json(&app, "/agriculture/precipitation?municipality=Lisboa").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!([]));
    assert_eq!(body["message"], "No precipitation data found for Lisboa");
}

#[tokio::test]
async fn test_every_metric_has_its_own_feed() {
    let server = MockServer::start().await;
    let cases = [
        ("/agriculture/evapotranspiration", "/climate/evapotranspiration", "evapotranspiration"),
        ("/agriculture/temperature-min", "/climate/temperature-min", "min_temperature"),
        ("/agriculture/temperature-max", "/climate/temperature-max", "max_temperature"),
        ("/agriculture/pdsi", "/climate/pdsi", "pdsi_index"),
    ];
    for (_, upstream, _) in cases {
        mount_text(&server, upstream, "date,municipality,value\n2025-04-01,Beja,-1.5\n").await;
    }
    let app = app_for(&server);

    for (uri, _, column) in cases {
        let (status, body) = get_json(&app, uri).await;
        assert_eq!(status, StatusCode::OK, "uri {}", uri);
        assert_eq!(body["data"][0][column], -1.5, "uri {}", uri);
    }
}

// ============================================================================
// Property 3: water quality
// ============================================================================

#[tokio::test]
async fn test_water_quality_zones() {
    let server = MockServer::start().await;
    mount_json(&server, "/sea-conditions/bivalve-mollusk-zones.json", zones_fixture()).await;
    let app = app_for(&server);

    let (status, body) = get_json(&app, "/agriculture/water-quality").await;
    assert_eq!(status, StatusCode::OK);

    let zones = body["data"].as_array().unwrap();
    assert_eq!(zones.len(), 4);
    assert_eq!(zones[0]["status"], "open");
    assert_eq!(zones[0]["coordinates"]["latitude"], 39.41);
    assert_eq!(zones[0]["coordinates"]["longitude"], -9.21);
    assert_eq!(zones[1]["status"], "closed");
    assert_eq!(zones[1]["restriction_type"], "Biotoxinas");
    assert_eq!(zones[1]["coordinates"]["latitude"], 40.64);
    assert_eq!(zones[2]["status"], "conditional");
    assert_eq!(zones[2]["coordinates"]["latitude"], 0.0);
    assert_eq!(zones[3]["status"], "unknown");
    assert_eq!(body["message"], "4 bivalve harvesting zones");
}

#[tokio::test]
async fn test_water_quality_by_status() {
    let server = MockServer::start().await;
    mount_json(&server, "/sea-conditions/bivalve-mollusk-zones.json", zones_fixture()).await;
    let app = app_for(&server);

    for status_label in ["closed", "fechada", "CLOSED"] {
        let uri = format!("/agriculture/water-quality/status/{}", status_label);
        let (status, body) = get_json(&app, &uri).await;
        assert_eq!(status, StatusCode::OK, "status {}", status_label);
        assert_eq!(body["data"].as_array().unwrap().len(), 1);
        assert_eq!(body["data"][0]["zone_id"], "RIAV1");
    }

    for status_label in ["unknown", "bogus"] {
        let uri = format!("/agriculture/water-quality/status/{}", status_label);
        let (status, body) = get_json(&app, &uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "status {}", status_label);
        assert_eq!(body["field"], "status");
    }
}

// ============================================================================
// Property 4: CSV parsing
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    proptest! {
        #[test]
        fn prop_parse_never_panics(body in ".{0,400}") {
            let records = parse_climate_csv(&body, ClimateMetric::Pdsi);
            for record in records {
                prop_assert!(record.precipitation.is_none());
            }
        }

        #[test]
        fn prop_one_record_per_complete_row(
            values in prop::collection::vec(-100.0f64..100.0, 0..30)
        ) {
            let mut body = String::from("date,municipality,value\n");
            for (i, v) in values.iter().enumerate() {
                body.push_str(&format!("2025-01-{:02},M{},{}\n", i % 28 + 1, i, v));
            }
            let records = parse_climate_csv(&body, ClimateMetric::Evapotranspiration);
            prop_assert_eq!(records.len(), values.len());
            for (record, v) in records.iter().zip(&values) {
                prop_assert_eq!(record.evapotranspiration, Some(*v));
            }
        }
    }
}
