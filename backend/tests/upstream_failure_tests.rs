//! Upstream failure policy tests
//!
//! Properties covered:
//! - Property 1: with degradation on, list endpoints answer 200 with an empty list
//! - Property 2: with degradation off, list endpoints answer 502 `UPSTREAM_ERROR`
//! - Property 3: a failed fetch is never cached; the next request tries again
//! - Property 4: the health check reports upstream reachability
//! - Property 5: malformed paths and query strings answer inside the error envelope

mod common;

use axum::http::StatusCode;
use common::*;
use ipma_proxy::create_app;
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const LIST_ENDPOINTS: [&str; 10] = [
    "/warnings",
    "/seismic",
    "/marine/sea-state",
    "/marine/fire-risk",
    "/marine/uv-index",
    "/stations",
    "/stations/observations",
    "/stations/observations/latest",
    "/agriculture/precipitation",
    "/agriculture/water-quality",
];

async fn failing_upstream() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    server
}

// ============================================================================
// Property 1: degraded answers
// ============================================================================

#[tokio::test]
async fn test_degraded_lists_are_empty() {
    let server = failing_upstream().await;
    let app = app_for(&server);

    for uri in LIST_ENDPOINTS {
        let (status, body) = get_json(&app, uri).await;
        assert_eq!(status, StatusCode::OK, "uri {}", uri);
        assert_eq!(body["success"], true, "uri {}", uri);
        assert_eq!(body["data"], json!([]), "uri {}", uri);
        assert!(
            body["message"].as_str().unwrap().contains("unavailable"),
            "uri {}: {}",
            uri,
            body["message"]
        );
    }
}

#[tokio::test]
async fn test_degraded_district_listing() {
    let server = failing_upstream().await;
    let app = app_for(&server);

    let (status, body) = get_json(&app, "/forecast").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["districts"], json!([]));
    assert_eq!(body["data"]["total"], 0);

    // An unreadable district table looks like an unknown district
    let (status, _) = get_json(&app, "/forecast/lisboa").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_forecast_failure_is_always_bad_gateway() {
    let server = failing_upstream().await;
    let app = app_for(&server);

    let (status, body) = get_json(&app, "/forecast/lisboa/lisboa").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "UPSTREAM_ERROR");
}

#[tokio::test]
async fn test_undecodable_body_degrades_like_a_failure() {
    let server = MockServer::start().await;
    mount_text(&server, "/warnings/warnings_www.json", "<html>maintenance</html>").await;
    let app = app_for(&server);

    let (status, body) = get_json(&app, "/warnings").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!([]));
    assert_eq!(body["message"], "Weather warnings unavailable");
}

// ============================================================================
// Property 2: strict answers
// ============================================================================

#[tokio::test]
async fn test_strict_mode_answers_bad_gateway() {
    let server = failing_upstream().await;
    let app = strict_app_for(&server);

    for uri in LIST_ENDPOINTS.iter().chain(["/forecast", "/forecast/lisboa"].iter()) {
        let (status, body) = get_json(&app, uri).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY, "uri {}", uri);
        assert_eq!(body["success"], false);
        assert_eq!(body["data"], serde_json::Value::Null);
        assert_eq!(body["code"], "UPSTREAM_ERROR");
        assert_eq!(body["message_pt"], "Erro ao obter dados do IPMA");
    }
}

#[tokio::test]
async fn test_validation_runs_before_upstream_failure() {
    let server = failing_upstream().await;
    let app = strict_app_for(&server);

    let (status, _) = get_json(&app, "/marine/fire-risk/level/9").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// ============================================================================
// Property 3: failures are not cached
// ============================================================================

#[tokio::test]
async fn test_recovery_after_failed_fetch() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather-stations.json"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    mount_json(
        &server,
        "/weather-stations.json",
        json!([{"idEstacao": "1", "nome": "Faro", "latitude": 37.0, "longitude": -7.9}]),
    )
    .await;
    let app = app_for(&server);

    let (status, body) = get_json(&app, "/stations").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!([]));

    let (status, body) = get_json(&app, "/stations").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["name"], "Faro");
}

#[tokio::test]
async fn test_invalidated_caches_refetch() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather-stations.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"idEstacao": "1", "nome": "Faro", "latitude": 37.0, "longitude": -7.9}
        ])))
        .expect(2)
        .mount(&server)
        .await;
    let state = state_for(&server);
    let app = create_app(state.clone());

    for _ in 0..2 {
        let (status, body) = get_json(&app, "/stations").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"][0]["name"], "Faro");
    }

    state.invalidate_caches();

    let (status, body) = get_json(&app, "/stations").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["name"], "Faro");
}

// ============================================================================
// Property 5: extractor rejections
// ============================================================================

#[tokio::test]
async fn test_rejected_requests_use_the_error_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;
    let app = app_for(&server);

    let uris = [
        "/seismic/?region=a&region=b",
        "/seismic/magnitude/3?region=a&region=b",
        "/stations/observations?station_id=1&station_id=2",
        "/agriculture/pdsi?municipality=a&municipality=b",
        "/forecast/lisboa/%FF",
        "/forecast/%FF",
        "/warnings/by-level/%FF",
        "/marine/uv-index/level/%FF",
        "/agriculture/water-quality/status/%FF",
    ];
    for uri in uris {
        let (status, text) = get_text(&app, uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "uri {}", uri);
        let body: Value = serde_json::from_str(&text)
            .unwrap_or_else(|_| panic!("uri {} answered a non-JSON body: {}", uri, text));
        assert_eq!(body["success"], false, "uri {}", uri);
        assert_eq!(body["code"], "VALIDATION_ERROR", "uri {}", uri);
        assert_eq!(body["data"], Value::Null, "uri {}", uri);
    }
}

// ============================================================================
// Property 4: health and root
// ============================================================================

#[tokio::test]
async fn test_health_reports_unreachable_upstream() {
    let server = failing_upstream().await;
    let app = app_for(&server);

    let (status, body) = get_json(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["upstream"], "unreachable");
}

#[tokio::test]
async fn test_health_reports_reachable_upstream() {
    let server = MockServer::start().await;
    mount_json(&server, "/distrits-islands.json", districts_fixture()).await;
    let app = app_for(&server);

    let (status, body) = get_json(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["upstream"], "reachable");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_root_banner() {
    let server = MockServer::start().await;
    let app = app_for(&server);

    let (status, body) = get_text(&app, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("IPMA weather proxy API"));
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let server = MockServer::start().await;
    let app = app_for(&server);

    let (status, _) = get_text(&app, "/tides").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
