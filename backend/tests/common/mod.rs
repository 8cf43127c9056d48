//! Shared helpers for integration tests: a stubbed IPMA upstream and a way
//! to drive the router without binding a socket.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use ipma_proxy::{create_app, AppState, Config};
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Router wired to `server` with the default (degrading) failure policy
pub fn app_for(server: &MockServer) -> Router {
    app_with(Config::for_upstream(server.uri()))
}

/// Router wired to `server` that answers 502 on upstream failures
pub fn strict_app_for(server: &MockServer) -> Router {
    let mut config = Config::for_upstream(server.uri());
    config.upstream.degrade_to_empty = false;
    app_with(config)
}

pub fn app_with(config: Config) -> Router {
    create_app(AppState::new(config).expect("client should build"))
}

/// State wired to `server`, for tests that also need to reach the caches
pub fn state_for(server: &MockServer) -> AppState {
    AppState::new(Config::for_upstream(server.uri())).expect("client should build")
}

/// GET `uri` and decode the JSON body (`Null` when the body is not JSON)
pub async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let (status, body) = get_text(app, uri).await;
    (status, serde_json::from_str(&body).unwrap_or(Value::Null))
}

pub async fn get_text(app: &Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8_lossy(&bytes).into_owned())
}

/// Serve `body` as JSON at `route`
pub async fn mount_json(server: &MockServer, route: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Serve `body` as plain text at `route`
pub async fn mount_text(server: &MockServer, route: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

/// Answer `status` at `route`
pub async fn mount_status(server: &MockServer, route: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

/// A small district table: two Lisboa locations and one in Porto
pub fn districts_fixture() -> Value {
    json!({
        "owner": "IPMA",
        "country": "PT",
        "data": [
            {"idDistrito": 11, "globalIdLocal": 1110600, "local": "Lisboa"},
            {"idDistrito": 11, "globalIdLocal": 1111500, "local": "Sintra"},
            {"idDistrito": 13, "globalIdLocal": 1131200, "local": "Porto"}
        ]
    })
}

pub fn weather_types_fixture() -> Value {
    json!({
        "owner": "IPMA",
        "data": [
            {"idWeatherType": 1, "descIdWeatherTypePT": "Céu limpo"},
            {"idWeatherType": 3, "descIdWeatherTypePT": "Céu parcialmente nublado"}
        ]
    })
}

/// Today's date in the server's local calendar
pub fn today() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}
