//! IPMA proxy - Backend library
//!
//! Fetches public weather, seismic, marine and agricultural data from the
//! IPMA open data API, normalizes it and serves it over a small REST API.

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::{
    catch_panic::CatchPanicLayer,
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod cache;
pub mod config;
pub mod error;
pub mod external;
pub mod handlers;
pub mod retry;
pub mod routes;
pub mod services;

pub use config::Config;

use external::IpmaClient;
use services::{
    AgricultureService, ForecastService, MarineService, ReferenceService, SeismicService,
    StationService, WarningService,
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub reference: ReferenceService,
    pub forecast: ForecastService,
    pub warnings: WarningService,
    pub seismic: SeismicService,
    pub marine: MarineService,
    pub stations: StationService,
    pub agriculture: AgricultureService,
}

impl AppState {
    /// Build the upstream client and every service from the configuration
    pub fn new(config: Config) -> Result<Self, reqwest::Error> {
        let client = IpmaClient::new(&config.upstream)?;
        let cache = &config.cache;
        let reference = ReferenceService::new(client.clone(), cache);

        Ok(Self {
            forecast: ForecastService::new(client.clone(), reference.clone(), cache),
            warnings: WarningService::new(client.clone(), cache),
            seismic: SeismicService::new(client.clone(), cache),
            marine: MarineService::new(client.clone(), cache),
            stations: StationService::new(client.clone(), cache),
            agriculture: AgricultureService::new(client, cache),
            reference,
            config: Arc::new(config),
        })
    }

    /// Drop every cached upstream response
    pub fn invalidate_caches(&self) {
        self.reference.invalidate_all();
        self.forecast.invalidate_all();
        self.warnings.invalidate_all();
        self.seismic.invalidate_all();
        self.marine.invalidate_all();
        self.stations.invalidate_all();
        self.agriculture.invalidate_all();
    }
}

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let router = Router::new()
        .route("/", get(root))
        .route("/health", get(handlers::health_check))
        .merge(routes::api_routes());

    with_middleware(router).with_state(state)
}

fn with_middleware<S>(router: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    router
        .layer(CatchPanicLayer::custom(error::panic_response))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors)
}

/// Root endpoint
async fn root() -> &'static str {
    "IPMA weather proxy API v2.0"
}
