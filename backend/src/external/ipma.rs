//! IPMA open data client
//!
//! One GET per logical resource against the configured base URL. Transient
//! failures (transport errors, 5xx, 429) are retried with backoff.

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use shared::{ClimateMetric, SeismicRegion};
use std::fmt;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::UpstreamConfig;
use crate::retry::{with_retry, RetryConfig, Retryable};

/// Failure talking to the upstream API
#[derive(Debug, Clone, Error)]
pub enum UpstreamError {
    #[error("request for {resource} failed: {message}")]
    Transport { resource: String, message: String },

    #[error("{resource} answered with HTTP {status}")]
    Status { resource: String, status: u16 },

    #[error("could not decode {resource}: {message}")]
    Decode { resource: String, message: String },
}

impl Retryable for UpstreamError {
    fn is_retryable(&self) -> bool {
        match self {
            UpstreamError::Transport { .. } => true,
            UpstreamError::Status { status, .. } => {
                *status >= 500 || *status == StatusCode::TOO_MANY_REQUESTS.as_u16()
            }
            UpstreamError::Decode { .. } => false,
        }
    }
}

/// Upstream resources, one per fixed path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Districts,
    WeatherTypes,
    WindSpeedClasses,
    PrecipitationClasses,
    CityForecast(i64),
    Warnings,
    Seismic(SeismicRegion),
    SeaState,
    FireRisk,
    UvIndex,
    Stations,
    Observations,
    Climate(ClimateMetric),
    BivalveZones,
}

impl Resource {
    /// Path relative to the base URL
    pub fn path(&self) -> String {
        match self {
            Resource::Districts => "distrits-islands.json".to_string(),
            Resource::WeatherTypes => "weather-type-classe.json".to_string(),
            Resource::WindSpeedClasses => "wind-speed-daily-classe.json".to_string(),
            Resource::PrecipitationClasses => "precipitation-type-classe.json".to_string(),
            Resource::CityForecast(id) => format!("forecast/meteorology/cities/daily/{}.json", id),
            Resource::Warnings => "warnings/warnings_www.json".to_string(),
            Resource::Seismic(SeismicRegion::Continente) => "earthquake/hp2.json".to_string(),
            Resource::Seismic(SeismicRegion::Acores) => "earthquake/hp2-azores.json".to_string(),
            Resource::Seismic(SeismicRegion::Madeira) => "earthquake/hp2-madeira.json".to_string(),
            Resource::SeaState => {
                "sea-conditions/hp-daily-sea-conditions-forecast.json".to_string()
            }
            Resource::FireRisk => "fire-risk/hp-daily-fire-risk-forecast.json".to_string(),
            Resource::UvIndex => "uv/hp-daily-uv-index-forecast.json".to_string(),
            Resource::Stations => "weather-stations.json".to_string(),
            Resource::Observations => {
                "observation/meteorology/stations/observations.json".to_string()
            }
            Resource::Climate(metric) => format!("climate/{}", metric.slug()),
            Resource::BivalveZones => "sea-conditions/bivalve-mollusk-zones.json".to_string(),
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// HTTP client for the IPMA open data API
#[derive(Clone)]
pub struct IpmaClient {
    client: Client,
    base_url: String,
    retry: RetryConfig,
}

impl IpmaClient {
    /// Create a client from the upstream configuration
    pub fn new(config: &UpstreamConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            retry: config.retry.clone(),
        })
    }

    fn url(&self, resource: &Resource) -> String {
        format!("{}/{}", self.base_url, resource.path())
    }

    /// Fetch and decode a JSON resource
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        resource: Resource,
        query: &[(&str, &str)],
    ) -> Result<T, UpstreamError> {
        let body = self.fetch(resource, query).await?;
        serde_json::from_str(&body).map_err(|e| {
            let err = UpstreamError::Decode {
                resource: resource.path(),
                message: e.to_string(),
            };
            warn!(resource = %resource, error = %err, "Upstream payload rejected");
            err
        })
    }

    /// Fetch a resource as raw text (CSV feeds)
    pub async fn get_text(&self, resource: Resource) -> Result<String, UpstreamError> {
        self.fetch(resource, &[]).await
    }

    async fn fetch(
        &self,
        resource: Resource,
        query: &[(&str, &str)],
    ) -> Result<String, UpstreamError> {
        let url = self.url(&resource);
        let url = url.as_str();

        let result = with_retry(&self.retry, || self.send(url, query, resource)).await;
        if let Err(err) = &result {
            warn!(resource = %resource, error = %err, "Upstream request failed");
        }
        result
    }

    async fn send(
        &self,
        url: &str,
        query: &[(&str, &str)],
        resource: Resource,
    ) -> Result<String, UpstreamError> {
        debug!(url, ?query, "GET upstream");

        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| UpstreamError::Transport {
                resource: resource.path(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status {
                resource: resource.path(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|e| UpstreamError::Transport {
            resource: resource.path(),
            message: e.to_string(),
        })
    }
}
