//! Weather stations and their observations
//!
//! The station list is cached; observations are always fetched live.

use shared::{Coordinates, StationObservation, WeatherStation};
use std::sync::Arc;

use crate::cache::ResponseCache;
use crate::config::CacheConfig;
use crate::external::payloads::{Envelope, RawObservation, RawStation};
use crate::external::{IpmaClient, Resource, UpstreamError};

/// Number of observations returned by the "latest" view
pub const LATEST_OBSERVATIONS_LIMIT: usize = 50;

#[derive(Clone)]
pub struct StationService {
    client: IpmaClient,
    stations: ResponseCache<(), Arc<Vec<WeatherStation>>>,
}

impl StationService {
    pub fn new(client: IpmaClient, cache: &CacheConfig) -> Self {
        Self {
            client,
            stations: ResponseCache::new("stations", cache.feed_ttl()),
        }
    }

    pub async fn stations(&self) -> Result<Vec<WeatherStation>, UpstreamError> {
        let stations = self
            .stations
            .get_or_fetch((), || async {
                let raw: Envelope<RawStation> =
                    self.client.get_json(Resource::Stations, &[]).await?;
                Ok(Arc::new(raw.into_items().into_iter().map(normalize_station).collect()))
            })
            .await?;
        Ok(stations.as_ref().clone())
    }

    /// Observations for every station, or one station when `station_id` is given
    pub async fn observations(
        &self,
        station_id: Option<&str>,
    ) -> Result<Vec<StationObservation>, UpstreamError> {
        let query: Vec<(&str, &str)> = station_id.map(|id| ("stationId", id)).into_iter().collect();
        let raw: Envelope<RawObservation> =
            self.client.get_json(Resource::Observations, &query).await?;
        Ok(raw.into_items().into_iter().map(normalize_observation).collect())
    }

    /// Most recent observations across all stations
    pub async fn latest_observations(&self) -> Result<Vec<StationObservation>, UpstreamError> {
        Ok(most_recent(self.observations(None).await?, LATEST_OBSERVATIONS_LIMIT))
    }

    pub fn invalidate_all(&self) {
        self.stations.invalidate_all();
    }
}

pub fn normalize_station(raw: RawStation) -> WeatherStation {
    WeatherStation {
        id: raw.id_estacao.unwrap_or_default(),
        name: raw.nome.unwrap_or_default(),
        coordinates: Coordinates::new(raw.latitude.unwrap_or(0.0), raw.longitude.unwrap_or(0.0)),
        altitude: raw.altitude,
    }
}

pub fn normalize_observation(raw: RawObservation) -> StationObservation {
    StationObservation {
        station_id: raw.id_estacao.unwrap_or_default(),
        station_name: raw.nome_estacao.unwrap_or_default(),
        timestamp: raw.time.unwrap_or_default(),
        temperature: raw.temperatura,
        humidity: raw.humidade,
        pressure: raw.pressao,
        wind_speed: raw.intensidade_vento,
        wind_direction: raw.direcao_vento,
        precipitation: raw.precipitacao,
        visibility: raw.visibilidade,
    }
}

/// Top `limit` observations by descending timestamp. Timestamps are compared
/// as strings, which orders ISO-8601 values chronologically.
pub fn most_recent(mut observations: Vec<StationObservation>, limit: usize) -> Vec<StationObservation> {
    observations.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    observations.truncate(limit);
    observations
}
