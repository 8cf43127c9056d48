//! Seismic activity feeds, one per region

use shared::{Coordinates, SeismicEvent, SeismicRegion};
use std::sync::Arc;

use crate::cache::ResponseCache;
use crate::config::CacheConfig;
use crate::external::payloads::{Envelope, RawSeismicEvent};
use crate::external::{IpmaClient, Resource, UpstreamError};

#[derive(Clone)]
pub struct SeismicService {
    client: IpmaClient,
    cache: ResponseCache<SeismicRegion, Arc<Vec<SeismicEvent>>>,
}

impl SeismicService {
    pub fn new(client: IpmaClient, cache: &CacheConfig) -> Self {
        Self {
            client,
            cache: ResponseCache::new("seismic", cache.feed_ttl()),
        }
    }

    pub async fn events(&self, region: SeismicRegion) -> Result<Vec<SeismicEvent>, UpstreamError> {
        let events = self
            .cache
            .get_or_fetch(region, || async {
                let raw: Envelope<RawSeismicEvent> =
                    self.client.get_json(Resource::Seismic(region), &[]).await?;
                Ok(Arc::new(raw.into_items().into_iter().map(normalize_event).collect()))
            })
            .await?;
        Ok(events.as_ref().clone())
    }

    /// Events of at least `min_magnitude`
    pub async fn events_above(
        &self,
        region: SeismicRegion,
        min_magnitude: f64,
    ) -> Result<Vec<SeismicEvent>, UpstreamError> {
        Ok(filter_by_magnitude(self.events(region).await?, min_magnitude))
    }

    pub fn invalidate_all(&self) {
        self.cache.invalidate_all();
    }
}

pub fn normalize_event(raw: RawSeismicEvent) -> SeismicEvent {
    SeismicEvent {
        id: raw.id.unwrap_or_default(),
        magnitude: raw.magnitude.unwrap_or(0.0),
        depth: raw.depth.unwrap_or(0.0),
        location: raw.location.unwrap_or_default(),
        time: raw.time.unwrap_or_default(),
        coordinates: Coordinates::new(raw.lat.unwrap_or(0.0), raw.lon.unwrap_or(0.0)),
        intensity: raw.intensity,
    }
}

pub fn filter_by_magnitude(events: Vec<SeismicEvent>, min_magnitude: f64) -> Vec<SeismicEvent> {
    events
        .into_iter()
        .filter(|e| e.magnitude >= min_magnitude)
        .collect()
}
