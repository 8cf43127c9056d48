//! Sea state, fire risk and UV index feeds

use shared::{FireRisk, SeaState, UvIndex, UvLevel};
use std::sync::Arc;

use crate::cache::ResponseCache;
use crate::config::CacheConfig;
use crate::external::payloads::{Envelope, RawFireRisk, RawSeaState, RawUvIndex};
use crate::external::{IpmaClient, Resource, UpstreamError};

/// Level assumed when the upstream omits the fire-risk level
const DEFAULT_FIRE_RISK_LEVEL: i64 = 1;

#[derive(Clone)]
pub struct MarineService {
    client: IpmaClient,
    sea_state: ResponseCache<(), Arc<Vec<SeaState>>>,
    fire_risk: ResponseCache<(), Arc<Vec<FireRisk>>>,
    uv_index: ResponseCache<(), Arc<Vec<UvIndex>>>,
}

impl MarineService {
    pub fn new(client: IpmaClient, cache: &CacheConfig) -> Self {
        let ttl = cache.feed_ttl();
        Self {
            client,
            sea_state: ResponseCache::new("sea_state", ttl),
            fire_risk: ResponseCache::new("fire_risk", ttl),
            uv_index: ResponseCache::new("uv_index", ttl),
        }
    }

    pub async fn sea_state(&self) -> Result<Vec<SeaState>, UpstreamError> {
        let states = self
            .sea_state
            .get_or_fetch((), || async {
                let raw: Envelope<RawSeaState> =
                    self.client.get_json(Resource::SeaState, &[]).await?;
                Ok(Arc::new(raw.into_items().into_iter().map(normalize_sea_state).collect()))
            })
            .await?;
        Ok(states.as_ref().clone())
    }

    pub async fn fire_risk(&self) -> Result<Vec<FireRisk>, UpstreamError> {
        let risks = self
            .fire_risk
            .get_or_fetch((), || async {
                let raw: Envelope<RawFireRisk> =
                    self.client.get_json(Resource::FireRisk, &[]).await?;
                Ok(Arc::new(raw.into_items().into_iter().map(normalize_fire_risk).collect()))
            })
            .await?;
        Ok(risks.as_ref().clone())
    }

    /// Locations with a fire-risk level of at least `min_level`
    pub async fn fire_risk_at_least(&self, min_level: i64) -> Result<Vec<FireRisk>, UpstreamError> {
        Ok(self
            .fire_risk()
            .await?
            .into_iter()
            .filter(|r| r.risk_level >= min_level)
            .collect())
    }

    pub async fn uv_index(&self) -> Result<Vec<UvIndex>, UpstreamError> {
        let indices = self
            .uv_index
            .get_or_fetch((), || async {
                let raw: Envelope<RawUvIndex> =
                    self.client.get_json(Resource::UvIndex, &[]).await?;
                Ok(Arc::new(raw.into_items().into_iter().map(normalize_uv_index).collect()))
            })
            .await?;
        Ok(indices.as_ref().clone())
    }

    /// Locations whose UV band is exactly `level`
    pub async fn uv_index_at_level(&self, level: UvLevel) -> Result<Vec<UvIndex>, UpstreamError> {
        Ok(self
            .uv_index()
            .await?
            .into_iter()
            .filter(|uv| uv.uv_level == level)
            .collect())
    }

    pub fn invalidate_all(&self) {
        self.sea_state.invalidate_all();
        self.fire_risk.invalidate_all();
        self.uv_index.invalidate_all();
    }
}

pub fn normalize_sea_state(raw: RawSeaState) -> SeaState {
    SeaState {
        date: raw.forecast_date.unwrap_or_default(),
        location: raw.location.unwrap_or_default(),
        wave_height: raw.significant_wave_height,
        wave_period: raw.wave_period,
        wave_direction: raw.wave_direction,
        sea_temperature: raw.sea_temperature,
        coastal_conditions: raw.coastal_conditions,
    }
}

pub fn normalize_fire_risk(raw: RawFireRisk) -> FireRisk {
    FireRisk {
        temperature: raw.temperatura,
        humidity: raw.humidade,
        wind_speed: raw.vento,
        ..FireRisk::new(
            raw.forecast_date.unwrap_or_default(),
            raw.local.unwrap_or_default(),
            raw.risco_incendio.unwrap_or(DEFAULT_FIRE_RISK_LEVEL),
        )
    }
}

pub fn normalize_uv_index(raw: RawUvIndex) -> UvIndex {
    UvIndex::new(
        raw.forecast_date.unwrap_or_default(),
        raw.local.unwrap_or_default(),
        raw.iuv.unwrap_or(0),
    )
}
