//! Weather warnings feed

use shared::{WarningLevel, WeatherWarning};
use std::sync::Arc;

use crate::cache::ResponseCache;
use crate::config::CacheConfig;
use crate::external::payloads::{Envelope, RawWarning};
use crate::external::{IpmaClient, Resource, UpstreamError};

#[derive(Clone)]
pub struct WarningService {
    client: IpmaClient,
    cache: ResponseCache<(), Arc<Vec<WeatherWarning>>>,
}

impl WarningService {
    pub fn new(client: IpmaClient, cache: &CacheConfig) -> Self {
        Self {
            client,
            cache: ResponseCache::new("warnings", cache.feed_ttl()),
        }
    }

    /// Every active warning
    pub async fn warnings(&self) -> Result<Vec<WeatherWarning>, UpstreamError> {
        let warnings = self
            .cache
            .get_or_fetch((), || async {
                let raw: Envelope<RawWarning> =
                    self.client.get_json(Resource::Warnings, &[]).await?;
                Ok(Arc::new(raw.into_items().into_iter().map(normalize_warning).collect()))
            })
            .await?;
        Ok(warnings.as_ref().clone())
    }

    /// Warnings whose level name matches `level`, case-insensitively
    pub async fn warnings_by_level(&self, level: &str) -> Result<Vec<WeatherWarning>, UpstreamError> {
        Ok(filter_by_level(self.warnings().await?, level))
    }

    pub fn invalidate_all(&self) {
        self.cache.invalidate_all();
    }
}

pub fn normalize_warning(raw: RawWarning) -> WeatherWarning {
    WeatherWarning {
        id: raw.id_area_aviso.clone().unwrap_or_default(),
        area: raw.area.or(raw.id_area_aviso).unwrap_or_default(),
        warning_type: raw.awareness_type_name.unwrap_or_default(),
        level: raw
            .awareness_level_id
            .as_deref()
            .map(WarningLevel::from_label)
            .unwrap_or(WarningLevel::Unknown),
        start_time: raw.start_time.unwrap_or_default(),
        end_time: raw.end_time.unwrap_or_default(),
        description: raw.text.unwrap_or_default(),
        phenomenon: raw.phenomenon.unwrap_or_default(),
    }
}

pub fn filter_by_level(warnings: Vec<WeatherWarning>, level: &str) -> Vec<WeatherWarning> {
    warnings.into_iter().filter(|w| w.level.matches(level)).collect()
}
