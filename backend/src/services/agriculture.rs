//! Agricultural climate series (CSV) and bivalve harvesting zones (GeoJSON)

use csv::{ReaderBuilder, Trim};
use shared::{AgriculturalData, ClimateMetric, Coordinates, WaterQuality, WaterQualityStatus};
use std::sync::Arc;
use tracing::debug;

use crate::cache::ResponseCache;
use crate::config::CacheConfig;
use crate::external::payloads::{Feature, FeatureCollection, RawZoneProperties};
use crate::external::{IpmaClient, Resource, UpstreamError};

#[derive(Clone)]
pub struct AgricultureService {
    client: IpmaClient,
    water_quality: ResponseCache<(), Arc<Vec<WaterQuality>>>,
}

impl AgricultureService {
    pub fn new(client: IpmaClient, cache: &CacheConfig) -> Self {
        Self {
            client,
            water_quality: ResponseCache::new("water_quality", cache.feed_ttl()),
        }
    }

    /// Climate series for `metric`, optionally restricted to one municipality.
    /// Always fetched live.
    pub async fn climate_data(
        &self,
        metric: ClimateMetric,
        municipality: Option<&str>,
    ) -> Result<Vec<AgriculturalData>, UpstreamError> {
        let body = self.client.get_text(Resource::Climate(metric)).await?;
        let records = parse_climate_csv(&body, metric);
        debug!(%metric, rows = records.len(), "Parsed climate CSV");
        Ok(filter_by_municipality(records, municipality))
    }

    /// Harvesting status of every bivalve production zone
    pub async fn water_quality(&self) -> Result<Vec<WaterQuality>, UpstreamError> {
        let zones = self
            .water_quality
            .get_or_fetch((), || async {
                let raw: FeatureCollection<RawZoneProperties> =
                    self.client.get_json(Resource::BivalveZones, &[]).await?;
                Ok(Arc::new(raw.features.into_iter().map(normalize_zone).collect()))
            })
            .await?;
        Ok(zones.as_ref().clone())
    }

    /// Zones whose status is `status`
    pub async fn water_quality_by_status(
        &self,
        status: WaterQualityStatus,
    ) -> Result<Vec<WaterQuality>, UpstreamError> {
        Ok(self
            .water_quality()
            .await?
            .into_iter()
            .filter(|zone| zone.status == status)
            .collect())
    }

    pub fn invalidate_all(&self) {
        self.water_quality.invalidate_all();
    }
}

/// Parse a `date,municipality,value` CSV. The first line is a header; rows
/// with fewer than three fields are skipped and an empty or unreadable value
/// becomes `None`.
pub fn parse_climate_csv(body: &str, metric: ClimateMetric) -> Vec<AgriculturalData> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(body.as_bytes());

    reader
        .records()
        .filter_map(Result::ok)
        .filter(|row| row.len() >= 3)
        .map(|row| {
            let value = row.get(2).and_then(|v| v.parse::<f64>().ok());
            AgriculturalData::new(
                row.get(0).unwrap_or_default().to_string(),
                row.get(1).unwrap_or_default().to_string(),
                metric,
                value,
            )
        })
        .collect()
}

/// Case-insensitive exact municipality match; `None` keeps every record
pub fn filter_by_municipality(
    records: Vec<AgriculturalData>,
    municipality: Option<&str>,
) -> Vec<AgriculturalData> {
    match municipality {
        Some(wanted) => {
            let wanted = wanted.to_lowercase();
            records
                .into_iter()
                .filter(|r| r.municipality.to_lowercase() == wanted)
                .collect()
        }
        None => records,
    }
}

pub fn normalize_zone(feature: Feature<RawZoneProperties>) -> WaterQuality {
    let coordinates = feature
        .geometry
        .as_ref()
        .map(|g| Coordinates::from_geojson_position(&g.first_position()))
        .unwrap_or_default();

    let properties = feature.properties.unwrap_or_default();

    WaterQuality {
        zone_id: properties.id.unwrap_or_default(),
        zone_name: properties.nome.unwrap_or_default(),
        status: WaterQualityStatus::from_label(properties.estado.as_deref().unwrap_or_default()),
        restriction_type: properties.tipo_restricao,
        coordinates,
        last_update: properties.data_atualizacao.unwrap_or_default(),
    }
}
