//! Reference tables: districts and locations, weather types, wind and
//! precipitation classes
//!
//! These change rarely and are cached for the configured reference TTL
//! (process lifetime by default).

use shared::{district_key, district_name, Location};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

use crate::cache::ResponseCache;
use crate::config::CacheConfig;
use crate::external::payloads::{
    Envelope, RawLocation, RawPrecipitationClass, RawWeatherType, RawWindSpeedClass,
};
use crate::external::{IpmaClient, Resource, UpstreamError};

/// Locations grouped under the lowercased district name
pub type DistrictTable = Arc<BTreeMap<String, Vec<Location>>>;

/// Numeric code to Portuguese description
pub type CodeTable = Arc<BTreeMap<i64, String>>;

/// Description used when a weather type is missing from the lookup table
pub const UNKNOWN_CONDITION: &str = "Desconhecido";

/// Service for the slow-changing IPMA lookup tables
#[derive(Clone)]
pub struct ReferenceService {
    client: IpmaClient,
    districts: ResponseCache<(), DistrictTable>,
    weather_types: ResponseCache<(), CodeTable>,
    wind_classes: ResponseCache<(), CodeTable>,
    precipitation_classes: ResponseCache<(), CodeTable>,
}

impl ReferenceService {
    pub fn new(client: IpmaClient, cache: &CacheConfig) -> Self {
        let ttl = cache.reference_ttl();
        Self {
            client,
            districts: ResponseCache::new("districts", ttl),
            weather_types: ResponseCache::new("weather_types", ttl),
            wind_classes: ResponseCache::new("wind_classes", ttl),
            precipitation_classes: ResponseCache::new("precipitation_classes", ttl),
        }
    }

    /// All forecast locations, grouped by district
    pub async fn districts_and_locations(&self) -> Result<DistrictTable, UpstreamError> {
        self.districts
            .get_or_fetch((), || async {
                let raw: Envelope<RawLocation> =
                    self.client.get_json(Resource::Districts, &[]).await?;
                let table = group_locations(raw.into_items());
                debug!(districts = table.len(), "Loaded district table");
                Ok(Arc::new(table))
            })
            .await
    }

    /// Weather type id to description
    pub async fn weather_conditions(&self) -> Result<CodeTable, UpstreamError> {
        self.weather_types
            .get_or_fetch((), || async {
                let raw: Envelope<RawWeatherType> =
                    self.client.get_json(Resource::WeatherTypes, &[]).await?;
                let table = code_table(
                    raw.into_items().into_iter().map(|t| (t.id, t.description_pt)),
                    UNKNOWN_CONDITION,
                );
                Ok(Arc::new(table))
            })
            .await
    }

    /// Daily wind speed class id to description
    pub async fn wind_intensity_classes(&self) -> Result<CodeTable, UpstreamError> {
        self.wind_classes
            .get_or_fetch((), || async {
                let raw: Envelope<RawWindSpeedClass> =
                    self.client.get_json(Resource::WindSpeedClasses, &[]).await?;
                let table = code_table(
                    raw.into_items().into_iter().map(|c| (c.id, c.description_pt)),
                    "",
                );
                Ok(Arc::new(table))
            })
            .await
    }

    /// Precipitation intensity class id to description
    pub async fn precipitation_classes(&self) -> Result<CodeTable, UpstreamError> {
        self.precipitation_classes
            .get_or_fetch((), || async {
                let raw: Envelope<RawPrecipitationClass> =
                    self.client.get_json(Resource::PrecipitationClasses, &[]).await?;
                let table = code_table(
                    raw.into_items().into_iter().map(|c| (c.id, c.description_pt)),
                    "",
                );
                Ok(Arc::new(table))
            })
            .await
    }

    /// Locations of a district; empty when the district is unknown
    pub async fn locations_by_district(&self, district: &str) -> Result<Vec<Location>, UpstreamError> {
        let table = self.districts_and_locations().await?;
        Ok(table
            .get(&district_key(district))
            .cloned()
            .unwrap_or_default())
    }

    /// Resolve a (district, location) pair to the IPMA `globalIdLocal`
    pub async fn find_location_id(
        &self,
        district: &str,
        location: &str,
    ) -> Result<Option<i64>, UpstreamError> {
        let locations = self.locations_by_district(district).await?;
        Ok(find_location(&locations, location).map(|l| l.id))
    }

    pub fn invalidate_all(&self) {
        self.districts.invalidate_all();
        self.weather_types.invalidate_all();
        self.wind_classes.invalidate_all();
        self.precipitation_classes.invalidate_all();
    }
}

/// Case-insensitive, trimmed name match
pub fn find_location<'a>(locations: &'a [Location], name: &str) -> Option<&'a Location> {
    let wanted = name.trim().to_lowercase();
    locations
        .iter()
        .find(|l| l.name.trim().to_lowercase() == wanted)
}

/// Group raw locations by district. Rows with an unmapped district id or no
/// location id are dropped.
pub fn group_locations(raw: Vec<RawLocation>) -> BTreeMap<String, Vec<Location>> {
    let mut table: BTreeMap<String, Vec<Location>> = BTreeMap::new();

    for row in raw {
        let Some(district) = row
            .id_distrito
            .and_then(|id| u32::try_from(id).ok())
            .and_then(district_name)
        else {
            continue;
        };
        let Some(id) = row.global_id_local else {
            continue;
        };

        table.entry(district_key(district)).or_default().push(Location {
            id,
            name: row.local.unwrap_or_default().trim().to_string(),
            district: district.to_string(),
        });
    }

    table
}

fn code_table<I>(rows: I, default: &str) -> BTreeMap<i64, String>
where
    I: IntoIterator<Item = (Option<i64>, Option<String>)>,
{
    rows.into_iter()
        .filter_map(|(id, desc)| id.map(|id| (id, desc.unwrap_or_else(|| default.to_string()))))
        .collect()
}
