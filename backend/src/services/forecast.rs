//! Daily forecast normalization
//!
//! Resolves a (district, location) pair, fetches the city forecast document
//! and keeps the entries for the requested day.

use chrono::{DateTime, Local, NaiveDateTime};
use shared::{DailyForecast, HourlyForecast, TemperatureRange, WeatherCondition};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::cache::ResponseCache;
use crate::config::CacheConfig;
use crate::external::payloads::{Envelope, RawForecastEntry};
use crate::external::{IpmaClient, Resource, UpstreamError};
use crate::services::reference::{find_location, CodeTable, ReferenceService, UNKNOWN_CONDITION};

/// Hour reported when a forecast timestamp carries no usable time
pub const DEFAULT_HOUR: &str = "12:00";

/// Outcome of a forecast lookup
#[derive(Debug, Clone)]
pub enum ForecastLookup {
    Found(DailyForecast),
    UnknownDistrict,
    UnknownLocation { available: Vec<String> },
    NoDataForDay { day: String },
}

type ForecastDocument = Arc<Vec<RawForecastEntry>>;

#[derive(Clone)]
pub struct ForecastService {
    client: IpmaClient,
    reference: ReferenceService,
    documents: ResponseCache<i64, ForecastDocument>,
}

impl ForecastService {
    pub fn new(client: IpmaClient, reference: ReferenceService, cache: &CacheConfig) -> Self {
        Self {
            client,
            reference,
            documents: ResponseCache::bounded(
                "forecast_documents",
                cache.forecast_ttl(),
                cache.max_forecast_entries,
            ),
        }
    }

    /// Forecast for a location on `day` (`YYYY-MM-DD`, default today)
    pub async fn forecast_for_location(
        &self,
        district: &str,
        location: &str,
        day: Option<&str>,
    ) -> Result<ForecastLookup, UpstreamError> {
        let locations = self.reference.locations_by_district(district).await?;
        if locations.is_empty() {
            return Ok(ForecastLookup::UnknownDistrict);
        }

        let Some(found) = find_location(&locations, location) else {
            return Ok(ForecastLookup::UnknownLocation {
                available: locations.iter().map(|l| l.name.clone()).collect(),
            });
        };

        let document = self.document(found.id).await?;
        let conditions = self.conditions().await;
        let day = day
            .map(str::to_string)
            .unwrap_or_else(|| Local::now().format("%Y-%m-%d").to_string());

        debug!(location_id = found.id, %day, entries = document.len(), "Building daily forecast");

        Ok(
            match build_daily_forecast(&document, &conditions, district, location, &day) {
                Some(forecast) => ForecastLookup::Found(forecast),
                None => ForecastLookup::NoDataForDay { day },
            },
        )
    }

    /// Raw forecast document for a location id
    async fn document(&self, location_id: i64) -> Result<ForecastDocument, UpstreamError> {
        self.documents
            .get_or_fetch(location_id, || async {
                let raw: Envelope<RawForecastEntry> = self
                    .client
                    .get_json(Resource::CityForecast(location_id), &[])
                    .await?;
                Ok(Arc::new(raw.into_items()))
            })
            .await
    }

    /// Weather type lookup; an unavailable table leaves every condition unknown
    async fn conditions(&self) -> CodeTable {
        match self.reference.weather_conditions().await {
            Ok(table) => table,
            Err(err) => {
                warn!(error = %err, "Weather type table unavailable");
                Arc::new(BTreeMap::new())
            }
        }
    }

    pub fn invalidate_all(&self) {
        self.documents.invalidate_all();
    }
}

/// Keep the entries of `day` and build the daily summary.
/// Returns `None` when no entry falls on that day.
pub fn build_daily_forecast(
    entries: &[RawForecastEntry],
    conditions: &BTreeMap<i64, String>,
    district: &str,
    location: &str,
    day: &str,
) -> Option<DailyForecast> {
    let mut range = TemperatureRange::default();
    let mut hourly = Vec::new();

    for entry in entries {
        let Some(date) = entry.forecast_date.as_deref() else {
            continue;
        };
        if !date.starts_with(day) {
            continue;
        }

        let temperature = entry.t_med.or(entry.t_max).or(entry.t_min);
        if let Some(t) = temperature {
            range.observe(t);
        }

        let condition_id = entry.id_weather_type.unwrap_or(0);
        let description = conditions
            .get(&condition_id)
            .cloned()
            .unwrap_or_else(|| UNKNOWN_CONDITION.to_string());

        hourly.push(HourlyForecast {
            hour: parse_hour(date).unwrap_or_else(|| DEFAULT_HOUR.to_string()),
            temperature: temperature.unwrap_or(0.0),
            weather_condition: WeatherCondition {
                id: condition_id,
                description,
            },
            precipitation_probability: entry.probability_of_precipitation,
            wind_speed: entry.ff_vento,
            wind_direction: entry.dd_vento.clone(),
        });
    }

    if hourly.is_empty() {
        return None;
    }

    Some(DailyForecast {
        date: day.to_string(),
        location: location.to_string(),
        district: district.to_string(),
        hourly_forecasts: hourly,
        min_temperature: range.min,
        max_temperature: range.max,
    })
}

/// `HH:MM` of an ISO-8601 timestamp. Date-only values have no hour.
pub fn parse_hour(value: &str) -> Option<String> {
    if !value.contains('T') {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.format("%H:%M").to_string());
    }

    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|dt| dt.format("%H:%M").to_string())
}
