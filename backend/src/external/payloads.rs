//! Raw IPMA payload shapes
//!
//! The open data feeds are loosely typed: lists come wrapped in `{"data": [...]}`
//! or bare, and numbers are sometimes published as strings. Every field here is
//! optional and decoded leniently; a value that cannot be read becomes `None`
//! instead of failing the whole document.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// A list payload, wrapped or bare
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Envelope<T> {
    Wrapped { data: Vec<T> },
    Bare(Vec<T>),
}

impl<T> Envelope<T> {
    pub fn into_items(self) -> Vec<T> {
        match self {
            Envelope::Wrapped { data } => data,
            Envelope::Bare(items) => items,
        }
    }
}

// ============================================================================
// Lenient field decoders
// ============================================================================

fn number_from(value: &Value) -> Option<f64> {
    let number: Option<f64> = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().replace(',', ".").parse().ok(),
        _ => None,
    };
    number.filter(|n| n.is_finite())
}

/// Number or numeric string
pub fn opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(number_from))
}

/// Integer, float (truncated) or numeric string
pub fn opt_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(|v| match v {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        other => number_from(other).map(|f| f.trunc() as i64),
    }))
}

/// String, or a scalar rendered as text
pub fn opt_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }))
}

// ============================================================================
// Reference tables
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawLocation {
    #[serde(default, deserialize_with = "opt_i64")]
    pub id_distrito: Option<i64>,
    #[serde(default, deserialize_with = "opt_i64")]
    pub global_id_local: Option<i64>,
    #[serde(default, deserialize_with = "opt_text")]
    pub local: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RawWeatherType {
    #[serde(rename = "idWeatherType", default, deserialize_with = "opt_i64")]
    pub id: Option<i64>,
    #[serde(
        rename = "descIdWeatherTypePT",
        alias = "descWeatherTypePT",
        default,
        deserialize_with = "opt_text"
    )]
    pub description_pt: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RawWindSpeedClass {
    #[serde(rename = "idWindSpeedDailyClasse", default, deserialize_with = "opt_i64")]
    pub id: Option<i64>,
    #[serde(rename = "descWindSpeedDailyClassePT", default, deserialize_with = "opt_text")]
    pub description_pt: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RawPrecipitationClass {
    #[serde(rename = "idPrecipitationTypeClasse", default, deserialize_with = "opt_i64")]
    pub id: Option<i64>,
    #[serde(
        rename = "descPrecipitationTypeClassePT",
        default,
        deserialize_with = "opt_text"
    )]
    pub description_pt: Option<String>,
}

// ============================================================================
// Forecast
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawForecastEntry {
    #[serde(default, deserialize_with = "opt_text")]
    pub forecast_date: Option<String>,
    #[serde(default, deserialize_with = "opt_f64")]
    pub t_med: Option<f64>,
    #[serde(default, deserialize_with = "opt_f64")]
    pub t_max: Option<f64>,
    #[serde(default, deserialize_with = "opt_f64")]
    pub t_min: Option<f64>,
    #[serde(default, deserialize_with = "opt_i64")]
    pub id_weather_type: Option<i64>,
    #[serde(alias = "precipitaProb", default, deserialize_with = "opt_f64")]
    pub probability_of_precipitation: Option<f64>,
    #[serde(default, deserialize_with = "opt_f64")]
    pub ff_vento: Option<f64>,
    #[serde(alias = "predWindDir", default, deserialize_with = "opt_text")]
    pub dd_vento: Option<String>,
}

// ============================================================================
// Event feeds
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawWarning {
    #[serde(default, deserialize_with = "opt_text")]
    pub id_area_aviso: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    pub area: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    pub awareness_type_name: Option<String>,
    #[serde(rename = "awarenessLevelID", default, deserialize_with = "opt_text")]
    pub awareness_level_id: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    pub start_time: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    pub end_time: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    pub text: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    pub phenomenon: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RawSeismicEvent {
    #[serde(default, deserialize_with = "opt_text")]
    pub id: Option<String>,
    #[serde(alias = "magnitud", default, deserialize_with = "opt_f64")]
    pub magnitude: Option<f64>,
    #[serde(default, deserialize_with = "opt_f64")]
    pub depth: Option<f64>,
    #[serde(alias = "obsRegion", default, deserialize_with = "opt_text")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    pub time: Option<String>,
    #[serde(default, deserialize_with = "opt_f64")]
    pub lat: Option<f64>,
    #[serde(default, deserialize_with = "opt_f64")]
    pub lon: Option<f64>,
    #[serde(rename = "intensityID", default, deserialize_with = "opt_text")]
    pub intensity: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSeaState {
    #[serde(default, deserialize_with = "opt_text")]
    pub forecast_date: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "opt_f64")]
    pub significant_wave_height: Option<f64>,
    #[serde(default, deserialize_with = "opt_f64")]
    pub wave_period: Option<f64>,
    #[serde(default, deserialize_with = "opt_text")]
    pub wave_direction: Option<String>,
    #[serde(default, deserialize_with = "opt_f64")]
    pub sea_temperature: Option<f64>,
    #[serde(default, deserialize_with = "opt_text")]
    pub coastal_conditions: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawFireRisk {
    #[serde(default, deserialize_with = "opt_text")]
    pub forecast_date: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    pub local: Option<String>,
    #[serde(default, deserialize_with = "opt_i64")]
    pub risco_incendio: Option<i64>,
    #[serde(default, deserialize_with = "opt_f64")]
    pub temperatura: Option<f64>,
    #[serde(default, deserialize_with = "opt_f64")]
    pub humidade: Option<f64>,
    #[serde(default, deserialize_with = "opt_f64")]
    pub vento: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawUvIndex {
    #[serde(default, deserialize_with = "opt_text")]
    pub forecast_date: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    pub local: Option<String>,
    #[serde(default, deserialize_with = "opt_i64")]
    pub iuv: Option<i64>,
}

// ============================================================================
// Stations
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawStation {
    #[serde(default, deserialize_with = "opt_text")]
    pub id_estacao: Option<String>,
    #[serde(alias = "localEstacao", default, deserialize_with = "opt_text")]
    pub nome: Option<String>,
    #[serde(default, deserialize_with = "opt_f64")]
    pub latitude: Option<f64>,
    #[serde(default, deserialize_with = "opt_f64")]
    pub longitude: Option<f64>,
    #[serde(default, deserialize_with = "opt_f64")]
    pub altitude: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawObservation {
    #[serde(default, deserialize_with = "opt_text")]
    pub id_estacao: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    pub nome_estacao: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    pub time: Option<String>,
    #[serde(default, deserialize_with = "opt_f64")]
    pub temperatura: Option<f64>,
    #[serde(default, deserialize_with = "opt_f64")]
    pub humidade: Option<f64>,
    #[serde(default, deserialize_with = "opt_f64")]
    pub pressao: Option<f64>,
    #[serde(default, deserialize_with = "opt_f64")]
    pub intensidade_vento: Option<f64>,
    #[serde(default, deserialize_with = "opt_text")]
    pub direcao_vento: Option<String>,
    #[serde(default, deserialize_with = "opt_f64")]
    pub precipitacao: Option<f64>,
    #[serde(default, deserialize_with = "opt_f64")]
    pub visibilidade: Option<f64>,
}

// ============================================================================
// GeoJSON
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct FeatureCollection<P> {
    #[serde(default)]
    pub features: Vec<Feature<P>>,
}

#[derive(Debug, Deserialize)]
pub struct Feature<P> {
    #[serde(default)]
    pub properties: Option<P>,
    #[serde(default)]
    pub geometry: Option<Geometry>,
}

#[derive(Debug, Deserialize)]
pub struct Geometry {
    #[serde(default)]
    pub coordinates: Value,
}

impl Geometry {
    /// First position of the geometry. A point yields itself; lines and
    /// polygons yield their first vertex. Empty when nothing numeric is found.
    pub fn first_position(&self) -> Vec<f64> {
        let mut current = &self.coordinates;
        loop {
            match current {
                Value::Array(items) => match items.first() {
                    Some(Value::Array(_)) => current = &items[0],
                    Some(_) => return items.iter().filter_map(number_from).collect(),
                    None => return Vec::new(),
                },
                _ => return Vec::new(),
            }
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct RawZoneProperties {
    #[serde(default, deserialize_with = "opt_text")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    pub nome: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    pub estado: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    pub tipo_restricao: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    pub data_atualizacao: Option<String>,
}
