//! Query and body payloads for each endpoint.
//!
//! Optional fields are skipped when unset so that an omitted parameter is
//! never sent, not even as `null`.

use serde::ser::Error as _;
use serde::{Serialize, Serializer};
use serde_json::Value;

/// Query or body carrying only the device key.
#[derive(Debug, Clone, Serialize)]
pub struct KeyRequest {
    pub key: String,
}

impl KeyRequest {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

/// Query for `schedules.json` and `moistures.json`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ZoneHistoryQuery {
    pub key: String,
    /// `YYYY-MM-DD`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    /// `YYYY-MM-DD`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    /// Sent as JSON array text, e.g. `zones=[1,2]`.
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "zones_as_json_text")]
    pub zones: Option<Vec<u32>>,
}

/// Query for `events.json`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct EventsQuery {
    pub key: String,
    /// Event type filter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

/// Query for `sensor_data.json`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SensorDataQuery {
    pub key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

/// Body for `set_status.json`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SetStatusRequest {
    pub key: String,
    /// `1` enables the device, `0` puts it on standby.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u8>,
}

/// Body for `water.json`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct WaterRequest {
    pub key: String,
    /// Minutes.
    pub duration: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zones: Option<Vec<u32>>,
    /// Minutes to wait before starting.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delay: Option<u32>,
    /// UTC, `YYYY-MM-DD HH:MM`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
}

/// Body for `no_water.json`.
#[derive(Debug, Clone, Serialize)]
pub struct NoWaterRequest {
    pub key: String,
    pub days: u32,
}

/// Body for `set_moisture.json`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SetMoistureRequest {
    pub key: String,
    /// Percentage, 0 to 100. Range checks are left to the API.
    pub moisture: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zones: Option<Vec<u32>>,
}

/// Body for `report_weather.json`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReportWeatherRequest {
    pub key: String,
    /// `YYYY-MM-DD`.
    pub date: String,
    /// Weather condition code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<i32>,
    /// Rainfall in millimeters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rain: Option<f64>,
    /// Rain probability, percent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rain_prob: Option<u32>,
    /// Temperature in Celsius.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temp: Option<f64>,
}

fn zones_as_json_text<S>(zones: &Option<Vec<u32>>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match zones {
        Some(zones) => {
            let text = serde_json::to_string(zones).map_err(S::Error::custom)?;
            serializer.serialize_str(&text)
        }
        None => serializer.serialize_none(),
    }
}

/// Flattens a serializable struct into query pairs.
///
/// Strings are sent as-is, everything else as its JSON text.
pub(crate) fn to_query<T: Serialize>(params: &T) -> Result<Vec<(String, String)>, serde_json::Error> {
    match serde_json::to_value(params)? {
        Value::Object(map) => Ok(map
            .into_iter()
            .map(|(name, value)| match value {
                Value::String(s) => (name, s),
                other => (name, other.to_string()),
            })
            .collect()),
        _ => Err(serde_json::Error::custom("query parameters must serialize to an object")),
    }
}
