//! World Air Quality Index (aqicn.org) station feed.
//!
//! `GET {base}/feed/{station}/?token={token}`

use chrono::NaiveDateTime;
use serde::Deserialize;
use serde_json::{Map, Value};

use aqb_core::{errors::Error, model::StationReading, Result};

pub(crate) const SOURCE_NAME: &str = "waqi";

#[derive(Debug, Deserialize)]
struct FeedResponse {
    status: String,
    /// An object when `status == "ok"`, an error message string otherwise.
    #[serde(default)]
    data: Value,
}

#[derive(Debug, Deserialize)]
struct FeedData {
    #[serde(default)]
    aqi: Value,
    #[serde(default)]
    iaqi: Map<String, Value>,
    #[serde(default)]
    time: Option<FeedTime>,
}

#[derive(Debug, Deserialize)]
struct FeedTime {
    s: Option<String>,
}

/// Parse one station feed body.
///
/// `Ok(None)` when the upstream reports a non-`ok` status (unknown station,
/// bad token, ...). A body that is not a feed at all is an error.
pub fn parse_station_feed(station_id: &str, body: &str) -> Result<Option<StationReading>> {
    let feed: FeedResponse = serde_json::from_str(body)?;
    if feed.status != "ok" {
        return Ok(None);
    }

    let data: FeedData = serde_json::from_value(feed.data).map_err(|e| Error::Upstream {
        source_name: SOURCE_NAME,
        reason: format!("station {station_id}: {e}"),
    })?;

    let pollutants = data
        .iaqi
        .iter()
        .filter_map(|(code, v)| v.get("v").and_then(Value::as_f64).map(|x| (code.clone(), x)))
        .collect();

    let observed_at = data
        .time
        .and_then(|t| t.s)
        .and_then(|s| NaiveDateTime::parse_from_str(s.trim(), "%Y-%m-%d %H:%M:%S").ok());

    Ok(Some(StationReading {
        station_id: station_id.to_string(),
        aqi: index_value(&data.aqi),
        pollutants,
        observed_at,
    }))
}

/// Non-negative index value; fractions are truncated, anything else is missing.
///
/// WAQI reports `"-"` for stations without a current AQI.
pub(crate) fn index_value(v: &Value) -> Option<u32> {
    match v {
        Value::Number(n) => {
            if let Some(u) = n.as_u64() {
                return u32::try_from(u).ok();
            }
            n.as_f64().and_then(truncate_non_negative)
        }
        Value::String(s) => {
            let s = s.trim();
            s.parse::<u32>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(truncate_non_negative))
        }
        _ => None,
    }
}

fn truncate_non_negative(f: f64) -> Option<u32> {
    if !f.is_finite() || f < 0.0 || f > u32::MAX as f64 {
        return None;
    }
    Some(f.trunc() as u32)
}
