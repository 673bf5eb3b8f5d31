//! Singapore PSI from data.gov.sg (`/v1/environment/psi`).

use chrono::DateTime;
use serde::Deserialize;
use serde_json::{Map, Value};

use aqb_core::{
    errors::Error,
    model::{RegionalFigures, RegionalPsiReading, Region},
    Result,
};

use crate::waqi::index_value;

pub(crate) const SOURCE_NAME: &str = "data.gov.sg";

#[derive(Debug, Deserialize)]
struct PsiResponse {
    #[serde(default)]
    items: Vec<PsiItem>,
}

#[derive(Debug, Deserialize)]
struct PsiItem {
    timestamp: String,
    #[serde(default)]
    readings: PsiReadings,
}

#[derive(Debug, Default, Deserialize)]
struct PsiReadings {
    #[serde(default)]
    psi_twenty_four_hourly: Map<String, Value>,
    #[serde(default)]
    pm25_twenty_four_hourly: Map<String, Value>,
}

/// Parse a PSI response body; only the first (most recent) item is used.
pub fn parse_psi_response(body: &str) -> Result<RegionalPsiReading> {
    let resp: PsiResponse = serde_json::from_str(body)?;
    let item = resp.items.into_iter().next().ok_or_else(|| upstream("no items"))?;

    let observed_at = DateTime::parse_from_rfc3339(item.timestamp.trim())
        .map_err(|e| upstream(&format!("bad timestamp {:?}: {e}", item.timestamp)))?;

    Ok(RegionalPsiReading {
        observed_at,
        psi: figures(&item.readings.psi_twenty_four_hourly),
        pm25: figures(&item.readings.pm25_twenty_four_hourly),
    })
}

fn figures(values: &Map<String, Value>) -> RegionalFigures {
    let national = values.get("national").and_then(index_value);
    Region::ALL
        .into_iter()
        .fold(RegionalFigures::new(national), |acc, region| {
            acc.with_region(region, values.get(region.key()).and_then(index_value))
        })
}

fn upstream(reason: &str) -> Error {
    Error::Upstream {
        source_name: SOURCE_NAME,
        reason: reason.to_string(),
    }
}
