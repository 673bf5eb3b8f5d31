//! Readings produced by the air quality sources.
//!
//! Every value here is built once per fetch and dropped after the report that
//! consumed it has been rendered.

use chrono::{DateTime, FixedOffset, NaiveDateTime};

/// Pollutant sub-indices shown in the detailed station view, in display order.
pub const DETAIL_POLLUTANTS: [&str; 6] = ["pm25", "pm10", "no2", "o3", "co", "so2"];

/// One WAQI monitoring station.
#[derive(Clone, Debug, PartialEq)]
pub struct StationReading {
    pub station_id: String,
    pub aqi: Option<u32>,
    /// Pollutant code → concentration, in payload order.
    pub pollutants: Vec<(String, f64)>,
    pub observed_at: Option<NaiveDateTime>,
}

impl StationReading {
    pub fn new(station_id: impl Into<String>, aqi: Option<u32>) -> Self {
        Self {
            station_id: station_id.into(),
            aqi,
            pollutants: Vec::new(),
            observed_at: None,
        }
    }

    /// `jakarta-selatan` → `Jakarta Selatan`.
    pub fn display_name(&self) -> String {
        self.station_id
            .split(['-', '_', ' '])
            .filter(|w| !w.is_empty())
            .map(capitalize)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Pollutants restricted to [`DETAIL_POLLUTANTS`], keeping payload order.
    pub fn detail_pollutants(&self) -> impl Iterator<Item = &(String, f64)> {
        self.pollutants
            .iter()
            .filter(|(code, _)| DETAIL_POLLUTANTS.contains(&code.as_str()))
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Truncated arithmetic mean of the stations that report a numeric AQI.
///
/// Returns `None` when no station has a value.
pub fn average_aqi(stations: &[StationReading]) -> Option<u32> {
    let values: Vec<u64> = stations
        .iter()
        .filter_map(|s| s.aqi)
        .map(u64::from)
        .collect();
    if values.is_empty() {
        return None;
    }
    let mean = values.iter().sum::<u64>() / values.len() as u64;
    u32::try_from(mean).ok()
}

/// Singapore's five PSI reporting regions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Region {
    North,
    South,
    East,
    West,
    Central,
}

impl Region {
    pub const ALL: [Region; 5] = [
        Region::North,
        Region::South,
        Region::East,
        Region::West,
        Region::Central,
    ];

    /// Key used by the data.gov.sg payload.
    pub fn key(self) -> &'static str {
        match self {
            Region::North => "north",
            Region::South => "south",
            Region::East => "east",
            Region::West => "west",
            Region::Central => "central",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Region::North => "North",
            Region::South => "South",
            Region::East => "East",
            Region::West => "West",
            Region::Central => "Central",
        }
    }

    fn index(self) -> usize {
        match self {
            Region::North => 0,
            Region::South => 1,
            Region::East => 2,
            Region::West => 3,
            Region::Central => 4,
        }
    }
}

/// A national figure plus one figure per region; any of them may be missing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RegionalFigures {
    pub national: Option<u32>,
    regions: [Option<u32>; 5],
}

impl RegionalFigures {
    pub fn new(national: Option<u32>) -> Self {
        Self {
            national,
            regions: [None; 5],
        }
    }

    pub fn with_region(mut self, region: Region, value: Option<u32>) -> Self {
        self.regions[region.index()] = value;
        self
    }

    pub fn region(&self, region: Region) -> Option<u32> {
        self.regions[region.index()]
    }

    /// No national or regional figure at all (the payload had no such map).
    pub fn is_empty(&self) -> bool {
        self.national.is_none() && self.regions.iter().all(Option::is_none)
    }

    /// Regions in fixed order, skipping those without a value.
    pub fn available_regions(&self) -> impl Iterator<Item = (Region, u32)> + '_ {
        Region::ALL
            .into_iter()
            .filter_map(|r| self.region(r).map(|v| (r, v)))
    }
}

/// Latest item of Singapore's 24-hour PSI window.
#[derive(Clone, Debug, PartialEq)]
pub struct RegionalPsiReading {
    pub observed_at: DateTime<FixedOffset>,
    pub psi: RegionalFigures,
    pub pm25: RegionalFigures,
}
