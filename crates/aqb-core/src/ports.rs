use async_trait::async_trait;

use crate::model::{RegionalPsiReading, StationReading};

/// Hexagonal port for upstream air quality data.
///
/// Implementations contain every failure: a source that cannot be reached or
/// returns an unusable payload logs the cause and yields `None`. Callers never
/// see an error from this trait.
#[async_trait]
pub trait AirQualitySource: Send + Sync {
    /// Readings for the given stations, in input order.
    ///
    /// Stations that the upstream rejects are left out; `None` means the
    /// source as a whole is unavailable.
    async fn fetch_city_stations(&self, station_ids: &[String]) -> Option<Vec<StationReading>>;

    /// Most recent regional PSI reading, or `None` when unavailable.
    async fn fetch_regional_index(&self) -> Option<RegionalPsiReading>;
}
