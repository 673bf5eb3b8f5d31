//! Severity classification for AQI (Jakarta) and PSI (Singapore) readings.
//!
//! The two scales share labels but not boundaries; always pick the table that
//! matches the index being classified.

/// Severity buckets, in ascending order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Good,
    Moderate,
    UnhealthyForSensitive,
    Unhealthy,
    VeryUnhealthy,
    Hazardous,
}

impl Severity {
    /// Two fixed activity recommendation lines for this severity.
    pub fn activity_advice(self) -> [&'static str; 2] {
        match self {
            Severity::Good => [
                "Perfect for outdoor activities",
                "All age groups can enjoy outdoor exercise",
            ],
            Severity::Moderate => [
                "Safe for most outdoor activities",
                "Sensitive individuals should monitor symptoms",
            ],
            Severity::UnhealthyForSensitive => [
                "Limit prolonged outdoor activities",
                "Sensitive groups should reduce outdoor exercise",
            ],
            Severity::Unhealthy => [
                "Avoid outdoor activities",
                "Everyone should limit outdoor exposure",
            ],
            Severity::VeryUnhealthy | Severity::Hazardous => [
                "Stay indoors, use air purifiers",
                "Wear N95 masks if going outside",
            ],
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SeverityTier {
    pub severity: Severity,
    pub label: &'static str,
    pub emoji: &'static str,
    pub advisory: &'static str,
}

impl SeverityTier {
    /// `Moderate 🟡`
    pub fn badge(&self) -> String {
        format!("{} {}", self.label, self.emoji)
    }
}

#[derive(Debug)]
struct Band {
    upper: u32,
    tier: SeverityTier,
}

/// Ascending `(upper bound, tier)` bands plus the tier for anything above them.
#[derive(Debug)]
pub struct ThresholdTable {
    pub name: &'static str,
    bands: &'static [Band],
    ceiling: SeverityTier,
}

impl ThresholdTable {
    /// Inclusive `(low, high)` ranges per tier; `high` is `None` for the ceiling.
    pub fn ranges(&self) -> Vec<(u32, Option<u32>, &SeverityTier)> {
        let mut out = Vec::with_capacity(self.bands.len() + 1);
        let mut low = 0u32;
        for band in self.bands {
            out.push((low, Some(band.upper), &band.tier));
            low = band.upper.saturating_add(1);
        }
        out.push((low, None, &self.ceiling));
        out
    }
}

const fn tier(
    severity: Severity,
    label: &'static str,
    emoji: &'static str,
    advisory: &'static str,
) -> SeverityTier {
    SeverityTier {
        severity,
        label,
        emoji,
        advisory,
    }
}

pub static AQI_TABLE: ThresholdTable = ThresholdTable {
    name: "AQI",
    bands: &[
        Band {
            upper: 50,
            tier: tier(
                Severity::Good,
                "Good",
                "🟢",
                "Air quality is considered satisfactory",
            ),
        },
        Band {
            upper: 100,
            tier: tier(
                Severity::Moderate,
                "Moderate",
                "🟡",
                "Air quality is acceptable for most people",
            ),
        },
        Band {
            upper: 150,
            tier: tier(
                Severity::UnhealthyForSensitive,
                "Unhealthy for Sensitive Groups",
                "🟠",
                "Sensitive individuals may experience health issues",
            ),
        },
        Band {
            upper: 200,
            tier: tier(
                Severity::Unhealthy,
                "Unhealthy",
                "🔴",
                "Everyone may experience health issues",
            ),
        },
        Band {
            upper: 300,
            tier: tier(
                Severity::VeryUnhealthy,
                "Very Unhealthy",
                "🟣",
                "Health warnings of emergency conditions",
            ),
        },
    ],
    ceiling: tier(
        Severity::Hazardous,
        "Hazardous",
        "⚫",
        "Health alert: everyone may experience serious health effects",
    ),
};

pub static PSI_TABLE: ThresholdTable = ThresholdTable {
    name: "PSI",
    bands: &[
        Band {
            upper: 50,
            tier: tier(Severity::Good, "Good", "🟢", "Normal activities"),
        },
        Band {
            upper: 100,
            tier: tier(
                Severity::Moderate,
                "Moderate",
                "🟡",
                "Normal activities for most people",
            ),
        },
        Band {
            upper: 200,
            tier: tier(
                Severity::Unhealthy,
                "Unhealthy",
                "🟠",
                "Reduce prolonged outdoor activities",
            ),
        },
        Band {
            upper: 300,
            tier: tier(
                Severity::VeryUnhealthy,
                "Very Unhealthy",
                "🔴",
                "Avoid prolonged outdoor activities",
            ),
        },
    ],
    ceiling: tier(
        Severity::Hazardous,
        "Hazardous",
        "⚫",
        "Avoid outdoor activities",
    ),
};

/// First tier whose upper bound is `>= value`; the ceiling tier otherwise.
pub fn classify(value: u32, table: &'static ThresholdTable) -> &'static SeverityTier {
    table
        .bands
        .iter()
        .find(|b| value <= b.upper)
        .map(|b| &b.tier)
        .unwrap_or(&table.ceiling)
}
