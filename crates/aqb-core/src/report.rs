//! Report rendering (Telegram HTML).
//!
//! Every section degrades on its own: missing data becomes an explicit line in
//! that section, never a missing section or an error.

use chrono::NaiveDateTime;

use crate::{
    classify::{classify, SeverityTier, AQI_TABLE, PSI_TABLE},
    formatting::{escape_html, format_number, pollutant_label, section_heading},
    model::{average_aqi, RegionalFigures, RegionalPsiReading, StationReading},
};

pub const JAKARTA_UNAVAILABLE: &str = "❌ Unable to fetch Jakarta air quality data.";
pub const SINGAPORE_UNAVAILABLE: &str = "❌ Unable to fetch Singapore PSI data.";
pub const COMPARISON_UNAVAILABLE: &str =
    "⚠️ Comparison unavailable: data for both cities is required.";
pub const RECOMMENDATIONS_UNAVAILABLE: &str =
    "⚠️ Recommendations unavailable without Jakarta data.";
pub const STATION_DETAIL_UNAVAILABLE: &str = "❌ Unable to fetch detailed data.";
pub const REGIONAL_DETAIL_UNAVAILABLE: &str = "❌ Unable to fetch detailed Singapore PSI data.";

const SOURCES_FOOTER: &str = "🔄 Data sources: AQICN.org (Jakarta) | Data.gov.sg (Singapore)";

/// Leading stations (input order) considered for the lines under the Jakarta
/// average; those without a value are skipped, not replaced.
const HIGHLIGHTED_STATIONS: usize = 2;

/// Outcome of the raw numeric AQI vs PSI comparison (lower is better).
///
/// The two indices use different scales; the comparison is numeric only.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Comparison {
    JakartaBetter,
    SingaporeBetter,
    Similar,
}

pub fn compare(jakarta_aqi: u32, singapore_psi: u32) -> Comparison {
    match jakarta_aqi.cmp(&singapore_psi) {
        std::cmp::Ordering::Less => Comparison::JakartaBetter,
        std::cmp::Ordering::Greater => Comparison::SingaporeBetter,
        std::cmp::Ordering::Equal => Comparison::Similar,
    }
}

/// Jakarta vs Singapore report with recommendations.
///
/// `stations` is empty when the Jakarta source failed; `regional` is `None`
/// when the Singapore source failed.
pub fn render_comparison_report(
    stations: &[StationReading],
    regional: Option<&RegionalPsiReading>,
    generated_at: NaiveDateTime,
) -> String {
    let jakarta_avg = average_aqi(stations);
    let national_psi = regional.and_then(|r| r.psi.national);

    let mut out = String::new();
    out.push_str("🌍 <b>Regional Air Quality Report</b>\n");
    out.push_str(&format!(
        "📅 Updated: {}\n\n",
        generated_at.format("%Y-%m-%d %H:%M:%S")
    ));

    out.push_str(&section_heading("🇮🇩", "JAKARTA (AQI)"));
    match jakarta_avg {
        None => out.push_str(&format!("{JAKARTA_UNAVAILABLE}\n")),
        Some(avg) => {
            push_headline(&mut out, "Average AQI", avg, classify(avg, &AQI_TABLE));
            for (s, aqi) in stations
                .iter()
                .take(HIGHLIGHTED_STATIONS)
                .filter_map(|s| s.aqi.map(|a| (s, a)))
            {
                let t = classify(aqi, &AQI_TABLE);
                out.push_str(&format!(
                    "📍 {}: {aqi} {} {}\n",
                    escape_html(&s.display_name()),
                    t.emoji,
                    t.label
                ));
            }
        }
    }

    out.push('\n');
    out.push_str(&section_heading("🇸🇬", "SINGAPORE (PSI)"));
    match (regional, national_psi) {
        (Some(r), Some(national)) => {
            push_headline(&mut out, "National PSI", national, classify(national, &PSI_TABLE));
            for (region, psi) in r.psi.available_regions() {
                let t = classify(psi, &PSI_TABLE);
                out.push_str(&format!(
                    "📍 {}: {psi} {} {}\n",
                    region.label(),
                    t.emoji,
                    t.label
                ));
            }
        }
        _ => out.push_str(&format!("{SINGAPORE_UNAVAILABLE}\n")),
    }

    out.push('\n');
    out.push_str(&section_heading("📈", "COMPARISON"));
    match (jakarta_avg, national_psi) {
        (Some(aqi), Some(psi)) => {
            let verdict = match compare(aqi, psi) {
                Comparison::JakartaBetter => {
                    "🟢 Jakarta air quality is currently better than Singapore"
                }
                Comparison::SingaporeBetter => {
                    "🔴 Singapore air quality is currently better than Jakarta"
                }
                Comparison::Similar => "🟡 Both cities have similar air quality levels",
            };
            out.push_str(&format!(
                "{verdict}\n   Jakarta AQI: {aqi} | Singapore PSI: {psi}\n"
            ));
        }
        _ => out.push_str(&format!("{COMPARISON_UNAVAILABLE}\n")),
    }

    out.push('\n');
    out.push_str(&section_heading("💡", "HEALTH RECOMMENDATIONS"));
    match jakarta_avg {
        Some(avg) => {
            for line in classify(avg, &AQI_TABLE).severity.activity_advice() {
                out.push_str(&format!("• {line}\n"));
            }
        }
        None => out.push_str(&format!("{RECOMMENDATIONS_UNAVAILABLE}\n")),
    }

    out.push('\n');
    out.push_str(SOURCES_FOOTER);
    out
}

fn push_headline(out: &mut String, title: &str, value: u32, tier: &SeverityTier) {
    out.push_str(&format!("📊 <b>{title}: {value}</b>\n"));
    out.push_str(&format!("🏥 Status: {}\n", tier.badge()));
    out.push_str(&format!("ℹ️ {}\n\n", tier.advisory));
}

/// Every station with raw AQI, whitelisted pollutants and observation time.
pub fn render_station_detail(stations: &[StationReading]) -> String {
    if stations.is_empty() {
        return STATION_DETAIL_UNAVAILABLE.to_string();
    }

    let mut out = String::from("📊 <b>Detailed Jakarta Air Quality Report</b>\n\n");
    for s in stations {
        out.push_str(&format!("📍 <b>{}</b>\n", escape_html(&s.display_name())));
        match s.aqi {
            Some(aqi) => out.push_str(&format!("🔢 AQI: {aqi}\n")),
            None => out.push_str("🔢 AQI: N/A\n"),
        }

        let mut pollutants = s.detail_pollutants().peekable();
        if pollutants.peek().is_some() {
            out.push_str("🧪 <b>Pollutant Details:</b>\n");
            for (code, v) in pollutants {
                out.push_str(&format!(
                    "  • {}: {}\n",
                    escape_html(&pollutant_label(code)),
                    format_number(*v)
                ));
            }
        }

        if let Some(at) = s.observed_at {
            out.push_str(&format!(
                "⏰ Last Updated: {}\n",
                at.format("%Y-%m-%d %H:%M:%S")
            ));
        }
        out.push('\n');
    }
    out.truncate(out.trim_end().len());
    out
}

/// National and per-region PSI and PM2.5, plus a national health advisory.
///
/// A block whose figures are all missing is left out.
pub fn render_regional_detail(regional: Option<&RegionalPsiReading>) -> String {
    let Some(r) = regional else {
        return REGIONAL_DETAIL_UNAVAILABLE.to_string();
    };

    let mut out = String::from("🇸🇬 <b>Detailed Singapore PSI Report</b>\n\n");
    out.push_str(&format!(
        "⏰ <b>Last Updated:</b> {}\n\n",
        r.observed_at.format("%Y-%m-%d %H:%M:%S %:z")
    ));

    if !r.psi.is_empty() {
        out.push_str("📊 <b>24-Hour PSI Readings:</b>\n");
        push_national(&mut out, &r.psi);
        for (region, psi) in r.psi.available_regions() {
            let t = classify(psi, &PSI_TABLE);
            out.push_str(&format!("📍 {}: {psi} ({})\n", region.label(), t.badge()));
        }
        out.push('\n');
    }

    if !r.pm25.is_empty() {
        out.push_str("🧪 <b>PM2.5 Concentrations (µg/m³):</b>\n");
        push_national(&mut out, &r.pm25);
        for (region, pm25) in r.pm25.available_regions() {
            out.push_str(&format!("📍 {}: {pm25}\n", region.label()));
        }
        out.push('\n');
    }

    if let Some(national) = r.psi.national {
        let t = classify(national, &PSI_TABLE);
        out.push_str("🏥 <b>Health Advisory:</b>\n");
        out.push_str(&format!("Status: {}\n", t.badge()));
        out.push_str(&format!("Recommendation: {}\n", t.advisory));
    }

    out.truncate(out.trim_end().len());
    out
}

fn push_national(out: &mut String, figures: &RegionalFigures) {
    match figures.national {
        Some(v) => out.push_str(&format!("🇸🇬 National: {v}\n")),
        None => out.push_str("🇸🇬 National: N/A\n"),
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, NaiveDate};

    use super::*;
    use crate::model::Region;

    fn at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 14)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap()
    }

    fn regional(national: Option<u32>) -> RegionalPsiReading {
        RegionalPsiReading {
            observed_at: DateTime::parse_from_rfc3339("2025-03-14T09:00:00+08:00").unwrap(),
            psi: RegionalFigures::new(national)
                .with_region(Region::North, Some(45))
                .with_region(Region::South, Some(120))
                .with_region(Region::Central, None),
            pm25: RegionalFigures::new(Some(12))
                .with_region(Region::North, Some(10))
                .with_region(Region::West, Some(14)),
        }
    }

    fn station(id: &str, aqi: Option<u32>) -> StationReading {
        StationReading::new(id, aqi)
    }

    #[test]
    fn jakarta_average_ignores_missing_station() {
        let stations = vec![
            station("jakarta", Some(40)),
            station("jakarta-selatan", Some(60)),
            station("jakarta-utara", None),
        ];
        let out = render_comparison_report(&stations, None, at());
        assert!(out.contains("Average AQI: 50</b>"));
        assert!(out.contains("Status: Good 🟢"));
        assert!(out.contains("📍 Jakarta: 40 🟢 Good"));
        assert!(out.contains("📍 Jakarta Selatan: 60 🟡 Moderate"));
        assert!(!out.contains("Jakarta Utara"));
        assert!(out.contains("Perfect for outdoor activities"));
    }

    #[test]
    fn only_first_two_stations_are_highlighted() {
        let stations = vec![
            station("a", Some(10)),
            station("b", None),
            station("c", Some(30)),
        ];
        let out = render_comparison_report(&stations, None, at());
        assert!(out.contains("📍 A: 10"));
        assert!(!out.contains("📍 B"));
        assert!(!out.contains("📍 C"));
        assert!(out.contains("Average AQI: 20</b>"));
    }

    #[test]
    fn no_numeric_station_degrades_every_jakarta_section() {
        let stations = vec![station("jakarta", None)];
        let r = regional(Some(55));
        let out = render_comparison_report(&stations, Some(&r), at());
        assert!(out.contains(JAKARTA_UNAVAILABLE));
        assert!(out.contains(COMPARISON_UNAVAILABLE));
        assert!(out.contains(RECOMMENDATIONS_UNAVAILABLE));
        assert!(out.contains("National PSI: 55</b>"));
        assert!(out.contains("JAKARTA (AQI)"));
        assert!(out.contains("COMPARISON"));
        assert!(out.contains("HEALTH RECOMMENDATIONS"));
    }

    #[test]
    fn missing_national_psi_is_a_singapore_failure() {
        let r = regional(None);
        let out = render_comparison_report(&[station("jakarta", Some(80))], Some(&r), at());
        assert!(out.contains(SINGAPORE_UNAVAILABLE));
        assert!(!out.contains("📍 North"));
        assert!(out.contains(COMPARISON_UNAVAILABLE));
        assert!(out.contains("Safe for most outdoor activities"));
    }

    #[test]
    fn equal_figures_compare_as_similar() {
        let r = regional(Some(80));
        let out = render_comparison_report(&[station("jakarta", Some(80))], Some(&r), at());
        assert!(out.contains("similar air quality levels"));
        assert!(out.contains("Jakarta AQI: 80 | Singapore PSI: 80"));
    }

    #[test]
    fn lower_figure_wins_comparison() {
        assert_eq!(compare(40, 80), Comparison::JakartaBetter);
        assert_eq!(compare(120, 80), Comparison::SingaporeBetter);
        assert_eq!(compare(80, 80), Comparison::Similar);

        let r = regional(Some(30));
        let out = render_comparison_report(&[station("jakarta", Some(90))], Some(&r), at());
        assert!(out.contains("Singapore air quality is currently better than Jakarta"));
    }

    #[test]
    fn singapore_section_lists_regions_with_values() {
        let r = regional(Some(55));
        let out = render_comparison_report(&[], Some(&r), at());
        assert!(out.contains("📍 North: 45 🟢 Good"));
        assert!(out.contains("📍 South: 120 🟠 Unhealthy"));
        assert!(!out.contains("📍 Central"));
        assert!(!out.contains("📍 East"));
    }

    #[test]
    fn report_has_header_and_footer() {
        let out = render_comparison_report(&[], None, at());
        assert!(out.starts_with("🌍 <b>Regional Air Quality Report</b>\n📅 Updated: 2025-03-14 09:30:00"));
        assert!(out.ends_with(SOURCES_FOOTER));
    }

    #[test]
    fn rendering_is_deterministic() {
        let stations = vec![station("jakarta-barat", Some(155)), station("jakarta", Some(20))];
        let r = regional(Some(99));
        let a = render_comparison_report(&stations, Some(&r), at());
        let b = render_comparison_report(&stations, Some(&r), at());
        assert_eq!(a, b);
        assert_eq!(render_station_detail(&stations), render_station_detail(&stations));
        let barat = a.find("Jakarta Barat").unwrap();
        let jakarta = a.find("📍 Jakarta:").unwrap();
        assert!(barat < jakarta);
    }

    #[test]
    fn station_detail_lists_whitelisted_pollutants() {
        let mut s = station("jakarta-pusat", None);
        s.pollutants = vec![
            ("pm25".to_string(), 68.0),
            ("w".to_string(), 2.5),
            ("co".to_string(), 4.1),
        ];
        s.observed_at = Some(at());
        let out = render_station_detail(&[s, station("jakarta", Some(70))]);
        assert!(out.contains("📍 <b>Jakarta Pusat</b>\n🔢 AQI: N/A"));
        assert!(out.contains("  • PM2.5: 68\n"));
        assert!(out.contains("  • CO: 4.1\n"));
        assert!(!out.contains("W:"));
        assert!(out.contains("⏰ Last Updated: 2025-03-14 09:30:00"));
        assert!(out.contains("🔢 AQI: 70"));
    }

    #[test]
    fn station_detail_without_stations() {
        assert_eq!(render_station_detail(&[]), STATION_DETAIL_UNAVAILABLE);
    }

    #[test]
    fn regional_detail_lists_psi_pm25_and_advisory() {
        let r = regional(Some(120));
        let out = render_regional_detail(Some(&r));
        assert!(out.contains("🇸🇬 National: 120"));
        assert!(out.contains("📍 South: 120 (Unhealthy 🟠)"));
        assert!(out.contains("📍 West: 14"));
        assert!(out.contains("Status: Unhealthy 🟠"));
        assert!(out.contains("Recommendation: Reduce prolonged outdoor activities"));
        assert!(out.contains("2025-03-14 09:00:00 +08:00"));
    }

    #[test]
    fn regional_detail_without_national_skips_advisory() {
        let r = regional(None);
        let out = render_regional_detail(Some(&r));
        assert!(out.contains("🇸🇬 National: N/A"));
        assert!(!out.contains("Health Advisory"));
        assert_eq!(render_regional_detail(None), REGIONAL_DETAIL_UNAVAILABLE);
    }

    #[test]
    fn regional_detail_skips_blocks_without_figures() {
        let mut r = regional(Some(60));
        r.pm25 = RegionalFigures::default();
        let out = render_regional_detail(Some(&r));
        assert!(out.contains("24-Hour PSI Readings"));
        assert!(!out.contains("PM2.5 Concentrations"));
        assert!(out.contains("Status: Moderate 🟡"));

        r.psi = RegionalFigures::default();
        r.pm25 = RegionalFigures::new(Some(9));
        let out = render_regional_detail(Some(&r));
        assert!(!out.contains("24-Hour PSI Readings"));
        assert!(out.contains("PM2.5 Concentrations"));
        assert!(!out.contains("Health Advisory"));
    }

    #[test]
    fn highlighted_stations_come_from_the_leading_two_only() {
        let stations = vec![
            station("jakarta", None),
            station("jakarta-utara", Some(70)),
            station("jakarta-barat", Some(90)),
        ];
        let out = render_comparison_report(&stations, None, at());
        assert!(out.contains("📍 Jakarta Utara: 70"));
        assert!(!out.contains("📍 Jakarta:"));
        assert!(!out.contains("Jakarta Barat"));
        assert!(out.contains("Average AQI: 80</b>"));
    }
}
