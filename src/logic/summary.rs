//! Natural-language summary construction.
//!
//! The summary is a temperature-band fragment followed by an optional
//! condition clause. Both selections are ordered rule tables evaluated top
//! to bottom, first match wins, so band and clause priority stay explicit.

use crate::models::WeatherSnapshot;

/// Temperature bands, strictly ordered by exclusive upper bound. A value
/// on a boundary falls into the band where the boundary is the lower bound
/// (0°C is chilly, not freezing). The final band catches everything else.
const TEMP_BANDS: &[(f64, fn(i64) -> String)] = &[
    (0.0, |t| {
        format!("It's freezing cold at {t}°C. Bundle up in layers and watch for icy conditions.")
    }),
    (10.0, |t| {
        format!("Chilly weather at {t}°C. You'll want a warm jacket when heading out.")
    }),
    (20.0, |t| {
        format!("Cool and comfortable at {t}°C. Perfect weather for a light jacket or sweater.")
    }),
    (30.0, |t| {
        format!("Pleasant {t}°C weather. Great conditions for outdoor activities.")
    }),
];

fn hot_fragment(t: i64) -> String {
    format!("Hot day at {t}°C. Stay hydrated and seek shade during peak hours.")
}

/// Ordered (keywords -> clause) table for the appended condition sentence.
/// Conditions matching no row get no clause.
const CONDITION_CLAUSES: &[(&[&str], &str)] = &[
    (&["rain"], "Rain is expected, so keep an umbrella handy."),
    (&["cloud"], "Cloudy skies provide natural shade today."),
    (
        &["clear", "sun"],
        "Clear skies make it a beautiful day to be outside.",
    ),
];

fn temperature_fragment(temp_c: f64) -> String {
    // Band selection uses the raw value; only the displayed figure rounds.
    let rounded = temp_c.round() as i64;
    for (upper, fragment) in TEMP_BANDS {
        if temp_c < *upper {
            return fragment(rounded);
        }
    }
    hot_fragment(rounded)
}

fn condition_clause(condition: &str) -> Option<&'static str> {
    let lower = condition.to_lowercase();
    CONDITION_CLAUSES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(_, clause)| *clause)
}

/// Build the one-to-two sentence summary for a snapshot.
pub fn build_summary(snapshot: &WeatherSnapshot) -> String {
    let mut summary = temperature_fragment(snapshot.temperature_c);
    if let Some(clause) = condition_clause(&snapshot.condition) {
        summary.push(' ');
        summary.push_str(clause);
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(temp_c: f64, condition: &str) -> WeatherSnapshot {
        WeatherSnapshot {
            temperature_c: temp_c,
            condition: condition.into(),
            humidity_pct: 50.0,
            wind_speed_kmh: 5.0,
            uv_index: None,
        }
    }

    #[test]
    fn one_band_per_temperature() {
        let markers = ["freezing", "Chilly", "Cool and comfortable", "Pleasant", "Hot day"];
        for temp in [-40.0, -5.0, 0.0, 5.0, 10.0, 15.0, 20.0, 25.0, 30.0, 45.0] {
            let summary = build_summary(&snap(temp, "other"));
            let hits = markers
                .iter()
                .filter(|m| summary.contains(*m))
                .count();
            assert_eq!(hits, 1, "temp {temp} produced {summary:?}");
        }
    }

    #[test]
    fn boundaries_resolve_to_upper_band() {
        assert!(build_summary(&snap(0.0, "other")).starts_with("Chilly"));
        assert!(build_summary(&snap(10.0, "other")).starts_with("Cool"));
        assert!(build_summary(&snap(20.0, "other")).starts_with("Pleasant"));
        assert!(build_summary(&snap(30.0, "other")).starts_with("Hot day"));
    }

    #[test]
    fn fragment_embeds_rounded_temperature() {
        assert!(build_summary(&snap(17.6, "other")).contains("18°C"));
        assert!(build_summary(&snap(-4.5, "other")).contains("-5°C"));
    }

    #[test]
    fn band_uses_raw_value_not_rounded() {
        // -0.4 rounds to a displayed 0 but stays in the freezing band.
        let summary = build_summary(&snap(-0.4, "other"));
        assert!(summary.starts_with("It's freezing"));
        assert!(summary.contains("-0°C") || summary.contains("0°C"));
    }

    #[test]
    fn rain_clause_beats_cloud_clause() {
        let summary = build_summary(&snap(15.0, "light rain and clouds"));
        assert!(summary.ends_with("keep an umbrella handy."));
    }

    #[test]
    fn clear_and_sun_share_a_clause() {
        assert!(build_summary(&snap(15.0, "clear")).ends_with("beautiful day to be outside."));
        assert!(build_summary(&snap(15.0, "sunny")).ends_with("beautiful day to be outside."));
    }

    #[test]
    fn unmatched_condition_appends_nothing() {
        let summary = build_summary(&snap(15.0, "snow"));
        assert!(summary.ends_with("light jacket or sweater."));
    }

    #[test]
    fn clause_is_case_insensitive() {
        assert!(build_summary(&snap(15.0, "RAIN")).ends_with("keep an umbrella handy."));
    }
}
