use serde::{Deserialize, Serialize};

/// Point-in-time weather measurements the insight engine classifies on.
///
/// The engine treats this as read-only and never validates it: out-of-range
/// values are classified as-is, and a missing UV index counts as 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub temperature_c: f64,
    /// Coarse condition token, matched case-insensitively by substring
    /// ("rain", "cloud", "clear", "sun", ...).
    pub condition: String,
    pub humidity_pct: f64,
    pub wind_speed_kmh: f64,
    pub uv_index: Option<f64>,
}

impl WeatherSnapshot {
    pub fn uv_or_zero(&self) -> f64 {
        self.uv_index.unwrap_or(0.0)
    }

    pub fn condition_lower(&self) -> String {
        self.condition.to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_uv_counts_as_zero() {
        let snap = WeatherSnapshot {
            temperature_c: 15.0,
            condition: "clear".into(),
            humidity_pct: 50.0,
            wind_speed_kmh: 5.0,
            uv_index: None,
        };
        assert_eq!(snap.uv_or_zero(), 0.0);
    }
}
