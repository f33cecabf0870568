use super::TriggerRule;
use crate::models::WeatherSnapshot;

/// Cold rule - layering advice for cold weather
///
/// Conditions:
/// - temperature below 5°C
pub struct ColdRule;

impl TriggerRule for ColdRule {
    fn id(&self) -> &'static str {
        "cold"
    }

    fn name(&self) -> &'static str {
        "Cold"
    }

    fn evaluate(&self, snapshot: &WeatherSnapshot) -> Option<[&'static str; 2]> {
        if snapshot.temperature_c >= 5.0 {
            return None;
        }

        Some([
            "Dress in warm layers",
            "Cover exposed skin to prevent frostbite",
        ])
    }
}
