use super::TriggerRule;
use crate::models::WeatherSnapshot;

/// Heat rule - hydration and clothing advice for warm weather
///
/// Conditions:
/// - temperature above 25°C
pub struct HeatRule;

impl TriggerRule for HeatRule {
    fn id(&self) -> &'static str {
        "heat"
    }

    fn name(&self) -> &'static str {
        "Heat"
    }

    fn evaluate(&self, snapshot: &WeatherSnapshot) -> Option<[&'static str; 2]> {
        if snapshot.temperature_c <= 25.0 {
            return None;
        }

        Some([
            "Stay hydrated - drink plenty of water",
            "Wear light, breathable clothing",
        ])
    }
}
