use super::TriggerRule;
use crate::models::WeatherSnapshot;

/// Wind rule - advice for blustery conditions
///
/// Conditions:
/// - wind speed above 20 km/h
pub struct WindRule;

impl TriggerRule for WindRule {
    fn id(&self) -> &'static str {
        "wind"
    }

    fn name(&self) -> &'static str {
        "Wind"
    }

    fn evaluate(&self, snapshot: &WeatherSnapshot) -> Option<[&'static str; 2]> {
        if snapshot.wind_speed_kmh <= 20.0 {
            return None;
        }

        Some(["Secure loose items outdoors", "Be cautious when driving"])
    }
}
