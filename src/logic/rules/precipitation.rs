use super::TriggerRule;
use crate::models::WeatherSnapshot;

/// Precipitation rule - advice for rainy conditions
///
/// Conditions:
/// - condition token contains "rain" (case-insensitive)
pub struct PrecipitationRule;

impl TriggerRule for PrecipitationRule {
    fn id(&self) -> &'static str {
        "precipitation"
    }

    fn name(&self) -> &'static str {
        "Precipitation"
    }

    fn evaluate(&self, snapshot: &WeatherSnapshot) -> Option<[&'static str; 2]> {
        if !snapshot.condition_lower().contains("rain") {
            return None;
        }

        Some([
            "Carry an umbrella or raincoat",
            "Allow extra time for travel",
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_snapshot;
    use super::*;

    #[test]
    fn fires_on_rain_substring() {
        let mut snap = test_snapshot();
        snap.condition = "light rain".into();
        assert!(PrecipitationRule.evaluate(&snap).is_some());

        snap.condition = "Rain".into();
        assert!(PrecipitationRule.evaluate(&snap).is_some());
    }

    #[test]
    fn silent_on_other_conditions() {
        let mut snap = test_snapshot();
        snap.condition = "clouds".into();
        assert!(PrecipitationRule.evaluate(&snap).is_none());

        // Drizzle is wet but carries no "rain" substring; the trigger is
        // a token match, not a meteorological judgement.
        snap.condition = "drizzle".into();
        assert!(PrecipitationRule.evaluate(&snap).is_none());
    }
}
