use super::TriggerRule;
use crate::models::WeatherSnapshot;

/// Mugginess rule - advice for humid conditions
///
/// Conditions:
/// - relative humidity above 80%
pub struct MugginessRule;

impl TriggerRule for MugginessRule {
    fn id(&self) -> &'static str {
        "mugginess"
    }

    fn name(&self) -> &'static str {
        "Mugginess"
    }

    fn evaluate(&self, snapshot: &WeatherSnapshot) -> Option<[&'static str; 2]> {
        if snapshot.humidity_pct <= 80.0 {
            return None;
        }

        Some(["Expect muggy conditions", "Choose moisture-wicking fabrics"])
    }
}

/// Dry air rule - advice for arid conditions
///
/// Conditions:
/// - relative humidity below 30%
pub struct DryAirRule;

impl TriggerRule for DryAirRule {
    fn id(&self) -> &'static str {
        "dry_air"
    }

    fn name(&self) -> &'static str {
        "Dry Air"
    }

    fn evaluate(&self, snapshot: &WeatherSnapshot) -> Option<[&'static str; 2]> {
        if snapshot.humidity_pct >= 30.0 {
            return None;
        }

        Some([
            "Use moisturizer for dry skin",
            "Stay hydrated to combat dry air",
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_snapshot;
    use super::*;

    #[test]
    fn humidity_rules_are_mutually_exclusive() {
        // Both rules can never fire for the same snapshot.
        for humidity in [0.0, 29.9, 30.0, 50.0, 80.0, 80.1, 100.0] {
            let mut snap = test_snapshot();
            snap.humidity_pct = humidity;
            let both = MugginessRule.evaluate(&snap).is_some()
                && DryAirRule.evaluate(&snap).is_some();
            assert!(!both, "both humidity rules fired at {humidity}%");
        }
    }

    #[test]
    fn thresholds_are_exclusive() {
        let mut snap = test_snapshot();
        snap.humidity_pct = 80.0;
        assert!(MugginessRule.evaluate(&snap).is_none());
        snap.humidity_pct = 30.0;
        assert!(DryAirRule.evaluate(&snap).is_none());
    }
}
