use super::TriggerRule;
use crate::models::WeatherSnapshot;

/// UV exposure rule - sun protection advice
///
/// Conditions:
/// - UV index above 6 (missing index counts as 0 and never fires)
pub struct UvExposureRule;

impl TriggerRule for UvExposureRule {
    fn id(&self) -> &'static str {
        "uv_exposure"
    }

    fn name(&self) -> &'static str {
        "UV Exposure"
    }

    fn evaluate(&self, snapshot: &WeatherSnapshot) -> Option<[&'static str; 2]> {
        if snapshot.uv_or_zero() <= 6.0 {
            return None;
        }

        Some(["Apply sunscreen (SPF 30+)", "Wear sunglasses and a hat"])
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_snapshot;
    use super::*;

    #[test]
    fn threshold_is_exclusive() {
        let mut snap = test_snapshot();
        snap.uv_index = Some(6.0);
        assert!(UvExposureRule.evaluate(&snap).is_none());

        snap.uv_index = Some(6.1);
        assert!(UvExposureRule.evaluate(&snap).is_some());
    }

    #[test]
    fn missing_index_never_fires() {
        let mut snap = test_snapshot();
        snap.uv_index = None;
        assert!(UvExposureRule.evaluate(&snap).is_none());
    }
}
