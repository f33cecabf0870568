use super::{
    cold::ColdRule, heat::HeatRule, humidity::DryAirRule, humidity::MugginessRule,
    precipitation::PrecipitationRule, uv_exposure::UvExposureRule, wind::WindRule, TriggerRule,
};
use crate::logic::summary::build_summary;
use crate::models::{Insight, Recommendation, WeatherSnapshot};

/// Recommendation lines retained after truncation.
pub const MAX_RECOMMENDATIONS: usize = 4;

const FALLBACK_RECOMMENDATION: &str = "Enjoy the pleasant weather conditions";

/// Derives an [`Insight`] from a [`WeatherSnapshot`].
///
/// Pure and total: no I/O, no state, and every numeric input produces a
/// fully-populated result. Rules are held in fixed priority order; all
/// firing rules contribute their lines in that order before the cap.
pub struct InsightEngine {
    rules: Vec<Box<dyn TriggerRule>>,
}

impl InsightEngine {
    pub fn new() -> Self {
        let rules: Vec<Box<dyn TriggerRule>> = vec![
            Box::new(PrecipitationRule),
            Box::new(UvExposureRule),
            Box::new(HeatRule),
            Box::new(ColdRule),
            Box::new(WindRule),
            Box::new(MugginessRule),
            Box::new(DryAirRule),
        ];

        Self { rules }
    }

    /// Map a snapshot to its insight: summary prose plus 1..=4
    /// recommendations.
    pub fn derive(&self, snapshot: &WeatherSnapshot) -> Insight {
        Insight {
            summary: build_summary(snapshot),
            recommendations: self.evaluate(snapshot),
        }
    }

    /// Evaluate every rule against the snapshot and collect the firing
    /// rules' lines in priority order, truncated to the cap. Never empty:
    /// a quiet snapshot yields the single fallback entry.
    pub fn evaluate(&self, snapshot: &WeatherSnapshot) -> Vec<Recommendation> {
        let recommendations: Vec<Recommendation> = self
            .rules
            .iter()
            .filter_map(|rule| rule.evaluate(snapshot))
            .flatten()
            .take(MAX_RECOMMENDATIONS)
            .map(Recommendation::new)
            .collect();

        if recommendations.is_empty() {
            return vec![Recommendation::new(FALLBACK_RECOMMENDATION)];
        }

        recommendations
    }

    pub fn evaluate_rule(
        &self,
        rule_id: &str,
        snapshot: &WeatherSnapshot,
    ) -> Option<[&'static str; 2]> {
        self.rules
            .iter()
            .find(|r| r.id() == rule_id)
            .and_then(|rule| rule.evaluate(snapshot))
    }

    pub fn list_rules(&self) -> Vec<(&'static str, &'static str)> {
        self.rules.iter().map(|r| (r.id(), r.name())).collect()
    }
}

impl Default for InsightEngine {
    fn default() -> Self {
        Self::new()
    }
}
