use std::sync::Arc;

use crate::matching::SymptomNormalizer;
use crate::models::{ConditionRecord, Urgency};

use super::keywords::{KeywordLevel, UrgencyContext, UrgencyKeywordTable};

/// Escalation-only urgency post-processing for diagnoses.
///
/// The result is never below the baseline: a critical keyword forces
/// `Critical`, a high keyword lifts to at least `High`, anything else
/// keeps the baseline.
#[derive(Clone)]
pub struct UrgencyClassifier {
    table: Arc<UrgencyKeywordTable>,
    normalizer: Arc<dyn SymptomNormalizer>,
}

impl UrgencyClassifier {
    pub fn new(table: Arc<UrgencyKeywordTable>, normalizer: Arc<dyn SymptomNormalizer>) -> Self {
        Self { table, normalizer }
    }

    /// Urgency for a matched condition given the raw input symptoms.
    pub fn classify(&self, inputs: &[String], condition: &ConditionRecord) -> Urgency {
        self.escalate(inputs, condition.urgency)
    }

    /// Apply keyword escalation to an arbitrary baseline.
    pub fn escalate(&self, inputs: &[String], baseline: Urgency) -> Urgency {
        let normalized = self.normalizer.normalize_all(inputs);
        let floor = match self.table.scan(UrgencyContext::Diagnosis, &normalized) {
            Some(KeywordLevel::Critical) => Urgency::Critical,
            Some(KeywordLevel::Elevated) => Urgency::High,
            None => return baseline,
        };
        let urgency = baseline.max(floor);
        if urgency != baseline {
            tracing::debug!(%baseline, %urgency, "Urgency escalated by keyword");
        }
        urgency
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::test_condition;
    use crate::matching::SubstringNormalizer;

    fn classifier() -> UrgencyClassifier {
        UrgencyClassifier::new(
            Arc::new(UrgencyKeywordTable::builtin()),
            Arc::new(SubstringNormalizer),
        )
    }

    fn inputs(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn critical_keyword_overrides_low_baseline() {
        let condition = test_condition("Reflux", &["brûlures"], Urgency::Low);
        let urgency = classifier().classify(&inputs(&["Douleur thoracique"]), &condition);
        assert_eq!(urgency, Urgency::Critical);
    }

    #[test]
    fn high_keyword_lifts_medium_to_high() {
        let condition = test_condition("Grippe", &["fièvre"], Urgency::Medium);
        let urgency = classifier().classify(&inputs(&["forte fièvre", "toux"]), &condition);
        assert_eq!(urgency, Urgency::High);
    }

    #[test]
    fn high_keyword_keeps_critical_baseline() {
        let condition = test_condition("SCA", &["douleur"], Urgency::Critical);
        let urgency = classifier().classify(&inputs(&["confusion"]), &condition);
        assert_eq!(urgency, Urgency::Critical);
    }

    #[test]
    fn no_keyword_keeps_baseline() {
        let condition = test_condition("Rhume", &["toux"], Urgency::Low);
        assert_eq!(classifier().classify(&inputs(&["toux"]), &condition), Urgency::Low);
    }

    #[test]
    fn never_lowers_any_baseline() {
        let samples = [
            inputs(&[]),
            inputs(&["toux"]),
            inputs(&["vision floue"]),
            inputs(&["chest pain"]),
        ];
        for baseline in [Urgency::Low, Urgency::Medium, Urgency::High, Urgency::Critical] {
            for sample in &samples {
                assert!(classifier().escalate(sample, baseline) >= baseline);
            }
        }
    }
}
