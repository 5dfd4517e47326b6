use std::sync::Arc;

use crate::catalog::{CatalogSet, ConditionCatalog};
use crate::matching::SymptomNormalizer;
use crate::models::ConditionRecord;

/// Best accepted match and where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchOutcome<'a> {
    pub condition: &'a ConditionRecord,
    /// Percentage of the condition's symptoms found in the input, 0-100.
    pub score: f64,
    pub catalog: &'a str,
}

/// Scores input symptoms against each catalog in preference order.
///
/// Within a catalog the first record reaching the maximum score wins, so
/// ties resolve by catalog order. A catalog's best record is accepted only
/// when its score reaches that catalog's threshold; otherwise the next
/// catalog is tried.
#[derive(Clone)]
pub struct SymptomMatcher {
    catalogs: Arc<CatalogSet>,
    normalizer: Arc<dyn SymptomNormalizer>,
}

impl SymptomMatcher {
    pub fn new(catalogs: Arc<CatalogSet>, normalizer: Arc<dyn SymptomNormalizer>) -> Self {
        Self {
            catalogs,
            normalizer,
        }
    }

    pub fn catalogs(&self) -> &CatalogSet {
        &self.catalogs
    }

    /// Score one condition against already-normalized inputs.
    pub fn score(&self, condition: &ConditionRecord, inputs: &[String]) -> f64 {
        if condition.symptoms.is_empty() || inputs.is_empty() {
            return 0.0;
        }
        let matched = condition
            .symptoms
            .iter()
            .filter_map(|label| self.normalizer.normalize(label))
            .filter(|label| inputs.iter().any(|input| self.normalizer.matches(label, input)))
            .count();
        matched as f64 / condition.symptoms.len() as f64 * 100.0
    }

    /// Highest-scoring record of one catalog, ignoring its threshold.
    pub fn best_in<'a>(
        &self,
        catalog: &'a ConditionCatalog,
        inputs: &[String],
    ) -> Option<(&'a ConditionRecord, f64)> {
        let mut best: Option<(&ConditionRecord, f64)> = None;
        for record in catalog.records() {
            let score = self.score(record, inputs);
            if best.map_or(true, |(_, top)| score > top) {
                best = Some((record, score));
            }
        }
        best
    }

    /// Best accepted match across catalogs, or `None`.
    pub fn best_match(&self, raw_inputs: &[String]) -> Option<MatchOutcome<'_>> {
        let inputs = self.normalizer.normalize_all(raw_inputs);
        if inputs.is_empty() {
            return None;
        }

        for catalog in self.catalogs.catalogs() {
            let Some((condition, score)) = self.best_in(catalog, &inputs) else {
                continue;
            };
            if score >= catalog.threshold() {
                tracing::debug!(
                    catalog = catalog.name(),
                    condition = %condition.name,
                    score,
                    "Symptom match accepted"
                );
                return Some(MatchOutcome {
                    condition,
                    score,
                    catalog: catalog.name(),
                });
            }
            tracing::debug!(
                catalog = catalog.name(),
                best = %condition.name,
                score,
                threshold = catalog.threshold(),
                "Best candidate below threshold"
            );
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::test_condition;
    use crate::matching::SubstringNormalizer;
    use crate::models::Urgency;

    fn matcher_with(catalogs: Vec<ConditionCatalog>) -> SymptomMatcher {
        SymptomMatcher::new(
            Arc::new(CatalogSet::new(catalogs)),
            Arc::new(SubstringNormalizer),
        )
    }

    fn inputs(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn five_symptom_catalog(threshold: f64) -> ConditionCatalog {
        ConditionCatalog::new(
            "primary",
            threshold,
            vec![test_condition(
                "Flu",
                &["fever", "headache", "cough", "fatigue", "body aches"],
                Urgency::Medium,
            )],
        )
    }

    #[test]
    fn empty_input_never_matches() {
        let matcher = matcher_with(vec![five_symptom_catalog(40.0)]);
        assert!(matcher.best_match(&[]).is_none());
        assert!(matcher.best_match(&inputs(&["", "   "])).is_none());
    }

    #[test]
    fn full_symptom_list_scores_100() {
        let matcher = matcher_with(vec![five_symptom_catalog(40.0)]);
        let outcome = matcher
            .best_match(&inputs(&["fever", "headache", "cough", "fatigue", "body aches"]))
            .unwrap();
        assert_eq!(outcome.condition.name, "Flu");
        assert_eq!(outcome.score, 100.0);
        assert_eq!(outcome.catalog, "primary");
    }

    #[test]
    fn exact_threshold_is_accepted() {
        let matcher = matcher_with(vec![five_symptom_catalog(40.0)]);
        let outcome = matcher.best_match(&inputs(&["fever", "headache"])).unwrap();
        assert_eq!(outcome.score, 40.0);
    }

    #[test]
    fn below_threshold_is_rejected() {
        let matcher = matcher_with(vec![five_symptom_catalog(40.0)]);
        assert!(matcher.best_match(&inputs(&["fever"])).is_none());
    }

    #[test]
    fn substring_match_works_both_ways() {
        let matcher = matcher_with(vec![five_symptom_catalog(40.0)]);
        let outcome = matcher
            .best_match(&inputs(&["severe headache today", "aches"]))
            .unwrap();
        assert_eq!(outcome.score, 40.0);
    }

    #[test]
    fn tie_resolves_to_first_in_catalog_order() {
        let matcher = matcher_with(vec![ConditionCatalog::new(
            "primary",
            40.0,
            vec![
                test_condition("First", &["fever", "rash"], Urgency::Low),
                test_condition("Second", &["fever", "cough"], Urgency::Low),
            ],
        )]);
        let outcome = matcher.best_match(&inputs(&["fever"])).unwrap();
        assert_eq!(outcome.score, 50.0);
        assert_eq!(outcome.condition.name, "First");
    }

    #[test]
    fn fallback_catalog_uses_its_own_threshold() {
        let matcher = matcher_with(vec![
            five_symptom_catalog(40.0),
            ConditionCatalog::new(
                "fallback",
                50.0,
                vec![
                    test_condition("Eczema", &["itch", "dry skin"], Urgency::Low),
                    test_condition("Hives", &["itch", "welts", "swelling"], Urgency::Low),
                ],
            ),
        ]);

        let outcome = matcher.best_match(&inputs(&["itch"])).unwrap();
        assert_eq!(outcome.catalog, "fallback");
        assert_eq!(outcome.condition.name, "Eczema");

        // 1 of 3 = 33% misses the fallback's 50% bar.
        let matcher = matcher_with(vec![ConditionCatalog::new(
            "fallback",
            50.0,
            vec![test_condition("Hives", &["itch", "welts", "swelling"], Urgency::Low)],
        )]);
        assert!(matcher.best_match(&inputs(&["itch"])).is_none());
    }

    #[test]
    fn primary_catalog_wins_when_both_accept() {
        let matcher = matcher_with(vec![
            five_symptom_catalog(40.0),
            ConditionCatalog::new(
                "fallback",
                50.0,
                vec![test_condition("Cold", &["fever", "headache"], Urgency::Low)],
            ),
        ]);
        let outcome = matcher.best_match(&inputs(&["fever", "headache"])).unwrap();
        assert_eq!(outcome.condition.name, "Flu");
    }

    #[test]
    fn adding_a_condition_symptom_never_lowers_its_score() {
        let matcher = matcher_with(vec![five_symptom_catalog(40.0)]);
        let flu = &matcher.catalogs().catalogs()[0].records()[0];
        let mut current: Vec<String> = vec!["nausea".into()];
        let mut last = matcher.score(flu, &current);
        for symptom in &flu.symptoms {
            current.push(symptom.clone());
            let next = matcher.score(flu, &current);
            assert!(next >= last, "{next} < {last} after adding {symptom}");
            last = next;
        }
        assert_eq!(last, 100.0);
    }

    #[test]
    fn builtin_catalog_matches_french_fever_and_headache() {
        let matcher = SymptomMatcher::new(
            Arc::new(CatalogSet::builtin()),
            Arc::new(SubstringNormalizer),
        );
        let outcome = matcher
            .best_match(&inputs(&["J'ai de la fièvre et des maux de tête"]))
            .unwrap();
        assert_eq!(outcome.condition.name, "Grippe saisonnière");
        assert_eq!(outcome.catalog, "clinical");
    }
}
