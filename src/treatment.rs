//! Treatment lookup for a diagnosed condition.
//!
//! Primary path: exact condition name + severity, else the first entry for
//! that name. Secondary path (name unknown): first entry whose originating
//! condition shares a symptom with the input. A miss is not an error.

use std::sync::Arc;

use crate::catalog::{CatalogSet, TreatmentCatalog};
use crate::matching::SymptomNormalizer;
use crate::models::{Severity, TreatmentRecord};

#[derive(Clone)]
pub struct TreatmentResolver {
    treatments: Arc<TreatmentCatalog>,
    conditions: Arc<CatalogSet>,
    normalizer: Arc<dyn SymptomNormalizer>,
}

impl TreatmentResolver {
    pub fn new(
        treatments: Arc<TreatmentCatalog>,
        conditions: Arc<CatalogSet>,
        normalizer: Arc<dyn SymptomNormalizer>,
    ) -> Self {
        Self {
            treatments,
            conditions,
            normalizer,
        }
    }

    pub fn resolve(
        &self,
        condition_name: &str,
        severity: Severity,
        fallback_symptoms: &[String],
    ) -> Option<&TreatmentRecord> {
        let mut by_name = self.treatments.for_condition(condition_name).peekable();
        if let Some(first) = by_name.peek().copied() {
            let exact = by_name.find(|e| e.severity == severity);
            return Some(exact.unwrap_or(first));
        }

        let hit = self.treatments.entries().iter().find(|entry| {
            self.conditions
                .find_by_name(&entry.condition)
                .is_some_and(|c| self.normalizer.overlaps(&c.symptoms, fallback_symptoms))
        });
        if let Some(entry) = hit {
            tracing::debug!(
                requested = condition_name,
                resolved = %entry.condition,
                "Treatment resolved by symptom overlap"
            );
        }
        hit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::SubstringNormalizer;

    fn resolver() -> TreatmentResolver {
        TreatmentResolver::new(
            Arc::new(TreatmentCatalog::builtin()),
            Arc::new(CatalogSet::builtin()),
            Arc::new(SubstringNormalizer),
        )
    }

    #[test]
    fn exact_severity_entry_is_preferred() {
        let resolver = resolver();
        let entry = resolver
            .resolve("Grippe saisonnière", Severity::Severe, &[])
            .unwrap();
        assert_eq!(entry.severity, Severity::Severe);
        assert!(entry.medications.iter().any(|m| m.name == "Oseltamivir"));
    }

    #[test]
    fn missing_severity_falls_back_to_first_entry() {
        let resolver = resolver();
        let entry = resolver
            .resolve("Grippe saisonnière", Severity::Mild, &[])
            .unwrap();
        assert_eq!(entry.severity, Severity::Moderate);
    }

    #[test]
    fn unknown_name_resolves_through_symptoms() {
        let resolver = resolver();
        let entry = resolver
            .resolve(
                "Infection virale des voies aériennes",
                Severity::Moderate,
                &["j'ai des courbatures".to_string()],
            )
            .unwrap();
        assert_eq!(entry.condition, "Grippe saisonnière");
    }

    #[test]
    fn nothing_matches_returns_none() {
        let resolver = resolver();
        assert!(resolver
            .resolve("Inconnue", Severity::Mild, &["xyz".to_string()])
            .is_none());
        assert!(resolver.resolve("Inconnue", Severity::Mild, &[]).is_none());
    }
}
