//! Built-in knowledge tables.
//!
//! Condition catalogs are queried in a fixed preference order, each with
//! its own acceptance threshold. The primary catalog is canonical: a later
//! catalog never re-defines a condition an earlier one already names.

pub mod clinical;
pub mod doctors;
pub mod reference;
pub mod treatments;

pub use doctors::{DoctorDirectory, DoctorProfile};
pub use treatments::TreatmentCatalog;

use std::collections::HashSet;

use crate::models::{ConditionRecord, Severity, Urgency};

/// Acceptance threshold (percent) for the primary clinical catalog.
pub const CLINICAL_THRESHOLD: f64 = 40.0;
/// Acceptance threshold (percent) for the reference fallback catalog.
pub const REFERENCE_THRESHOLD: f64 = 50.0;

/// One ordered table of conditions with its own acceptance threshold.
#[derive(Debug, Clone)]
pub struct ConditionCatalog {
    name: String,
    threshold: f64,
    records: Vec<ConditionRecord>,
}

impl ConditionCatalog {
    pub fn new(name: impl Into<String>, threshold: f64, records: Vec<ConditionRecord>) -> Self {
        Self {
            name: name.into(),
            threshold,
            records,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Minimum score (0-100, inclusive) a best match must reach.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn records(&self) -> &[ConditionRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Catalogs in preference order.
#[derive(Debug, Clone)]
pub struct CatalogSet {
    catalogs: Vec<ConditionCatalog>,
}

impl CatalogSet {
    /// Build a set from catalogs in preference order.
    ///
    /// Records whose name (case-insensitive) already appears in an earlier
    /// catalog are dropped, so each condition has a single canonical entry.
    pub fn new(catalogs: Vec<ConditionCatalog>) -> Self {
        let mut seen: HashSet<String> = HashSet::new();
        let catalogs = catalogs
            .into_iter()
            .map(|mut catalog| {
                catalog.records.retain(|record| {
                    let key = record.name.to_lowercase();
                    if seen.contains(&key) {
                        tracing::debug!(
                            catalog = %catalog.name,
                            condition = %record.name,
                            "Dropping condition already defined by an earlier catalog"
                        );
                        return false;
                    }
                    true
                });
                seen.extend(catalog.records.iter().map(|r| r.name.to_lowercase()));
                catalog
            })
            .collect();
        Self { catalogs }
    }

    /// Clinical catalog first (40%), reference catalog second (50%).
    pub fn builtin() -> Self {
        Self::new(vec![
            ConditionCatalog::new("clinical", CLINICAL_THRESHOLD, clinical::conditions()),
            ConditionCatalog::new("reference", REFERENCE_THRESHOLD, reference::conditions()),
        ])
    }

    pub fn catalogs(&self) -> &[ConditionCatalog] {
        &self.catalogs
    }

    /// All records across catalogs, in preference order.
    pub fn records(&self) -> impl Iterator<Item = &ConditionRecord> {
        self.catalogs.iter().flat_map(|c| c.records.iter())
    }

    /// Case-insensitive lookup by condition name.
    pub fn find_by_name(&self, name: &str) -> Option<&ConditionRecord> {
        let wanted = name.trim().to_lowercase();
        self.records().find(|r| r.name.to_lowercase() == wanted)
    }
}

// ── Construction helpers for the static tables ──────────────

pub(crate) fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub(crate) struct ConditionSpec<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub category: &'a str,
    pub subcategory: &'a str,
    pub symptoms: &'a [&'a str],
    pub severity: Severity,
    pub urgency: Urgency,
    pub description: &'a str,
    pub recommendations: &'a [&'a str],
    pub differential: &'a [&'a str],
    pub next_steps: &'a [&'a str],
    pub probability: u8,
}

impl ConditionSpec<'_> {
    pub fn build(&self) -> ConditionRecord {
        ConditionRecord {
            id: self.id.to_string(),
            name: self.name.to_string(),
            category: self.category.to_string(),
            subcategory: self.subcategory.to_string(),
            symptoms: strings(self.symptoms),
            severity: self.severity,
            urgency: self.urgency,
            description: self.description.to_string(),
            recommendations: strings(self.recommendations),
            differential_diagnosis: strings(self.differential),
            next_steps: strings(self.next_steps),
            probability: self.probability.min(100),
        }
    }
}

#[cfg(test)]
pub(crate) fn test_condition(name: &str, symptoms: &[&str], urgency: Urgency) -> ConditionRecord {
    ConditionSpec {
        id: &name.to_lowercase().replace(' ', "-"),
        name,
        category: "test",
        subcategory: "test",
        symptoms,
        severity: Severity::Moderate,
        urgency,
        description: "test condition",
        recommendations: &["Rest"],
        differential: &[],
        next_steps: &[],
        probability: 60,
    }
    .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_orders_clinical_before_reference() {
        let set = CatalogSet::builtin();
        let names: Vec<&str> = set.catalogs().iter().map(|c| c.name()).collect();
        assert_eq!(names, vec!["clinical", "reference"]);
        assert_eq!(set.catalogs()[0].threshold(), 40.0);
        assert_eq!(set.catalogs()[1].threshold(), 50.0);
    }

    #[test]
    fn later_catalog_duplicates_are_dropped() {
        let set = CatalogSet::new(vec![
            ConditionCatalog::new(
                "a",
                40.0,
                vec![test_condition("Migraine", &["headache"], Urgency::Low)],
            ),
            ConditionCatalog::new(
                "b",
                50.0,
                vec![
                    test_condition("migraine", &["aura"], Urgency::High),
                    test_condition("Eczema", &["itch"], Urgency::Low),
                ],
            ),
        ]);
        assert_eq!(set.catalogs()[1].len(), 1);
        assert_eq!(set.catalogs()[1].records()[0].name, "Eczema");
        assert_eq!(set.find_by_name("MIGRAINE").unwrap().symptoms, vec!["headache"]);
    }

    #[test]
    fn builtin_has_no_duplicate_names() {
        let set = CatalogSet::builtin();
        let mut names: Vec<String> = set.records().map(|r| r.name.to_lowercase()).collect();
        let total = names.len();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), total);
    }

    #[test]
    fn builtin_records_are_well_formed() {
        for record in CatalogSet::builtin().records() {
            assert!(!record.symptoms.is_empty(), "{} has no symptoms", record.name);
            assert!(!record.recommendations.is_empty(), "{} has no advice", record.name);
            assert!(record.probability <= 100);
        }
    }
}
