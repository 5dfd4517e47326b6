//! Keyword search over the built-in condition and treatment tables.

use std::sync::Arc;

use crate::catalog::{CatalogSet, TreatmentCatalog};
use crate::chat::SearchEngine;
use crate::models::{ConditionRecord, SearchHit, SearchHitKind, SearchType};

/// Result caps per search mode.
pub const QUICK_LIMIT: usize = 5;
pub const FULL_LIMIT: usize = 20;

/// Terms shorter than this are ignored.
const MIN_TERM_CHARS: usize = 3;

/// Split a query into lower-cased search terms.
/// Punctuation is dropped; apostrophes and hyphens split words.
pub fn query_terms(query: &str) -> Vec<String> {
    let cleaned: String = query
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();

    let mut terms: Vec<String> = Vec::new();
    for word in cleaned.split_whitespace() {
        if word.chars().count() >= MIN_TERM_CHARS && !terms.iter().any(|t| t == word) {
            terms.push(word.to_string());
        }
    }
    terms
}

/// Percentage of `terms` contained in `haystack` (already lower-cased).
fn relevance(terms: &[String], haystack: &str) -> u8 {
    if terms.is_empty() {
        return 0;
    }
    let found = terms.iter().filter(|t| haystack.contains(t.as_str())).count();
    (found * 100 / terms.len()) as u8
}

fn condition_text(record: &ConditionRecord) -> String {
    format!(
        "{} {} {} {} {}",
        record.name,
        record.category,
        record.subcategory,
        record.description,
        record.symptoms.join(" ")
    )
    .to_lowercase()
}

/// One medication, merged across every treatment entry that lists it.
struct MedicationIndexEntry<'a> {
    name: &'a str,
    category: String,
    dosage: &'a str,
    frequency: &'a str,
    conditions: Vec<&'a str>,
}

/// Quick/full search across conditions and medications.
#[derive(Debug, Clone)]
pub struct MedicalSearch {
    conditions: Arc<CatalogSet>,
    treatments: Arc<TreatmentCatalog>,
}

impl MedicalSearch {
    pub fn new(conditions: Arc<CatalogSet>, treatments: Arc<TreatmentCatalog>) -> Self {
        Self {
            conditions,
            treatments,
        }
    }

    /// Ranked hits for `query`, highest relevance first.
    ///
    /// Ties keep catalog order, conditions before medications. Quick
    /// searches return summaries only; full searches add details.
    pub fn search(&self, query: &str, search_type: SearchType) -> Vec<SearchHit> {
        let terms = query_terms(query);
        if terms.is_empty() {
            return Vec::new();
        }
        let full = search_type == SearchType::Full;

        let mut hits: Vec<SearchHit> = Vec::new();
        for record in self.conditions.records() {
            let score = relevance(&terms, &condition_text(record));
            if score == 0 {
                continue;
            }
            let details = if full {
                let mut details = vec![format!("Symptômes : {}", record.symptoms.join(", "))];
                details.push(format!("Urgence : {}", record.urgency));
                details.extend(record.recommendations.iter().cloned());
                details
            } else {
                Vec::new()
            };
            hits.push(SearchHit {
                id: record.id.clone(),
                title: record.name.clone(),
                kind: SearchHitKind::Condition,
                summary: record.description.clone(),
                relevance: score,
                details,
            });
        }

        for med in self.medication_index() {
            let haystack = format!(
                "{} {} {}",
                med.name,
                med.category,
                med.conditions.join(" ")
            )
            .to_lowercase();
            let score = relevance(&terms, &haystack);
            if score == 0 {
                continue;
            }
            let details = if full {
                vec![
                    format!("Posologie : {}", med.dosage),
                    format!("Fréquence : {}", med.frequency),
                    format!("Indications : {}", med.conditions.join(", ")),
                ]
            } else {
                Vec::new()
            };
            hits.push(SearchHit {
                id: format!("med-{}", slug(med.name)),
                title: med.name.to_string(),
                kind: SearchHitKind::Medication,
                summary: format!("{} · {}", med.category, med.dosage),
                relevance: score,
                details,
            });
        }

        // Stable sort keeps insertion order for equal relevance.
        hits.sort_by(|a, b| b.relevance.cmp(&a.relevance));
        hits.truncate(match search_type {
            SearchType::Quick => QUICK_LIMIT,
            SearchType::Full => FULL_LIMIT,
        });
        tracing::debug!(query, %search_type, hits = hits.len(), "Medical search");
        hits
    }

    fn medication_index(&self) -> Vec<MedicationIndexEntry<'_>> {
        let mut index: Vec<MedicationIndexEntry<'_>> = Vec::new();
        for entry in self.treatments.entries() {
            for med in &entry.medications {
                let key = med.name.to_lowercase();
                match index.iter_mut().find(|m| m.name.to_lowercase() == key) {
                    Some(existing) => {
                        if !existing.conditions.contains(&entry.condition.as_str()) {
                            existing.conditions.push(&entry.condition);
                        }
                    }
                    None => index.push(MedicationIndexEntry {
                        name: &med.name,
                        category: med.category.to_string(),
                        dosage: &med.dosage,
                        frequency: &med.frequency,
                        conditions: vec![&entry.condition],
                    }),
                }
            }
        }
        index
    }
}

impl SearchEngine for MedicalSearch {
    /// Recommendations of conditions listing `symptom`, in catalog order.
    fn recommendations(&self, symptom: &str, limit: usize) -> Vec<String> {
        let wanted = symptom.trim().to_lowercase();
        if wanted.is_empty() {
            return Vec::new();
        }
        let mut out: Vec<String> = Vec::new();
        let matching = self.conditions.records().filter(|record| {
            record
                .symptoms
                .iter()
                .any(|s| s.to_lowercase().contains(&wanted))
        });
        for record in matching {
            for rec in &record.recommendations {
                if out.len() >= limit {
                    return out;
                }
                if !out.contains(rec) {
                    out.push(rec.clone());
                }
            }
        }
        out
    }
}

fn slug(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '-' })
        .collect::<String>()
        .split('-')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}
