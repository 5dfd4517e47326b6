use serde::{Deserialize, Serialize};

use super::enums::{Severity, Urgency};

/// One named condition with its canonical symptom labels and advice.
/// Static data: built once at startup, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionRecord {
    pub id: String,
    pub name: String,
    pub category: String,
    pub subcategory: String,
    pub symptoms: Vec<String>,
    pub severity: Severity,
    pub urgency: Urgency,
    pub description: String,
    pub recommendations: Vec<String>,
    pub differential_diagnosis: Vec<String>,
    pub next_steps: Vec<String>,
    /// Baseline probability, 0-100.
    pub probability: u8,
}
