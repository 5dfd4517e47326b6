use serde::{Deserialize, Serialize};

use super::enums::{MedicationCategory, Severity};

/// A single medication or remedy. Dosage fields are display strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicationRecord {
    pub name: String,
    pub dosage: String,
    pub frequency: String,
    pub duration: String,
    pub contraindications: Vec<String>,
    pub side_effects: Vec<String>,
    pub category: MedicationCategory,
}

/// Treatment advice for one condition at one severity band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreatmentRecord {
    /// Condition name this entry is keyed on (not the condition id).
    pub condition: String,
    pub severity: Severity,
    pub medications: Vec<MedicationRecord>,
    pub natural_remedies: Vec<String>,
    pub lifestyle_changes: Vec<String>,
    pub emergency_actions: Vec<String>,
    pub consultation_advice: String,
    pub follow_up_instructions: String,
}
