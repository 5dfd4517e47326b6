use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::enums::{AiMode, Severity, Urgency};
use super::treatment::TreatmentRecord;

/// Recommendations used whenever a result would otherwise have none.
pub const GENERIC_RECOMMENDATIONS: [&str; 2] = [
    "Consultez un médecin si les symptômes persistent ou s'aggravent",
    "Reposez-vous et restez bien hydraté",
];

pub fn generic_recommendations() -> Vec<String> {
    GENERIC_RECOMMENDATIONS.iter().map(|s| s.to_string()).collect()
}

/// Incoming diagnosis request, as normalized by the API layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiagnosisRequest {
    pub symptoms: Vec<String>,
    pub doctor_id: Option<String>,
    pub clarification_answers: BTreeMap<String, String>,
}

/// Merged diagnosis returned to the caller and stored in the cache.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosisResult {
    pub condition: String,
    /// Always within 0-100.
    pub probability: u8,
    pub description: String,
    pub symptoms: Vec<String>,
    /// Never empty.
    pub recommendations: Vec<String>,
    pub urgency: Urgency,
    pub timestamp: DateTime<Utc>,
    pub differential_diagnosis: Vec<String>,
    pub next_steps: Vec<String>,
    pub category: String,
    pub severity: Severity,
    pub ai_mode: AiMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doctor_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub treatments: Option<TreatmentRecord>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub from_cache: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// Clamp any integer-ish probability into 0-100.
pub fn clamp_probability(value: i64) -> u8 {
    value.clamp(0, 100) as u8
}
