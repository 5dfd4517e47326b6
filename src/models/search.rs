use serde::{Deserialize, Serialize};

/// What kind of catalog record a search hit points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchHitKind {
    Condition,
    Medication,
}

/// One `/medical-search` hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHit {
    pub id: String,
    pub title: String,
    pub kind: SearchHitKind,
    pub summary: String,
    /// Share of query terms found, 0-100.
    pub relevance: u8,
    /// Only filled for full searches.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<String>,
}
