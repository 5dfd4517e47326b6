use serde::Deserialize;

use super::{LlmDiagnosis, ProviderError};
use crate::models::{clamp_probability, generic_recommendations, Severity, Urgency};

/// Probability used when the model omits one.
const DEFAULT_PROBABILITY: u8 = 50;
const DEFAULT_CATEGORY: &str = "général";

/// Parse a provider's text answer into an `LlmDiagnosis`.
///
/// Accepts bare JSON, fenced JSON, or JSON surrounded by prose.
pub fn parse_diagnosis_response(response: &str) -> Result<LlmDiagnosis, ProviderError> {
    let json_str = extract_json_object(response)?;

    #[derive(Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct RawDiagnosis {
        #[serde(alias = "diagnosis", alias = "name")]
        condition: Option<String>,
        probability: Option<serde_json::Value>,
        description: Option<String>,
        recommendations: Option<Vec<serde_json::Value>>,
        urgency: Option<String>,
        severity: Option<String>,
        #[serde(alias = "differential_diagnosis")]
        differential_diagnosis: Option<Vec<serde_json::Value>>,
        #[serde(alias = "next_steps")]
        next_steps: Option<Vec<serde_json::Value>>,
        category: Option<String>,
    }

    let raw: RawDiagnosis =
        serde_json::from_str(json_str).map_err(|e| ProviderError::JsonParsing(e.to_string()))?;

    let condition = raw
        .condition
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .ok_or_else(|| ProviderError::MalformedResponse("Missing condition name".into()))?;

    let mut recommendations = strings_lenient(raw.recommendations.as_deref());
    if recommendations.is_empty() {
        recommendations = generic_recommendations();
    }

    Ok(LlmDiagnosis {
        condition,
        probability: raw
            .probability
            .as_ref()
            .and_then(probability_from_value)
            .unwrap_or(DEFAULT_PROBABILITY),
        description: raw.description.unwrap_or_default().trim().to_string(),
        recommendations,
        urgency: raw
            .urgency
            .as_deref()
            .map(Urgency::parse_lenient)
            .unwrap_or(Urgency::Medium),
        severity: raw
            .severity
            .as_deref()
            .map(Severity::parse_lenient)
            .unwrap_or(Severity::Moderate),
        differential_diagnosis: strings_lenient(raw.differential_diagnosis.as_deref()),
        next_steps: strings_lenient(raw.next_steps.as_deref()),
        category: raw
            .category
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
    })
}

/// Strip Markdown fences, then take the outermost `{...}`.
fn extract_json_object(response: &str) -> Result<&str, ProviderError> {
    let mut body = response.trim();
    if let Some(fence) = body.find("```") {
        let after = &body[fence + 3..];
        // Skip an optional language tag on the fence line.
        let content_start = after.find('\n').map(|i| i + 1).unwrap_or(0);
        let content = &after[content_start..];
        body = match content.find("```") {
            Some(end) => &content[..end],
            None => content,
        };
    }

    let start = body
        .find('{')
        .ok_or_else(|| ProviderError::MalformedResponse("No JSON object found".into()))?;
    let end = body
        .rfind('}')
        .filter(|end| *end > start)
        .ok_or_else(|| ProviderError::MalformedResponse("Unclosed JSON object".into()))?;
    Ok(&body[start..=end])
}

/// Numbers, numeric strings and "75%" all count.
///
/// Values in (0, 1] written as decimals are fractions ("0.8", `1.0`); a bare
/// integer `1` stays 1%.
fn probability_from_value(value: &serde_json::Value) -> Option<u8> {
    let (number, decimal) = match value {
        serde_json::Value::Number(n) => (n.as_f64()?, n.is_f64()),
        serde_json::Value::String(s) => {
            let text = s.trim().trim_end_matches('%').trim();
            (text.parse::<f64>().ok()?, text.contains('.'))
        }
        _ => return None,
    };
    let fraction = number > 0.0 && (number < 1.0 || (number == 1.0 && decimal));
    let percent = if fraction { number * 100.0 } else { number };
    Some(clamp_probability(percent.round() as i64))
}

/// Keep string items, skip anything else.
fn strings_lenient(items: Option<&[serde_json::Value]>) -> Vec<String> {
    match items {
        None => vec![],
        Some(arr) => arr
            .iter()
            .filter_map(|v| v.as_str())
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
    }
}
