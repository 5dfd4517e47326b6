use std::sync::LazyLock;

use regex::Regex;

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("Invalid whitespace regex"));

/// Turns free text into comparable symptom strings and decides whether a
/// catalog label and a user input refer to the same thing.
///
/// All matching in the crate goes through this trait so the scoring code
/// does not depend on how text is compared.
pub trait SymptomNormalizer: Send + Sync {
    /// Canonical form of one input. `None` for blank input.
    fn normalize(&self, raw: &str) -> Option<String>;

    /// Whether `label` and `input` match. Both are already normalized.
    fn matches(&self, label: &str, input: &str) -> bool;

    /// Normalize a batch, dropping blank entries.
    fn normalize_all(&self, raws: &[String]) -> Vec<String> {
        raws.iter().filter_map(|r| self.normalize(r)).collect()
    }

    /// Whether any label matches any input. Both sides are raw text.
    fn overlaps(&self, labels: &[String], inputs: &[String]) -> bool {
        let inputs = self.normalize_all(inputs);
        labels
            .iter()
            .filter_map(|l| self.normalize(l))
            .any(|label| inputs.iter().any(|input| self.matches(&label, input)))
    }
}

/// Case-insensitive, bidirectional substring containment:
/// "maux de tête" matches "j'ai des maux de tête" and the reverse.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubstringNormalizer;

impl SymptomNormalizer for SubstringNormalizer {
    fn normalize(&self, raw: &str) -> Option<String> {
        let lowered = raw.trim().to_lowercase().replace('\u{2019}', "'");
        if lowered.is_empty() {
            return None;
        }
        Some(WHITESPACE.replace_all(&lowered, " ").into_owned())
    }

    fn matches(&self, label: &str, input: &str) -> bool {
        if label.is_empty() || input.is_empty() {
            return false;
        }
        input.contains(label) || label.contains(input)
    }
}
