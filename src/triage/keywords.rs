use serde::Serialize;

/// Where a scan happens. The two contexts keep separate keyword lists:
/// formal symptom lists use clinical phrasing, chat messages use
/// conversational phrasing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UrgencyContext {
    Diagnosis,
    Conversation,
}

/// Strength of a keyword hit. `Critical` outranks `Elevated`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum KeywordLevel {
    Elevated,
    Critical,
}

const DIAGNOSIS_CRITICAL: &[&str] = &[
    // French
    "douleur thoracique",
    "douleur à la poitrine",
    "difficulté à respirer",
    "difficulté respiratoire",
    "essoufflement sévère",
    "perte de connaissance",
    "perte de conscience",
    "évanouissement",
    "saignement abondant",
    "hémorragie",
    "paralysie",
    "convulsions",
    "idées suicidaires",
    // English
    "chest pain",
    "severe shortness of breath",
    "loss of consciousness",
    "major bleeding",
];

const DIAGNOSIS_HIGH: &[&str] = &[
    // French
    "fièvre élevée",
    "forte fièvre",
    "douleur abdominale intense",
    "douleur abdominale sévère",
    "confusion",
    "vision floue",
    "vomissements persistants",
    "raideur de la nuque",
    "sang dans les selles",
    // English
    "high fever",
    "severe abdominal pain",
    "blurred vision",
];

const CONVERSATION_CRITICAL: &[&str] = &[
    "douleur thoracique",
    "douleur à la poitrine",
    "mal à la poitrine",
    "je n'arrive pas à respirer",
    "difficulté à respirer",
    "perte de connaissance",
    "évanoui",
    "suicide",
    "saigne beaucoup",
    "chest pain",
    "can't breathe",
];

const CONVERSATION_ELEVATED: &[&str] = &[
    "fièvre",
    "très mal",
    "intense",
    "insupportable",
    "sévère",
    "depuis plusieurs jours",
    "fever",
    "severe",
    "unbearable",
];

/// Single home for every urgency keyword list.
#[derive(Debug, Clone)]
pub struct UrgencyKeywordTable {
    diagnosis_critical: Vec<String>,
    diagnosis_high: Vec<String>,
    conversation_critical: Vec<String>,
    conversation_elevated: Vec<String>,
}

impl UrgencyKeywordTable {
    pub fn builtin() -> Self {
        let own = |list: &[&str]| list.iter().map(|k| k.to_lowercase()).collect();
        Self {
            diagnosis_critical: own(DIAGNOSIS_CRITICAL),
            diagnosis_high: own(DIAGNOSIS_HIGH),
            conversation_critical: own(CONVERSATION_CRITICAL),
            conversation_elevated: own(CONVERSATION_ELEVATED),
        }
    }

    pub fn keywords(&self, context: UrgencyContext, level: KeywordLevel) -> &[String] {
        match (context, level) {
            (UrgencyContext::Diagnosis, KeywordLevel::Critical) => &self.diagnosis_critical,
            (UrgencyContext::Diagnosis, KeywordLevel::Elevated) => &self.diagnosis_high,
            (UrgencyContext::Conversation, KeywordLevel::Critical) => &self.conversation_critical,
            (UrgencyContext::Conversation, KeywordLevel::Elevated) => &self.conversation_elevated,
        }
    }

    /// Highest level whose keywords appear in any of the (lower-cased) texts.
    pub fn scan<S: AsRef<str>>(
        &self,
        context: UrgencyContext,
        texts: &[S],
    ) -> Option<KeywordLevel> {
        [KeywordLevel::Critical, KeywordLevel::Elevated]
            .into_iter()
            .find(|level| {
                let keywords = self.keywords(context, *level);
                texts.iter().any(|text| {
                    let text = text.as_ref();
                    keywords.iter().any(|k| text.contains(k.as_str()))
                })
            })
    }
}

impl Default for UrgencyKeywordTable {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn critical_wins_over_elevated() {
        let table = UrgencyKeywordTable::builtin();
        let hit = table.scan(
            UrgencyContext::Diagnosis,
            &["forte fièvre", "douleur thoracique depuis ce matin"],
        );
        assert_eq!(hit, Some(KeywordLevel::Critical));
    }

    #[test]
    fn contexts_use_separate_lists() {
        let table = UrgencyKeywordTable::builtin();
        // Plain "fièvre" is conversational triage material only.
        assert_eq!(table.scan(UrgencyContext::Diagnosis, &["fièvre"]), None);
        assert_eq!(
            table.scan(UrgencyContext::Conversation, &["j'ai de la fièvre"]),
            Some(KeywordLevel::Elevated)
        );
    }

    #[test]
    fn no_hit_returns_none() {
        let table = UrgencyKeywordTable::builtin();
        assert_eq!(table.scan(UrgencyContext::Diagnosis, &["nez qui coule"]), None);
        assert_eq!(table.scan::<&str>(UrgencyContext::Conversation, &[]), None);
    }
}
