//! Conversational triage: keyword detection over a small symptom
//! vocabulary, mapped to canned replies.
//!
//! Independent of the diagnosis pipeline. Urgency comes from the shared
//! `UrgencyKeywordTable` in its conversation context.

use std::sync::Arc;

use crate::models::{ChatResponse, ChatResponseType, ChatRole, ChatTurn, Urgency};
use crate::triage::{KeywordLevel, UrgencyContext, UrgencyKeywordTable};

pub const MAX_FOLLOW_UP_OPTIONS: usize = 8;
pub const MAX_CANNED_RECOMMENDATIONS: usize = 4;
/// Canned plus search-engine recommendations.
pub const MAX_RECOMMENDATIONS: usize = 6;

/// External source of extra recommendations for a detected symptom.
pub trait SearchEngine: Send + Sync {
    fn recommendations(&self, symptom: &str, limit: usize) -> Vec<String>;
}

// ═══════════════════════════════════════════
// Vocabulary
// ═══════════════════════════════════════════

/// One conversational symptom with its canned reply material.
#[derive(Debug)]
pub struct VocabularyEntry {
    pub label: &'static str,
    triggers: &'static [&'static str],
    explanation: &'static str,
    questions: &'static [&'static str],
    options: &'static [&'static str],
    recommendations: &'static [&'static str],
}

const VOCABULARY: &[VocabularyEntry] = &[
    VocabularyEntry {
        label: "douleur thoracique",
        triggers: &[
            "douleur thoracique",
            "douleur à la poitrine",
            "mal à la poitrine",
            "chest pain",
        ],
        explanation: "Une douleur dans la poitrine peut avoir des causes bénignes, mais elle \
                      doit d'abord faire écarter un problème cardiaque.",
        questions: &["La douleur irradie-t-elle vers le bras, la mâchoire ou le dos ?"],
        options: &["Serrement", "Brûlure", "Irradiation au bras", "Essoufflement", "Sueurs"],
        recommendations: &[
            "Appelez le 15 (ou le 112) immédiatement",
            "Restez au repos, ne conduisez pas",
        ],
    },
    VocabularyEntry {
        label: "fièvre",
        triggers: &["fièvre", "fievre", "température", "frissons", "fever"],
        explanation: "La fièvre est une réaction de défense de l'organisme, le plus souvent \
                      face à une infection virale.",
        questions: &[
            "Quelle est votre température ?",
            "Depuis combien de temps avez-vous de la fièvre ?",
        ],
        options: &[
            "Frissons",
            "Sueurs",
            "Courbatures",
            "Maux de tête",
            "Toux",
            "Mal de gorge",
            "Fatigue",
            "Perte d'appétit",
            "Éruption cutanée",
        ],
        recommendations: &[
            "Buvez régulièrement",
            "Reposez-vous",
            "Surveillez votre température",
            "Paracétamol si la fièvre est mal tolérée",
            "Consultez si elle dépasse 39,5 °C",
        ],
    },
    VocabularyEntry {
        label: "maux de tête",
        triggers: &[
            "maux de tête",
            "mal de tête",
            "mal à la tête",
            "migraine",
            "céphalée",
            "headache",
        ],
        explanation: "Les maux de tête sont fréquents et le plus souvent bénins : fatigue, \
                      stress, déshydratation ou migraine.",
        questions: &["Où se situe la douleur ?", "Est-elle pulsatile ou en serrement ?"],
        options: &[
            "Nausées",
            "Sensibilité à la lumière",
            "Troubles visuels",
            "Raideur de la nuque",
            "Fièvre",
            "Vertiges",
        ],
        recommendations: &[
            "Reposez-vous au calme et dans l'obscurité",
            "Hydratez-vous",
            "Limitez les écrans",
        ],
    },
    VocabularyEntry {
        label: "toux",
        triggers: &["toux", "tousse", "cough"],
        explanation: "La toux est un réflexe de protection des voies respiratoires, souvent \
                      liée à une infection ou une irritation.",
        questions: &["Votre toux est-elle sèche ou grasse ?"],
        options: &["Sèche", "Grasse", "Nocturne", "Essoufflement", "Sifflements", "Fièvre"],
        recommendations: &[
            "Buvez des boissons chaudes",
            "Humidifiez l'air de la chambre",
            "Évitez le tabac",
        ],
    },
    VocabularyEntry {
        label: "mal de gorge",
        triggers: &["mal de gorge", "mal à la gorge", "gorge", "sore throat"],
        explanation: "Le mal de gorge est généralement d'origine virale et guérit en quelques jours.",
        questions: &["Avez-vous du mal à avaler ?"],
        options: &["Difficulté à avaler", "Fièvre", "Ganglions", "Voix enrouée", "Toux"],
        recommendations: &["Buvez tiède", "Miel et citron", "Pastilles adoucissantes"],
    },
    VocabularyEntry {
        label: "douleur abdominale",
        triggers: &["mal au ventre", "douleur abdominale", "mal à l'estomac", "ventre", "stomach"],
        explanation: "Les douleurs abdominales ont de nombreuses causes, digestives le plus souvent.",
        questions: &["Où se situe la douleur dans le ventre ?"],
        options: &[
            "Nausées",
            "Vomissements",
            "Diarrhée",
            "Constipation",
            "Ballonnements",
            "Fièvre",
            "Brûlures",
        ],
        recommendations: &[
            "Mangez léger",
            "Hydratez-vous par petites gorgées",
            "Consultez si la douleur est intense ou persistante",
        ],
    },
    VocabularyEntry {
        label: "nausées",
        triggers: &["nausée", "envie de vomir", "vomi", "nausea"],
        explanation: "Les nausées accompagnent souvent une gastro-entérite, une migraine ou \
                      une intolérance alimentaire.",
        questions: &["Arrivez-vous à garder les liquides ?"],
        options: &["Vomissements", "Diarrhée", "Douleur abdominale", "Vertiges", "Fièvre"],
        recommendations: &["Fractionnez les boissons", "Évitez les aliments gras"],
    },
    VocabularyEntry {
        label: "fatigue",
        triggers: &["fatigue", "fatigué", "épuisé", "tired"],
        explanation: "La fatigue peut venir du sommeil, du stress, d'une infection ou d'une carence.",
        questions: &["Depuis quand êtes-vous fatigué(e) ?"],
        options: &["Troubles du sommeil", "Stress", "Perte de poids", "Essoufflement", "Fièvre"],
        recommendations: &["Régularisez vos horaires de sommeil", "Pratiquez une activité douce"],
    },
    VocabularyEntry {
        label: "anxiété",
        triggers: &["anxiété", "angoisse", "stress", "anxious", "panique"],
        explanation: "L'anxiété est une réaction normale au stress, mais elle peut devenir \
                      envahissante.",
        questions: &["Ces sensations vous gênent-elles au quotidien ?"],
        options: &["Palpitations", "Troubles du sommeil", "Tension musculaire", "Irritabilité"],
        recommendations: &[
            "Exercices de respiration lente",
            "Limitez la caféine",
            "Parlez-en à un proche ou à un professionnel",
        ],
    },
    VocabularyEntry {
        label: "éruption cutanée",
        triggers: &["bouton", "éruption", "plaques", "démangeaison", "rash", "itch"],
        explanation: "Une éruption cutanée peut être allergique, infectieuse ou irritative.",
        questions: &["L'éruption démange-t-elle ?"],
        options: &["Démangeaisons", "Rougeurs", "Cloques", "Fièvre", "Gonflement"],
        recommendations: &["Évitez de gratter", "Utilisez un savon doux"],
    },
];

const EMERGENCY_TEXT: &str = "Ce que vous décrivez peut être une urgence médicale. \
                              Appelez le 15 (SAMU) ou le 112 sans attendre.";

const EMERGENCY_RECOMMENDATIONS: &[&str] = &[
    "Appelez le 15 ou le 112 immédiatement",
    "Ne restez pas seul(e)",
    "Ne prenez pas le volant",
];

const GENERAL_TEXT: &str = "Je peux vous aider à décrire vos symptômes. \
                            Que ressentez-vous en ce moment ?";

const GENERAL_QUESTIONS: &[&str] = &[
    "Quels symptômes ressentez-vous ?",
    "Depuis quand ?",
];

const GENERAL_RECOMMENDATIONS: &[&str] = &[
    "Décrivez vos symptômes avec vos propres mots",
    "En cas de doute, contactez votre médecin traitant",
];

/// Vocabulary entry whose trigger appears earliest in `text`.
/// `text` must already be lower-cased.
pub fn detect_symptom(text: &str) -> Option<&'static VocabularyEntry> {
    VOCABULARY
        .iter()
        .filter_map(|entry| {
            entry
                .triggers
                .iter()
                .filter_map(|t| text.find(t))
                .min()
                .map(|pos| (pos, entry))
        })
        // min_by_key keeps the first entry on equal positions.
        .min_by_key(|(pos, _)| *pos)
        .map(|(_, entry)| entry)
}

fn normalize(text: &str) -> String {
    text.trim().to_lowercase().replace('\u{2019}', "'")
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

// ═══════════════════════════════════════════
// Responder
// ═══════════════════════════════════════════

#[derive(Clone)]
pub struct ChatResponder {
    table: Arc<UrgencyKeywordTable>,
    search: Option<Arc<dyn SearchEngine>>,
}

impl ChatResponder {
    pub fn new(table: Arc<UrgencyKeywordTable>) -> Self {
        Self {
            table,
            search: None,
        }
    }

    pub fn with_search_engine(mut self, engine: Arc<dyn SearchEngine>) -> Self {
        self.search = Some(engine);
        self
    }

    /// Three-bucket conversational urgency.
    pub fn urgency_of<S: AsRef<str>>(&self, texts: &[S]) -> Urgency {
        match self.table.scan(UrgencyContext::Conversation, texts) {
            Some(KeywordLevel::Critical) => Urgency::High,
            Some(KeywordLevel::Elevated) => Urgency::Medium,
            None => Urgency::Low,
        }
    }

    pub fn respond(&self, message: &str, history: &[ChatTurn]) -> ChatResponse {
        let text = normalize(message);

        // Fall back to the latest user turn mentioning a symptom.
        let (detected, context) = match detect_symptom(&text) {
            Some(entry) => (Some(entry), None),
            None => history
                .iter()
                .rev()
                .filter(|turn| turn.role == ChatRole::User)
                .map(|turn| normalize(&turn.content))
                .find_map(|content| detect_symptom(&content).map(|e| (Some(e), Some(content))))
                .unwrap_or((None, None)),
        };

        let mut scanned = vec![text.as_str()];
        if let Some(context) = context.as_deref() {
            scanned.push(context);
        }
        let level = self.table.scan(UrgencyContext::Conversation, &scanned);
        let urgency = self.urgency_of(&scanned);

        let response = if level == Some(KeywordLevel::Critical) {
            ChatResponse {
                response_type: ChatResponseType::Emergency,
                text: EMERGENCY_TEXT.to_string(),
                follow_up_questions: Vec::new(),
                follow_up_options: Vec::new(),
                recommendations: owned(EMERGENCY_RECOMMENDATIONS),
                urgency,
                detected_symptom: detected.map(|e| e.label.to_string()),
            }
        } else if let Some(entry) = detected {
            let response_type = if context.is_some() {
                ChatResponseType::FollowUp
            } else {
                ChatResponseType::SymptomAnalysis
            };
            ChatResponse {
                response_type,
                text: entry.explanation.to_string(),
                follow_up_questions: owned(entry.questions),
                follow_up_options: entry
                    .options
                    .iter()
                    .take(MAX_FOLLOW_UP_OPTIONS)
                    .map(|s| s.to_string())
                    .collect(),
                recommendations: self.recommendations_for(entry),
                urgency,
                detected_symptom: Some(entry.label.to_string()),
            }
        } else {
            ChatResponse {
                response_type: ChatResponseType::General,
                text: GENERAL_TEXT.to_string(),
                follow_up_questions: owned(GENERAL_QUESTIONS),
                follow_up_options: VOCABULARY
                    .iter()
                    .take(MAX_FOLLOW_UP_OPTIONS)
                    .map(|e| e.label.to_string())
                    .collect(),
                recommendations: owned(GENERAL_RECOMMENDATIONS),
                urgency,
                detected_symptom: None,
            }
        };

        tracing::debug!(
            response_type = %response.response_type,
            urgency = %response.urgency,
            symptom = response.detected_symptom.as_deref().unwrap_or("-"),
            "Chat response built"
        );
        response
    }

    fn recommendations_for(&self, entry: &VocabularyEntry) -> Vec<String> {
        let mut recommendations: Vec<String> = entry
            .recommendations
            .iter()
            .take(MAX_CANNED_RECOMMENDATIONS)
            .map(|s| s.to_string())
            .collect();

        if let Some(search) = &self.search {
            let room = MAX_RECOMMENDATIONS.saturating_sub(recommendations.len());
            for extra in search.recommendations(entry.label, MAX_RECOMMENDATIONS) {
                if recommendations.len() >= MAX_CANNED_RECOMMENDATIONS + room {
                    break;
                }
                if !recommendations.iter().any(|r| r.eq_ignore_ascii_case(&extra)) {
                    recommendations.push(extra);
                }
            }
        }
        recommendations.truncate(MAX_RECOMMENDATIONS);
        recommendations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn responder() -> ChatResponder {
        ChatResponder::new(Arc::new(UrgencyKeywordTable::builtin()))
    }

    fn user(content: &str) -> ChatTurn {
        ChatTurn {
            role: ChatRole::User,
            content: content.to_string(),
        }
    }

    struct FixedSearch(Vec<&'static str>);

    impl SearchEngine for FixedSearch {
        fn recommendations(&self, _symptom: &str, limit: usize) -> Vec<String> {
            self.0.iter().take(limit).map(|s| s.to_string()).collect()
        }
    }

    #[test]
    fn fever_message_is_symptom_analysis_with_medium_urgency() {
        let response = responder().respond("J'ai de la fièvre depuis hier", &[]);
        assert_eq!(response.response_type, ChatResponseType::SymptomAnalysis);
        assert_eq!(response.detected_symptom.as_deref(), Some("fièvre"));
        assert_eq!(response.urgency, Urgency::Medium);
        assert!(response.follow_up_options.len() <= MAX_FOLLOW_UP_OPTIONS);
        assert!(response.recommendations.len() <= MAX_CANNED_RECOMMENDATIONS);
    }

    #[test]
    fn earliest_symptom_in_message_wins() {
        let response = responder().respond("Je tousse et j'ai mal à la tête", &[]);
        assert_eq!(response.detected_symptom.as_deref(), Some("toux"));
        assert_eq!(response.urgency, Urgency::Low);
    }

    #[test]
    fn critical_phrase_is_emergency_with_high_urgency() {
        let response = responder().respond("J’ai une douleur thoracique", &[]);
        assert_eq!(response.response_type, ChatResponseType::Emergency);
        assert_eq!(response.urgency, Urgency::High);
        assert!(response.recommendations[0].contains("15"));
    }

    #[test]
    fn history_supplies_context_for_follow_up() {
        let history = vec![
            user("Bonjour"),
            user("J'ai mal au ventre"),
            ChatTurn {
                role: ChatRole::Assistant,
                content: "J'ai de la fièvre aussi ?".to_string(),
            },
        ];
        let response = responder().respond("Depuis ce matin", &history);
        assert_eq!(response.response_type, ChatResponseType::FollowUp);
        assert_eq!(response.detected_symptom.as_deref(), Some("douleur abdominale"));
    }

    #[test]
    fn no_symptom_anywhere_is_general() {
        let response = responder().respond("Bonjour", &[]);
        assert_eq!(response.response_type, ChatResponseType::General);
        assert_eq!(response.urgency, Urgency::Low);
        assert!(response.detected_symptom.is_none());
        assert!(!response.recommendations.is_empty());
    }

    #[test]
    fn search_extras_are_deduplicated_and_capped() {
        let responder = responder().with_search_engine(Arc::new(FixedSearch(vec![
            "Reposez-vous",
            "Extra 1",
            "Extra 2",
            "Extra 3",
            "Extra 4",
        ])));
        let response = responder.respond("fièvre", &[]);
        assert_eq!(response.recommendations.len(), MAX_RECOMMENDATIONS);
        assert_eq!(response.recommendations[4], "Extra 1");
        assert_eq!(
            response
                .recommendations
                .iter()
                .filter(|r| r.as_str() == "Reposez-vous")
                .count(),
            1
        );
    }

    #[test]
    fn options_are_capped_at_eight() {
        let fever = detect_symptom("fièvre").unwrap();
        assert!(fever.options.len() > MAX_FOLLOW_UP_OPTIONS);
        let response = responder().respond("fièvre", &[]);
        assert_eq!(response.follow_up_options.len(), MAX_FOLLOW_UP_OPTIONS);
    }
}
