//! Follow-up questions asked before a diagnosis.
//!
//! Keyword categories are checked in a fixed order (pain, fever,
//! respiratory, digestive) and each hit contributes its pre-authored block.
//! The general block always follows. The combined list is cut at
//! `MAX_QUESTIONS`, so earlier blocks take precedence.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::{ClarificationQuestion, ClarificationResponse, Importance, QuestionType};

pub const MAX_QUESTIONS: usize = 6;

// Triggers start on a word boundary. Short words ("mal", "ache") must also
// end on one so "normal" or "cache" never match.
static PAIN_TRIGGERS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b(?:douleurs?|mal|maux|pains?|painful|(?:head|back|stomach|tooth|ear)?aches?|aching|hurts?|hurting)\b",
    )
    .expect("Invalid pain trigger regex")
});

static FEVER_TRIGGERS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:fi[eè]vre|f[ée]bri|temp[ée]rature|frisson|chaud|fever|chill)")
        .expect("Invalid fever trigger regex")
});

static RESPIRATORY_TRIGGERS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:toux|touss|respir|essouffl|poumon|cough|breath|wheez)")
        .expect("Invalid respiratory trigger regex")
});

static DIGESTIVE_TRIGGERS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:naus[ée]|vomi|diarrh|ventre|estomac|abdom|digest|stomach)")
        .expect("Invalid digestive trigger regex")
});

/// Keyword-triggered question categories, in precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionCategory {
    Pain,
    Fever,
    Respiratory,
    Digestive,
}

impl QuestionCategory {
    pub const ORDERED: [QuestionCategory; 4] = [
        QuestionCategory::Pain,
        QuestionCategory::Fever,
        QuestionCategory::Respiratory,
        QuestionCategory::Digestive,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Pain => "pain",
            Self::Fever => "fever",
            Self::Respiratory => "respiratory",
            Self::Digestive => "digestive",
        }
    }

    fn triggers(&self) -> &'static Regex {
        match self {
            Self::Pain => &PAIN_TRIGGERS,
            Self::Fever => &FEVER_TRIGGERS,
            Self::Respiratory => &RESPIRATORY_TRIGGERS,
            Self::Digestive => &DIGESTIVE_TRIGGERS,
        }
    }

    fn questions(&self) -> Vec<ClarificationQuestion> {
        match self {
            Self::Pain => vec![
                question(
                    "pain_intensity",
                    "Sur une échelle de 1 à 10, quelle est l'intensité de votre douleur ?",
                    QuestionType::Scale,
                    Some(&["1", "2", "3", "4", "5", "6", "7", "8", "9", "10"]),
                    Importance::Critical,
                    self.label(),
                ),
                question(
                    "pain_location",
                    "Où se situe principalement la douleur ?",
                    QuestionType::MultipleChoice,
                    Some(&["Tête", "Poitrine", "Ventre", "Dos", "Membres", "Autre"]),
                    Importance::High,
                    self.label(),
                ),
                question(
                    "pain_type",
                    "Comment décririez-vous la douleur ?",
                    QuestionType::MultipleChoice,
                    Some(&["Lancinante", "Sourde", "Brûlure", "Pulsatile", "Crampe"]),
                    Importance::Medium,
                    self.label(),
                ),
            ],
            Self::Fever => vec![
                question(
                    "fever_temperature",
                    "Quelle est votre température la plus élevée ?",
                    QuestionType::MultipleChoice,
                    Some(&[
                        "Moins de 38 °C",
                        "38 à 38,9 °C",
                        "39 à 39,9 °C",
                        "40 °C ou plus",
                        "Non mesurée",
                    ]),
                    Importance::Critical,
                    self.label(),
                ),
                question(
                    "fever_duration",
                    "Depuis combien de temps avez-vous de la fièvre ?",
                    QuestionType::MultipleChoice,
                    Some(&["Moins de 24 h", "1 à 3 jours", "Plus de 3 jours"]),
                    Importance::High,
                    self.label(),
                ),
            ],
            Self::Respiratory => vec![
                question(
                    "breathing_difficulty",
                    "Avez-vous du mal à respirer au repos ?",
                    QuestionType::YesNo,
                    None,
                    Importance::Critical,
                    self.label(),
                ),
                question(
                    "cough_type",
                    "Votre toux est-elle :",
                    QuestionType::MultipleChoice,
                    Some(&["Sèche", "Grasse", "Avec du sang", "Pas de toux"]),
                    Importance::High,
                    self.label(),
                ),
            ],
            Self::Digestive => vec![
                question(
                    "digestive_symptoms",
                    "Quels symptômes digestifs avez-vous ?",
                    QuestionType::MultipleChoice,
                    Some(&[
                        "Nausées",
                        "Vomissements",
                        "Diarrhée",
                        "Constipation",
                        "Sang dans les selles",
                    ]),
                    Importance::High,
                    self.label(),
                ),
                question(
                    "can_drink",
                    "Arrivez-vous à boire et à garder les liquides ?",
                    QuestionType::YesNo,
                    None,
                    Importance::High,
                    self.label(),
                ),
            ],
        }
    }
}

fn general_questions() -> Vec<ClarificationQuestion> {
    vec![
        question(
            "age_range",
            "Quelle est votre tranche d'âge ?",
            QuestionType::MultipleChoice,
            Some(&["Moins de 18 ans", "18 à 40 ans", "41 à 65 ans", "Plus de 65 ans"]),
            Importance::High,
            "general",
        ),
        question(
            "medical_history",
            "Avez-vous des antécédents médicaux ou un traitement en cours ?",
            QuestionType::Text,
            None,
            Importance::Medium,
            "general",
        ),
        question(
            "recent_events",
            "Un événement récent pourrait-il être lié (voyage, contact avec un malade, nouveau médicament) ?",
            QuestionType::Text,
            None,
            Importance::Medium,
            "general",
        ),
        question(
            "worry_level",
            "À quel point êtes-vous inquiet(e), de 1 à 10 ?",
            QuestionType::Scale,
            Some(&["1", "2", "3", "4", "5", "6", "7", "8", "9", "10"]),
            Importance::Low,
            "general",
        ),
    ]
}

fn question(
    id: &str,
    text: &str,
    question_type: QuestionType,
    options: Option<&[&str]>,
    importance: Importance,
    category: &str,
) -> ClarificationQuestion {
    ClarificationQuestion {
        id: id.to_string(),
        question: text.to_string(),
        question_type,
        options: options.map(|o| o.iter().map(|s| s.to_string()).collect()),
        importance,
        category: category.to_string(),
    }
}

/// Builds the clarification round-trip for a symptom description.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClarificationGenerator;

impl ClarificationGenerator {
    /// Categories whose triggers appear in the joined, lower-cased input.
    pub fn detect_categories(&self, symptoms: &[String]) -> Vec<QuestionCategory> {
        let text = symptoms.join(" ").to_lowercase();
        QuestionCategory::ORDERED
            .into_iter()
            .filter(|category| category.triggers().is_match(&text))
            .collect()
    }

    /// Ordered questions, at most `MAX_QUESTIONS`.
    pub fn generate(&self, symptoms: &[String]) -> Vec<ClarificationQuestion> {
        self.detect_categories(symptoms)
            .iter()
            .flat_map(|category| category.questions())
            .chain(general_questions())
            .take(MAX_QUESTIONS)
            .collect()
    }

    /// Full `/clarification` body.
    pub fn respond(&self, symptoms: &[String]) -> ClarificationResponse {
        let categories = self.detect_categories(symptoms);
        let questions = self.generate(symptoms);
        let reasoning = if categories.is_empty() {
            "Aucune catégorie spécifique détectée ; questions générales pour préciser le contexte."
                .to_string()
        } else {
            let labels: Vec<&str> = categories.iter().map(|c| c.label()).collect();
            format!(
                "Catégories détectées : {}. Quelques précisions permettront d'affiner l'analyse.",
                labels.join(", ")
            )
        };
        ClarificationResponse {
            needs_clarification: !questions.is_empty(),
            questions,
            reasoning,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(text: &str) -> Vec<String> {
        vec![text.to_string()]
    }

    fn ids(questions: &[ClarificationQuestion]) -> Vec<&str> {
        questions.iter().map(|q| q.id.as_str()).collect()
    }

    #[test]
    fn pain_and_fever_include_intensity_and_temperature() {
        let questions = ClarificationGenerator.generate(&input("douleur au ventre et fièvre"));
        let ids = ids(&questions);
        assert!(ids.contains(&"pain_intensity"));
        assert!(ids.contains(&"fever_temperature"));
        assert!(questions.len() <= MAX_QUESTIONS);
    }

    #[test]
    fn never_more_than_six_even_when_every_category_matches() {
        let questions = ClarificationGenerator
            .generate(&input("douleur, fièvre, toux et nausées depuis hier"));
        assert_eq!(questions.len(), MAX_QUESTIONS);
        // Pain (3) + fever (2) + first respiratory question fill the cap.
        assert_eq!(ids(&questions)[5], "breathing_difficulty");
        assert!(questions.iter().all(|q| q.category != "general"));
    }

    #[test]
    fn general_questions_fill_remaining_slots() {
        let questions = ClarificationGenerator.generate(&input("une toux sèche"));
        assert_eq!(
            ids(&questions),
            vec![
                "breathing_difficulty",
                "cough_type",
                "age_range",
                "medical_history",
                "recent_events",
                "worry_level",
            ]
        );
    }

    #[test]
    fn no_category_still_asks_general_questions() {
        let response = ClarificationGenerator.respond(&input("je me sens bizarre"));
        assert!(response.needs_clarification);
        assert_eq!(response.questions.len(), 4);
        assert!(response.questions.iter().all(|q| q.category == "general"));
    }

    #[test]
    fn block_order_is_fixed_regardless_of_input_order() {
        let questions = ClarificationGenerator.generate(&input("nausées puis douleur"));
        assert_eq!(questions[0].category, "pain");
        assert_eq!(questions[3].category, "digestive");
    }

    #[test]
    fn every_question_is_well_formed() {
        let questions = ClarificationGenerator.generate(&input("douleur fièvre toux ventre"));
        assert!(questions.iter().all(ClarificationQuestion::is_well_formed));
        assert!(general_questions().iter().all(ClarificationQuestion::is_well_formed));
    }

    #[test]
    fn words_containing_a_trigger_do_not_match() {
        let generator = ClarificationGenerator;
        assert!(generator
            .detect_categories(&input("je me sens normal mais fatigué"))
            .is_empty());
        assert!(generator
            .detect_categories(&input("my animal ate from the cache"))
            .is_empty());
        assert!(generator.detect_categories(&input("un malaise")).is_empty());
    }

    #[test]
    fn pain_triggers_match_whole_words() {
        let generator = ClarificationGenerator;
        for text in [
            "j'ai mal à la tête",
            "J’ai mal au dos",
            "des maux de tête",
            "headache",
            "it hurts",
        ] {
            assert_eq!(
                generator.detect_categories(&input(text)),
                vec![QuestionCategory::Pain],
                "{text}"
            );
        }
    }

    #[test]
    fn stems_match_inflected_forms() {
        let generator = ClarificationGenerator;
        assert_eq!(
            generator.detect_categories(&input("je tousse et je suis essoufflé")),
            vec![QuestionCategory::Respiratory]
        );
        assert_eq!(
            generator.detect_categories(&input("Vomissements et Nausées")),
            vec![QuestionCategory::Digestive]
        );
    }

    #[test]
    fn reasoning_names_detected_categories() {
        let response = ClarificationGenerator.respond(&input("fièvre et toux"));
        assert!(response.reasoning.contains("fever"));
        assert!(response.reasoning.contains("respiratory"));
    }
}
