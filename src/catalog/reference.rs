//! Secondary reference table, consulted when the clinical table has no
//! confident match.

use super::ConditionSpec;
use crate::models::{ConditionRecord, Severity, Urgency};

pub fn conditions() -> Vec<ConditionRecord> {
    [
        ConditionSpec {
            id: "ref-anxiete",
            name: "Anxiété généralisée",
            category: "psychiatrique",
            subcategory: "anxiété",
            symptoms: &[
                "anxiété",
                "palpitations",
                "nervosité",
                "troubles du sommeil",
                "tensions musculaires",
            ],
            severity: Severity::Moderate,
            urgency: Urgency::Medium,
            description: "Inquiétude excessive et difficile à contrôler, avec signes physiques.",
            recommendations: &[
                "Pratiquez la respiration lente (cohérence cardiaque)",
                "Limitez café et alcool",
            ],
            differential: &["Hyperthyroïdie", "Épisode dépressif"],
            next_steps: &["Consultation si le retentissement dure plus de quelques semaines"],
            probability: 55,
        },
        ConditionSpec {
            id: "ref-conjonctivite",
            name: "Conjonctivite",
            category: "ophtalmologique",
            subcategory: "inflammatoire",
            symptoms: &[
                "yeux rouges",
                "yeux qui piquent",
                "écoulement oculaire",
                "paupières collées",
            ],
            severity: Severity::Mild,
            urgency: Urgency::Low,
            description: "Inflammation de la conjonctive, virale, bactérienne ou allergique.",
            recommendations: &[
                "Nettoyez les yeux au sérum physiologique",
                "Ne partagez pas vos serviettes",
            ],
            differential: &["Kératite", "Rhinite allergique"],
            next_steps: &["Consultation en cas de baisse de vision ou douleur intense"],
            probability: 60,
        },
        ConditionSpec {
            id: "ref-eczema",
            name: "Eczéma",
            category: "dermatologique",
            subcategory: "inflammatoire",
            symptoms: &["démangeaisons", "plaques rouges", "peau sèche", "rougeurs"],
            severity: Severity::Mild,
            urgency: Urgency::Low,
            description: "Inflammation chronique de la peau évoluant par poussées.",
            recommendations: &[
                "Hydratez la peau quotidiennement avec un émollient",
                "Préférez les vêtements en coton",
            ],
            differential: &["Psoriasis", "Urticaire"],
            next_steps: &["Consultation dermatologique si poussées fréquentes"],
            probability: 55,
        },
        ConditionSpec {
            id: "ref-sinusite",
            name: "Sinusite",
            category: "infectieux",
            subcategory: "ORL",
            symptoms: &[
                "douleur faciale",
                "congestion nasale",
                "maux de tête",
                "écoulement nasal épais",
            ],
            severity: Severity::Mild,
            urgency: Urgency::Low,
            description: "Inflammation des sinus, souvent à la suite d'un rhume.",
            recommendations: &[
                "Lavages de nez répétés",
                "Inhalations de vapeur",
            ],
            differential: &["Migraine", "Rhume"],
            next_steps: &["Consultation si fièvre élevée ou douleur persistante après 10 jours"],
            probability: 55,
        },
        ConditionSpec {
            id: "ref-deshydratation",
            name: "Déshydratation",
            category: "métabolique",
            subcategory: "hydrique",
            symptoms: &[
                "soif intense",
                "bouche sèche",
                "urines foncées",
                "vertiges",
                "fatigue",
            ],
            severity: Severity::Moderate,
            urgency: Urgency::Medium,
            description: "Perte d'eau supérieure aux apports, à surveiller chez l'enfant et la personne âgée.",
            recommendations: &[
                "Buvez régulièrement par petites gorgées",
                "Évitez l'exposition à la chaleur",
            ],
            differential: &["Hypoglycémie", "Gastro-entérite"],
            next_steps: &["Consultation urgente si confusion ou absence d'urines"],
            probability: 60,
        },
    ]
    .iter()
    .map(ConditionSpec::build)
    .collect()
}
