//! Primary clinical condition table (canonical entries).

use super::ConditionSpec;
use crate::models::{ConditionRecord, Severity, Urgency};

pub fn conditions() -> Vec<ConditionRecord> {
    [
        ConditionSpec {
            id: "grippe",
            name: "Grippe saisonnière",
            category: "infectieux",
            subcategory: "respiratoire",
            symptoms: &["fièvre", "maux de tête", "courbatures", "fatigue", "toux"],
            severity: Severity::Moderate,
            urgency: Urgency::Medium,
            description: "Infection virale aiguë des voies respiratoires, d'apparition brutale, \
                          avec fièvre et douleurs diffuses.",
            recommendations: &[
                "Reposez-vous et buvez abondamment",
                "Surveillez votre température deux fois par jour",
                "Consultez si la fièvre dure plus de 3 jours",
            ],
            differential: &["COVID-19", "Rhume", "Angine"],
            next_steps: &[
                "Test antigénique si disponible",
                "Consultation si essoufflement ou fièvre persistante",
            ],
            probability: 75,
        },
        ConditionSpec {
            id: "migraine",
            name: "Migraine",
            category: "neurologique",
            subcategory: "céphalée",
            symptoms: &[
                "maux de tête",
                "nausées",
                "sensibilité à la lumière",
                "sensibilité au bruit",
                "troubles visuels",
            ],
            severity: Severity::Moderate,
            urgency: Urgency::Low,
            description: "Céphalée primaire récurrente, souvent pulsatile et d'un seul côté, \
                          parfois précédée d'une aura.",
            recommendations: &[
                "Reposez-vous dans une pièce calme et sombre",
                "Notez les déclencheurs dans un carnet",
                "Évitez les écrans pendant la crise",
            ],
            differential: &["Céphalée de tension", "Sinusite"],
            next_steps: &["Consultation si les crises deviennent plus fréquentes"],
            probability: 70,
        },
        ConditionSpec {
            id: "rhume",
            name: "Rhume",
            category: "infectieux",
            subcategory: "respiratoire",
            symptoms: &[
                "nez qui coule",
                "éternuements",
                "mal de gorge",
                "toux",
                "congestion nasale",
            ],
            severity: Severity::Mild,
            urgency: Urgency::Low,
            description: "Infection virale bénigne des voies respiratoires supérieures.",
            recommendations: &[
                "Lavez-vous le nez au sérum physiologique",
                "Buvez des boissons chaudes",
            ],
            differential: &["Rhinite allergique", "Grippe saisonnière"],
            next_steps: &["Consultation si les symptômes durent plus de 10 jours"],
            probability: 80,
        },
        ConditionSpec {
            id: "gastro-enterite",
            name: "Gastro-entérite",
            category: "digestif",
            subcategory: "infectieux",
            symptoms: &[
                "diarrhée",
                "vomissements",
                "nausées",
                "douleur abdominale",
                "fièvre",
            ],
            severity: Severity::Moderate,
            urgency: Urgency::Medium,
            description: "Inflammation du tube digestif, le plus souvent virale, \
                          avec risque de déshydratation.",
            recommendations: &[
                "Buvez de petites quantités souvent (solution de réhydratation)",
                "Privilégiez riz, bananes et compotes",
                "Lavez-vous soigneusement les mains",
            ],
            differential: &["Intoxication alimentaire", "Appendicite"],
            next_steps: &["Consultation si sang dans les selles ou impossibilité de boire"],
            probability: 70,
        },
        ConditionSpec {
            id: "angine",
            name: "Angine",
            category: "infectieux",
            subcategory: "ORL",
            symptoms: &[
                "mal de gorge",
                "fièvre",
                "difficulté à avaler",
                "ganglions gonflés",
            ],
            severity: Severity::Moderate,
            urgency: Urgency::Medium,
            description: "Inflammation des amygdales, virale ou bactérienne.",
            recommendations: &[
                "Faites réaliser un test rapide d'orientation diagnostique",
                "Prenez des boissons tièdes",
            ],
            differential: &["Mononucléose", "Rhume"],
            next_steps: &["Consultation pour test streptococcique"],
            probability: 65,
        },
        ConditionSpec {
            id: "syndrome-coronarien",
            name: "Syndrome coronarien aigu",
            category: "cardiovasculaire",
            subcategory: "ischémique",
            symptoms: &[
                "douleur thoracique",
                "essoufflement",
                "sueurs",
                "douleur au bras gauche",
                "nausées",
            ],
            severity: Severity::Critical,
            urgency: Urgency::Critical,
            description: "Réduction brutale de l'apport sanguin au cœur. Urgence vitale.",
            recommendations: &[
                "Appelez immédiatement le 15 (SAMU) ou le 112",
                "Restez au repos, ne conduisez pas",
            ],
            differential: &["Embolie pulmonaire", "Péricardite", "Reflux gastro-œsophagien"],
            next_steps: &["Prise en charge hospitalière immédiate"],
            probability: 60,
        },
        ConditionSpec {
            id: "asthme",
            name: "Crise d'asthme",
            category: "respiratoire",
            subcategory: "bronchique",
            symptoms: &[
                "essoufflement",
                "sifflement respiratoire",
                "toux",
                "oppression thoracique",
            ],
            severity: Severity::Severe,
            urgency: Urgency::High,
            description: "Rétrécissement des bronches provoquant une gêne respiratoire.",
            recommendations: &[
                "Utilisez votre traitement de crise si vous en avez un",
                "Asseyez-vous penché en avant et respirez lentement",
            ],
            differential: &["Bronchite", "Insuffisance cardiaque"],
            next_steps: &["Consultation rapide si pas d'amélioration après le traitement de crise"],
            probability: 65,
        },
        ConditionSpec {
            id: "depression",
            name: "Épisode dépressif",
            category: "psychiatrique",
            subcategory: "humeur",
            symptoms: &[
                "tristesse",
                "perte d'intérêt",
                "fatigue",
                "troubles du sommeil",
                "perte d'appétit",
            ],
            severity: Severity::Moderate,
            urgency: Urgency::Medium,
            description: "Humeur dépressive persistante avec retentissement sur la vie quotidienne.",
            recommendations: &[
                "Parlez-en à un professionnel de santé",
                "Maintenez un rythme de sommeil régulier",
                "En cas d'idées noires, appelez le 3114",
            ],
            differential: &["Trouble anxieux", "Hypothyroïdie"],
            next_steps: &["Consultation médicale ou psychologique"],
            probability: 60,
        },
        ConditionSpec {
            id: "infection-urinaire",
            name: "Infection urinaire",
            category: "urologique",
            subcategory: "infectieux",
            symptoms: &[
                "brûlures urinaires",
                "envies fréquentes d'uriner",
                "douleur pelvienne",
                "urines troubles",
            ],
            severity: Severity::Mild,
            urgency: Urgency::Medium,
            description: "Infection de la vessie, fréquente et généralement sans gravité.",
            recommendations: &[
                "Buvez au moins 1,5 L d'eau par jour",
                "Consultez pour une bandelette urinaire",
            ],
            differential: &["Pyélonéphrite", "Vaginite"],
            next_steps: &["Consultation si fièvre ou douleur lombaire"],
            probability: 70,
        },
        ConditionSpec {
            id: "lombalgie",
            name: "Lombalgie",
            category: "musculo-squelettique",
            subcategory: "rachis",
            symptoms: &[
                "mal de dos",
                "raideur",
                "douleur lombaire",
                "douleur à la mobilisation",
            ],
            severity: Severity::Mild,
            urgency: Urgency::Low,
            description: "Douleur du bas du dos, le plus souvent mécanique et transitoire.",
            recommendations: &[
                "Restez actif autant que possible",
                "Appliquez de la chaleur sur la zone douloureuse",
            ],
            differential: &["Sciatique", "Colique néphrétique"],
            next_steps: &["Consultation si perte de force ou troubles urinaires"],
            probability: 70,
        },
        ConditionSpec {
            id: "rhinite-allergique",
            name: "Rhinite allergique",
            category: "immunologique",
            subcategory: "allergie",
            symptoms: &[
                "éternuements",
                "nez qui coule",
                "yeux qui piquent",
                "démangeaisons",
            ],
            severity: Severity::Mild,
            urgency: Urgency::Low,
            description: "Réaction allergique des muqueuses nasales (pollens, acariens, poils).",
            recommendations: &[
                "Limitez l'exposition aux allergènes",
                "Aérez tôt le matin ou tard le soir en période de pollen",
            ],
            differential: &["Rhume", "Conjonctivite"],
            next_steps: &["Bilan allergologique si récidivant"],
            probability: 65,
        },
    ]
    .iter()
    .map(ConditionSpec::build)
    .collect()
}
