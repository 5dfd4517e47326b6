//! Treatment table keyed by condition name and severity band.

use super::strings;
use crate::models::{MedicationCategory, MedicationRecord, Severity, TreatmentRecord};

/// Ordered treatment entries. Lookups return the first entry that fits.
#[derive(Debug, Clone, Default)]
pub struct TreatmentCatalog {
    entries: Vec<TreatmentRecord>,
}

impl TreatmentCatalog {
    pub fn new(entries: Vec<TreatmentRecord>) -> Self {
        Self { entries }
    }

    pub fn builtin() -> Self {
        Self::new(builtin_entries())
    }

    pub fn entries(&self) -> &[TreatmentRecord] {
        &self.entries
    }

    /// All entries for a condition name (case-insensitive), in table order.
    pub fn for_condition<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a TreatmentRecord> {
        let wanted = name.trim().to_lowercase();
        self.entries
            .iter()
            .filter(move |e| e.condition.to_lowercase() == wanted)
    }
}

fn med(
    name: &str,
    dosage: &str,
    frequency: &str,
    duration: &str,
    contraindications: &[&str],
    side_effects: &[&str],
    category: MedicationCategory,
) -> MedicationRecord {
    MedicationRecord {
        name: name.to_string(),
        dosage: dosage.to_string(),
        frequency: frequency.to_string(),
        duration: duration.to_string(),
        contraindications: strings(contraindications),
        side_effects: strings(side_effects),
        category,
    }
}

struct Advice<'a> {
    natural: &'a [&'a str],
    lifestyle: &'a [&'a str],
    emergency: &'a [&'a str],
    consultation: &'a str,
    follow_up: &'a str,
}

fn entry(
    condition: &str,
    severity: Severity,
    medications: Vec<MedicationRecord>,
    advice: Advice<'_>,
) -> TreatmentRecord {
    TreatmentRecord {
        condition: condition.to_string(),
        severity,
        medications,
        natural_remedies: strings(advice.natural),
        lifestyle_changes: strings(advice.lifestyle),
        emergency_actions: strings(advice.emergency),
        consultation_advice: advice.consultation.to_string(),
        follow_up_instructions: advice.follow_up.to_string(),
    }
}

fn paracetamol() -> MedicationRecord {
    med(
        "Paracétamol",
        "500 mg à 1 g",
        "Toutes les 6 heures, maximum 3 g par jour",
        "3 à 5 jours",
        &["Insuffisance hépatique", "Consommation excessive d'alcool"],
        &["Rares réactions cutanées"],
        MedicationCategory::Otc,
    )
}

fn ibuprofen() -> MedicationRecord {
    med(
        "Ibuprofène",
        "200 à 400 mg",
        "Toutes les 8 heures pendant les repas",
        "3 jours maximum sans avis médical",
        &["Ulcère gastrique", "Grossesse (dès le 6e mois)", "Insuffisance rénale"],
        &["Douleurs d'estomac", "Nausées"],
        MedicationCategory::Otc,
    )
}

fn builtin_entries() -> Vec<TreatmentRecord> {
    vec![
        entry(
            "Grippe saisonnière",
            Severity::Moderate,
            vec![paracetamol()],
            Advice {
                natural: &["Tisane miel-citron", "Bouillons chauds"],
                lifestyle: &["Repos au lit", "Hydratation abondante", "Aérer la chambre"],
                emergency: &["Difficulté à respirer : appelez le 15"],
                consultation: "Consultez si la fièvre persiste au-delà de 3 jours ou chez les personnes fragiles.",
                follow_up: "Reprise progressive des activités après 48 h sans fièvre.",
            },
        ),
        entry(
            "Grippe saisonnière",
            Severity::Severe,
            vec![
                paracetamol(),
                med(
                    "Oseltamivir",
                    "75 mg",
                    "2 fois par jour",
                    "5 jours",
                    &["Insuffisance rénale sévère"],
                    &["Nausées", "Céphalées"],
                    MedicationCategory::Prescription,
                ),
            ],
            Advice {
                natural: &["Bouillons chauds"],
                lifestyle: &["Repos strict", "Isolement pour protéger l'entourage"],
                emergency: &[
                    "Essoufflement ou douleur thoracique : appelez le 15",
                    "Confusion : appelez le 15",
                ],
                consultation: "Consultation médicale rapide, surtout après 65 ans ou en cas de maladie chronique.",
                follow_up: "Contrôle médical si la fièvre réapparaît après amélioration.",
            },
        ),
        entry(
            "Migraine",
            Severity::Moderate,
            vec![
                ibuprofen(),
                med(
                    "Sumatriptan",
                    "50 mg",
                    "Au début de la crise, à renouveler après 2 h si besoin",
                    "Pendant la crise",
                    &["Maladie coronarienne", "Hypertension non contrôlée"],
                    &["Sensation de chaleur", "Fatigue"],
                    MedicationCategory::Prescription,
                ),
            ],
            Advice {
                natural: &["Compresse froide sur le front", "Huile essentielle de menthe poivrée sur les tempes"],
                lifestyle: &["Horaires de sommeil réguliers", "Limiter alcool et écrans"],
                emergency: &["Mal de tête brutal et inhabituel : appelez le 15"],
                consultation: "Consultez si les crises dépassent 4 par mois.",
                follow_up: "Tenez un agenda des crises pour votre médecin.",
            },
        ),
        entry(
            "Rhume",
            Severity::Mild,
            vec![paracetamol()],
            Advice {
                natural: &["Lavage nasal au sérum physiologique", "Inhalations de vapeur"],
                lifestyle: &["Dormir la tête surélevée", "Boire chaud"],
                emergency: &[],
                consultation: "Consultation inutile sauf fièvre élevée ou symptômes au-delà de 10 jours.",
                follow_up: "Guérison spontanée en 7 à 10 jours.",
            },
        ),
        entry(
            "Gastro-entérite",
            Severity::Moderate,
            vec![med(
                "Solution de réhydratation orale",
                "1 sachet dans 200 mL d'eau",
                "Après chaque selle liquide",
                "Jusqu'à disparition de la diarrhée",
                &[],
                &[],
                MedicationCategory::Otc,
            )],
            Advice {
                natural: &["Eau de riz", "Bouillon salé"],
                lifestyle: &["Alimentation légère", "Lavage des mains fréquent"],
                emergency: &["Signes de déshydratation chez l'enfant : consultez en urgence"],
                consultation: "Consultez si la diarrhée dure plus de 3 jours ou en cas de sang dans les selles.",
                follow_up: "Réintroduction progressive d'une alimentation normale.",
            },
        ),
        entry(
            "Angine",
            Severity::Moderate,
            vec![
                paracetamol(),
                med(
                    "Amoxicilline",
                    "1 g",
                    "2 fois par jour",
                    "6 jours",
                    &["Allergie aux pénicillines"],
                    &["Diarrhée", "Éruption cutanée"],
                    MedicationCategory::Prescription,
                ),
            ],
            Advice {
                natural: &["Gargarismes d'eau salée tiède", "Miel"],
                lifestyle: &["Boissons tièdes", "Repos vocal"],
                emergency: &["Impossibilité d'avaler sa salive : consultez en urgence"],
                consultation: "L'antibiotique n'est indiqué qu'après un test streptococcique positif.",
                follow_up: "Amélioration attendue sous 48 h de traitement.",
            },
        ),
        entry(
            "Syndrome coronarien aigu",
            Severity::Critical,
            vec![med(
                "Aspirine",
                "250 mg",
                "Une seule prise",
                "Uniquement sur indication du SAMU",
                &["Allergie à l'aspirine", "Saignement actif"],
                &["Saignements"],
                MedicationCategory::Emergency,
            )],
            Advice {
                natural: &[],
                lifestyle: &["Arrêt du tabac", "Activité physique encadrée après l'épisode"],
                emergency: &[
                    "Appelez immédiatement le 15 ou le 112",
                    "Restez allongé ou assis, ne faites aucun effort",
                    "Déverrouillez la porte pour les secours",
                ],
                consultation: "Prise en charge hospitalière immédiate.",
                follow_up: "Suivi cardiologique rapproché après la sortie.",
            },
        ),
        entry(
            "Crise d'asthme",
            Severity::Severe,
            vec![med(
                "Salbutamol (inhalateur)",
                "2 bouffées",
                "À renouveler toutes les 20 minutes si besoin pendant 1 heure",
                "Pendant la crise",
                &["Hypersensibilité au salbutamol"],
                &["Palpitations", "Tremblements"],
                MedicationCategory::Prescription,
            )],
            Advice {
                natural: &[],
                lifestyle: &["Éviter fumée et allergènes", "Plan d'action écrit"],
                emergency: &["Pas d'amélioration après traitement de crise : appelez le 15"],
                consultation: "Consultation rapide pour adapter le traitement de fond.",
                follow_up: "Contrôle du souffle chez le médecin sous 1 semaine.",
            },
        ),
        entry(
            "Épisode dépressif",
            Severity::Moderate,
            vec![med(
                "Millepertuis",
                "300 mg",
                "3 fois par jour",
                "Avis médical obligatoire",
                &["Contraceptifs oraux", "Antidépresseurs", "Anticoagulants"],
                &["Photosensibilité"],
                MedicationCategory::Natural,
            )],
            Advice {
                natural: &["Exposition à la lumière du jour"],
                lifestyle: &["Activité physique régulière", "Maintenir des contacts sociaux"],
                emergency: &["Idées suicidaires : appelez le 3114"],
                consultation: "Consultez un médecin ou un psychologue pour évaluer la prise en charge.",
                follow_up: "Réévaluation à 4 semaines.",
            },
        ),
        entry(
            "Infection urinaire",
            Severity::Mild,
            vec![med(
                "Fosfomycine",
                "3 g",
                "Dose unique",
                "1 jour",
                &["Insuffisance rénale sévère"],
                &["Diarrhée"],
                MedicationCategory::Prescription,
            )],
            Advice {
                natural: &["Jus de canneberge"],
                lifestyle: &["Boire 1,5 L par jour", "Ne pas se retenir d'uriner"],
                emergency: &["Fièvre et douleur lombaire : consultez en urgence"],
                consultation: "Une bandelette urinaire confirme le diagnostic.",
                follow_up: "Consultez si les symptômes persistent 3 jours après le traitement.",
            },
        ),
        entry(
            "Lombalgie",
            Severity::Mild,
            vec![paracetamol(), ibuprofen()],
            Advice {
                natural: &["Bouillotte chaude"],
                lifestyle: &["Rester actif", "Étirements doux"],
                emergency: &["Perte de force dans les jambes ou troubles urinaires : appelez le 15"],
                consultation: "Consultez si la douleur dure plus de 4 semaines.",
                follow_up: "Kinésithérapie si récidive.",
            },
        ),
        entry(
            "Anxiété généralisée",
            Severity::Moderate,
            vec![med(
                "Passiflore",
                "200 mg",
                "2 fois par jour",
                "3 semaines",
                &["Association avec des sédatifs"],
                &["Somnolence"],
                MedicationCategory::Natural,
            )],
            Advice {
                natural: &["Cohérence cardiaque 3 fois par jour"],
                lifestyle: &["Limiter la caféine", "Activité physique régulière"],
                emergency: &[],
                consultation: "Consultez si l'anxiété retentit sur le travail ou le sommeil.",
                follow_up: "Réévaluation à 1 mois.",
            },
        ),
    ]
}
