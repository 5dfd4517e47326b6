//! Doctor personas selectable with `doctorId`. The persona only shapes
//! the LLM prompt; the deterministic pipeline ignores it.

use serde::Serialize;

pub const DEFAULT_DOCTOR_ID: &str = "generaliste";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorProfile {
    pub id: &'static str,
    pub name: &'static str,
    pub specialty: &'static str,
    /// Extra instruction appended to the system prompt.
    pub focus: &'static str,
}

const DOCTORS: &[DoctorProfile] = &[
    DoctorProfile {
        id: DEFAULT_DOCTOR_ID,
        name: "Dr Martin",
        specialty: "Médecine générale",
        focus: "Adopte une approche globale et oriente vers un spécialiste si nécessaire.",
    },
    DoctorProfile {
        id: "cardiologue",
        name: "Dr Bernard",
        specialty: "Cardiologie",
        focus: "Recherche en priorité les signes d'alerte cardiovasculaires.",
    },
    DoctorProfile {
        id: "pediatre",
        name: "Dr Petit",
        specialty: "Pédiatrie",
        focus: "Considère que le patient peut être un enfant et adapte les conseils à l'âge.",
    },
    DoctorProfile {
        id: "dermatologue",
        name: "Dr Moreau",
        specialty: "Dermatologie",
        focus: "Porte une attention particulière aux manifestations cutanées.",
    },
    DoctorProfile {
        id: "psychiatre",
        name: "Dr Laurent",
        specialty: "Psychiatrie",
        focus: "Évalue le retentissement psychologique et le risque suicidaire.",
    },
    DoctorProfile {
        id: "gastro-enterologue",
        name: "Dr Simon",
        specialty: "Gastro-entérologie",
        focus: "Approfondit les symptômes digestifs et le risque de déshydratation.",
    },
];

/// Fixed directory of doctor personas.
#[derive(Debug, Clone, Copy, Default)]
pub struct DoctorDirectory;

impl DoctorDirectory {
    pub fn all(&self) -> &'static [DoctorProfile] {
        DOCTORS
    }

    /// Resolve an optional id; unknown or absent ids get the general practitioner.
    pub fn resolve(&self, doctor_id: Option<&str>) -> &'static DoctorProfile {
        doctor_id
            .map(|id| id.trim().to_lowercase())
            .and_then(|id| DOCTORS.iter().find(|d| d.id == id))
            .unwrap_or(&DOCTORS[0])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_known_id_case_insensitively() {
        let doctor = DoctorDirectory.resolve(Some(" Cardiologue "));
        assert_eq!(doctor.specialty, "Cardiologie");
    }

    #[test]
    fn unknown_or_missing_id_falls_back_to_generalist() {
        assert_eq!(DoctorDirectory.resolve(None).id, DEFAULT_DOCTOR_ID);
        assert_eq!(DoctorDirectory.resolve(Some("chirurgien")).id, DEFAULT_DOCTOR_ID);
    }

    #[test]
    fn ids_are_unique() {
        let mut ids: Vec<&str> = DoctorDirectory.all().iter().map(|d| d.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), DoctorDirectory.all().len());
    }
}
