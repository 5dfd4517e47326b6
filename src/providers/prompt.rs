use std::collections::BTreeMap;

use crate::catalog::DoctorProfile;

pub const DIAGNOSIS_SYSTEM_PROMPT: &str = r#"
Tu es un assistant d'orientation médicale. Tu proposes une hypothèse
informative à partir des symptômes décrits, sans jamais remplacer une
consultation.

RÈGLES :
1. Réponds UNIQUEMENT avec un objet JSON, sans texte autour.
2. "probability" est un entier entre 0 et 100.
3. "urgency" vaut "low", "medium", "high" ou "critical".
4. "severity" vaut "mild", "moderate", "severe" ou "critical".
5. Au moindre signe de gravité (douleur thoracique, détresse respiratoire,
   perte de connaissance), "urgency" vaut "critical".

FORMAT :
{
  "condition": "nom de l'affection la plus probable",
  "probability": 60,
  "description": "explication courte",
  "recommendations": ["conseil 1", "conseil 2"],
  "urgency": "medium",
  "severity": "moderate",
  "differentialDiagnosis": ["autre hypothèse"],
  "nextSteps": ["étape suivante"],
  "category": "catégorie médicale"
}
"#;

/// System and user messages for one diagnosis call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosisPrompt {
    pub system: String,
    pub user: String,
}

impl DiagnosisPrompt {
    /// Persona-specific system prompt plus the symptom/answer listing.
    pub fn build(
        symptoms: &[String],
        doctor: &DoctorProfile,
        answers: &BTreeMap<String, String>,
    ) -> Self {
        let system = format!(
            "Tu réponds en tant que {name} ({specialty}). {focus}\n{DIAGNOSIS_SYSTEM_PROMPT}",
            name = doctor.name,
            specialty = doctor.specialty,
            focus = doctor.focus,
        );

        let mut user = String::from("Symptômes décrits par le patient :\n");
        for symptom in symptoms.iter().map(|s| s.trim()).filter(|s| !s.is_empty()) {
            user.push_str(&format!("- {symptom}\n"));
        }

        let answered: Vec<(&String, &String)> = answers
            .iter()
            .filter(|(_, answer)| !answer.trim().is_empty())
            .collect();
        if !answered.is_empty() {
            user.push_str("\nRéponses aux questions de clarification :\n");
            for (question, answer) in answered {
                user.push_str(&format!("- {question} : {}\n", answer.trim()));
            }
        }

        Self { system, user }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::DoctorDirectory;

    #[test]
    fn prompt_carries_persona_symptoms_and_answers() {
        let doctor = DoctorDirectory.resolve(Some("cardiologue"));
        let mut answers = BTreeMap::new();
        answers.insert("pain_intensity".to_string(), "8".to_string());
        answers.insert("age_range".to_string(), "  ".to_string());

        let prompt = DiagnosisPrompt::build(
            &["douleur thoracique".to_string(), " ".to_string()],
            doctor,
            &answers,
        );

        assert!(prompt.system.contains(doctor.name));
        assert!(prompt.system.contains("Cardiologie"));
        assert!(prompt.system.contains("\"probability\""));
        assert!(prompt.user.contains("- douleur thoracique\n"));
        assert!(prompt.user.contains("- pain_intensity : 8"));
        assert!(!prompt.user.contains("age_range"));
    }

    #[test]
    fn no_answers_means_no_answer_section() {
        let prompt = DiagnosisPrompt::build(
            &["toux".to_string()],
            DoctorDirectory.resolve(None),
            &BTreeMap::new(),
        );
        assert!(!prompt.user.contains("clarification"));
    }
}
