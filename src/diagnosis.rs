//! Diagnosis orchestration.
//!
//! `CheckCache → TryLLM(provider_i) → Fallback → Enrich → CacheStore → Respond`.
//! A cache hit short-circuits straight to the response with `fromCache`
//! set. Providers are tried in order; when none succeeds the deterministic
//! matcher runs, and when it finds nothing a generic low-confidence result
//! is synthesized. Urgency escalation and treatment lookup apply to every
//! path.

use std::sync::Arc;

use chrono::Utc;

use crate::cache::{CacheKey, DiagnosisCache};
use crate::catalog::DoctorDirectory;
use crate::matching::SymptomMatcher;
use crate::models::{
    generic_recommendations, AiMode, DiagnosisRequest, DiagnosisResult, Severity, Urgency,
};
use crate::providers::{DiagnosisPrompt, LlmDiagnosis, ProviderChain};
use crate::treatment::TreatmentResolver;
use crate::triage::UrgencyClassifier;

pub const GENERIC_CONDITION: &str = "Symptômes non spécifiques";
pub const GENERIC_PROBABILITY: u8 = 30;
const GENERIC_DESCRIPTION: &str = "Les symptômes décrits ne correspondent clairement à aucune \
                                   affection connue de notre base. Un avis médical permettra \
                                   de préciser la situation.";
const GENERIC_CATEGORY: &str = "général";

/// Answers shorter than this ("oui", "non", "7") never feed the matcher.
const MIN_ANSWER_CHARS: usize = 4;

#[derive(Debug, thiserror::Error)]
pub enum DiagnosisError {
    #[error("Symptômes requis")]
    NoSymptoms,
}

pub struct DiagnosisOrchestrator {
    matcher: SymptomMatcher,
    classifier: UrgencyClassifier,
    resolver: TreatmentResolver,
    providers: ProviderChain,
    cache: Arc<DiagnosisCache>,
    doctors: DoctorDirectory,
}

impl DiagnosisOrchestrator {
    pub fn new(
        matcher: SymptomMatcher,
        classifier: UrgencyClassifier,
        resolver: TreatmentResolver,
        providers: ProviderChain,
        cache: Arc<DiagnosisCache>,
    ) -> Self {
        Self {
            matcher,
            classifier,
            resolver,
            providers,
            cache,
            doctors: DoctorDirectory,
        }
    }

    pub fn providers(&self) -> &ProviderChain {
        &self.providers
    }

    pub async fn diagnose(
        &self,
        request: &DiagnosisRequest,
    ) -> Result<DiagnosisResult, DiagnosisError> {
        let symptoms: Vec<String> = request
            .symptoms
            .iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        if symptoms.is_empty() {
            return Err(DiagnosisError::NoSymptoms);
        }
        let doctor_id = request
            .doctor_id
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty());

        // CheckCache
        let key = CacheKey::new(&symptoms, doctor_id, &request.clarification_answers);
        if let Some(mut cached) = self.cache.get(&key) {
            tracing::debug!(condition = %cached.condition, "Diagnosis cache hit");
            cached.from_cache = true;
            cached.symptoms = symptoms;
            cached.doctor_id = doctor_id.map(str::to_string);
            return Ok(cached);
        }
        tracing::debug!("Diagnosis cache miss");

        let inputs = self.matcher_inputs(&symptoms, request);

        // TryLLM
        let mut result = None;
        if !self.providers.is_empty() {
            let doctor = self.doctors.resolve(doctor_id);
            let prompt = DiagnosisPrompt::build(&symptoms, doctor, &request.clarification_answers);
            if let Some((mode, diagnosis)) = self.providers.first_success(&prompt).await {
                result = Some(from_llm(mode, diagnosis, &symptoms));
            }
        }

        // Fallback
        let mut result = match result {
            Some(result) => result,
            None => self.deterministic(&symptoms, &inputs),
        };

        // Enrich
        result.urgency = self.classifier.escalate(&inputs, result.urgency);
        result.treatments = self
            .resolver
            .resolve(&result.condition, result.severity, &inputs)
            .cloned();
        result.doctor_id = doctor_id.map(str::to_string);

        // CacheStore
        self.cache.insert(key, result.clone());
        Ok(result)
    }

    /// Catalog-only diagnosis. Never fails: no match yields the generic result.
    pub fn deterministic(&self, symptoms: &[String], inputs: &[String]) -> DiagnosisResult {
        let Some(outcome) = self.matcher.best_match(inputs) else {
            tracing::info!(inputs = inputs.len(), "No catalog match; returning generic result");
            return generic_result(symptoms);
        };

        let record = outcome.condition;
        tracing::info!(
            condition = %record.name,
            catalog = outcome.catalog,
            score = outcome.score,
            "Deterministic diagnosis used"
        );
        let recommendations = if record.recommendations.is_empty() {
            generic_recommendations()
        } else {
            record.recommendations.clone()
        };
        DiagnosisResult {
            condition: record.name.clone(),
            probability: record.probability.min(100),
            description: record.description.clone(),
            symptoms: symptoms.to_vec(),
            recommendations,
            urgency: self.classifier.classify(inputs, record),
            timestamp: Utc::now(),
            differential_diagnosis: record.differential_diagnosis.clone(),
            next_steps: record.next_steps.clone(),
            category: record.category.clone(),
            severity: record.severity,
            ai_mode: AiMode::StaticDatabase,
            doctor_id: None,
            treatments: None,
            from_cache: false,
        }
    }

    /// Symptoms plus descriptive clarification answers.
    fn matcher_inputs(&self, symptoms: &[String], request: &DiagnosisRequest) -> Vec<String> {
        let mut inputs = symptoms.to_vec();
        inputs.extend(
            request
                .clarification_answers
                .values()
                .map(|answer| answer.trim())
                .filter(|answer| {
                    answer.chars().count() >= MIN_ANSWER_CHARS
                        && !answer.chars().all(|c| c.is_ascii_digit())
                })
                .map(str::to_string),
        );
        inputs
    }
}

fn from_llm(mode: AiMode, diagnosis: LlmDiagnosis, symptoms: &[String]) -> DiagnosisResult {
    DiagnosisResult {
        condition: diagnosis.condition,
        probability: diagnosis.probability.min(100),
        description: diagnosis.description,
        symptoms: symptoms.to_vec(),
        recommendations: diagnosis.recommendations,
        urgency: diagnosis.urgency,
        timestamp: Utc::now(),
        differential_diagnosis: diagnosis.differential_diagnosis,
        next_steps: diagnosis.next_steps,
        category: diagnosis.category,
        severity: diagnosis.severity,
        ai_mode: mode,
        doctor_id: None,
        treatments: None,
        from_cache: false,
    }
}

fn generic_result(symptoms: &[String]) -> DiagnosisResult {
    DiagnosisResult {
        condition: GENERIC_CONDITION.to_string(),
        probability: GENERIC_PROBABILITY,
        description: GENERIC_DESCRIPTION.to_string(),
        symptoms: symptoms.to_vec(),
        recommendations: generic_recommendations(),
        urgency: Urgency::Medium,
        timestamp: Utc::now(),
        differential_diagnosis: Vec::new(),
        next_steps: vec!["Consultez votre médecin traitant pour un examen clinique".to_string()],
        category: GENERIC_CATEGORY.to_string(),
        severity: Severity::Mild,
        ai_mode: AiMode::StaticDatabase,
        doctor_id: None,
        treatments: None,
        from_cache: false,
    }
}
