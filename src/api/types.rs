//! Shared state for the API router.

use std::sync::Arc;

use crate::cache::DiagnosisCache;
use crate::catalog::{CatalogSet, TreatmentCatalog};
use crate::chat::ChatResponder;
use crate::clarification::ClarificationGenerator;
use crate::config::AppConfig;
use crate::diagnosis::DiagnosisOrchestrator;
use crate::matching::{SubstringNormalizer, SymptomMatcher, SymptomNormalizer};
use crate::providers::{ProviderChain, ProviderError};
use crate::search::MedicalSearch;
use crate::treatment::TreatmentResolver;
use crate::triage::{UrgencyClassifier, UrgencyKeywordTable};

/// Shared context for all API routes. Built once at startup.
#[derive(Clone)]
pub struct ApiContext {
    pub diagnosis: Arc<DiagnosisOrchestrator>,
    pub clarification: ClarificationGenerator,
    pub chat: Arc<ChatResponder>,
    pub search: Arc<MedicalSearch>,
}

impl ApiContext {
    /// Built-in catalogs plus the providers configured in `config`.
    pub fn new(config: &AppConfig) -> Result<Self, ProviderError> {
        let providers = ProviderChain::from_config(config)?;
        Ok(Self::with_providers(config, providers))
    }

    pub fn with_providers(config: &AppConfig, providers: ProviderChain) -> Self {
        let catalogs = Arc::new(CatalogSet::builtin());
        let treatments = Arc::new(TreatmentCatalog::builtin());
        let keywords = Arc::new(UrgencyKeywordTable::builtin());
        let normalizer: Arc<dyn SymptomNormalizer> = Arc::new(SubstringNormalizer);

        let diagnosis = DiagnosisOrchestrator::new(
            SymptomMatcher::new(catalogs.clone(), normalizer.clone()),
            UrgencyClassifier::new(keywords.clone(), normalizer.clone()),
            TreatmentResolver::new(treatments.clone(), catalogs.clone(), normalizer),
            providers,
            Arc::new(DiagnosisCache::from_config(config)),
        );
        let search = Arc::new(MedicalSearch::new(catalogs, treatments));
        let chat = ChatResponder::new(keywords).with_search_engine(search.clone());

        tracing::info!(
            providers = diagnosis.providers().len(),
            cache_capacity = config.cache_capacity,
            cache_ttl_secs = config.cache_ttl.as_secs(),
            "API context ready"
        );

        Self {
            diagnosis: Arc::new(diagnosis),
            clarification: ClarificationGenerator,
            chat: Arc::new(chat),
            search,
        }
    }

    /// No providers, default cache.
    pub fn offline() -> Self {
        Self::with_providers(&AppConfig::default(), ProviderChain::empty())
    }
}
