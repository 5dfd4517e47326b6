//! Time-bounded memoization of diagnosis results.
//!
//! Entries expire after a fixed TTL and are dropped on access or on the
//! next insert. Once over capacity, the oldest entry by insertion order is
//! evicted. The clock is injected so expiry can be tested without sleeping.

use std::collections::{BTreeMap, HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crate::config::AppConfig;
use crate::models::DiagnosisResult;

pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Canonical form of a diagnosis request.
///
/// Symptoms are trimmed, lower-cased, whitespace-collapsed, sorted and
/// de-duplicated, so reordering or re-casing the input hits the same entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn new(
        symptoms: &[String],
        doctor_id: Option<&str>,
        answers: &BTreeMap<String, String>,
    ) -> Self {
        let canonical = |s: &str| {
            s.split_whitespace()
                .collect::<Vec<_>>()
                .join(" ")
                .to_lowercase()
        };

        let mut normalized: Vec<String> = symptoms
            .iter()
            .map(|s| canonical(s))
            .filter(|s| !s.is_empty())
            .collect();
        normalized.sort();
        normalized.dedup();

        let doctor = doctor_id.map(|d| d.trim().to_lowercase()).unwrap_or_default();
        let answers: Vec<String> = answers
            .iter()
            .filter(|(_, v)| !v.trim().is_empty())
            .map(|(k, v)| format!("{}={}", k.trim(), canonical(v)))
            .collect();

        Self(format!(
            "{}\u{1f}{}\u{1f}{}",
            normalized.join("\u{1e}"),
            doctor,
            answers.join("\u{1e}")
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Default)]
struct CacheState {
    entries: HashMap<CacheKey, (Instant, DiagnosisResult)>,
    order: VecDeque<CacheKey>,
}

impl CacheState {
    fn remove(&mut self, key: &CacheKey) {
        self.entries.remove(key);
        self.order.retain(|k| k != key);
    }

    fn purge_expired(&mut self, now: Instant, ttl: Duration) {
        self.entries
            .retain(|_, (stored_at, _)| now.duration_since(*stored_at) < ttl);
        let Self { entries, order } = self;
        order.retain(|k| entries.contains_key(k));
    }
}

pub struct DiagnosisCache {
    state: Mutex<CacheState>,
    ttl: Duration,
    capacity: usize,
    clock: Arc<dyn Clock>,
}

impl DiagnosisCache {
    pub fn new(ttl: Duration, capacity: usize, clock: Arc<dyn Clock>) -> Self {
        Self {
            state: Mutex::new(CacheState::default()),
            ttl,
            capacity,
            clock,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.cache_ttl, config.cache_capacity, Arc::new(SystemClock))
    }

    /// Never stores anything.
    pub fn disabled() -> Self {
        Self::new(Duration::ZERO, 0, Arc::new(SystemClock))
    }

    pub fn is_enabled(&self) -> bool {
        self.capacity > 0 && !self.ttl.is_zero()
    }

    /// Live entry for `key`, if any. Expired entries are dropped on access.
    pub fn get(&self, key: &CacheKey) -> Option<DiagnosisResult> {
        if !self.is_enabled() {
            return None;
        }
        let mut state = self.lock()?;
        let now = self.clock.now();
        let (stored_at, result) = state.entries.get(key)?;
        if now.duration_since(*stored_at) < self.ttl {
            return Some(result.clone());
        }
        state.remove(key);
        None
    }

    pub fn insert(&self, key: CacheKey, result: DiagnosisResult) {
        if !self.is_enabled() {
            return;
        }
        let Some(mut state) = self.lock() else {
            return;
        };
        let now = self.clock.now();
        state.purge_expired(now, self.ttl);

        if state.entries.contains_key(&key) {
            state.order.retain(|k| k != &key);
        }
        state.order.push_back(key.clone());
        state.entries.insert(key, (now, result));

        while state.entries.len() > self.capacity {
            match state.order.pop_front() {
                Some(oldest) => {
                    state.entries.remove(&oldest);
                }
                None => break,
            }
        }
    }

    pub fn len(&self) -> usize {
        self.lock().map(|s| s.entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// A poisoned lock degrades to a cache miss rather than failing requests.
    fn lock(&self) -> Option<std::sync::MutexGuard<'_, CacheState>> {
        match self.state.lock() {
            Ok(guard) => Some(guard),
            Err(_) => {
                tracing::warn!("Diagnosis cache lock poisoned; bypassing cache");
                None
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::{AiMode, Severity, Urgency};

    /// Clock advanced by hand.
    pub(crate) struct ManualClock {
        base: Instant,
        offset: Mutex<Duration>,
    }

    impl ManualClock {
        pub(crate) fn new() -> Self {
            Self {
                base: Instant::now(),
                offset: Mutex::new(Duration::ZERO),
            }
        }

        pub(crate) fn advance(&self, by: Duration) {
            *self.offset.lock().unwrap() += by;
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> Instant {
            self.base + *self.offset.lock().unwrap()
        }
    }

    fn result(condition: &str) -> DiagnosisResult {
        DiagnosisResult {
            condition: condition.to_string(),
            probability: 50,
            description: String::new(),
            symptoms: vec![],
            recommendations: vec!["Repos".into()],
            urgency: Urgency::Low,
            timestamp: chrono::Utc::now(),
            differential_diagnosis: vec![],
            next_steps: vec![],
            category: "test".into(),
            severity: Severity::Mild,
            ai_mode: AiMode::StaticDatabase,
            doctor_id: None,
            treatments: None,
            from_cache: false,
        }
    }

    fn key(symptoms: &[&str]) -> CacheKey {
        let symptoms: Vec<String> = symptoms.iter().map(|s| s.to_string()).collect();
        CacheKey::new(&symptoms, None, &BTreeMap::new())
    }

    fn cache(ttl_secs: u64, capacity: usize) -> (DiagnosisCache, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new());
        let cache = DiagnosisCache::new(Duration::from_secs(ttl_secs), capacity, clock.clone());
        (cache, clock)
    }

    #[test]
    fn key_ignores_order_case_whitespace_and_duplicates() {
        assert_eq!(
            key(&["Fièvre", "maux  de tête"]),
            key(&["  maux de tête", "fièvre", "FIÈVRE"])
        );
        assert_ne!(key(&["fièvre"]), key(&["toux"]));
    }

    #[test]
    fn key_includes_doctor_and_answers() {
        let symptoms = vec!["toux".to_string()];
        let none = CacheKey::new(&symptoms, None, &BTreeMap::new());
        let doctor = CacheKey::new(&symptoms, Some("Cardiologue"), &BTreeMap::new());
        assert_ne!(none, doctor);
        assert_eq!(
            doctor,
            CacheKey::new(&symptoms, Some("cardiologue "), &BTreeMap::new())
        );

        let mut answers = BTreeMap::new();
        answers.insert("pain_intensity".to_string(), "7".to_string());
        assert_ne!(none, CacheKey::new(&symptoms, None, &answers));
    }

    #[test]
    fn entries_expire_after_ttl() {
        let (cache, clock) = cache(300, 10);
        cache.insert(key(&["toux"]), result("Rhume"));

        clock.advance(Duration::from_secs(299));
        assert_eq!(cache.get(&key(&["toux"])).unwrap().condition, "Rhume");

        clock.advance(Duration::from_secs(1));
        assert!(cache.get(&key(&["toux"])).is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn oldest_insertion_is_evicted_over_capacity() {
        let (cache, _clock) = cache(300, 2);
        cache.insert(key(&["a"]), result("A"));
        cache.insert(key(&["b"]), result("B"));
        cache.insert(key(&["c"]), result("C"));

        assert_eq!(cache.len(), 2);
        assert!(cache.get(&key(&["a"])).is_none());
        assert!(cache.get(&key(&["b"])).is_some());
        assert!(cache.get(&key(&["c"])).is_some());
    }

    #[test]
    fn reinserting_refreshes_position() {
        let (cache, _clock) = cache(300, 2);
        cache.insert(key(&["a"]), result("A"));
        cache.insert(key(&["b"]), result("B"));
        cache.insert(key(&["a"]), result("A2"));
        cache.insert(key(&["c"]), result("C"));

        assert!(cache.get(&key(&["b"])).is_none());
        assert_eq!(cache.get(&key(&["a"])).unwrap().condition, "A2");
    }

    #[test]
    fn insert_purges_expired_entries() {
        let (cache, clock) = cache(60, 10);
        cache.insert(key(&["old"]), result("Old"));
        clock.advance(Duration::from_secs(45));
        cache.insert(key(&["live"]), result("Live"));
        clock.advance(Duration::from_secs(30));

        cache.insert(key(&["new"]), result("New"));
        assert_eq!(cache.len(), 2);
        assert!(cache.get(&key(&["live"])).is_some());
        assert!(cache.get(&key(&["old"])).is_none());
    }

    #[test]
    fn disabled_cache_stores_nothing() {
        let cache = DiagnosisCache::disabled();
        assert!(!cache.is_enabled());
        cache.insert(key(&["toux"]), result("Rhume"));
        assert!(cache.get(&key(&["toux"])).is_none());
        assert!(cache.is_empty());
    }
}
