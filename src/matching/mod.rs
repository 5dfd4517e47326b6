//! Symptom matching: free-text normalization and catalog scoring.

pub mod matcher;
pub mod normalizer;

pub use matcher::{MatchOutcome, SymptomMatcher};
pub use normalizer::{SubstringNormalizer, SymptomNormalizer};
