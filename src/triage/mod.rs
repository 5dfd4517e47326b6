//! Keyword-based urgency escalation shared by diagnosis and chat.

pub mod classifier;
pub mod keywords;

pub use classifier::UrgencyClassifier;
pub use keywords::{KeywordLevel, UrgencyContext, UrgencyKeywordTable};
