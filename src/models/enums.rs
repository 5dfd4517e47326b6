use serde::{Deserialize, Serialize};

use super::ModelError;

/// Macro to generate enum with as_str + std::str::FromStr pattern.
/// Variant order is the rank order (`Ord`), lowest first.
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $s)] $variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = ModelError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(ModelError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

str_enum!(Severity {
    Mild => "mild",
    Moderate => "moderate",
    Severe => "severe",
    Critical => "critical",
});

str_enum!(Urgency {
    Low => "low",
    Medium => "medium",
    High => "high",
    Critical => "critical",
});

str_enum!(QuestionType {
    MultipleChoice => "multiple_choice",
    Text => "text",
    Scale => "scale",
    YesNo => "yes_no",
});

str_enum!(Importance {
    Low => "low",
    Medium => "medium",
    High => "high",
    Critical => "critical",
});

str_enum!(MedicationCategory {
    Otc => "OTC",
    Prescription => "Prescription",
    Natural => "Natural",
    Emergency => "Emergency",
});

str_enum!(AiMode {
    StaticDatabase => "static-database",
    Gemini => "gemini-medical",
    OpenAi => "openai-medical",
    OpenRouter => "openrouter-medical",
});

str_enum!(ChatResponseType {
    General => "general",
    FollowUp => "follow_up",
    SymptomAnalysis => "symptom_analysis",
    Emergency => "emergency",
});

str_enum!(SearchType {
    Quick => "quick",
    Full => "full",
});

str_enum!(ChatRole {
    User => "user",
    Assistant => "assistant",
});

impl Urgency {
    /// Parse leniently: unknown labels (including French ones) map to `Medium`.
    pub fn parse_lenient(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "low" | "faible" | "basse" => Self::Low,
            "high" | "haute" | "élevée" | "elevee" => Self::High,
            "critical" | "critique" | "urgence" => Self::Critical,
            _ => Self::Medium,
        }
    }
}

impl Severity {
    /// Parse leniently: unknown labels map to `Moderate`.
    pub fn parse_lenient(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "mild" | "légère" | "legere" | "léger" => Self::Mild,
            "severe" | "sévère" | "grave" => Self::Severe,
            "critical" | "critique" => Self::Critical,
            _ => Self::Moderate,
        }
    }
}

impl Default for SearchType {
    fn default() -> Self {
        Self::Quick
    }
}
