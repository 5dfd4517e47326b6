use serde::{Deserialize, Serialize};

use super::enums::{Importance, QuestionType};

/// A follow-up question asked before diagnosis. Generated per request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClarificationQuestion {
    pub id: String,
    pub question: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    /// Present and non-empty for `multiple_choice` and `scale`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    pub importance: Importance,
    pub category: String,
}

impl ClarificationQuestion {
    /// Whether `options` is consistent with `question_type`.
    pub fn is_well_formed(&self) -> bool {
        match self.question_type {
            QuestionType::MultipleChoice | QuestionType::Scale => {
                self.options.as_ref().is_some_and(|o| !o.is_empty())
            }
            QuestionType::Text | QuestionType::YesNo => true,
        }
    }
}

/// Body of `POST /clarification`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClarificationResponse {
    pub needs_clarification: bool,
    pub questions: Vec<ClarificationQuestion>,
    pub reasoning: String,
}
