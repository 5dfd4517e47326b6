use serde::{Deserialize, Serialize};

use super::enums::{ChatResponseType, ChatRole, Urgency};

/// One prior turn of the conversation, as sent by the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub content: String,
}

/// Canned conversational reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    #[serde(rename = "type")]
    pub response_type: ChatResponseType,
    pub text: String,
    pub follow_up_questions: Vec<String>,
    pub follow_up_options: Vec<String>,
    pub recommendations: Vec<String>,
    pub urgency: Urgency,
    /// Canonical label of the symptom the reply is about, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detected_symptom: Option<String>,
}
