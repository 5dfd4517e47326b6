//! `POST /medical-chat`.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::models::{ChatResponse, ChatTurn};

/// Longest accepted message, in characters.
const MAX_MESSAGE_CHARS: usize = 2000;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatBody {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub conversation_history: Vec<serde_json::Value>,
}

#[derive(Debug, Serialize)]
pub struct ChatReply {
    pub success: bool,
    pub message: String,
    pub response: ChatResponse,
    pub timestamp: DateTime<Utc>,
}

pub async fn respond(
    State(ctx): State<ApiContext>,
    body: Result<Json<ChatBody>, JsonRejection>,
) -> Result<Json<ChatReply>, ApiError> {
    let Json(body) = body?;
    let message = body.message.trim();
    if message.is_empty() {
        return Err(ApiError::BadRequest("Message requis".into()));
    }
    if message.chars().count() > MAX_MESSAGE_CHARS {
        return Err(ApiError::BadRequest(format!(
            "Message trop long (max {MAX_MESSAGE_CHARS} caractères)"
        )));
    }

    // Turns with unknown roles or shapes are skipped.
    let history: Vec<ChatTurn> = body
        .conversation_history
        .into_iter()
        .filter_map(|turn| serde_json::from_value(turn).ok())
        .collect();

    let response = ctx.chat.respond(message, &history);
    Ok(Json(ChatReply {
        success: true,
        message: message.to_string(),
        response,
        timestamp: Utc::now(),
    }))
}
