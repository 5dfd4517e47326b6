//! `POST /clarification`.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::diagnosis::DiagnosisError;
use crate::models::ClarificationResponse;

#[derive(Debug, Deserialize)]
pub struct ClarificationBody {
    #[serde(default)]
    pub symptoms: Vec<String>,
}

pub async fn clarify(
    State(ctx): State<ApiContext>,
    body: Result<Json<ClarificationBody>, JsonRejection>,
) -> Result<Json<ClarificationResponse>, ApiError> {
    let Json(body) = body?;
    let symptoms: Vec<String> = body
        .symptoms
        .into_iter()
        .filter(|s| !s.trim().is_empty())
        .collect();
    if symptoms.is_empty() {
        return Err(DiagnosisError::NoSymptoms.into());
    }
    Ok(Json(ctx.clarification.respond(&symptoms)))
}
