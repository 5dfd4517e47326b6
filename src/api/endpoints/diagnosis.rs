//! `POST /diagnosis`.

use std::collections::BTreeMap;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::models::{DiagnosisRequest, DiagnosisResult};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosisBody {
    #[serde(default)]
    pub symptoms: Vec<String>,
    pub doctor_id: Option<String>,
    /// Scale answers arrive as numbers, so values are taken as any JSON.
    #[serde(default)]
    pub clarification_answers: BTreeMap<String, serde_json::Value>,
}

impl From<DiagnosisBody> for DiagnosisRequest {
    fn from(body: DiagnosisBody) -> Self {
        let clarification_answers = body
            .clarification_answers
            .into_iter()
            .filter_map(|(question, value)| {
                let answer = match value {
                    serde_json::Value::String(s) => s,
                    serde_json::Value::Number(n) => n.to_string(),
                    serde_json::Value::Bool(b) => b.to_string(),
                    _ => return None,
                };
                Some((question, answer))
            })
            .collect();
        DiagnosisRequest {
            symptoms: body.symptoms,
            doctor_id: body.doctor_id,
            clarification_answers,
        }
    }
}

/// Diagnose a symptom list. Missing or blank symptoms → 400 "Symptômes requis".
pub async fn diagnose(
    State(ctx): State<ApiContext>,
    body: Result<Json<DiagnosisBody>, JsonRejection>,
) -> Result<Json<DiagnosisResult>, ApiError> {
    let Json(body) = body?;
    let result = ctx.diagnosis.diagnose(&body.into()).await?;
    Ok(Json(result))
}

/// `OPTIONS /diagnosis`: CORS headers only.
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}
