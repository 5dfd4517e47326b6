//! `POST /medical-search`.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::models::{SearchHit, SearchType};

#[derive(Debug, Deserialize)]
pub struct SearchBody {
    #[serde(default)]
    pub query: String,
    #[serde(rename = "type", default)]
    pub search_type: SearchType,
}

#[derive(Debug, Serialize)]
pub struct SearchReply {
    pub success: bool,
    pub query: String,
    #[serde(rename = "type")]
    pub search_type: SearchType,
    pub results: Vec<SearchHit>,
    pub timestamp: DateTime<Utc>,
}

pub async fn search(
    State(ctx): State<ApiContext>,
    body: Result<Json<SearchBody>, JsonRejection>,
) -> Result<Json<SearchReply>, ApiError> {
    let Json(body) = body?;
    let query = body.query.trim();
    if query.is_empty() {
        return Err(ApiError::BadRequest("Requête requise".into()));
    }

    let results = ctx.search.search(query, body.search_type);
    Ok(Json(SearchReply {
        success: true,
        query: query.to_string(),
        search_type: body.search_type,
        results,
        timestamp: Utc::now(),
    }))
}
