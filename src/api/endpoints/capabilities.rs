//! `GET` on each route: static description of what the route does.

use axum::Json;
use serde::Serialize;

use crate::config::{APP_NAME, APP_VERSION};

#[derive(Debug, Serialize)]
pub struct Capabilities {
    pub service: &'static str,
    pub endpoint: &'static str,
    pub version: &'static str,
    pub description: &'static str,
    pub features: &'static [&'static str],
}

fn document(
    endpoint: &'static str,
    description: &'static str,
    features: &'static [&'static str],
) -> Json<Capabilities> {
    Json(Capabilities {
        service: APP_NAME,
        endpoint,
        version: APP_VERSION,
        description,
        features,
    })
}

pub async fn diagnosis() -> Json<Capabilities> {
    document(
        "/diagnosis",
        "Analyse de symptômes avec repli sur la base médicale locale",
        &[
            "llm-provider-fallback",
            "static-database",
            "urgency-escalation",
            "treatment-lookup",
            "doctor-personas",
            "result-cache",
        ],
    )
}

pub async fn clarification() -> Json<Capabilities> {
    document(
        "/clarification",
        "Questions de précision avant diagnostic",
        &["pain", "fever", "respiratory", "digestive", "general"],
    )
}

pub async fn chat() -> Json<Capabilities> {
    document(
        "/medical-chat",
        "Triage conversationnel par mots-clés",
        &["symptom-detection", "urgency-triage", "conversation-history", "search-recommendations"],
    )
}

pub async fn search() -> Json<Capabilities> {
    document(
        "/medical-search",
        "Recherche dans les affections et médicaments",
        &["quick", "full", "conditions", "medications"],
    )
}
