//! API router.
//!
//! Each route answers `POST` with its operation and `GET` with a
//! capability document. Layers (outermost first): CORS, panic catcher.

use std::any::Any;

use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{self, CorsLayer};

use crate::api::endpoints;
use crate::api::error::ApiError;
use crate::api::types::ApiContext;

/// Build the API router over a shared context.
pub fn api_router(ctx: ApiContext) -> Router {
    let permissive_cors = CorsLayer::new()
        .allow_origin(cors::Any)
        .allow_methods(cors::Any)
        .allow_headers(cors::Any);

    Router::new()
        .route(
            "/diagnosis",
            post(endpoints::diagnosis::diagnose)
                .get(endpoints::capabilities::diagnosis)
                .options(endpoints::diagnosis::preflight),
        )
        .route(
            "/clarification",
            post(endpoints::clarification::clarify).get(endpoints::capabilities::clarification),
        )
        .route(
            "/medical-chat",
            post(endpoints::chat::respond).get(endpoints::capabilities::chat),
        )
        .route(
            "/medical-search",
            post(endpoints::search::search).get(endpoints::capabilities::search),
        )
        .with_state(ctx)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(permissive_cors)
}

/// Panics inside handlers become the standard 500 body.
fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    ApiError::Internal(format!("handler panicked: {detail}")).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Method, Request, StatusCode};
    use tower::ServiceExt;

    fn app() -> Router {
        api_router(ApiContext::offline())
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn send(request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = app().oneshot(request).await.unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), 1024 * 1024).await.unwrap();
        let json = if body.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&body).unwrap()
        };
        (status, json)
    }

    #[tokio::test]
    async fn diagnosis_french_scenario_uses_static_database() {
        let (status, json) = send(post_json(
            "/diagnosis",
            r#"{"symptoms": ["J'ai de la fièvre et des maux de tête"]}"#,
        ))
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["aiMode"], "static-database");
        assert_eq!(json["condition"], "Grippe saisonnière");
        assert!(["medium", "high", "critical"].contains(&json["urgency"].as_str().unwrap()));
        assert!(!json["recommendations"].as_array().unwrap().is_empty());
        assert!(json.get("fromCache").is_none());
    }

    #[tokio::test]
    async fn diagnosis_without_symptoms_is_400() {
        let (status, json) = send(post_json("/diagnosis", r#"{"symptoms": []}"#)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "Symptômes requis");

        let (status, json) = send(post_json("/diagnosis", "{}")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "Symptômes requis");
    }

    #[tokio::test]
    async fn malformed_json_is_400() {
        let (status, json) = send(post_json("/diagnosis", "{not json")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"].is_string());
    }

    #[tokio::test]
    async fn repeated_diagnosis_is_served_from_cache() {
        let app = app();
        let body = r#"{"symptoms": ["toux", "nez qui coule", "éternuements"], "doctorId": "generaliste"}"#;
        let first = app.clone().oneshot(post_json("/diagnosis", body)).await.unwrap();
        let first = to_bytes(first.into_body(), 1 << 20).await.unwrap();
        let second = app.oneshot(post_json("/diagnosis", body)).await.unwrap();
        let second = to_bytes(second.into_body(), 1 << 20).await.unwrap();

        let first: serde_json::Value = serde_json::from_slice(&first).unwrap();
        let mut second: serde_json::Value = serde_json::from_slice(&second).unwrap();
        assert_eq!(second["fromCache"], true);
        assert_eq!(second["doctorId"], "generaliste");
        second.as_object_mut().unwrap().remove("fromCache");
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn clarification_includes_pain_and_fever_questions() {
        let (status, json) = send(post_json(
            "/clarification",
            r#"{"symptoms": ["douleur et fièvre depuis deux jours"]}"#,
        ))
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["needsClarification"], true);
        let questions = json["questions"].as_array().unwrap();
        assert!(questions.len() <= 6);
        let ids: Vec<&str> = questions.iter().map(|q| q["id"].as_str().unwrap()).collect();
        assert!(ids.contains(&"pain_intensity"));
        assert!(ids.contains(&"fever_temperature"));
        assert_eq!(questions[0]["type"], "scale");
    }

    #[tokio::test]
    async fn clarification_without_symptoms_is_400() {
        let (status, _) = send(post_json("/clarification", r#"{"symptoms": ["  "]}"#)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn chat_wraps_response() {
        let (status, json) = send(post_json(
            "/medical-chat",
            r#"{"message": "J'ai de la fièvre", "conversationHistory": [{"role": "system", "content": "x"}]}"#,
        ))
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["success"], true);
        assert_eq!(json["message"], "J'ai de la fièvre");
        assert_eq!(json["response"]["type"], "symptom_analysis");
        assert_eq!(json["response"]["urgency"], "medium");
        assert!(json["timestamp"].is_string());
    }

    #[tokio::test]
    async fn chat_blank_message_is_400() {
        let (status, json) = send(post_json("/medical-chat", r#"{"message": "   "}"#)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"].is_string());
    }

    #[tokio::test]
    async fn search_defaults_to_quick() {
        let (status, json) = send(post_json("/medical-search", r#"{"query": "migraine"}"#)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["type"], "quick");
        assert_eq!(json["query"], "migraine");
        let results = json["results"].as_array().unwrap();
        assert!(!results.is_empty() && results.len() <= 5);
        assert_eq!(results[0]["title"], "Migraine");
    }

    #[tokio::test]
    async fn search_blank_query_or_bad_type_is_400() {
        let (status, _) = send(post_json("/medical-search", r#"{"query": ""}"#)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let (status, _) =
            send(post_json("/medical-search", r#"{"query": "toux", "type": "fuzzy"}"#)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn get_returns_capability_document() {
        for uri in ["/diagnosis", "/clarification", "/medical-chat", "/medical-search"] {
            let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
            let (status, json) = send(request).await;
            assert_eq!(status, StatusCode::OK, "{uri}");
            assert_eq!(json["endpoint"], uri);
            assert_eq!(json["version"], crate::config::APP_VERSION);
            assert!(!json["features"].as_array().unwrap().is_empty());
        }
    }

    #[tokio::test]
    async fn options_diagnosis_returns_cors_headers_without_body() {
        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri("/diagnosis")
            .header("origin", "http://localhost:8081")
            .header("access-control-request-method", "POST")
            .body(Body::empty())
            .unwrap();
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()["access-control-allow-origin"],
            "*"
        );
        let body = to_bytes(response.into_body(), 1024).await.unwrap();
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn post_responses_carry_cors_header() {
        let mut request = post_json("/diagnosis", r#"{"symptoms": ["toux"]}"#);
        request
            .headers_mut()
            .insert("origin", "http://localhost:8081".parse().unwrap());
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.headers()["access-control-allow-origin"], "*");
    }

    #[tokio::test]
    async fn unknown_route_is_404() {
        let request = Request::builder().uri("/nope").body(Body::empty()).unwrap();
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    async fn boom() -> &'static str {
        panic!("boom")
    }

    #[tokio::test]
    async fn handler_panic_becomes_500() {
        let router = Router::new()
            .route("/boom", get(boom))
            .layer(CatchPanicLayer::custom(panic_response));
        let request = Request::builder().uri("/boom").body(Body::empty()).unwrap();
        let response = router.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = to_bytes(response.into_body(), 1024).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "internal server error");
    }
}
