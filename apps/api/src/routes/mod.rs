pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::ingest::handle_extract_resume_text;
use crate::render::handlers::handle_export_pdf;
use crate::skills::handlers::handle_extract_skills;
use crate::state::AppState;
use crate::tailoring::handlers::handle_tailor;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/llm/ping", get(health::ping_handler))
        // Skills
        .route("/api/v1/skills/extract", post(handle_extract_skills))
        // Resume
        .route(
            "/api/v1/resume/extract-text",
            post(handle_extract_resume_text),
        )
        .route("/api/v1/tailor", post(handle_tailor))
        // Export
        .route("/api/v1/export/pdf", post(handle_export_pdf))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::skills::fetcher::{ExtractError, PageFetcher};
    use crate::skills::SkillExtractor;
    use crate::tailoring::TailoringEngine;

    struct OfflineFetcher;

    #[async_trait]
    impl PageFetcher for OfflineFetcher {
        async fn fetch(&self, _url: &str) -> Result<String, ExtractError> {
            Err(ExtractError::Status(503))
        }
    }

    fn mock_state() -> AppState {
        let config = Config {
            openai_api_key: None,
            force_mock: true,
            mock_seed: Some(7),
            port: 0,
            rust_log: "info".to_string(),
        };
        AppState {
            engine: TailoringEngine::new(None),
            extractor: SkillExtractor::new(Arc::new(OfflineFetcher)),
            llm: None,
            config,
        }
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_reports_mock_mode() {
        let app = build_router(mock_state());
        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["mode"], "mock");
    }

    #[tokio::test]
    async fn test_ping_without_credential_sends_nothing() {
        let app = build_router(mock_state());
        let response = app
            .oneshot(Request::get("/api/v1/llm/ping").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["ok"], false);
        assert!(body["reply"].is_null());
    }

    #[tokio::test]
    async fn test_tailor_missing_input_is_400() {
        let app = build_router(mock_state());
        let response = app
            .oneshot(post_json(
                "/api/v1/tailor",
                json!({ "resume_text": "  ", "job_desc": "Backend engineer" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_tailor_rejects_too_many_versions() {
        let app = build_router(mock_state());
        let response = app
            .oneshot(post_json(
                "/api/v1/tailor",
                json!({ "resume_text": "Built X.", "job_desc": "Go", "num_versions": 4 }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_tailor_mock_end_to_end() {
        let app = build_router(mock_state());
        let response = app
            .oneshot(post_json(
                "/api/v1/tailor",
                json!({
                    "resume_text": "Built X.\nLed Y.",
                    "job_desc": "Backend engineer",
                    "github_username": "octocat"
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        let versions = body["versions"].as_array().unwrap();
        assert_eq!(versions.len(), 2);
        for (i, view) in versions.iter().enumerate() {
            assert_eq!(view["index"], i + 1);
            let version = &view["version"];
            assert!(version["version_text"]
                .as_str()
                .unwrap()
                .starts_with("[Mocked Tailored Resume]"));
            let score = version["fit_score"].as_u64().unwrap();
            assert!((70..=95).contains(&score));
            assert_eq!(
                version["missing_skills"].as_array().unwrap().len(),
                version["learning_paths"].as_array().unwrap().len()
            );
            assert_eq!(view["source"]["mode"], "mocked");
        }
        assert_eq!(body["extraction"]["github"]["status"], "failed");
        assert_eq!(body["extraction"]["linkedin"]["status"], "no_input");
    }

    #[tokio::test]
    async fn test_tailor_same_seed_same_versions() {
        let request = json!({
            "resume_text": "Built X.\nLed Y.",
            "job_desc": "Backend engineer",
            "seed": 42
        });

        let first = build_router(mock_state())
            .oneshot(post_json("/api/v1/tailor", request.clone()))
            .await
            .unwrap();
        let second = build_router(mock_state())
            .oneshot(post_json("/api/v1/tailor", request))
            .await
            .unwrap();

        let first = body_json(first).await;
        let second = body_json(second).await;
        assert_eq!(first["versions"], second["versions"]);
    }

    #[tokio::test]
    async fn test_export_empty_list_returns_pdf() {
        let app = build_router(mock_state());
        let response = app
            .oneshot(post_json("/api/v1/export/pdf", json!({ "versions": [] })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/pdf"
        );
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[tokio::test]
    async fn test_export_rejects_invalid_version() {
        let app = build_router(mock_state());
        let response = app
            .oneshot(post_json(
                "/api/v1/export/pdf",
                json!({ "versions": [{
                    "version_text": "Body",
                    "selected_skills": [],
                    "fit_score": 80,
                    "missing_skills": ["AWS"],
                    "learning_paths": []
                }] }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_skills_extract_without_identifiers() {
        let app = build_router(mock_state());
        let response = app
            .oneshot(post_json("/api/v1/skills/extract", json!({})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["skills"], json!([]));
    }
}
