pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    http::{Method, StatusCode, Uri},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};

use crate::generation::handlers as generation;
use crate::imperfection::handlers as imperfection;
use crate::layout::handlers as layout;
use crate::render::handlers as render;
use crate::state::AppState;

/// JSON request bodies up to 10 MiB (long annotated streams).
pub const BODY_LIMIT_BYTES: usize = 10 * 1024 * 1024;

const ENDPOINTS: [&str; 5] = [
    "/health",
    "/api/v1/typewriter/transform",
    "/api/v1/typewriter/reveal-plan",
    "/api/v1/typewriter/export",
    "/api/generate-text",
];

async fn not_found(method: Method, uri: Uri) -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": {
                "code": "NOT_FOUND",
                "message": format!("Endpoint not found: {method} {}", uri.path())
            },
            "available_endpoints": ENDPOINTS
        })),
    )
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Typewriter API
        .route(
            "/api/v1/typewriter/transform",
            post(imperfection::handle_transform),
        )
        .route(
            "/api/v1/typewriter/reveal-plan",
            post(render::handle_reveal_plan),
        )
        .route("/api/v1/typewriter/export", post(layout::handle_export))
        // Text generation
        .route("/api/generate-text", post(generation::handle_generate_text))
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request};
    use tower::ServiceExt;

    use crate::llm_client::LlmError;
    use crate::state::test_support::StubGenerator;

    fn app() -> Router {
        build_router(AppState::for_tests(Arc::new(StubGenerator::replying(
            "The typewriter clacked on.",
        ))))
    }

    async fn send(app: Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => request
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => request.body(Body::empty()),
        }
        .unwrap();

        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        // extractor rejections answer in plain text
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    async fn post_json(uri: &str, body: Value) -> (StatusCode, Value) {
        send(app(), Method::POST, uri, Some(body)).await
    }

    // ── health / fallback ───────────────────────────────────────────────────

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send(app(), Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "typewriter");
        assert!(body["timestamp"].is_string());
    }

    #[tokio::test]
    async fn test_unknown_route_lists_endpoints() {
        let (status, body) = send(app(), Method::GET, "/api/nope", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
        assert_eq!(body["available_endpoints"].as_array().unwrap().len(), 5);
    }

    // ── transform ───────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_transform_round_trip() {
        let (status, body) = post_json(
            "/api/v1/typewriter/transform",
            json!({"text": "the cat sat", "level": "minimal", "seed": 4}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["seed"], 4);
        assert_eq!(body["level"], "minimal");
        // a stuck key can double a word
        assert!(body["characters"].as_array().unwrap().len() >= 11);
        assert!(body["markup"].is_string());
    }

    #[tokio::test]
    async fn test_transform_unknown_level_is_400() {
        let (status, body) = post_json(
            "/api/v1/typewriter/transform",
            json!({"text": "hello", "level": "extreme"}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "INVALID_LEVEL");
    }

    #[tokio::test]
    async fn test_transform_blank_text_is_validation_error() {
        let (status, body) = post_json(
            "/api/v1/typewriter/transform",
            json!({"text": "  ", "level": "light"}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    // ── reveal plan ─────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_reveal_plan() {
        let (status, body) = post_json(
            "/api/v1/typewriter/reveal-plan",
            json!({"characters": [{"glyph": "a"}, {"glyph": "b", "effects": ["heavy"]}], "seed": 2}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["mode"], "natural");
        assert_eq!(body["delays_ms"].as_array().unwrap().len(), 2);
    }

    // ── export ──────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_transform_then_export() {
        let (_, transformed) = post_json(
            "/api/v1/typewriter/transform",
            json!({"text": "Dear Sir,\n\nThe ribbon is dry.", "level": "heavy", "seed": 7}),
        )
        .await;

        let (status, body) = post_json(
            "/api/v1/typewriter/export",
            json!({
                "characters": transformed["characters"],
                "title": "Letter",
                "config": {"show_branding": true}
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert!(body["filename"].as_str().unwrap().starts_with("typewriter-"));
        assert!(body["filename"].as_str().unwrap().ends_with(".pdf"));
        let pages = body["document"]["pages"].as_array().unwrap();
        assert_eq!(pages.len(), 1);
        let commands = pages[0]["commands"].as_array().unwrap();
        assert!(commands.iter().any(|c| c["text"] == "Letter"));
        assert!(commands.iter().any(|c| c["kind"] == "glyph"));
    }

    #[tokio::test]
    async fn test_export_invalid_config_is_422() {
        let (status, body) = post_json(
            "/api/v1/typewriter/export",
            json!({"characters": [{"glyph": "a"}], "config": {"font_size": 0.0}}),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], "INVALID_LAYOUT_CONFIG");
    }

    #[tokio::test]
    async fn test_export_rejects_conflicting_effects() {
        let (status, _) = post_json(
            "/api/v1/typewriter/export",
            json!({"characters": [{"glyph": "a", "effects": ["spaced", "tight"]}]}),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_oversized_body_is_rejected() {
        let text = "a".repeat(BODY_LIMIT_BYTES + 1);
        let (status, _) = post_json(
            "/api/v1/typewriter/transform",
            json!({"text": text, "level": "light"}),
        )
        .await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    }

    // ── text generation ─────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_generate_text() {
        let (status, body) = post_json(
            "/api/generate-text",
            json!({"prompt": "a memo", "pageLength": "quarter", "timeEra": "1950s"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["text"], "The typewriter clacked on.");
        assert_eq!(body["word_count"], 4);
        assert_eq!(body["model"], "gpt-3.5-turbo");
    }

    #[tokio::test]
    async fn test_generate_text_unconfigured_is_503() {
        let app = build_router(AppState::for_tests(Arc::new(StubGenerator::failing(
            || LlmError::NotConfigured,
        ))));
        let (status, body) = send(
            app,
            Method::POST,
            "/api/generate-text",
            Some(json!({"prompt": "a memo"})),
        )
        .await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"]["code"], "UPSTREAM_UNAVAILABLE");
    }
}
