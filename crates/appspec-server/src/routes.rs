//! HTTP routes
//!
//! One POST endpoint wraps the generator; everything else is trivial.
//! Policy (fixed here, since the upstream variants disagreed):
//! malformed *requests* get an error status, malformed *generation*
//! gets a success response carrying the fallback plus an advisory
//! note.

use appspec_core::{Category, GenerateRequest, Preview, SpecGenerator};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tower_http::cors::CorsLayer;

/// Marker attached to responses served from the template path
pub(crate) const FALLBACK_NOTE: &str = "fallback_used";

/// Shared per-process state
#[derive(Debug, Clone)]
pub(crate) struct AppState {
    /// The generator, carrying the injected model capability
    pub(crate) generator: SpecGenerator,
}

/// Build the API router
pub(crate) fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/parse-spec", post(parse_spec))
        .route("/api/health", get(health))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Request body for `POST /api/parse-spec`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ParseRequest {
    /// Free-text description; `text` is accepted as an alias
    #[serde(alias = "text")]
    pub(crate) transcript: Option<String>,
    /// Optional caller-supplied JSON Schema
    pub(crate) schema: Option<Value>,
    /// Optional language tag ("en", "he", ...)
    pub(crate) lang: Option<String>,
    /// Optional category preset, skipping classification
    pub(crate) preset: Option<String>,
    /// Include canned preview data in the response
    #[serde(default)]
    pub(crate) preview: bool,
}

/// Success envelope
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ParseResponse {
    /// The generated-or-fallback spec
    pub(crate) app_spec: Value,
    /// Advisory marker when the fallback path was taken
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) note: Option<&'static str>,
    /// Canned preview data, on request
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) preview: Option<Preview>,
}

/// Client-error envelope
#[derive(Debug, Serialize)]
pub(crate) struct ErrorResponse {
    /// What the caller got wrong
    pub(crate) error: String,
}

async fn health() -> Json<Value> {
    Json(serde_json::json!({ "ok": true, "version": appspec_core::VERSION }))
}

async fn parse_spec(
    State(state): State<AppState>,
    Json(body): Json<ParseRequest>,
) -> Response {
    let transcript = match body.transcript.as_deref().map(str::trim) {
        Some(t) if !t.is_empty() => t.to_string(),
        _ => return bad_request("missing required field(s): transcript"),
    };

    let preset = match body.preset.as_deref() {
        Some(tag) => match tag.parse::<Category>() {
            Ok(category) => Some(category),
            Err(e) => return bad_request(e.to_string()),
        },
        None => None,
    };

    let request = GenerateRequest {
        transcript,
        lang: body.lang,
        schema: body.schema,
        preset,
    };

    let generated = match state.generator.generate(&request).await {
        Ok(generated) => generated,
        // Only an uncompilable caller schema lands here.
        Err(e) => return bad_request(e.to_string()),
    };

    let preview = body.preview.then(|| appspec_core::preview(generated.category));
    let note = generated.is_fallback().then_some(FALLBACK_NOTE);

    (
        StatusCode::OK,
        Json(ParseResponse {
            app_spec: generated.spec,
            note,
            preview,
        }),
    )
        .into_response()
}

fn bad_request(message: impl Into<String>) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
        .into_response()
}

/// Success response carrying the generic fallback, used when a request
/// panics somewhere below us
pub(crate) fn panic_fallback_response() -> axum::http::Response<axum::body::Body> {
    let generated = appspec_core::default_fallback();
    let envelope = ParseResponse {
        app_spec: generated.spec,
        note: Some(FALLBACK_NOTE),
        preview: None,
    };
    let payload = serde_json::to_vec(&envelope).unwrap_or_default();

    axum::http::Response::builder()
        .status(StatusCode::OK)
        .header(axum::http::header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from(payload))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use tower::ServiceExt;

    fn test_router() -> Router {
        router(AppState {
            generator: SpecGenerator::without_model(),
        })
    }

    async fn post_json(router: Router, body: Value) -> (StatusCode, Value) {
        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/parse-spec")
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    #[tokio::test]
    async fn fallback_response_is_success_with_note() {
        let (status, body) = post_json(
            test_router(),
            json!({ "transcript": "track my daily todos" }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["note"], FALLBACK_NOTE);
        assert_eq!(body["appSpec"]["appName"], "Task Manager");
    }

    #[tokio::test]
    async fn text_alias_is_accepted() {
        let (status, body) =
            post_json(test_router(), json!({ "text": "invoices for my clients" })).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["appSpec"]["appName"], "Client & Invoice Tracker");
    }

    #[tokio::test]
    async fn missing_transcript_is_client_error() {
        let (status, body) = post_json(test_router(), json!({})).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("transcript"));
    }

    #[tokio::test]
    async fn blank_transcript_is_client_error() {
        let (status, _) = post_json(test_router(), json!({ "transcript": "   " })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn unknown_preset_is_client_error() {
        let (status, body) = post_json(
            test_router(),
            json!({ "transcript": "anything", "preset": "crm" }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("crm"));
    }

    #[tokio::test]
    async fn preset_selects_template_directly() {
        let (status, body) = post_json(
            test_router(),
            json!({ "transcript": "unrelated text", "preset": "sales" }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["appSpec"]["appName"], "Client & Invoice Tracker");
    }

    #[tokio::test]
    async fn bad_caller_schema_is_client_error() {
        let (status, body) = post_json(
            test_router(),
            json!({ "transcript": "todos", "schema": { "type": 42 } }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("invalid schema"));
    }

    #[tokio::test]
    async fn preview_flag_adds_demo_data() {
        let (status, body) = post_json(
            test_router(),
            json!({ "transcript": "invoices", "preview": true }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["preview"]["tableRows"].as_array().unwrap().len(), 3);
        assert!(body["preview"]["chart"].is_array());
    }

    #[tokio::test]
    async fn health_is_ok() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .uri("/api/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn get_on_parse_route_is_method_not_allowed() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .uri("/api/parse-spec")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn panic_fallback_is_schema_valid_success() {
        let response = panic_fallback_response();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["note"], FALLBACK_NOTE);
        assert!(appspec_core::SpecValidator::bundled().is_valid(&body["appSpec"]));
    }
}
