// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! POST /api/generate-image endpoint tests
//!
//! These tests verify that:
//! - Completed predictions come back as `succeeded` with the image URL
//! - Unfinished predictions come back as HTTP 200 `processing` with a hint
//! - Blank prompts and malformed bodies are rejected with 400
//! - A missing model credential fails with 500 before any model call
//! - Upstream error statuses and messages are propagated

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
};
use serde_json::{json, Value};
use tower::util::ServiceExt; // for `oneshot`

use crate::common::{body_json, BackendReply, MockBackend, TestHarness, TEST_TOKEN};
use flux_studio::diffusion::{AspectRatio, OutputFormat};

fn generate_request(body: Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/api/generate-image")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_succeeded_prediction_returns_output() {
    let backend = MockBackend::returning(json!({
        "id": "pred-1",
        "status": "succeeded",
        "output": "https://replicate.delivery/out.jpg",
        "completed_at": "2025-06-01T12:00:00Z"
    }));
    let harness = TestHarness::new(backend.clone(), Some(TEST_TOKEN));

    let response = harness
        .app()
        .oneshot(generate_request(json!({"prompt": "a lighthouse at dusk"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["id"], "pred-1");
    assert_eq!(body["status"], "succeeded");
    assert_eq!(body["output"], "https://replicate.delivery/out.jpg");
    assert_eq!(body["completed_at"], "2025-06-01T12:00:00Z");
    assert!(body.get("error").is_none());

    assert_eq!(backend.call_count(), 1);
    assert_eq!(backend.last_token().as_deref(), Some(TEST_TOKEN));
}

#[tokio::test]
async fn test_defaults_applied_to_model_input() {
    let backend = MockBackend::returning(json!({"id": "p", "status": "succeeded", "output": "u"}));
    let harness = TestHarness::new(backend.clone(), Some(TEST_TOKEN));

    harness
        .app()
        .oneshot(generate_request(json!({
            "prompt": "a fox",
            "output_format": "tiff",
            "aspect_ratio": "5:4"
        })))
        .await
        .unwrap();

    let input = backend.last_input().unwrap();
    assert_eq!(input.prompt, "a fox");
    assert_eq!(input.output_format, OutputFormat::Jpg);
    assert_eq!(input.aspect_ratio, AspectRatio::Square);
    assert_eq!(input.safety_tolerance, 2);
    assert!(!input.prompt_upsampling);
    assert!(input.input_image.is_none());
}

#[tokio::test]
async fn test_input_image_defaults_to_matching_ratio() {
    let backend = MockBackend::returning(json!({"id": "p", "status": "succeeded", "output": "u"}));
    let harness = TestHarness::new(backend.clone(), Some(TEST_TOKEN));

    harness
        .app()
        .oneshot(generate_request(json!({
            "prompt": "make it snow",
            "input_image": "https://cdn.test/ai-images/u/1-a.png",
            "output_format": "png"
        })))
        .await
        .unwrap();

    let input = backend.last_input().unwrap();
    assert_eq!(input.aspect_ratio, AspectRatio::MatchInputImage);
    assert_eq!(input.output_format, OutputFormat::Png);
    assert_eq!(
        input.input_image.as_deref(),
        Some("https://cdn.test/ai-images/u/1-a.png")
    );
}

#[tokio::test]
async fn test_unfinished_prediction_is_processing_with_hint() {
    let backend = MockBackend::returning(json!({"id": "pred-2", "status": "starting"}));
    let harness = TestHarness::new(backend, Some(TEST_TOKEN));

    let response = harness
        .app()
        .oneshot(generate_request(json!({"prompt": "a slow render"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["id"], "pred-2");
    assert_eq!(body["status"], "processing");
    assert_eq!(
        body["error"],
        "Generation is still in progress. Please try again."
    );
    assert!(body.get("output").is_none());
}

#[tokio::test]
async fn test_failed_prediction_reports_error() {
    let backend = MockBackend::returning(json!({
        "id": "pred-3",
        "status": "failed",
        "error": "NSFW content detected"
    }));
    let harness = TestHarness::new(backend, Some(TEST_TOKEN));

    let response = harness
        .app()
        .oneshot(generate_request(json!({"prompt": "something"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "failed");
    assert_eq!(body["error"], "NSFW content detected");
}

#[tokio::test]
async fn test_blank_prompt_rejected_without_model_call() {
    let backend = MockBackend::returning(json!({"id": "p", "status": "succeeded", "output": "u"}));
    let harness = TestHarness::new(backend.clone(), Some(TEST_TOKEN));

    for body in [json!({"prompt": "   "}), json!({}), json!({"prompt": 42})] {
        let response = harness.app().oneshot(generate_request(body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Prompt is required");
    }

    assert_eq!(backend.call_count(), 0);
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let backend = MockBackend::returning(json!({"id": "p"}));
    let harness = TestHarness::new(backend.clone(), Some(TEST_TOKEN));

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/generate-image")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = harness.app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(backend.call_count(), 0);
}

#[tokio::test]
async fn test_missing_credential_is_configuration_error() {
    let backend = MockBackend::returning(json!({"id": "p", "status": "succeeded", "output": "u"}));
    let harness = TestHarness::new(backend.clone(), None);

    let response = harness
        .app()
        .oneshot(generate_request(json!({"prompt": "a fox"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["error"], "API configuration error");
    assert_eq!(backend.call_count(), 0);
}

#[tokio::test]
async fn test_upstream_status_propagated() {
    let backend = MockBackend::replying(BackendReply::Status(
        422,
        "Invalid input_image URL".to_string(),
    ));
    let harness = TestHarness::new(backend, Some(TEST_TOKEN));

    let response = harness
        .app()
        .oneshot(generate_request(json!({"prompt": "a fox"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Invalid input_image URL");
}

#[tokio::test]
async fn test_transport_failure_is_internal_error() {
    let backend = MockBackend::replying(BackendReply::Transport("connection reset".to_string()));
    let harness = TestHarness::new(backend, Some(TEST_TOKEN));

    let response = harness
        .app()
        .oneshot(generate_request(json!({"prompt": "a fox"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_json_body_accepted_without_json_content_type() {
    let backend = MockBackend::returning(json!({"id": "p", "status": "succeeded", "output": "u"}));
    let harness = TestHarness::new(backend.clone(), Some(TEST_TOKEN));

    let bare = Request::builder()
        .method(Method::POST)
        .uri("/api/generate-image")
        .body(Body::from(r#"{"prompt":"a fox"}"#))
        .unwrap();
    let response = harness.app().oneshot(bare).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Browser fetch with a string body and no explicit header
    let text_plain = Request::builder()
        .method(Method::POST)
        .uri("/api/generate-image")
        .header("content-type", "text/plain;charset=UTF-8")
        .body(Body::from(r#"{"prompt":"a fox"}"#))
        .unwrap();
    let response = harness.app().oneshot(text_plain).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    assert_eq!(backend.call_count(), 2);
    assert_eq!(backend.last_input().unwrap().prompt, "a fox");
}

#[tokio::test]
async fn test_empty_body_is_bad_request() {
    let backend = MockBackend::returning(json!({"id": "p"}));
    let harness = TestHarness::new(backend.clone(), Some(TEST_TOKEN));

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/generate-image")
        .body(Body::empty())
        .unwrap();
    let response = harness.app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Invalid request body");
    assert_eq!(backend.call_count(), 0);
}
