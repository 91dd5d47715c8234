// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! End-to-end handler tests for POST /embed
//!
//! Drives the router directly with tower's `oneshot`, the local backend
//! behind it. Covers the success envelope, every validation failure mode,
//! the validation short-circuit, and cross-request isolation.

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use embed_node::api::{create_app, AppState, EmbedResponse, EmbedService, ErrorResponse};
use embed_node::embeddings::{
    BackendError, EmbeddingBackend, LocalEmbeddingModel, LocalModelBackend, RawEmbedding,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tower::util::ServiceExt; // for `oneshot`

/// Helper: build an app backed by the local model
fn local_app() -> Router {
    let model = LocalEmbeddingModel::load("all-MiniLM-L6-v2").expect("model should load");
    let backend: Arc<dyn EmbeddingBackend> = Arc::new(LocalModelBackend::new(model));
    create_app(AppState::new(EmbedService::new(backend)))
}

/// Helper: POST /embed request with the given JSON body
fn post_embed(body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/embed")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn response_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("response body should be readable");
    serde_json::from_slice(&bytes).expect("response body should be valid JSON")
}

/// Test double that counts encode invocations.
///
/// Returns a fixed payload; only the call count matters.
struct CountingBackend {
    calls: AtomicUsize,
}

impl CountingBackend {
    fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl EmbeddingBackend for CountingBackend {
    fn name(&self) -> &str {
        "counting"
    }

    fn model(&self) -> &str {
        "test-model"
    }

    fn dimension(&self) -> usize {
        4
    }

    async fn encode(&self, _text: &str) -> Result<RawEmbedding, BackendError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(RawEmbedding::Flat(vec![0.0, 0.1, 0.2, 0.3]))
    }
}

#[cfg(test)]
mod embed_handler_tests {
    use super::*;

    /// Test 1: Valid input returns the canonical envelope
    ///
    /// 200 with exactly one data element whose embedding length equals the
    /// backend's fixed dimension.
    #[tokio::test]
    async fn test_valid_input_returns_envelope() {
        let app = local_app();

        let response = app
            .oneshot(post_embed(r#"{"input": "Hello world"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body: EmbedResponse = response_json(response).await;
        assert_eq!(body.data.len(), 1, "envelope must carry exactly one element");
        assert_eq!(body.data[0].embedding.len(), 384);
    }

    /// Test 2: Empty input returns 400 with a detail body
    #[tokio::test]
    async fn test_empty_input_returns_400() {
        let app = local_app();

        let response = app.oneshot(post_embed(r#"{"input": ""}"#)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body: ErrorResponse = response_json(response).await;
        assert!(
            body.detail.contains("input"),
            "detail should name the field, got: {}",
            body.detail
        );
    }

    /// Test 3: Missing input field returns 400
    ///
    /// Fails at JSON extraction but must surface as the same validation
    /// error class, not axum's default rejection.
    #[tokio::test]
    async fn test_missing_input_returns_400() {
        let app = local_app();

        let response = app.oneshot(post_embed(r#"{}"#)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body: ErrorResponse = response_json(response).await;
        assert!(!body.detail.is_empty());
    }

    /// Test 4: Non-string input returns 400
    #[tokio::test]
    async fn test_non_string_input_returns_400() {
        let app = local_app();

        let response = app
            .oneshot(post_embed(r#"{"input": 42}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    /// Test 5: Validation failures never reach the backend
    ///
    /// Observable via the counting double: an invalid request leaves the
    /// call count untouched, a valid one bumps it.
    #[tokio::test]
    async fn test_validation_short_circuits_backend() {
        let backend = Arc::new(CountingBackend::new());
        let app = create_app(AppState::new(EmbedService::new(
            backend.clone() as Arc<dyn EmbeddingBackend>
        )));

        let response = app
            .clone()
            .oneshot(post_embed(r#"{"input": ""}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            backend.calls.load(Ordering::SeqCst),
            0,
            "backend must not be invoked for invalid input"
        );

        let response = app.oneshot(post_embed(r#"{"input": "ok"}"#)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(backend.calls.load(Ordering::SeqCst), 1);
    }

    /// Test 6: Same input yields the identical vector across calls
    #[tokio::test]
    async fn test_endpoint_is_deterministic() {
        let app = local_app();

        let first: EmbedResponse = response_json(
            app.clone()
                .oneshot(post_embed(r#"{"input": "stable text"}"#))
                .await
                .unwrap(),
        )
        .await;
        let second: EmbedResponse = response_json(
            app.oneshot(post_embed(r#"{"input": "stable text"}"#))
                .await
                .unwrap(),
        )
        .await;

        assert_eq!(first.data[0].embedding, second.data[0].embedding);
    }

    /// Test 7: Concurrent requests never observe each other's vectors
    ///
    /// Two in-flight requests with different inputs must each come back
    /// with exactly the vector the model produces for their own text.
    #[tokio::test]
    async fn test_concurrent_requests_are_isolated() {
        let app = local_app();
        let model = LocalEmbeddingModel::load("all-MiniLM-L6-v2").unwrap();

        let (left, right) = tokio::join!(
            app.clone().oneshot(post_embed(r#"{"input": "first text"}"#)),
            app.clone().oneshot(post_embed(r#"{"input": "second text"}"#)),
        );

        let left: EmbedResponse = response_json(left.unwrap()).await;
        let right: EmbedResponse = response_json(right.unwrap()).await;

        assert_eq!(left.data[0].embedding, model.encode("first text").unwrap());
        assert_eq!(right.data[0].embedding, model.encode("second text").unwrap());
        assert_ne!(left.data[0].embedding, right.data[0].embedding);
    }
}
