// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::embeddings::BackendError;

/// Error body returned to callers: `{"detail": "<message>"}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub detail: String,
}

/// Caller-visible failures.
///
/// Every internal failure kind maps onto exactly one of these; nothing is
/// silently swallowed. Detail strings are safe to expose — they carry no
/// credentials or internal state.
#[derive(Debug, Clone)]
pub enum ApiError {
    /// Caller input was malformed or empty. The caller must fix the input.
    ValidationError { field: String, message: String },
    /// The in-process model failed. Server-side fault.
    EncodingError(String),
    /// The remote dependency failed (non-2xx, network error, unusable
    /// payload). The caller may retry later; the node never retries.
    UpstreamError(String),
    /// Our deadline for the outbound call expired. The cause is local, so
    /// this is reported as a server error rather than a bad gateway.
    Timeout(u64),
}

impl ApiError {
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            detail: self.to_string(),
        }
    }

    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::ValidationError { .. } => 400,
            ApiError::EncodingError(_) => 500,
            ApiError::UpstreamError(_) => 502,
            ApiError::Timeout(_) => 500,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::ValidationError { field, message } => {
                write!(f, "Validation error for '{}': {}", field, message)
            }
            ApiError::EncodingError(msg) => write!(f, "Error generating embedding: {}", msg),
            ApiError::UpstreamError(msg) => write!(f, "Upstream embedding API error: {}", msg),
            ApiError::Timeout(secs) => {
                write!(f, "Embedding request timed out after {} seconds", secs)
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<BackendError> for ApiError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::Encoding(msg) => ApiError::EncodingError(msg),
            BackendError::Upstream(msg) => ApiError::UpstreamError(msg),
            BackendError::Timeout(secs) => ApiError::Timeout(secs),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        (status, Json(self.to_response())).into_response()
    }
}
