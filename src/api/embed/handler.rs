// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! POST /embed HTTP handler
//!
//! Thin axum layer over [`EmbedService`]: extracts the JSON body, maps
//! extraction failures into the validation error class, and delegates.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use tracing::info;

use crate::api::embed::{EmbedRequest, EmbedResponse};
use crate::api::http_server::AppState;
use crate::api::ApiError;

/// POST /embed handler
///
/// # Request Body
/// ```json
/// { "input": "Hello world" }
/// ```
///
/// # Response Body
/// ```json
/// { "data": [ { "embedding": [0.1, 0.2, ...] } ] }
/// ```
///
/// A body whose `input` field is absent or not a string fails JSON
/// extraction; that is the same caller fault as an empty string, so it
/// gets the same 400 validation error instead of axum's default rejection.
pub async fn embed_handler(
    State(state): State<AppState>,
    payload: Result<Json<EmbedRequest>, JsonRejection>,
) -> Result<Json<EmbedResponse>, ApiError> {
    info!("Embed endpoint called");

    let Json(request) = payload.map_err(|_| ApiError::ValidationError {
        field: "input".to_string(),
        message: "field is missing or empty".to_string(),
    })?;

    let response = state.service.handle_embed_request(request).await?;
    Ok(Json(response))
}
