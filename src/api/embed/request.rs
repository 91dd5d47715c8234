// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! EmbedRequest type for the POST /embed endpoint.

use crate::api::ApiError;
use serde::{Deserialize, Serialize};

/// Request body for POST /embed
///
/// # Fields
/// - `input`: The text to embed
///
/// # Example
/// ```json
/// { "input": "Hello world" }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbedRequest {
    /// Text to embed
    pub input: String,
}

impl EmbedRequest {
    /// Validates the request and hands back the text to embed.
    ///
    /// The `input` field must be a non-empty string. Whitespace-only input
    /// is accepted; trimming is deliberately not applied. A request whose
    /// `input` is absent or not a string never reaches this point — JSON
    /// extraction rejects it with the same validation error class.
    ///
    /// # Returns
    /// - `Ok(&str)` with the text if validation passes
    /// - `Err(ApiError::ValidationError)` if the input is empty
    pub fn validate(&self) -> Result<&str, ApiError> {
        if self.input.is_empty() {
            return Err(ApiError::ValidationError {
                field: "input".to_string(),
                message: "field is missing or empty".to_string(),
            });
        }

        Ok(&self.input)
    }
}
