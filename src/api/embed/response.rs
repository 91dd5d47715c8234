// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! EmbedResponse envelope and response normalization.
//!
//! Whatever shape a backend produced, callers always receive the one
//! canonical envelope: `{"data": [{"embedding": [...]}]}` with exactly one
//! `data` element per request.

use serde::{Deserialize, Serialize};

use crate::embeddings::{BackendError, RawEmbedding};

/// One embedding inside the response envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingData {
    /// The embedding vector
    pub embedding: Vec<f32>,
}

/// Response body for POST /embed
///
/// # Example
/// ```json
/// { "data": [ { "embedding": [0.1, 0.2, 0.3] } ] }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbedResponse {
    /// Exactly one element for a single-text request
    pub data: Vec<EmbeddingData>,
}

impl EmbedResponse {
    /// Normalizes a backend payload into the canonical envelope.
    ///
    /// Applies the one-element-unwrap rule uniformly, regardless of which
    /// backend produced the payload: a nested single-row payload becomes
    /// its row, a flat payload passes through unchanged. Shapes with no
    /// defined meaning (several rows, empty vectors) are upstream faults.
    pub fn normalize(raw: RawEmbedding) -> Result<Self, BackendError> {
        let embedding = raw.into_vector()?;

        Ok(Self {
            data: vec![EmbeddingData { embedding }],
        })
    }

    /// Dimension of the embedding carried in the envelope.
    pub fn dimension(&self) -> usize {
        self.data.first().map(|d| d.embedding.len()).unwrap_or(0)
    }
}
