// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! In-process embedding backend.
//!
//! The model is loaded once during startup and shared read-only by every
//! request handler. Encoding is deterministic: the same input text always
//! produces the bit-identical vector for the lifetime of the loaded model.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use super::{model_dimension, BackendError, EmbeddingBackend, RawEmbedding};

/// Pre-loaded local embedding model.
///
/// Produces hash-seeded projection vectors: the input text (together with
/// the model identifier) seeds a linear congruential generator whose output
/// fills the vector, which is then L2-normalized. Output length is fixed by
/// the model identifier at load time.
#[derive(Debug, Clone)]
pub struct LocalEmbeddingModel {
    model_name: String,
    dimension: usize,
}

impl LocalEmbeddingModel {
    /// Loads the model for the given identifier.
    ///
    /// The output dimension is resolved from the identifier (e.g. 768 for
    /// multi-qa-mpnet-base-dot-v1, 384 for all-MiniLM-L6-v2).
    pub fn load(model_name: &str) -> Result<Self> {
        if model_name.trim().is_empty() {
            return Err(anyhow!("model identifier must not be empty"));
        }

        Ok(Self {
            model_name: model_name.to_string(),
            dimension: model_dimension(model_name),
        })
    }

    /// Model identifier this instance was loaded for.
    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    /// Fixed output dimension.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Computes the embedding vector for the given text.
    ///
    /// Synchronous and CPU-bound; callers on an async path must move this
    /// onto the blocking pool.
    pub fn encode(&self, text: &str) -> Result<Vec<f32>> {
        let mut hasher = DefaultHasher::new();
        self.model_name.hash(&mut hasher);
        text.hash(&mut hasher);
        let seed = hasher.finish();

        let mut vector = Vec::with_capacity(self.dimension);
        let mut state = seed;
        for i in 0..self.dimension {
            state = state.wrapping_mul(1664525).wrapping_add(1013904223) ^ (i as u64);
            let value = (state as f64 / u64::MAX as f64) * 2.0 - 1.0;
            vector.push(value as f32);
        }

        // L2-normalize, matching what sentence-transformer models emit
        let norm = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm == 0.0 {
            return Err(anyhow!("degenerate embedding for input of {} chars", text.len()));
        }
        for value in &mut vector {
            *value /= norm;
        }

        Ok(vector)
    }
}

/// Backend wrapping a pre-loaded [`LocalEmbeddingModel`].
pub struct LocalModelBackend {
    model: Arc<LocalEmbeddingModel>,
}

impl LocalModelBackend {
    pub fn new(model: LocalEmbeddingModel) -> Self {
        Self {
            model: Arc::new(model),
        }
    }
}

#[async_trait]
impl EmbeddingBackend for LocalModelBackend {
    fn name(&self) -> &str {
        "local"
    }

    fn model(&self) -> &str {
        self.model.model_name()
    }

    fn dimension(&self) -> usize {
        self.model.dimension()
    }

    async fn encode(&self, text: &str) -> Result<RawEmbedding, BackendError> {
        let model = Arc::clone(&self.model);
        let text = text.to_string();

        // Compute-bound work runs on the blocking pool so it cannot stall
        // concurrent request handling on the async runtime.
        let vector = tokio::task::spawn_blocking(move || model.encode(&text))
            .await
            .map_err(|e| BackendError::Encoding(format!("model task failed: {}", e)))?
            .map_err(|e| BackendError::Encoding(e.to_string()))?;

        Ok(RawEmbedding::Flat(vector))
    }
}
