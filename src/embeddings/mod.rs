// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Embedding backends.
//!
//! A backend turns input text into a fixed-dimensional vector. Two
//! implementations exist: an in-process model ([`LocalModelBackend`]) and a
//! client for a remote inference API ([`RemoteApiBackend`]). Which one is
//! active is decided once at startup from [`NodeConfig`].

use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

use crate::config::{BackendKind, NodeConfig};

pub mod local;
pub mod remote;

pub use local::{LocalEmbeddingModel, LocalModelBackend};
pub use remote::RemoteApiBackend;

/// Failures produced by a backend's `encode` operation.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The in-process model failed or panicked while computing a vector.
    #[error("embedding computation failed: {0}")]
    Encoding(String),

    /// The remote inference API returned a non-2xx status, an unusable
    /// payload, or the connection failed.
    #[error("upstream embedding API error: {0}")]
    Upstream(String),

    /// The outbound call exceeded the configured deadline.
    #[error("embedding request timed out after {0} seconds")]
    Timeout(u64),
}

/// Raw vector payload as produced by a backend, before normalization.
///
/// Remote inference APIs are inconsistent about single-text requests: some
/// return the vector directly, others wrap it in a one-element batch. Both
/// shapes are carried here so the unwrapping happens in one place,
/// `EmbedResponse::normalize`, no matter which backend produced the value.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawEmbedding {
    /// A flat vector: `[0.1, 0.2, ...]`
    Flat(Vec<f32>),
    /// A batch of vectors: `[[0.1, 0.2, ...]]`. Only a single-element
    /// batch is usable for a single-text request.
    Nested(Vec<Vec<f32>>),
}

impl RawEmbedding {
    /// Unwraps the payload into a plain vector.
    ///
    /// A nested payload must contain exactly one row; anything else is an
    /// upstream fault, not something to guess at.
    pub fn into_vector(self) -> Result<Vec<f32>, BackendError> {
        let vector = match self {
            RawEmbedding::Flat(vector) => vector,
            RawEmbedding::Nested(mut rows) => {
                if rows.len() != 1 {
                    return Err(BackendError::Upstream(format!(
                        "expected a single embedding, got {} rows",
                        rows.len()
                    )));
                }
                rows.remove(0)
            }
        };

        if vector.is_empty() {
            return Err(BackendError::Upstream(
                "upstream returned an empty embedding".to_string(),
            ));
        }

        Ok(vector)
    }
}

/// Trait for embedding backends.
///
/// `encode` is the single operation: text in, raw vector payload out. The
/// call must suspend rather than block; compute-bound implementations run
/// their work on the blocking pool.
#[async_trait]
pub trait EmbeddingBackend: Send + Sync {
    /// Short name of this backend ("local" or "remote").
    fn name(&self) -> &str;

    /// Model identifier this backend serves.
    fn model(&self) -> &str;

    /// Fixed output dimension for this backend instance.
    fn dimension(&self) -> usize;

    /// Generate the raw embedding payload for the given text.
    async fn encode(&self, text: &str) -> Result<RawEmbedding, BackendError>;
}

/// Output dimension for known sentence-transformer models.
///
/// Unknown identifiers fall back to 768, the dimension of the default
/// model family.
pub fn model_dimension(model: &str) -> usize {
    match model {
        "multi-qa-mpnet-base-dot-v1" => 768,
        "all-mpnet-base-v2" => 768,
        "all-MiniLM-L6-v2" => 384,
        "all-MiniLM-L12-v2" => 384,
        _ => 768,
    }
}

/// Builds the backend selected by the startup configuration.
///
/// Called once during initialization; the returned backend is shared
/// read-only by all request handlers for the process lifetime.
pub fn backend_from_config(config: &NodeConfig) -> anyhow::Result<Arc<dyn EmbeddingBackend>> {
    let backend: Arc<dyn EmbeddingBackend> = match config.backend {
        BackendKind::Local => {
            let model = LocalEmbeddingModel::load(&config.model)?;
            info!(
                "Loaded local embedding model: {} ({} dimensions)",
                config.model,
                model.dimension()
            );
            Arc::new(LocalModelBackend::new(model))
        }
        BackendKind::Remote => {
            let backend = RemoteApiBackend::new(config)?;
            info!(
                "Configured remote embedding API: {} (model {})",
                backend.endpoint(),
                config.model
            );
            Arc::new(backend)
        }
    };

    Ok(backend)
}
