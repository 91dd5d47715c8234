// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Request orchestration.
//!
//! One hop per stage: validate, encode, normalize. A failure at any stage
//! terminates the request immediately — no retries — and is translated into
//! a caller-visible [`ApiError`] before a response is emitted.

use std::sync::Arc;
use tracing::debug;

use super::embed::{EmbedRequest, EmbedResponse};
use super::ApiError;
use crate::embeddings::EmbeddingBackend;

/// Per-request orchestrator over the injected backend.
///
/// Holds no per-request state; a single instance is shared by all
/// concurrent handlers.
pub struct EmbedService {
    backend: Arc<dyn EmbeddingBackend>,
}

impl EmbedService {
    pub fn new(backend: Arc<dyn EmbeddingBackend>) -> Self {
        Self { backend }
    }

    /// The active backend, for health reporting.
    pub fn backend(&self) -> &dyn EmbeddingBackend {
        self.backend.as_ref()
    }

    /// Runs one embed request through validate → encode → normalize.
    pub async fn handle_embed_request(
        &self,
        request: EmbedRequest,
    ) -> Result<EmbedResponse, ApiError> {
        let text = request.validate()?;

        debug!(
            "Encoding {} chars via {} backend (model {})",
            text.len(),
            self.backend.name(),
            self.backend.model()
        );

        let raw = self.backend.encode(text).await?;
        let response = EmbedResponse::normalize(raw)?;

        Ok(response)
    }
}
