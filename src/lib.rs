// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod api;
pub mod config;
pub mod embeddings;
pub mod version;

// Re-export main types
pub use api::{ApiError, AppState, EmbedRequest, EmbedResponse, EmbedService, ErrorResponse};
pub use config::{BackendKind, NodeConfig};
pub use embeddings::{
    backend_from_config, BackendError, EmbeddingBackend, LocalEmbeddingModel, LocalModelBackend,
    RawEmbedding, RemoteApiBackend,
};
