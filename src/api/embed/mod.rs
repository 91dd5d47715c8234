// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Embedding API Module
//!
//! Provides the POST /embed endpoint: request validation, the canonical
//! response envelope, and the HTTP handler.

pub mod handler;
pub mod request;
pub mod response;

pub use handler::embed_handler;
pub use request::EmbedRequest;
pub use response::{EmbedResponse, EmbeddingData};
