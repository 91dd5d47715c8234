// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Remote inference API backend.
//!
//! Forwards the input text to an external HTTPS endpoint authenticated with
//! a bearer token. The outbound call suspends the task at the I/O boundary
//! and is bounded by the configured timeout; dropping the in-flight future
//! (caller disconnect) aborts the call.

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use tracing::debug;
use url::Url;

use super::{model_dimension, BackendError, EmbeddingBackend, RawEmbedding};
use crate::config::NodeConfig;

pub struct RemoteApiBackend {
    client: Client,
    endpoint: String,
    api_token: String,
    model: String,
    dimension: usize,
    timeout_secs: u64,
}

impl RemoteApiBackend {
    /// Creates the backend from startup configuration.
    ///
    /// Fails if the endpoint or bearer token is missing or the endpoint is
    /// not a valid URL. These are initialization-time faults: the process
    /// refuses to start rather than failing every request later.
    pub fn new(config: &NodeConfig) -> Result<Self> {
        let endpoint = config
            .api_endpoint
            .clone()
            .ok_or_else(|| anyhow!("remote backend selected but EMBEDDING_API_URL is not set"))?;
        let api_token = config
            .api_token
            .clone()
            .ok_or_else(|| anyhow!("remote backend selected but EMBEDDING_API_TOKEN is not set"))?;

        Url::parse(&endpoint)
            .with_context(|| format!("invalid embedding API URL: {}", endpoint))?;

        let timeout_secs = config.request_timeout.as_secs();
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .context("failed to create HTTP client")?;

        Ok(Self {
            client,
            endpoint,
            api_token,
            model: config.model.clone(),
            dimension: model_dimension(&config.model),
            timeout_secs,
        })
    }

    /// Endpoint URL this backend posts to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl EmbeddingBackend for RemoteApiBackend {
    fn name(&self) -> &str {
        "remote"
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    async fn encode(&self, text: &str) -> Result<RawEmbedding, BackendError> {
        debug!("Requesting embedding from {}", self.endpoint);

        let body = json!({
            "input": text,
            "model": self.model,
        });

        let response = self
            .client
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {}", self.api_token))
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    BackendError::Timeout(self.timeout_secs)
                } else {
                    BackendError::Upstream(format!("request failed: {}", e))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(BackendError::Upstream(format!(
                "upstream returned HTTP {}: {}",
                status.as_u16(),
                detail
            )));
        }

        // Flat vector or one-element batch; anything else fails to parse
        response
            .json::<RawEmbedding>()
            .await
            .map_err(|e| BackendError::Upstream(format!("malformed embedding payload: {}", e)))
    }
}
