// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Node configuration.
//!
//! Read once from the environment during startup, validated, then shared
//! read-only by every request handler for the process lifetime.

use anyhow::{bail, Result};
use std::env;
use std::time::Duration;

/// Which embedding backend the node runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// In-process model, loaded at startup.
    Local,
    /// Remote inference API reached over HTTPS.
    Remote,
}

impl BackendKind {
    /// Parses the `EMBEDDING_BACKEND` value.
    pub fn parse(value: &str) -> Result<Self> {
        match value.to_lowercase().as_str() {
            "local" => Ok(BackendKind::Local),
            "remote" => Ok(BackendKind::Remote),
            other => bail!("unknown embedding backend '{}' (expected 'local' or 'remote')", other),
        }
    }
}

/// Startup configuration for the node.
#[derive(Debug, Clone)]
pub struct NodeConfig {
    /// Address the HTTP server binds to (default: 0.0.0.0:8080)
    pub listen_addr: String,
    /// Active backend (default: local)
    pub backend: BackendKind,
    /// Target model identifier (default: multi-qa-mpnet-base-dot-v1)
    pub model: String,
    /// Remote inference API URL (required when backend is remote)
    pub api_endpoint: Option<String>,
    /// Bearer token for the remote API (required when backend is remote)
    pub api_token: Option<String>,
    /// Deadline for one outbound embedding call (default: 30s)
    pub request_timeout: Duration,
}

impl NodeConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let port = env::var("API_PORT").unwrap_or_else(|_| "8080".to_string());
        let backend = BackendKind::parse(
            &env::var("EMBEDDING_BACKEND").unwrap_or_else(|_| "local".to_string()),
        )?;

        let config = Self {
            listen_addr: format!("0.0.0.0:{}", port),
            backend,
            model: env::var("EMBEDDING_MODEL")
                .unwrap_or_else(|_| "multi-qa-mpnet-base-dot-v1".to_string()),
            api_endpoint: env::var("EMBEDDING_API_URL").ok(),
            api_token: env::var("EMBEDDING_API_TOKEN").ok(),
            request_timeout: Duration::from_secs(
                env::var("EMBEDDING_TIMEOUT_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(30),
            ),
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.model.trim().is_empty() {
            bail!("EMBEDDING_MODEL must not be empty");
        }
        if self.request_timeout.as_secs() == 0 {
            bail!("EMBEDDING_TIMEOUT_SECS must be at least 1");
        }
        if self.backend == BackendKind::Remote {
            if self.api_endpoint.is_none() {
                bail!("EMBEDDING_API_URL is required for the remote backend");
            }
            if self.api_token.is_none() {
                bail!("EMBEDDING_API_TOKEN is required for the remote backend");
            }
        }
        Ok(())
    }
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8080".to_string(),
            backend: BackendKind::Local,
            model: "multi-qa-mpnet-base-dot-v1".to_string(),
            api_endpoint: None,
            api_token: None,
            request_timeout: Duration::from_secs(30),
        }
    }
}
