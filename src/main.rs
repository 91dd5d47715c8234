// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::Result;
use embed_node::{
    api::{start_server, EmbedService},
    config::NodeConfig,
    embeddings::backend_from_config,
};
use std::env;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Initialize tracing subscriber for logging
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt::init();

    println!("🚀 Starting Embed Node...\n");
    println!("📦 BUILD VERSION: {}", embed_node::version::VERSION);
    println!();

    let config = NodeConfig::from_env()?;

    let backend = backend_from_config(&config)?;
    info!(
        "Active backend: {} (model {}, {} dimensions)",
        backend.name(),
        backend.model(),
        backend.dimension()
    );

    let service = EmbedService::new(backend);
    start_server(&config, service).await
}
