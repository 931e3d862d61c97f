//! Main Entrypoint for the Concept Mentor Service
//!
//! This binary is responsible for:
//! 1. Loading configuration from the environment.
//! 2. Loading the topic catalog and checking it for prerequisite cycles.
//! 3. Wiring the read-only progress store into the tool service.
//! 4. Serving the tools over stdio until the client disconnects.

use anyhow::Context;
use mentor_core::{
    Catalog,
    progress::{JsonFileProgress, ProgressStore},
    service::MentorService,
};
use mentor_service::config::Config;
use rmcp::{ServiceExt, transport::stdio};
use std::sync::Arc;
use tracing::info;

fn load_catalog(config: &Config) -> anyhow::Result<Catalog> {
    let catalog = match &config.catalog_path {
        Some(path) => Catalog::load(path)
            .with_context(|| format!("Failed to load catalog from {}", path.display()))?,
        None => Catalog::builtin().clone(),
    };

    if config.validate_catalog {
        catalog
            .validate()
            .context("Catalog failed prerequisite validation")?;
    }
    Ok(catalog)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // --- 1. Load Configuration ---
    let config = Config::from_env().context("Failed to load configuration")?;

    // --- 2. Initialize Logging ---
    // stdout carries the tool transport, so logs go to stderr.
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_timer(tracing_subscriber::fmt::time::ChronoLocal::rfc_3339())
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
    info!("Configuration loaded. Loading topic catalog...");

    // --- 3. Initialize Shared Services ---
    let catalog = Arc::new(load_catalog(&config)?);
    let progress: Arc<dyn ProgressStore> =
        Arc::new(JsonFileProgress::new(config.progress_path.clone()));

    info!(
        topics = catalog.len(),
        progress_path = %config.progress_path.display(),
        validated = config.validate_catalog,
        "Service configured. Serving tools over stdio..."
    );

    // --- 4. Serve ---
    let service = MentorService::new(catalog, progress)
        .serve(stdio())
        .await
        .context("Failed to start tool service")?;
    service.waiting().await?;

    info!("Client disconnected. Shutting down.");
    Ok(())
}
