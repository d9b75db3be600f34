//! Schemaport
//!
//! Schema migration console: browse source tables or paste a schema, then
//! generate BigQuery DDL through the migration server.
//!
//! This is the main entry point for the Dioxus desktop application.

use anyhow::Context;
use schemaport_client::HttpBackend;
use schemaport_core::ConsoleConfig;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Initialize logging; RUST_LOG overrides the default level
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let config = ConsoleConfig::load().context("loading configuration")?;
    let backend = HttpBackend::from_config(&config).context("creating HTTP client")?;

    // Print startup banner
    println!();
    println!("  {} v{}", config.window.title, schemaport_core::VERSION);
    println!("  Migration server: {}", config.base_url());
    println!();

    tracing::info!("Using migration server at {}", config.base_url());

    // Launch the Dioxus desktop application
    schemaport_ui::launch(config, backend);
    Ok(())
}
