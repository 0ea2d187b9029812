//! Deklination HTTP server - Entry Point

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use deklination::ephemeris::SwissEphemeris;
use deklination::{run_server, Config};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let config = Config::parse();

    tracing::info!("Starting Deklination server");

    // Initialize Swiss Ephemeris once for the whole process
    let ephemeris = SwissEphemeris::new(config.ephe_path.as_deref())?;

    run_server(config, Arc::new(ephemeris)).await?;

    Ok(())
}
