//! Pipeline runner - Main Entry Point
//!
//! Runs a linear chain of workers over a seeded scalar stream and prints
//! the aggregate report. An optional argument names a TOML config file;
//! without one the classic default setup is used.

use pipechain::{Pipeline, PipelineConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,pipechain=debug")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => {
            tracing::info!("Loading config from {}", path);
            PipelineConfig::load_or_default(path)
        }
        None => PipelineConfig::default(),
    };

    tracing::info!(
        "Linear chain: {} workers processing a stream of {} values (seed {})",
        config.workers,
        config.num_elements,
        config.seed
    );

    let pipeline = Pipeline::new(config);
    let result = pipeline.run()?;

    println!("{}", result);
    Ok(())
}
