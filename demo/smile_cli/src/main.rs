//! Smile demo CLI
//!
//! Entry point for pricing a Greek smile from a configuration file.

use anyhow::{Context, Result};
use clap::Parser;
use smile_cli::prelude::*;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Local volatility Greek smile
#[derive(Parser)]
#[command(name = "smile-cli")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "smile.toml")]
    config: PathBuf,

    /// Solver direction, overriding the configuration (forward, backward)
    #[arg(short, long)]
    method: Option<Method>,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table")]
    format: OutputFormat,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = SmileConfig::load_with_env_and_validate(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;
    if let Some(method) = cli.method {
        config.method = method;
    }

    let level = if cli.verbose { "debug" } else { config.log_level.as_str() };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .init();

    info!(config = %cli.config.display(), "Smile demo starting");

    let report = run(&config)?;
    println!("{}", report.render(cli.format)?);

    Ok(())
}
