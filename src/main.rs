mod cli;
mod config;
mod render;

use std::io;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // `log` records from the engine are picked up through tracing-log
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    if config.no_color {
        colored::control::set_override(false);
    }

    log::info!("starting with {config:?}");
    cli::run(&config, io::stdin().lock(), io::stdout().lock())
}
