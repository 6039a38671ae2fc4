//! Resizer - responsive image variants for an object store.

mod cli;
mod config;
mod error;
mod event;
mod image;
mod logger;
mod pipeline;
mod store;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::ResizeConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    let config = ResizeConfig::load(&cli)?;

    match &cli.command {
        Commands::Process { batch, store } => cli::process::run_process(batch, store, &config),
        Commands::Inspect { bucket, key, store } => {
            cli::inspect::run_inspect(bucket, key, store, &config)
        }
    }
}
