//! # Forma CLI
//!
//! `forma inspect` rebuilds an element document and prints its outline (or the re-serialized
//! document); `forma render` resolves a template against records loaded from a JSON file.
//! Human-facing output goes to stdout, logs to stderr.

pub mod args;
pub mod commands;

use crate::args::Commands;
use crate::commands::{inspect, read_source, render};
use anyhow::Result;
use forma::domain::config::FormaConfig;
use std::io::Write;

/// Executes one subcommand, writing its output to `out`.
///
/// # Errors
/// Propagates the subcommand's failure with context attached.
pub async fn run(command: Commands, config: &FormaConfig, out: &mut impl Write) -> Result<()> {
    match command {
        Commands::Inspect { input, emit, pretty } => inspect::run(&read_source(&input)?, emit, pretty, out),
        Commands::Render { data, no_cache, template } => {
            let template = if template == args::STDIN { read_source(&template)? } else { template };
            render::run(config, &data, &template, no_cache, out).await
        },
    }
}
