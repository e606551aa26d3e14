//! # t9a
//!
//! **CLI Binary**
//!
//! Entry point for the `t9a` command-line application. It resolves the
//! settings file and flags, then hands off to `t9a-core` and prints JSON.
//!
//! ## Responsibilities
//! * Parse command line arguments
//! * Load configuration
//! * Dispatch commands to appropriate handlers
//! * Handle errors and exit codes
//!
//! This crate should contain minimal business logic.

mod cli;
mod commands;
mod config;
mod error_hints;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::Cli;

/// Entry point used by the `t9a` binary.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.global.verbose);

    let cwd = std::env::current_dir().context("Failed to read the working directory")?;
    let resolved = config::resolve(&cli.global, &cwd)?;
    tracing::debug!(
        data_root = %resolved.data_root.display(),
        settings = ?resolved.source,
        "resolved configuration"
    );

    commands::dispatch(&cli.command, &resolved)
}

/// Render an error with its context chain and any matching hints.
pub fn format_error(err: &anyhow::Error) -> String {
    error_hints::format(err)
}

/// `RUST_LOG` wins; otherwise `-v` raises the default level.
fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
