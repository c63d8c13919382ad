//! cli
//!
//! Command-line interface layer for docversions.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Load and resolve configuration before any command runs
//! - Delegate to command handlers
//!
//! # Architecture
//!
//! The CLI layer is thin. It parses arguments via clap and dispatches to the
//! [`crate::engine`] for execution. All filesystem changes flow through the
//! engine's session.

pub mod args;
pub mod commands;

pub use args::{Cli, Command, OptionArgs, Shell};

use crate::engine;
use anyhow::Result;

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run(cli: Cli) -> Result<()> {
    let ctx = engine::Context {
        cwd: cli.cwd.clone(),
        debug: cli.debug,
        quiet: cli.quiet,
    };

    commands::dispatch(cli.command, cli.config.as_deref(), &ctx)
}
