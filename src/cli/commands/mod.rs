//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Resolves configuration (defaults < config file < flags)
//! 2. Opens an engine session for the built version
//! 3. Formats and displays output
//!
//! Configuration is fully validated before a handler touches the filesystem.

mod completion;
mod finalize;
mod out_dir;
mod status;

pub use completion::completion;
pub use finalize::finalize;
pub use out_dir::out_dir;
pub use status::status;

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use tracing::debug;

use super::args::{Command, OptionArgs};
use crate::core::config::{configure, Config, ResolvedConfig};
use crate::engine::Context;

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, config: Option<&Path>, ctx: &Context) -> Result<()> {
    match command {
        Command::OutDir { options } => out_dir(&resolve(config, &options, ctx)?, ctx),
        Command::Finalize { options } => finalize(&resolve(config, &options, ctx)?, ctx),
        Command::Status { options, json } => status(&resolve(config, &options, ctx)?, ctx, json),
        Command::Completion { shell } => completion(shell),
    }
}

/// A validated configuration together with the directory it applies to.
#[derive(Debug)]
pub struct Resolved {
    pub cwd: PathBuf,
    pub config: ResolvedConfig,
}

/// Load the config file, overlay command-line options and validate.
fn resolve(config: Option<&Path>, options: &OptionArgs, ctx: &Context) -> Result<Resolved> {
    let cwd = ctx
        .working_dir()
        .context("Failed to determine working directory")?;

    let loaded = Config::load(&cwd, config)?;
    if let Some(path) = &loaded.path {
        debug!(path = %path.display(), "using config file");
    }

    let raw = loaded.options.overlay(options.to_raw());
    let config = configure(&raw).context("Invalid configuration")?;

    Ok(Resolved { cwd, config })
}
