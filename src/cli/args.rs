//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--cwd <path>`: Run as if in that directory
//! - `--config <path>`: Read options from this TOML file
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::core::config::{MonorepoOptions, RawOptions};

/// docversions - keep a multi-version documentation tree consistent
#[derive(Parser, Debug)]
#[command(name = "docversions")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Run as if docversions was started in this directory
    #[arg(long, global = true)]
    pub cwd: Option<PathBuf>,

    /// Read options from this config file instead of docversions.toml
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the directory the generator should render into
    #[command(
        name = "out-dir",
        long_about = "Print the directory the documentation generator should render into.\n\n\
            Reads the version from the package manifest and resolves it against the \
            configured documentation root. Nothing is written.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Render the current version into its own directory
    typedoc --out \"$(docversions out-dir)\"

    # Monorepo package
    docversions out-dir --monorepo-name core --monorepo-root site"
    )]
    OutDir {
        #[command(flatten)]
        options: OptionArgs,
    },

    /// Update aliases, metadata and generated files after a build
    #[command(
        name = "finalize",
        long_about = "Update the documentation tree after a version has been rendered.\n\n\
            Scans the version root, reconciles it with the stored metadata, points the \
            stable, dev and minor-version links at the right versions, writes versions.js \
            and index.html, and saves the metadata. In monorepo mode the package is also \
            registered at the shared root.",
        after_help = "\
WORKFLOW EXAMPLES:
    # After the generator has rendered docs/v1.2.0
    docversions finalize

    # Pin stable to an older release
    docversions finalize --stable v1.1.0"
    )]
    Finalize {
        #[command(flatten)]
        options: OptionArgs,
    },

    /// Show the reconciled state without writing anything
    #[command(
        name = "status",
        long_about = "Show what finalize would record, without writing anything.\n\n\
            Lists known versions, the stable and dev assignments, the alias links they \
            imply, and how they differ from the stored metadata.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Human-readable summary
    docversions status

    # Machine-readable
    docversions status --json"
    )]
    Status {
        #[command(flatten)]
        options: OptionArgs,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completion scripts
    #[command(
        name = "completion",
        after_help = "\
WORKFLOW EXAMPLES:
    docversions completion bash > /etc/bash_completion.d/docversions
    docversions completion zsh > \"${fpath[1]}/_docversions\""
    )]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Per-run options. Each overrides the config file value when given.
#[derive(Args, Debug, Clone, Default, PartialEq)]
pub struct OptionArgs {
    /// Version to bind to `stable` ("auto" picks the latest release)
    #[arg(long, value_name = "VERSION")]
    pub stable: Option<String>,

    /// Version to bind to `dev` ("auto" picks the latest prerelease)
    #[arg(long, value_name = "VERSION")]
    pub dev: Option<String>,

    /// Manifest holding the version being built
    #[arg(long, value_name = "PATH")]
    pub package_file: Option<PathBuf>,

    /// Documentation root (single-package mode)
    #[arg(long, value_name = "DIR")]
    pub out: Option<PathBuf>,

    /// Write relative symlink targets
    #[arg(long)]
    pub relative_links: bool,

    /// List patch versions instead of minor versions in versions.js
    #[arg(long)]
    pub show_patch_versions: bool,

    /// Package name (enables monorepo mode)
    #[arg(long, value_name = "NAME")]
    pub monorepo_name: Option<String>,

    /// Shared documentation root for all packages
    #[arg(long, value_name = "DIR")]
    pub monorepo_root: Option<PathBuf>,
}

impl OptionArgs {
    /// Options set on the command line, ready to overlay on the config file.
    ///
    /// Boolean flags only ever switch a setting on.
    pub fn to_raw(&self) -> RawOptions {
        let monorepo = (self.monorepo_name.is_some() || self.monorepo_root.is_some()).then(|| {
            MonorepoOptions {
                name: self.monorepo_name.clone(),
                root: self.monorepo_root.clone(),
            }
        });

        RawOptions {
            stable: self.stable.clone(),
            dev: self.dev.clone(),
            package_file: self.package_file.clone(),
            out: self.out.clone(),
            make_relative_links: self.relative_links.then_some(true),
            show_patch_versions: self.show_patch_versions.then_some(true),
            menu_script: None,
            monorepo,
        }
    }
}

/// Supported shells for completion
#[derive(clap::ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}
