//! engine
//!
//! Orchestrates a documentation pass: Scan -> Reconcile -> Materialize -> Emit -> Persist.
//!
//! # Architecture
//!
//! 1. **Scan**: Read the version root (directories and alias links)
//! 2. **Reconcile**: Merge the persisted record with the snapshot (pure)
//! 3. **Materialize**: Bring alias links in line with the reconciled state
//! 4. **Emit**: Write `versions.js` and the redirect page
//! 5. **Persist**: Save the record, then update the package registry
//!
//! Configuration is resolved before a [`Session`] exists, so a bad
//! configuration never produces partial output.
//!
//! # Invariants
//!
//! - Reconciliation performs no I/O
//! - Only the store creates or replaces alias links
//! - Two passes over an unchanged tree produce identical output
//!
//! # Example
//!
//! ```ignore
//! use docversions::core::config::configure;
//! use docversions::engine::Session;
//!
//! let config = configure(&raw)?;
//! let session = Session::open(config, &cwd)?;
//! let report = session.finalize()?;
//! ```

pub mod reconcile;
pub mod runner;
pub mod scan;

pub use reconcile::{decide_aliases, reconcile, MetadataDiff};
pub use runner::{FinalizeReport, Reconciliation, RunError, Session};
pub use scan::{scan, DocSnapshot};

use std::path::PathBuf;

/// Execution context for commands.
///
/// Contains global settings derived from CLI flags that affect command behavior.
#[derive(Debug, Clone, Default)]
pub struct Context {
    /// Working directory override.
    pub cwd: Option<PathBuf>,
    /// Debug logging enabled.
    pub debug: bool,
    /// Quiet mode (minimal output).
    pub quiet: bool,
}

impl Context {
    /// The directory the pass runs in, always absolute.
    ///
    /// A relative override is resolved against the process working
    /// directory, so absolute alias links never end up relative.
    ///
    /// # Errors
    ///
    /// Fails when the process working directory is unavailable and the
    /// override (if any) is relative.
    pub fn working_dir(&self) -> std::io::Result<PathBuf> {
        match &self.cwd {
            Some(cwd) if cwd.is_absolute() => Ok(cwd.clone()),
            Some(cwd) => Ok(std::env::current_dir()?.join(cwd)),
            None => std::env::current_dir(),
        }
    }
}
