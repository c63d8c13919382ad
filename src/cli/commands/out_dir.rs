//! out-dir command - Print the render target for the built version
//!
//! Read-only. Generators call this before rendering and write into the
//! printed directory, which `finalize` later picks up.

use super::Resolved;
use crate::engine::{Context, Session};
use crate::ui::output::Printer;
use anyhow::{Context as _, Result};

/// Print the directory the current version renders into.
pub fn out_dir(resolved: &Resolved, ctx: &Context) -> Result<()> {
    let out = Printer::for_context(ctx);
    let session = Session::open(resolved.config.clone(), &resolved.cwd)
        .context("Failed to read the package version")?;

    out.detail(format!(
        "version {} -> {}",
        session.version(),
        session.paths().target.display()
    ));

    // Printed even with --quiet: scripts capture it.
    println!("{}", session.paths().target.display());
    Ok(())
}
