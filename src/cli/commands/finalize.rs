//! finalize command - Reconcile the tree after a version has been rendered

use super::Resolved;
use crate::engine::{Context, Session};
use crate::ui::output::{or_none, Printer};
use anyhow::{Context as _, Result};

/// Run the full documentation pass and print a summary.
pub fn finalize(resolved: &Resolved, ctx: &Context) -> Result<()> {
    let out = Printer::for_context(ctx);
    let session = Session::open(resolved.config.clone(), &resolved.cwd)
        .context("Failed to read the package version")?;

    let report = session
        .finalize()
        .with_context(|| format!("Failed to finalize documentation for {}", session.version()))?;

    if let Some(name) = &session.paths().package {
        match report.package_registered {
            Some(true) => out.line(format!("Registered package {}", name)),
            _ => out.detail(format!("package {} already registered", name)),
        }
    }

    for link in &report.links {
        out.link(link);
    }
    for name in &report.pruned {
        out.line(format!("Removed stale link {}", name));
    }

    for path in &report.artifacts {
        out.detail(format!("wrote {}", path.display()));
    }
    if report.nojekyll_moved {
        out.detail("moved .nojekyll to the documentation root");
    }
    if report.menu_script_installed {
        out.detail("installed version switcher script");
    }

    let meta = &report.metadata;
    out.line(format!(
        "Finalized {} ({} {}, stable: {}, dev: {})",
        report.version,
        meta.versions.len(),
        if meta.versions.len() == 1 { "version" } else { "versions" },
        or_none(meta.stable.as_ref()),
        or_none(meta.dev.as_ref()),
    ));

    Ok(())
}
