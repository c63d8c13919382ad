//! status command - Show the reconciled state without writing anything

use std::path::PathBuf;

use serde::Serialize;

use super::Resolved;
use crate::core::types::PackageName;
use crate::core::version::Version;
use crate::engine::{Context, MetadataDiff, Reconciliation, Session};
use crate::ui::output::{or_none, Printer};
use anyhow::{Context as _, Result};

/// JSON shape of `status --json`.
#[derive(Debug, Serialize)]
struct StatusView<'a> {
    version: &'a Version,
    root: &'a PathBuf,
    version_root: &'a PathBuf,
    target: &'a PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    package: Option<&'a PackageName>,
    versions: &'a [Version],
    stable: Option<&'a Version>,
    dev: Option<&'a Version>,
    links: Vec<LinkView<'a>>,
    skipped: &'a [String],
    drift: &'a MetadataDiff,
    #[serde(skip_serializing_if = "Option::is_none")]
    packages: Option<Vec<PackageName>>,
}

#[derive(Debug, Serialize)]
struct LinkView<'a> {
    name: &'a str,
    target: &'a Version,
}

/// Report what `finalize` would record.
pub fn status(resolved: &Resolved, ctx: &Context, json: bool) -> Result<()> {
    let out = Printer::for_context(ctx);
    let session = Session::open(resolved.config.clone(), &resolved.cwd)
        .context("Failed to read the package version")?;
    let plan = session.plan().context("Failed to scan documentation")?;
    let packages = session.packages().map(|r| r.packages().to_vec());

    if json {
        let paths = session.paths();
        let view = StatusView {
            version: session.version(),
            root: &paths.root,
            version_root: &paths.version_root,
            target: &paths.target,
            package: paths.package.as_ref(),
            versions: &plan.metadata.versions,
            stable: plan.metadata.stable.as_ref(),
            dev: plan.metadata.dev.as_ref(),
            links: plan
                .links
                .links
                .iter()
                .map(|l| LinkView {
                    name: &l.name,
                    target: &l.target,
                })
                .collect(),
            skipped: &plan.snapshot.skipped,
            drift: &plan.diff,
            packages,
        };
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    print_text(&session, &plan, packages.as_deref(), out);
    Ok(())
}

fn print_text(
    session: &Session,
    plan: &Reconciliation,
    packages: Option<&[PackageName]>,
    out: Printer,
) {
    let meta = &plan.metadata;
    let paths = session.paths();

    out.line(format!("Building: {}", session.version()));
    out.line(format!("Root: {}", paths.version_root.display()));
    if let Some(name) = &paths.package {
        out.line(format!("Package: {}", name));
    }
    out.line(format!("Stable: {}", or_none(meta.stable.as_ref())));
    out.line(format!("Dev: {}", or_none(meta.dev.as_ref())));
    out.section("Versions", &meta.versions);

    if !plan.links.is_empty() {
        let links: Vec<_> = plan
            .links
            .links
            .iter()
            .map(|l| format!("{} -> {}", l.name, l.target))
            .collect();
        out.section("Links", &links);
    }

    if let Some(packages) = packages {
        out.line(format!("Packages: {}", packages.len()));
    }

    for name in &plan.snapshot.skipped {
        out.warn(format!(
            "ignoring directory '{}': name is not a canonical version",
            name
        ));
    }

    let diff = &plan.diff;
    if diff.is_empty() {
        out.line("Metadata is up to date.");
        return;
    }
    out.line("Pending metadata changes:");
    for v in &diff.added {
        out.line(format!("  + {}", v));
    }
    for v in &diff.removed {
        out.line(format!("  - {}", v));
    }
    if let Some((before, after)) = &diff.stable {
        out.line(format!("  stable: {} -> {}", or_none(before.as_ref()), or_none(after.as_ref())));
    }
    if let Some((before, after)) = &diff.dev {
        out.line(format!("  dev: {} -> {}", or_none(before.as_ref()), or_none(after.as_ref())));
    }
}
