//! emit
//!
//! Generated artifacts for the documentation tree.
//!
//! # Artifacts
//!
//! Per version root:
//! - `versions.js` - ES module exporting `DOC_VERSIONS`, the switcher's list
//! - `index.html` - redirect to `stable/` (or `dev/` without a stable version)
//!
//! Per shared root, monorepo mode only:
//! - `packages.js` - ES module exporting `DOC_PACKAGES`
//! - `index.html` - package index linking each package's `stable/` docs
//!
//! Rendering is pure (`render_*`); writing goes through atomic writes and
//! any I/O failure is fatal.

pub mod site;

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::metadata::VersionMetadata;
use crate::core::paths::DocPaths;
use crate::core::types::PackageName;
use crate::core::version::Alias;
use crate::registry::PackageRegistry;
use crate::store::write_atomic;

/// Errors from writing artifacts.
#[derive(Debug, Error)]
pub enum EmitError {
    #[error("failed to write '{path}': {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("asset not found: {0}")]
    MissingAsset(PathBuf),
}

/// Entries of the version switcher, in display order.
///
/// Bound aliases come first (`stable`, then `dev`), followed by the minor
/// versions, or every patch version when `show_patch` is set. Versions keep
/// the metadata's descending order and repeated entries are dropped.
pub fn version_keys(metadata: &VersionMetadata, show_patch: bool) -> Vec<String> {
    let mut keys: Vec<String> = metadata
        .bound_aliases()
        .into_iter()
        .map(|a| a.to_string())
        .collect();

    for version in &metadata.versions {
        let key = if show_patch {
            version.to_string()
        } else {
            version.minor().to_string()
        };
        if !keys.contains(&key) {
            keys.push(key);
        }
    }

    keys
}

/// Render `versions.js`.
pub fn render_versions_js(metadata: &VersionMetadata, show_patch: bool) -> String {
    render_js_list("DOC_VERSIONS", version_keys(metadata, show_patch))
}

/// Render `packages.js`.
pub fn render_packages_js(packages: &[PackageName]) -> String {
    render_js_list("DOC_PACKAGES", packages.iter().map(|p| p.to_string()))
}

fn render_js_list(name: &str, items: impl IntoIterator<Item = String>) -> String {
    let mut out = String::from("\"use strict\"\n");
    out.push_str(&format!("export const {} = [\n", name));
    for item in items {
        out.push_str(&format!("    '{}',\n", item));
    }
    out.push_str("];\n");
    out
}

/// The alias the version root redirects to.
pub fn redirect_alias(metadata: &VersionMetadata) -> Alias {
    if metadata.stable.is_some() {
        Alias::Stable
    } else {
        Alias::Dev
    }
}

/// Render the version root's `index.html` redirect.
pub fn render_redirect_html(metadata: &VersionMetadata) -> String {
    let url = format!("{}/", redirect_alias(metadata));
    format!(
        "<!DOCTYPE html>\n\
         <meta charset=\"utf-8\">\n\
         <meta http-equiv=\"refresh\" content=\"0; url={url}\">\n\
         <link rel=\"canonical\" href=\"{url}\">\n\
         <a href=\"{url}\">Redirecting to {url}</a>\n"
    )
}

/// Render the shared root's package index page.
pub fn render_packages_index_html(packages: &[PackageName]) -> String {
    let items: String = packages
        .iter()
        .map(|p| format!("      <li><a href=\"{p}/stable/\">{p}</a></li>\n"))
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>API Documentation</title>
    <style>
      :root {{ color-scheme: light dark; font-family: system-ui, sans-serif; }}
      body {{ max-width: 48rem; margin: 0 auto; padding: 2rem 1.5rem; }}
      ul {{ list-style: none; padding: 0; display: grid; gap: 0.75rem; }}
      a {{ display: block; padding: 1rem 1.25rem; border: 1px solid #8884; border-radius: 8px; text-decoration: none; }}
      a:hover {{ border-color: currentColor; }}
    </style>
  </head>
  <body>
    <h1>Packages</h1>
    <ul>
{items}    </ul>
  </body>
</html>
"#
    )
}

/// Write `versions.js` and the redirect page for a version root.
pub fn write_version_artifacts(
    paths: &DocPaths,
    metadata: &VersionMetadata,
    show_patch: bool,
) -> Result<Vec<PathBuf>, EmitError> {
    let versions_js = paths.versions_js_path();
    write_file(&versions_js, &render_versions_js(metadata, show_patch))?;

    let redirect = paths.redirect_path();
    write_file(&redirect, &render_redirect_html(metadata))?;

    Ok(vec![versions_js, redirect])
}

/// Write `packages.js` and the package index page at the shared root.
pub fn write_package_artifacts(
    paths: &DocPaths,
    registry: &PackageRegistry,
) -> Result<Vec<PathBuf>, EmitError> {
    let packages_js = paths.packages_js_path();
    write_file(&packages_js, &render_packages_js(registry.packages()))?;

    let index = paths.packages_index_path();
    write_file(&index, &render_packages_index_html(registry.packages()))?;

    Ok(vec![packages_js, index])
}

fn write_file(path: &Path, contents: &str) -> Result<(), EmitError> {
    write_atomic(path, contents.as_bytes()).map_err(|source| EmitError::WriteError {
        path: path.to_path_buf(),
        source,
    })
}
