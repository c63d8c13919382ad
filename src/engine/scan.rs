//! engine::scan
//!
//! Read-only snapshot of a version root.
//!
//! # Invariants
//!
//! - Scan never mutates the filesystem
//! - Only directories whose name is already the canonical version string
//!   are recorded, so every recorded version can be bound by the store

use std::collections::BTreeSet;

use tracing::debug;

use crate::core::version::{Alias, Version};
use crate::store::{DocStore, StoreError};

/// What the filesystem says about a version root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocSnapshot {
    /// Version directories present under the root.
    pub versions: BTreeSet<Version>,

    /// Version-named directories skipped because their name is not canonical
    /// (for example `1.0.0` instead of `v1.0.0`).
    pub skipped: Vec<String>,

    /// Version the `stable` link currently resolves to.
    pub stable_link: Option<Version>,

    /// Version the `dev` link currently resolves to.
    pub dev_link: Option<Version>,
}

impl DocSnapshot {
    /// Whether a version directory exists.
    pub fn contains(&self, version: &Version) -> bool {
        self.versions.contains(version)
    }

    /// The version an alias link resolves to.
    pub fn link(&self, alias: Alias) -> Option<&Version> {
        match alias {
            Alias::Stable => self.stable_link.as_ref(),
            Alias::Dev => self.dev_link.as_ref(),
        }
    }
}

/// Scan a version root.
///
/// # Errors
///
/// Returns `StoreError::Io` if the root exists but cannot be listed.
pub fn scan(store: &DocStore) -> Result<DocSnapshot, StoreError> {
    let mut snapshot = DocSnapshot::default();

    for name in store.list_version_directories()? {
        match Version::normalize(&name) {
            Ok(version) if version.as_str() == name => {
                snapshot.versions.insert(version);
            }
            _ => {
                debug!(name = %name, "skipping non-canonical version directory");
                snapshot.skipped.push(name);
            }
        }
    }

    snapshot.stable_link = resolve_link(store, Alias::Stable);
    snapshot.dev_link = resolve_link(store, Alias::Dev);

    debug!(
        root = %store.root().display(),
        versions = snapshot.versions.len(),
        stable = ?snapshot.stable_link.as_ref().map(Version::as_str),
        dev = ?snapshot.dev_link.as_ref().map(Version::as_str),
        "scanned version root"
    );

    Ok(snapshot)
}

/// Resolve an alias link, keeping it only if it lands inside this root.
fn resolve_link(store: &DocStore, alias: Alias) -> Option<Version> {
    let version = store.resolve_symlink_target(alias.as_str())?;
    if store.version_dir(&version).is_dir() {
        Some(version)
    } else {
        debug!(alias = %alias, target = %version, "alias link points outside the version root");
        None
    }
}
