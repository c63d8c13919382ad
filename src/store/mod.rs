//! store
//!
//! Directory and symlink store for a version root.
//!
//! # Ownership
//!
//! [`DocStore`] is the single doorway for reading version directories and
//! for creating or replacing alias symlinks (`stable`, `dev`, `v1.2`). No
//! other module creates symlinks.
//!
//! # Invariants
//!
//! - A symlink is never created towards a missing version directory; the
//!   bind fails with [`StoreError::SourceMissing`] and leaves the existing
//!   entry untouched.
//! - Only symlinks are replaced. A regular file or directory sitting where
//!   an alias should go is a configuration conflict
//!   ([`StoreError::AliasOccupied`]).
//! - Replacement is atomic on Unix (new link + rename over the old one), so
//!   readers never observe a missing alias.
//! - Binding is idempotent: re-binding to the current target is a no-op.
//! - Pruning only ever removes symlinks named `vMAJOR.MINOR`.

pub mod links;

pub use links::{materialize, minor_targets, prune, LinkOutcome, LinkPlan, PlannedLink};

use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, trace};

use crate::core::version::{is_version_name, AliasPins, MinorVersion, Version};

/// Errors from directory and symlink operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The version directory an alias should point to does not exist.
    #[error("document directory does not exist: {version} ({path})")]
    SourceMissing { version: Version, path: PathBuf },

    /// A non-symlink entry occupies an alias name.
    #[error("cannot create alias '{name}': {path} exists and is not a symlink")]
    AliasOccupied { name: String, path: PathBuf },

    /// Filesystem operation failed.
    #[error("i/o error at {path}: {source}")]
    Io { path: PathBuf, source: io::Error },
}

impl StoreError {
    fn io(path: &Path, source: io::Error) -> Self {
        StoreError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// What a bind did to the filesystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkChange {
    /// A new symlink was created.
    Created,
    /// An existing symlink was pointed at a new target.
    Replaced,
    /// The symlink already pointed at the requested target.
    Unchanged,
}

/// Directory and symlink store rooted at a version root.
#[derive(Debug, Clone)]
pub struct DocStore {
    root: PathBuf,
}

impl DocStore {
    /// Create a store for the given version root.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The version root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of a version directory.
    pub fn version_dir(&self, version: &Version) -> PathBuf {
        self.root.join(version.as_str())
    }

    /// List entries of the root that are directories named as full versions.
    ///
    /// Anything else (`assets/`, dotfiles, `versions.js`, minor-version links
    /// such as `v1.2`) is skipped silently. A missing root yields an empty set.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the root exists but cannot be read.
    pub fn list_version_directories(&self) -> Result<BTreeSet<String>, StoreError> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(BTreeSet::new()),
            Err(e) => return Err(StoreError::io(&self.root, e)),
        };

        let mut names = BTreeSet::new();
        for entry in entries {
            let entry = entry.map_err(|e| StoreError::io(&self.root, e))?;
            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                continue;
            };

            if !is_version_name(&name) {
                trace!(name = %name, "skipping non-version entry");
                continue;
            }
            // Follows symlinks, matching how a web server would serve it.
            if !entry.path().is_dir() {
                trace!(name = %name, "skipping version-named non-directory");
                continue;
            }
            names.insert(name);
        }

        Ok(names)
    }

    /// Whether `name` is an existing directory with a full-version name.
    pub fn is_version_directory(&self, name: &str) -> bool {
        is_version_name(name) && self.root.join(name).is_dir()
    }

    /// Raw target of the symlink `name`, if it is one.
    pub fn link_target(&self, name: &str) -> Option<PathBuf> {
        let link = self.root.join(name);
        match fs::symlink_metadata(&link) {
            Ok(meta) if meta.file_type().is_symlink() => fs::read_link(&link).ok(),
            _ => None,
        }
    }

    /// The version a symlink points at.
    ///
    /// Returns `None` unless `root/name` is a symlink whose target (relative
    /// targets are resolved against the root) is an existing directory with
    /// a version basename.
    pub fn resolve_symlink_target(&self, name: &str) -> Option<Version> {
        let raw = self.link_target(name)?;
        let target = if raw.is_absolute() {
            raw
        } else {
            self.root.join(raw)
        };

        if !target.is_dir() {
            debug!(alias = name, target = %target.display(), "alias link is dangling");
            return None;
        }

        let basename = target.file_name()?.to_str()?;
        match Version::normalize(basename) {
            Ok(version) => Some(version),
            Err(e) => {
                debug!(alias = name, error = %e, "alias link target is not a version");
                None
            }
        }
    }

    /// Point the symlink `name` at the directory of `version`.
    ///
    /// With `relative`, the link target is written relative to the link's own
    /// directory (alias links live beside their targets, so this is just the
    /// version name); otherwise the absolute path is used, resolving a
    /// relative root against the process working directory.
    ///
    /// # Errors
    ///
    /// - [`StoreError::SourceMissing`] if the version directory does not exist
    /// - [`StoreError::AliasOccupied`] if `name` exists and is not a symlink
    /// - [`StoreError::Io`] if the link cannot be written
    pub fn bind_alias(
        &self,
        name: &str,
        version: &Version,
        relative: bool,
    ) -> Result<LinkChange, StoreError> {
        let source = self.version_dir(version);
        if !source.is_dir() {
            return Err(StoreError::SourceMissing {
                version: version.clone(),
                path: source,
            });
        }

        let link = self.root.join(name);
        let desired = if relative {
            PathBuf::from(version.as_str())
        } else if source.is_absolute() {
            source
        } else {
            // Link targets resolve against the link's directory, not ours.
            std::env::current_dir()
                .map_err(|e| StoreError::io(&source, e))?
                .join(&source)
        };

        match fs::symlink_metadata(&link) {
            Ok(meta) if meta.file_type().is_symlink() => {
                if fs::read_link(&link).ok().as_deref() == Some(desired.as_path()) {
                    return Ok(LinkChange::Unchanged);
                }
                replace_link(&desired, &link).map_err(|e| StoreError::io(&link, e))?;
                debug!(alias = name, target = %desired.display(), "replaced alias link");
                Ok(LinkChange::Replaced)
            }
            Ok(_) => Err(StoreError::AliasOccupied {
                name: name.to_string(),
                path: link,
            }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                create_link(&desired, &link).map_err(|e| StoreError::io(&link, e))?;
                debug!(alias = name, target = %desired.display(), "created alias link");
                Ok(LinkChange::Created)
            }
            Err(e) => Err(StoreError::io(&link, e)),
        }
    }

    /// Remove `vMAJOR.MINOR` symlinks whose name is not in `keep`.
    ///
    /// Directories and files with minor-version names are left alone, as is
    /// every other symlink. Returns the removed names in sorted order.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the root cannot be read or a link cannot
    /// be removed. A missing root prunes nothing.
    pub fn prune_minor_aliases(&self, keep: &BTreeSet<String>) -> Result<Vec<String>, StoreError> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StoreError::io(&self.root, e)),
        };

        let mut pruned = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| StoreError::io(&self.root, e))?;
            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                continue;
            };
            if keep.contains(&name) || MinorVersion::parse_name(&name).is_none() {
                continue;
            }

            let path = entry.path();
            let is_link = fs::symlink_metadata(&path)
                .map(|meta| meta.file_type().is_symlink())
                .unwrap_or(false);
            if !is_link {
                continue;
            }

            remove_link(&path).map_err(|e| StoreError::io(&path, e))?;
            debug!(alias = %name, "removed stale minor link");
            pruned.push(name);
        }

        pruned.sort();
        Ok(pruned)
    }

    /// Bind one `vMAJOR.MINOR` link per minor group of `versions`.
    ///
    /// See [`minor_targets`] for how each group's patch is chosen.
    pub fn bind_minor_aliases(
        &self,
        versions: &[Version],
        pins: &AliasPins,
        relative: bool,
    ) -> Result<Vec<LinkOutcome>, StoreError> {
        let mut outcomes = Vec::new();
        for (minor, target) in minor_targets(versions, pins).into_iter().rev() {
            let name = minor.to_string();
            let change = self.bind_alias(&name, target, relative)?;
            outcomes.push(LinkOutcome {
                name,
                target: target.clone(),
                change,
            });
        }
        Ok(outcomes)
    }
}

#[cfg(unix)]
fn create_link(target: &Path, link: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

#[cfg(windows)]
fn create_link(target: &Path, link: &Path) -> io::Result<()> {
    std::os::windows::fs::symlink_dir(target, link)
}

#[cfg(unix)]
fn replace_link(target: &Path, link: &Path) -> io::Result<()> {
    let tmp = sibling_tmp_path(link);
    if fs::symlink_metadata(&tmp).is_ok() {
        fs::remove_file(&tmp)?;
    }
    create_link(target, &tmp)?;
    fs::rename(&tmp, link)
}

#[cfg(windows)]
fn replace_link(target: &Path, link: &Path) -> io::Result<()> {
    // Directory symlinks are removed with remove_dir on Windows.
    fs::remove_dir(link).or_else(|_| fs::remove_file(link))?;
    create_link(target, link)
}

#[cfg(unix)]
fn remove_link(link: &Path) -> io::Result<()> {
    fs::remove_file(link)
}

#[cfg(windows)]
fn remove_link(link: &Path) -> io::Result<()> {
    fs::remove_dir(link).or_else(|_| fs::remove_file(link))
}

/// Hidden temporary path next to `path`, used for atomic replacement.
fn sibling_tmp_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{}.tmp", name))
}

/// Write a file atomically.
///
/// Creates parent directories if needed, writes to a temp file in the same
/// directory and renames it over `path`, so a failed write never leaves a
/// truncated file behind.
pub fn write_atomic(path: &Path, contents: &[u8]) -> io::Result<()> {
    use std::io::Write;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let tmp = sibling_tmp_path(path);
    let mut file = fs::File::create(&tmp)?;
    file.write_all(contents)?;
    file.sync_all()?;
    fs::rename(&tmp, path)
}
