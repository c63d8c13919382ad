//! registry
//!
//! Package registry for monorepo mode.
//!
//! # Overview
//!
//! When several packages publish documentation under one shared root, the
//! root keeps a list of known package names (`.docpackages`). Each package
//! build registers itself; the list drives the package picker and the
//! package index page.
//!
//! # Capability injection
//!
//! The registry is an optional collaborator. Single-package builds never
//! construct one; monorepo builds pass a [`RegistryAccess`] implementation
//! into the engine explicitly.
//!
//! # Invariants
//!
//! - No duplicate names
//! - Sorted lexicographically after every mutation

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::core::types::PackageName;
use crate::store::write_atomic;

/// Errors from registry persistence.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("failed to serialize package registry: {0}")]
    SerializeError(String),

    #[error("failed to write package registry '{path}': {source}")]
    WriteError { path: PathBuf, source: io::Error },
}

/// The set of packages known at a shared documentation root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageRegistry {
    #[serde(default)]
    packages: Vec<PackageName>,
}

impl PackageRegistry {
    /// Build a registry from any list of names, sorting and deduplicating.
    pub fn from_names(names: impl IntoIterator<Item = PackageName>) -> Self {
        let mut packages: Vec<_> = names.into_iter().collect();
        packages.sort();
        packages.dedup();
        Self { packages }
    }

    /// Register a package.
    ///
    /// Returns `true` if the package was added, `false` if it was already
    /// known (no-op).
    pub fn register(&mut self, name: &PackageName) -> bool {
        match self.packages.binary_search(name) {
            Ok(_) => false,
            Err(pos) => {
                self.packages.insert(pos, name.clone());
                true
            }
        }
    }

    /// Whether a package is known.
    pub fn contains(&self, name: &PackageName) -> bool {
        self.packages.binary_search(name).is_ok()
    }

    /// Known packages, sorted.
    pub fn packages(&self) -> &[PackageName] {
        &self.packages
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}

/// Access to a persisted package registry.
pub trait RegistryAccess {
    /// Load the registry, degrading to an empty one if unreadable.
    fn load(&self) -> PackageRegistry;

    /// Persist the registry.
    fn save(&self, registry: &PackageRegistry) -> Result<(), RegistryError>;
}

/// Registry stored as a JSON file at the shared root.
#[derive(Debug, Clone)]
pub struct FileRegistry {
    path: PathBuf,
}

impl FileRegistry {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RegistryAccess for FileRegistry {
    fn load(&self) -> PackageRegistry {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no package registry yet");
                return PackageRegistry::default();
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "ignoring unreadable package registry");
                return PackageRegistry::default();
            }
        };

        match serde_json::from_str::<PackageRegistry>(&json) {
            // Hand-edited files may be unsorted.
            Ok(registry) => PackageRegistry::from_names(registry.packages),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "ignoring corrupt package registry");
                PackageRegistry::default()
            }
        }
    }

    fn save(&self, registry: &PackageRegistry) -> Result<(), RegistryError> {
        let mut json = serde_json::to_string_pretty(registry)
            .map_err(|e| RegistryError::SerializeError(e.to_string()))?;
        json.push('\n');
        write_atomic(&self.path, json.as_bytes()).map_err(|source| RegistryError::WriteError {
            path: self.path.clone(),
            source,
        })
    }
}
