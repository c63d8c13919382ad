//! core::paths
//!
//! Centralized path routing for the documentation tree.
//!
//! # Layout
//!
//! Single-package mode:
//!
//! ```text
//! <root>/                  version root == root
//!   .docversions           version metadata
//!   versions.js, index.html
//!   stable, dev, v1.2      alias symlinks
//!   v1.2.3/                rendered version
//! ```
//!
//! Monorepo mode:
//!
//! ```text
//! <root>/
//!   .docpackages           package registry
//!   packages.js, index.html
//!   <package>/             version root, same layout as above
//! ```
//!
//! No code outside this module should compute these file names.
//!
//! # Example
//!
//! ```
//! use docversions::core::config::ResolvedConfig;
//! use docversions::core::paths::DocPaths;
//! use docversions::core::version::Version;
//! use std::path::{Path, PathBuf};
//!
//! let config = ResolvedConfig::default();
//! let version = Version::normalize("1.2.3").unwrap();
//! let paths = DocPaths::resolve(&config, Path::new("/project"), &version);
//!
//! assert_eq!(paths.version_root, PathBuf::from("/project/docs"));
//! assert_eq!(paths.target, PathBuf::from("/project/docs/v1.2.3"));
//! ```

use std::path::{Path, PathBuf};

use crate::core::config::ResolvedConfig;
use crate::core::types::PackageName;
use crate::core::version::Version;

/// Version metadata file name (per version root).
pub const METADATA_FILE: &str = ".docversions";

/// Package registry file name (shared root, monorepo only).
pub const PACKAGES_FILE: &str = ".docpackages";

/// Version manifest consumed by the switcher script.
pub const VERSIONS_JS: &str = "versions.js";

/// Package manifest consumed by the switcher script.
pub const PACKAGES_JS: &str = "packages.js";

/// Redirect / index page.
pub const INDEX_HTML: &str = "index.html";

/// Static hosting marker moved from a built version to the shared root.
pub const NOJEKYLL: &str = ".nojekyll";

/// Location of the switcher script inside a built version.
pub const MENU_SCRIPT_ASSET: &str = "assets/versionsMenu.js";

/// Resolved locations for one documentation build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocPaths {
    /// Shared documentation root (holds every package in monorepo mode).
    pub root: PathBuf,

    /// Directory holding version directories and aliases.
    /// Equals `root` in single-package mode.
    pub version_root: PathBuf,

    /// Directory the generator renders the current version into.
    pub target: PathBuf,

    /// The package being built, in monorepo mode.
    pub package: Option<PackageName>,
}

impl DocPaths {
    /// Resolve the layout for building `version`.
    ///
    /// Relative config paths are resolved against `cwd`.
    pub fn resolve(config: &ResolvedConfig, cwd: &Path, version: &Version) -> Self {
        match &config.monorepo {
            Some(mono) => {
                let root = cwd.join(&mono.root);
                let version_root = root.join(mono.name.as_str());
                Self {
                    target: version_root.join(version.as_str()),
                    root,
                    version_root,
                    package: Some(mono.name.clone()),
                }
            }
            None => {
                let root = cwd.join(&config.out);
                Self {
                    target: root.join(version.as_str()),
                    version_root: root.clone(),
                    root,
                    package: None,
                }
            }
        }
    }

    /// Whether this is a monorepo layout.
    pub fn is_monorepo(&self) -> bool {
        self.package.is_some()
    }

    pub fn metadata_path(&self) -> PathBuf {
        self.version_root.join(METADATA_FILE)
    }

    pub fn versions_js_path(&self) -> PathBuf {
        self.version_root.join(VERSIONS_JS)
    }

    pub fn redirect_path(&self) -> PathBuf {
        self.version_root.join(INDEX_HTML)
    }

    pub fn packages_metadata_path(&self) -> PathBuf {
        self.root.join(PACKAGES_FILE)
    }

    pub fn packages_js_path(&self) -> PathBuf {
        self.root.join(PACKAGES_JS)
    }

    pub fn packages_index_path(&self) -> PathBuf {
        self.root.join(INDEX_HTML)
    }

    pub fn menu_script_path(&self) -> PathBuf {
        self.target.join(MENU_SCRIPT_ASSET)
    }
}
