//! core::config::schema
//!
//! Configuration schema types.
//!
//! # Config File
//!
//! Located at (in order of precedence):
//! 1. `--config <path>` if given
//! 2. `$DOCVERSIONS_CONFIG` if set
//! 3. `<cwd>/docversions.toml`
//!
//! # Validation
//!
//! The raw schema is permissive about values and strict about keys. Values
//! are validated by [`RawOptions::resolve`], which turns them into a
//! [`ResolvedConfig`] before any filesystem work starts.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::core::types::PackageName;
use crate::core::version::{AliasPins, VersionPin};

/// Default manifest holding the version being built.
pub const DEFAULT_PACKAGE_FILE: &str = "package.json";

/// Default documentation root in single-package mode.
pub const DEFAULT_OUT_DIR: &str = "docs";

/// Raw options as written in the config file or passed on the command line.
///
/// Every field is optional so that layers can be overlaid.
///
/// # Example
///
/// ```toml
/// stable = "auto"
/// dev = "v2.0.0-beta.1"
/// package_file = "package.json"
/// out = "docs"
/// make_relative_links = true
/// show_patch_versions = false
///
/// [monorepo]
/// name = "core"
/// root = "site"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct RawOptions {
    /// `"auto"` or a version to bind to `stable`
    pub stable: Option<String>,

    /// `"auto"` or a version to bind to `dev`
    pub dev: Option<String>,

    /// Manifest file holding the version being built
    pub package_file: Option<PathBuf>,

    /// Documentation root (single-package mode)
    pub out: Option<PathBuf>,

    /// Write alias symlinks with relative targets
    pub make_relative_links: Option<bool>,

    /// List every patch version in the switcher instead of minor versions
    pub show_patch_versions: Option<bool>,

    /// Version-switcher script copied into each built version
    pub menu_script: Option<PathBuf>,

    /// Multi-package mode
    pub monorepo: Option<MonorepoOptions>,
}

/// Raw monorepo settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct MonorepoOptions {
    /// Package identifier, also its directory under `root`
    pub name: Option<String>,

    /// Shared documentation root for all packages
    pub root: Option<PathBuf>,
}

impl RawOptions {
    /// Overlay `other` on top of `self`; values set in `other` win.
    pub fn overlay(self, other: RawOptions) -> RawOptions {
        RawOptions {
            stable: other.stable.or(self.stable),
            dev: other.dev.or(self.dev),
            package_file: other.package_file.or(self.package_file),
            out: other.out.or(self.out),
            make_relative_links: other.make_relative_links.or(self.make_relative_links),
            show_patch_versions: other.show_patch_versions.or(self.show_patch_versions),
            menu_script: other.menu_script.or(self.menu_script),
            monorepo: match (self.monorepo, other.monorepo) {
                (Some(base), Some(top)) => Some(MonorepoOptions {
                    name: top.name.or(base.name),
                    root: top.root.or(base.root),
                }),
                (base, top) => top.or(base),
            },
        }
    }

    /// Validate and resolve into a [`ResolvedConfig`].
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Configuration` for an unparseable version pin, or a
    /// monorepo section with a missing/invalid `name` or missing `root`.
    pub fn resolve(&self) -> Result<ResolvedConfig, ConfigError> {
        let pin = |field: &str, raw: &Option<String>| -> Result<VersionPin, ConfigError> {
            match raw {
                None => Ok(VersionPin::Auto),
                Some(s) => VersionPin::parse(s)
                    .map_err(|e| ConfigError::Configuration(format!("invalid '{}' option: {}", field, e))),
            }
        };

        let pins = AliasPins::new(pin("stable", &self.stable)?, pin("dev", &self.dev)?);

        let monorepo = self.monorepo.as_ref().map(|m| m.resolve()).transpose()?;

        let package_file = self
            .package_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_PACKAGE_FILE));
        if package_file.as_os_str().is_empty() {
            return Err(ConfigError::Configuration(
                "'package_file' cannot be empty".to_string(),
            ));
        }

        Ok(ResolvedConfig {
            pins,
            package_file,
            out: self
                .out
                .clone()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUT_DIR)),
            make_relative_links: self.make_relative_links.unwrap_or(false),
            show_patch_versions: self.show_patch_versions.unwrap_or(false),
            menu_script: self.menu_script.clone(),
            monorepo,
        })
    }
}

impl MonorepoOptions {
    fn resolve(&self) -> Result<MonorepoConfig, ConfigError> {
        let name = self.name.as_deref().ok_or_else(|| {
            ConfigError::Configuration(
                "monorepo.name is required and must contain only alphanumeric characters, \
                 hyphens, and underscores"
                    .to_string(),
            )
        })?;
        let name = PackageName::new(name)
            .map_err(|e| ConfigError::Configuration(format!("invalid monorepo.name: {}", e)))?;

        let root = match &self.root {
            Some(root) if !root.as_os_str().is_empty() => root.clone(),
            _ => {
                return Err(ConfigError::Configuration(
                    "monorepo.root is required".to_string(),
                ))
            }
        };

        Ok(MonorepoConfig { name, root })
    }
}

/// Fully validated configuration.
///
/// Produced once by [`RawOptions::resolve`] and passed explicitly to every
/// later phase.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    /// `stable`/`dev` overrides
    pub pins: AliasPins,
    /// Manifest path, relative to the working directory unless absolute
    pub package_file: PathBuf,
    /// Documentation root for single-package mode
    pub out: PathBuf,
    /// Relative instead of absolute symlink targets
    pub make_relative_links: bool,
    /// Patch instead of minor listing in `versions.js`
    pub show_patch_versions: bool,
    /// Optional switcher script to install into each version
    pub menu_script: Option<PathBuf>,
    /// Present in multi-package mode
    pub monorepo: Option<MonorepoConfig>,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            pins: AliasPins::default(),
            package_file: PathBuf::from(DEFAULT_PACKAGE_FILE),
            out: PathBuf::from(DEFAULT_OUT_DIR),
            make_relative_links: false,
            show_patch_versions: false,
            menu_script: None,
            monorepo: None,
        }
    }
}

impl ResolvedConfig {
    /// Whether multi-package mode is enabled.
    pub fn is_monorepo(&self) -> bool {
        self.monorepo.is_some()
    }
}

/// Validated monorepo settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonorepoConfig {
    pub name: PackageName,
    pub root: PathBuf,
}
