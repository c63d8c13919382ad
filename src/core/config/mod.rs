//! core::config
//!
//! Configuration schema and loading.
//!
//! # Two-phase initialization
//!
//! Configuration is resolved once, up front:
//!
//! 1. [`Config::load`] reads the raw options from the config file.
//! 2. CLI flags are overlaid with [`RawOptions::overlay`].
//! 3. [`configure`] validates everything and yields a [`ResolvedConfig`].
//!
//! Nothing touches the documentation tree until step 3 has succeeded, so a
//! bad configuration never produces partial output. The [`ResolvedConfig`]
//! is then passed explicitly to each later phase.
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Config file
//! 3. CLI flags
//!
//! # Config Locations
//!
//! Searched in order:
//! 1. An explicit `--config <path>` (must exist)
//! 2. `$DOCVERSIONS_CONFIG` if set and the file exists
//! 3. `<cwd>/docversions.toml`
//!
//! # Example
//!
//! ```no_run
//! use docversions::core::config::{configure, Config, RawOptions};
//! use std::path::Path;
//!
//! let loaded = Config::load(Path::new("."), None).unwrap();
//! let flags = RawOptions {
//!     make_relative_links: Some(true),
//!     ..Default::default()
//! };
//! let config = configure(&loaded.options.overlay(flags)).unwrap();
//! assert!(config.make_relative_links);
//! ```

pub mod schema;

pub use schema::{MonorepoConfig, MonorepoOptions, RawOptions, ResolvedConfig};

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Environment variable naming an alternate config file.
pub const CONFIG_ENV_VAR: &str = "DOCVERSIONS_CONFIG";

/// Config file name looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "docversions.toml";

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("config file not found: {0}")]
    NotFound(PathBuf),

    #[error("configuration error: {0}")]
    Configuration(String),
}

/// Result of loading configuration.
#[derive(Debug, Default)]
pub struct ConfigLoadResult {
    /// The raw options from the config file (defaults if none was found).
    pub options: RawOptions,
    /// The file the options were read from, if any.
    pub path: Option<PathBuf>,
}

/// Config file discovery and parsing.
pub struct Config;

impl Config {
    /// Load raw options for a working directory.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be read or parsed,
    /// or if `explicit` names a file that does not exist. A missing config
    /// file is not an error (defaults are used).
    pub fn load(cwd: &Path, explicit: Option<&Path>) -> Result<ConfigLoadResult, ConfigError> {
        if let Some(path) = explicit {
            let path = cwd.join(path);
            if !path.is_file() {
                return Err(ConfigError::NotFound(path));
            }
            return Self::read(path);
        }

        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            let path = cwd.join(path);
            if path.is_file() {
                return Self::read(path);
            }
            debug!(path = %path.display(), "{} points to a missing file, ignoring", CONFIG_ENV_VAR);
        }

        let local = cwd.join(CONFIG_FILE_NAME);
        if local.is_file() {
            return Self::read(local);
        }

        Ok(ConfigLoadResult::default())
    }

    fn read(path: PathBuf) -> Result<ConfigLoadResult, ConfigError> {
        let contents = fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
            path: path.clone(),
            source: e,
        })?;

        let options = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.clone(),
            message: e.to_string(),
        })?;

        debug!(path = %path.display(), "loaded config file");
        Ok(ConfigLoadResult {
            options,
            path: Some(path),
        })
    }
}

/// Validate raw options into a [`ResolvedConfig`].
///
/// This must complete before any hook reads configuration.
///
/// # Errors
///
/// Returns `ConfigError::Configuration` for invalid values.
pub fn configure(raw: &RawOptions) -> Result<ResolvedConfig, ConfigError> {
    raw.resolve()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn explicit_missing_file_is_error() {
        let temp = TempDir::new().unwrap();
        let result = Config::load(temp.path(), Some(Path::new("missing.toml")));
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn load_without_file_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let result = Config::load(temp.path(), None).unwrap();
        assert_eq!(result.options, RawOptions::default());
        assert!(result.path.is_none());
    }

    #[test]
    fn load_local_file() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(CONFIG_FILE_NAME),
            r#"
            stable = "1.0.0"
            make_relative_links = true
            "#,
        )
        .unwrap();

        let result = Config::load(temp.path(), None).unwrap();
        assert_eq!(result.options.stable.as_deref(), Some("1.0.0"));
        assert_eq!(result.options.make_relative_links, Some(true));
        assert_eq!(result.path, Some(temp.path().join(CONFIG_FILE_NAME)));
    }

    #[test]
    fn load_explicit_file() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("custom.toml"),
            r#"
            [monorepo]
            name = "core"
            root = "site"
            "#,
        )
        .unwrap();

        let result = Config::load(temp.path(), Some(Path::new("custom.toml"))).unwrap();
        let config = configure(&result.options).unwrap();
        assert_eq!(config.monorepo.unwrap().name.as_str(), "core");
    }

    #[test]
    fn unknown_fields_rejected() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(CONFIG_FILE_NAME),
            r#"
            stable = "auto"
            domLocation = "body.end"
            "#,
        )
        .unwrap();

        let result = Config::load(temp.path(), None);
        assert!(matches!(result, Err(ConfigError::ParseError { .. })));
    }

    #[test]
    fn invalid_monorepo_fails_before_io() {
        let raw = RawOptions {
            monorepo: Some(MonorepoOptions {
                name: Some("bad name".to_string()),
                root: Some(PathBuf::from("site")),
            }),
            ..Default::default()
        };
        let err = configure(&raw).unwrap_err();
        assert!(matches!(err, ConfigError::Configuration(_)));
    }
}
