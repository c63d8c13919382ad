//! core::manifest
//!
//! Reads the version being built from the package manifest.
//!
//! `.toml` manifests (such as `Cargo.toml`) are read from `package.version`;
//! anything else is parsed as JSON and read from the top-level `version`
//! field (`package.json` style).

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::version::{Version, VersionError};

/// Errors from reading the package manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("failed to read package file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse package file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("package version was not found in '{0}'")]
    MissingVersion(PathBuf),

    #[error("invalid package version in '{path}': {source}")]
    InvalidVersion {
        path: PathBuf,
        source: VersionError,
    },
}

/// Read and normalize the version declared by `package_file`.
///
/// `package_file` is resolved against `cwd` unless it is absolute.
pub fn read_package_version(cwd: &Path, package_file: &Path) -> Result<Version, ManifestError> {
    let path = cwd.join(package_file);
    let contents = fs::read_to_string(&path).map_err(|e| ManifestError::ReadError {
        path: path.clone(),
        source: e,
    })?;

    let raw = if path.extension().is_some_and(|ext| ext == "toml") {
        toml_version(&path, &contents)?
    } else {
        json_version(&path, &contents)?
    };

    Version::normalize(&raw).map_err(|source| ManifestError::InvalidVersion { path, source })
}

fn json_version(path: &Path, contents: &str) -> Result<String, ManifestError> {
    let value: serde_json::Value =
        serde_json::from_str(contents).map_err(|e| ManifestError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    value
        .get("version")
        .and_then(|v| v.as_str())
        .map(str::to_string)
        .ok_or_else(|| ManifestError::MissingVersion(path.to_path_buf()))
}

fn toml_version(path: &Path, contents: &str) -> Result<String, ManifestError> {
    let value: toml::Table = toml::from_str(contents).map_err(|e| ManifestError::ParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    value
        .get("package")
        .and_then(|p| p.get("version"))
        .and_then(|v| v.as_str())
        .map(str::to_string)
        .ok_or_else(|| ManifestError::MissingVersion(path.to_path_buf()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn reads_package_json() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("package.json"),
            r#"{ "name": "demo", "version": "1.4.2" }"#,
        )
        .unwrap();

        let version = read_package_version(temp.path(), Path::new("package.json")).unwrap();
        assert_eq!(version.as_str(), "v1.4.2");
    }

    #[test]
    fn reads_cargo_toml() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("Cargo.toml"),
            "[package]\nname = \"demo\"\nversion = \"0.3.0-beta.2\"\n",
        )
        .unwrap();

        let version = read_package_version(temp.path(), Path::new("Cargo.toml")).unwrap();
        assert_eq!(version.as_str(), "v0.3.0-beta.2");
    }

    #[test]
    fn nested_package_file() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("packages/core")).unwrap();
        fs::write(
            temp.path().join("packages/core/package.json"),
            r#"{ "version": "2.0.0" }"#,
        )
        .unwrap();

        let version =
            read_package_version(temp.path(), Path::new("packages/core/package.json")).unwrap();
        assert_eq!(version.as_str(), "v2.0.0");
    }

    #[test]
    fn missing_file() {
        let temp = TempDir::new().unwrap();
        let err = read_package_version(temp.path(), Path::new("package.json")).unwrap_err();
        assert!(matches!(err, ManifestError::ReadError { .. }));
    }

    #[test]
    fn missing_version_field() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("package.json"), r#"{ "name": "demo" }"#).unwrap();
        let err = read_package_version(temp.path(), Path::new("package.json")).unwrap_err();
        assert!(matches!(err, ManifestError::MissingVersion(_)));
    }

    #[test]
    fn invalid_version_value() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("package.json"),
            r#"{ "version": "next" }"#,
        )
        .unwrap();
        let err = read_package_version(temp.path(), Path::new("package.json")).unwrap_err();
        assert!(matches!(err, ManifestError::InvalidVersion { .. }));
    }
}
