//! core::metadata::schema
//!
//! Persisted version metadata.
//!
//! # Schema
//!
//! ```json
//! {
//!   "versions": ["v1.1.0", "v1.0.0", "v0.9.0"],
//!   "stable": "v1.1.0",
//!   "dev": "v0.9.0"
//! }
//! ```
//!
//! `stable` and `dev` are omitted when unbound. Every version in the record
//! has been normalized, so parsing rejects strings that are not versions.
//!
//! # Trust
//!
//! The record is a cache, not ground truth. Directories may be removed or
//! added out of band between builds; reconciliation validates every entry
//! against the filesystem before using it.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::version::{Alias, Version};

/// Errors from metadata operations.
#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("failed to parse metadata: {0}")]
    ParseError(String),

    #[error("failed to serialize metadata: {0}")]
    SerializeError(String),

    #[error("failed to write metadata '{path}': {source}")]
    WriteError {
        path: std::path::PathBuf,
        source: std::io::Error,
    },
}

/// Version metadata for one version root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionMetadata {
    /// All known versions, descending, without duplicates.
    #[serde(default)]
    pub versions: Vec<Version>,

    /// Version bound to `stable`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stable: Option<Version>,

    /// Version bound to `dev`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dev: Option<Version>,
}

impl VersionMetadata {
    /// The version bound to `alias`.
    pub fn alias(&self, alias: Alias) -> Option<&Version> {
        match alias {
            Alias::Stable => self.stable.as_ref(),
            Alias::Dev => self.dev.as_ref(),
        }
    }

    /// The aliases that are bound, in presentation order.
    pub fn bound_aliases(&self) -> Vec<Alias> {
        Alias::ALL
            .into_iter()
            .filter(|a| self.alias(*a).is_some())
            .collect()
    }

    /// Whether no version is known.
    pub fn is_empty(&self) -> bool {
        self.versions.is_empty() && self.stable.is_none() && self.dev.is_none()
    }

    /// Every version mentioned anywhere in the record.
    ///
    /// Includes the alias bindings, which a hand-edited or stale record may
    /// not list in `versions`.
    pub fn mentioned(&self) -> impl Iterator<Item = &Version> {
        self.versions
            .iter()
            .chain(self.stable.iter())
            .chain(self.dev.iter())
    }

    /// Serialize to canonical JSON (pretty, deterministic, trailing newline).
    pub fn to_canonical_json(&self) -> Result<String, MetadataError> {
        let mut json = serde_json::to_string_pretty(self)
            .map_err(|e| MetadataError::SerializeError(e.to_string()))?;
        json.push('\n');
        Ok(json)
    }
}

/// Parse version metadata JSON.
///
/// # Errors
///
/// Returns `MetadataError::ParseError` for malformed JSON or entries that
/// are not versions.
pub fn parse_metadata(json: &str) -> Result<VersionMetadata, MetadataError> {
    serde_json::from_str(json).map_err(|e| MetadataError::ParseError(e.to_string()))
}
