//! core::metadata::store
//!
//! Metadata persistence in the version root.
//!
//! # Architecture
//!
//! Metadata lives in a hidden JSON file (`.docversions`) next to the version
//! directories it describes. Reads are forgiving: a missing or corrupt file
//! yields empty metadata, because reconciliation rebuilds the record from
//! the filesystem anyway. Writes are strict and atomic.
//!
//! # Example
//!
//! ```no_run
//! use docversions::core::metadata::MetadataStore;
//!
//! let store = MetadataStore::new("docs/.docversions");
//! let mut meta = store.load();
//! meta.versions.sort_by(|a, b| b.cmp(a));
//! store.save(&meta).unwrap();
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::schema::{parse_metadata, MetadataError, VersionMetadata};
use crate::store::write_atomic;

/// Metadata file store.
#[derive(Debug, Clone)]
pub struct MetadataStore {
    path: PathBuf,
}

impl MetadataStore {
    /// Create a store for the metadata file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The metadata file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read metadata strictly.
    ///
    /// Returns `Ok(None)` if the file does not exist.
    ///
    /// # Errors
    ///
    /// - [`MetadataError::ParseError`] if the file cannot be read or parsed
    pub fn read(&self) -> Result<Option<VersionMetadata>, MetadataError> {
        match fs::read_to_string(&self.path) {
            Ok(json) => parse_metadata(&json).map(Some),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(MetadataError::ParseError(format!(
                "{}: {}",
                self.path.display(),
                e
            ))),
        }
    }

    /// Read metadata, degrading to empty metadata on any failure.
    ///
    /// First runs and corrupted state are treated the same way: start from a
    /// clean reconciliation.
    pub fn load(&self) -> VersionMetadata {
        match self.read() {
            Ok(Some(meta)) => meta,
            Ok(None) => {
                debug!(path = %self.path.display(), "no metadata yet, starting fresh");
                VersionMetadata::default()
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "ignoring unreadable metadata");
                VersionMetadata::default()
            }
        }
    }

    /// Persist metadata atomically.
    ///
    /// # Errors
    ///
    /// - [`MetadataError::SerializeError`] if the metadata can't be serialized
    /// - [`MetadataError::WriteError`] if the file can't be written
    pub fn save(&self, metadata: &VersionMetadata) -> Result<(), MetadataError> {
        let json = metadata.to_canonical_json()?;
        write_atomic(&self.path, json.as_bytes()).map_err(|source| MetadataError::WriteError {
            path: self.path.clone(),
            source,
        })
    }
}
