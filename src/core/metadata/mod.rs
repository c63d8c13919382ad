//! core::metadata
//!
//! Version metadata schema and storage.
//!
//! # Modules
//!
//! - [`schema`] - The persisted record (`versions`, `stable`, `dev`)
//! - [`store`] - Forgiving reads and atomic writes of the record
//!
//! # Example
//!
//! ```
//! use docversions::core::metadata::{parse_metadata, VersionMetadata};
//!
//! let meta = parse_metadata(r#"{ "versions": ["1.0.0"], "stable": "v1.0.0" }"#).unwrap();
//! assert_eq!(meta.versions[0].as_str(), "v1.0.0");
//! assert!(meta.dev.is_none());
//! ```

pub mod schema;
pub mod store;

pub use schema::{parse_metadata, MetadataError, VersionMetadata};
pub use store::MetadataStore;
