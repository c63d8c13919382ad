//! core
//!
//! Core domain types, schemas, and configuration.
//!
//! # Modules
//!
//! - [`version`] - Version normalization, ordering, alias classification
//! - [`types`] - Strong types: PackageName
//! - [`metadata`] - Version metadata schema and storage
//! - [`config`] - Configuration schema, loading and validation
//! - [`manifest`] - Reading the built version from the package manifest
//! - [`paths`] - Centralized path routing for the documentation tree
//!
//! # Design Principles
//!
//! - Strong typing prevents invalid states at compile time
//! - Every compared version has been normalized
//! - Nothing here creates symlinks; that is the store's job

pub mod config;
pub mod manifest;
pub mod metadata;
pub mod paths;
pub mod types;
pub mod version;
