//! docversions - multi-version documentation trees
//!
//! docversions keeps a directory of rendered documentation versions
//! consistent: it tracks which versions exist, points `stable`, `dev` and
//! per-minor-version symlinks at the right builds, and writes the small
//! artifacts a version switcher needs.
//!
//! # Architecture
//!
//! The codebase follows a strict layered architecture:
//!
//! - [`cli`] - Command-line interface layer (parses args, delegates to engine)
//! - [`engine`] - Orchestrates Scan → Reconcile → Materialize → Emit → Persist
//! - [`core`] - Version model, configuration, metadata and path routing
//! - [`store`] - Version directories and alias symlinks
//! - [`registry`] - Package registry for monorepo mode
//! - [`emit`] - Generated `versions.js`, `packages.js` and index pages
//! - [`ui`] - User-facing output
//!
//! # Correctness Invariants
//!
//! 1. Configuration is validated before any filesystem change
//! 2. Alias links never dangle: a link is only bound to an existing directory
//! 3. The filesystem is the source of truth; metadata is recomputed from it
//! 4. Repeated passes over an unchanged tree produce identical output

pub mod cli;
pub mod core;
pub mod emit;
pub mod engine;
pub mod registry;
pub mod store;
pub mod ui;
