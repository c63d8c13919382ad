//! ui
//!
//! User-facing output.
//!
//! # Modules
//!
//! - [`output`] - Output formatting and display
//!
//! # Design
//!
//! All command output goes through this module so `--quiet` and `--debug`
//! behave the same everywhere.

pub mod output;
