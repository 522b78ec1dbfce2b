//! Common types and utilities for the idlx interface merger.
//!
//! This crate provides foundational types used across all idlx crates:
//! - Centralized limits for alias resolution and union decomposition
//! - Merge configuration (`MergeOptions`)
//! - Fatal structural errors (`StructuralError`)
//! - Non-fatal warnings and the accumulated warning log (`Warning`, `WarningLog`)

// Centralized limits and thresholds
pub mod limits;

// Merge/decomposition configuration
pub mod options;
pub use options::MergeOptions;

// Fatal errors that abort a batch
pub mod error;
pub use error::StructuralError;

// Warnings accumulated during a run
pub mod diagnostics;
pub use diagnostics::{Warning, WarningKind, WarningLog};
