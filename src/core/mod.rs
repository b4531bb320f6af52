//! # Core Module
//!
//! The UI-agnostic cleaning engine.
//!
//! ## Modules
//! - `scanner` - Walks the tree, classifies raw files, matches sidecars
//! - `remover` - Deletes sidecars inline or after the walk
//! - `reporter` - Builds the end-of-run summary

pub mod remover;
pub mod reporter;
pub mod scanner;

// Re-export commonly used types
pub use remover::{RemovalMode, Remover};
pub use reporter::RunSummary;
pub use scanner::{ScanConfig, ScanReport, SidecarMatch, SidecarScanner, Verbosity};
