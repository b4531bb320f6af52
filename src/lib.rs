//! # Raw Sidecar Cleaner
//!
//! Reclaims disk space by finding the JPEG previews that cameras and import
//! tools leave next to raw files (`IMG_01.RAF` + `IMG_01.JPG`).
//!
//! ## Core Philosophy
//! - **Dry run by default** - nothing is deleted without `--delete`
//! - **Exact matches only** - `Foo-1.raf` never claims `Foo-12.jpg`
//! - **Raw files are never touched** - numbered raw copies are only reported
//!
//! ## Architecture
//! - `core` - The scanning, removal and reporting engine
//! - `events` - Injected event reporting (no global logger in the core)
//! - `error` - Error taxonomy
//! - `logging` - Tracing subscriber and rotating log file

pub mod core;
pub mod error;
pub mod events;
pub mod logging;

// Re-export commonly used types at the crate root
pub use error::{RawCleanerError, Result};
pub use logging::init_tracing;
