//! # Scanner Module
//!
//! Walks a directory tree, finds camera raw files and the preview images
//! that share their stem.
//!
//! ## Pieces
//! - `RawFilter` - decides whether a file is raw by its true extension
//! - `SidecarMatcher` - exact-stem preview matching within one directory
//! - `DuplicateDetector` - numbered raw copies (`IMG_01-1.RAF`), advisory only
//! - `SidecarScanner` - the single-pass walk that ties them together
//!
//! ## Example
//! ```rust,ignore
//! use raw_sidecar_cleaner::core::scanner::{ScanConfig, SidecarScanner};
//!
//! let scanner = SidecarScanner::new(ScanConfig::new("/Users/me/Pictures"))?;
//! let report = scanner.run(&null_sender())?;
//! ```

mod duplicate;
mod filter;
mod listing;
mod sidecar;
mod walker;

pub use duplicate::DuplicateDetector;
pub use filter::{normalize_extension, RawFilter, DEFAULT_RAW_EXTENSIONS};
pub use listing::{DirListing, Sibling};
pub use sidecar::{SidecarLookup, SidecarMatcher, DEFAULT_PREVIEW_EXTENSIONS};
pub use walker::{ScanConfig, SidecarScanner, Verbosity};

use crate::core::remover::RemovalMode;
use crate::error::ScanError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A file classified as raw during the walk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawFile {
    pub path: PathBuf,
    /// Lowercased extension without the dot
    pub extension: String,
}

/// A preview file that belongs to a raw file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SidecarMatch {
    /// Path to the preview
    pub path: PathBuf,
    /// The raw file it belongs to
    pub raw: PathBuf,
    /// File size in bytes
    pub size_bytes: u64,
    /// Whether the name starts with `.`
    pub hidden: bool,
}

/// A numbered copy of a raw file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateRaw {
    pub raw: PathBuf,
    pub duplicate: PathBuf,
    pub size_bytes: u64,
}

/// Everything one run found and did.
///
/// Built fresh for every run and owned by the caller; there is no global state.
#[derive(Debug)]
pub struct ScanReport {
    /// Base directory that was walked
    pub base_path: PathBuf,
    /// Raw files visited
    pub raw_files_seen: usize,
    /// Sidecars found, in walk order
    pub sidecars: Vec<SidecarMatch>,
    /// Sum of all sidecar sizes, whether or not they were deleted
    pub total_bytes: u64,
    /// Hidden sidecars left out of the run
    pub hidden_skipped: Vec<SidecarMatch>,
    /// Numbered raw copies (never removed)
    pub duplicates: Vec<DuplicateRaw>,
    /// Entries that could not be read (non-fatal)
    pub errors: Vec<ScanError>,
    /// Sidecars actually deleted
    pub removed: usize,
    pub delete_enabled: bool,
    pub mode: RemovalMode,
    pub duration_ms: u64,
}

impl ScanReport {
    pub(crate) fn new(base_path: PathBuf, delete_enabled: bool, mode: RemovalMode) -> Self {
        Self {
            base_path,
            raw_files_seen: 0,
            sidecars: Vec::new(),
            total_bytes: 0,
            hidden_skipped: Vec::new(),
            duplicates: Vec::new(),
            errors: Vec::new(),
            removed: 0,
            delete_enabled,
            mode,
            duration_ms: 0,
        }
    }

    pub fn sidecar_count(&self) -> usize {
        self.sidecars.len()
    }

    pub(crate) fn record_sidecar(&mut self, sidecar: SidecarMatch) {
        self.total_bytes += sidecar.size_bytes;
        self.sidecars.push(sidecar);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_accumulates_sidecar_bytes() {
        let mut report = ScanReport::new(PathBuf::from("/photos"), false, RemovalMode::Deferred);
        report.record_sidecar(SidecarMatch {
            path: PathBuf::from("/photos/a.jpg"),
            raw: PathBuf::from("/photos/a.raf"),
            size_bytes: 300,
            hidden: false,
        });
        report.record_sidecar(SidecarMatch {
            path: PathBuf::from("/photos/b.jpg"),
            raw: PathBuf::from("/photos/b.raf"),
            size_bytes: 200,
            hidden: false,
        });

        assert_eq!(report.sidecar_count(), 2);
        assert_eq!(report.total_bytes, 500);
        assert_eq!(report.removed, 0);
    }
}
