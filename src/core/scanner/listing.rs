//! Snapshot of the regular files in one directory.

use crate::error::ScanError;
use std::fs;
use std::path::{Path, PathBuf};

/// A regular file found next to a raw file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sibling {
    pub name: String,
    pub path: PathBuf,
    pub size_bytes: u64,
}

/// Regular files of a single directory, sorted by name.
///
/// Read once per directory and shared by the sidecar matcher and the
/// duplicate detector.
#[derive(Debug)]
pub struct DirListing {
    dir: PathBuf,
    entries: Vec<Sibling>,
    errors: Vec<ScanError>,
}

impl DirListing {
    /// List `dir`. Entries that cannot be inspected are kept as errors.
    pub fn read(dir: &Path, follow_symlinks: bool) -> Result<Self, ScanError> {
        let read_dir =
            fs::read_dir(dir).map_err(|e| ScanError::from_io(dir.to_path_buf(), e))?;

        let mut entries = Vec::new();
        let mut errors = Vec::new();

        for entry_result in read_dir {
            let entry = match entry_result {
                Ok(entry) => entry,
                Err(e) => {
                    errors.push(ScanError::ReadEntry {
                        path: dir.to_path_buf(),
                        message: e.to_string(),
                    });
                    continue;
                }
            };

            let path = entry.path();
            let metadata = if follow_symlinks {
                fs::metadata(&path)
            } else {
                entry.metadata()
            };

            let metadata = match metadata {
                Ok(metadata) => metadata,
                Err(e) => {
                    errors.push(ScanError::ReadEntry {
                        path,
                        message: e.to_string(),
                    });
                    continue;
                }
            };

            if !metadata.is_file() {
                continue;
            }

            // Names that are not UTF-8 can never equal a UTF-8 stem
            let Ok(name) = entry.file_name().into_string() else {
                continue;
            };

            entries.push(Sibling {
                name,
                path,
                size_bytes: metadata.len(),
            });
        }

        entries.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(Self {
            dir: dir.to_path_buf(),
            entries,
            errors,
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn entries(&self) -> &[Sibling] {
        &self.entries
    }

    /// Per-entry failures hit while listing
    pub fn take_errors(&mut self) -> Vec<ScanError> {
        std::mem::take(&mut self.errors)
    }
}
