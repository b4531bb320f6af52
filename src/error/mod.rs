//! # Error Module
//!
//! Error types for the raw sidecar cleaner.
//!
//! ## Design Principles
//! - **Never panic** on user data - return errors instead
//! - **Include context** - paths, file names, what went wrong
//! - **Fatal vs. non-fatal** - traversal errors are collected, removal errors abort

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error
#[derive(Error, Debug)]
pub enum RawCleanerError {
    #[error("Scanning error: {0}")]
    Scan(#[from] ScanError),

    #[error("Removal error: {0}")]
    Removal(#[from] RemovalError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Logging setup failed: {0}")]
    Logging(String),

    #[error("Failed to render summary: {0}")]
    Output(#[from] serde_json::Error),
}

/// Errors that occur while walking the base path
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    #[error("Not a directory: {path}")]
    NotADirectory { path: PathBuf },

    #[error("Permission denied accessing: {path}")]
    PermissionDenied { path: PathBuf },

    #[error("Failed to read directory {path}: {source}")]
    ReadDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read entry {path}: {message}")]
    ReadEntry { path: PathBuf, message: String },
}

impl ScanError {
    /// Classify an I/O failure on `path` into the matching scan error.
    pub fn from_io(path: PathBuf, source: std::io::Error) -> Self {
        match source.kind() {
            std::io::ErrorKind::NotFound => ScanError::DirectoryNotFound { path },
            std::io::ErrorKind::PermissionDenied => ScanError::PermissionDenied { path },
            _ => ScanError::ReadDirectory { path, source },
        }
    }

    pub fn path(&self) -> &PathBuf {
        match self {
            ScanError::DirectoryNotFound { path }
            | ScanError::NotADirectory { path }
            | ScanError::PermissionDenied { path }
            | ScanError::ReadDirectory { path, .. }
            | ScanError::ReadEntry { path, .. } => path,
        }
    }
}

/// Errors that occur while deleting a sidecar file
#[derive(Error, Debug)]
pub enum RemovalError {
    #[error("Sidecar vanished before it could be removed: {path}")]
    Vanished { path: PathBuf },

    #[error("Failed to remove {path}: {source}")]
    Failed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl RemovalError {
    pub fn from_io(path: PathBuf, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            RemovalError::Vanished { path }
        } else {
            RemovalError::Failed { path, source }
        }
    }

    /// Path of the file that could not be removed
    pub fn path(&self) -> &PathBuf {
        match self {
            RemovalError::Vanished { path } | RemovalError::Failed { path, .. } => path,
        }
    }
}

/// Convenience Result type alias
pub type Result<T> = std::result::Result<T, RawCleanerError>;
