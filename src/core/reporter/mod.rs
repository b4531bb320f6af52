//! # Reporter Module
//!
//! Turns a finished [`ScanReport`] into the end-of-run summary.
//!
//! The bytes line only appears when at least one sidecar was found. In a dry
//! run it tells the user how much `--delete` would reclaim.

use crate::core::remover::RemovalMode;
use crate::core::scanner::ScanReport;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Serializable summary of a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub base_path: PathBuf,
    pub raw_files_seen: usize,
    pub sidecars_found: usize,
    /// Bytes reclaimed (delete mode) or reclaimable (dry run)
    pub total_bytes: u64,
    pub removed: usize,
    pub delete_enabled: bool,
    pub mode: RemovalMode,
    pub hidden_skipped: usize,
    pub duplicate_raws: Vec<PathBuf>,
    pub errors: usize,
    pub duration_ms: u64,
}

impl From<&ScanReport> for RunSummary {
    fn from(report: &ScanReport) -> Self {
        Self {
            base_path: report.base_path.clone(),
            raw_files_seen: report.raw_files_seen,
            sidecars_found: report.sidecar_count(),
            total_bytes: report.total_bytes,
            removed: report.removed,
            delete_enabled: report.delete_enabled,
            mode: report.mode,
            hidden_skipped: report.hidden_skipped.len(),
            duplicate_raws: report
                .duplicates
                .iter()
                .map(|d| d.duplicate.clone())
                .collect(),
            errors: report.errors.len(),
            duration_ms: report.duration_ms,
        }
    }
}

impl RunSummary {
    /// `None` when there is nothing to reclaim
    pub fn bytes_line(&self) -> Option<String> {
        if self.sidecars_found == 0 {
            return None;
        }

        let amount = format_bytes(self.total_bytes);
        Some(if self.delete_enabled {
            format!("Saved {}.", amount)
        } else {
            format!("Run with --delete to save {}.", amount)
        })
    }

    /// Human-readable summary, one line per fact
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!("Found {} raw {}.", self.raw_files_seen, files(self.raw_files_seen)),
            format!(
                "Found {} sidecar {}.",
                self.sidecars_found,
                files(self.sidecars_found)
            ),
        ];

        lines.extend(self.bytes_line());

        if self.hidden_skipped > 0 {
            lines.push(format!(
                "Skipped {} hidden sidecar {} (use --hidden to include them).",
                self.hidden_skipped,
                files(self.hidden_skipped)
            ));
        }

        if !self.duplicate_raws.is_empty() {
            lines.push(format!(
                "Found {} numbered duplicate raw {}; these are never removed automatically.",
                self.duplicate_raws.len(),
                files(self.duplicate_raws.len())
            ));
        }

        if self.errors > 0 {
            lines.push(format!(
                "{} {} could not be read and {} skipped.",
                self.errors,
                if self.errors == 1 { "entry" } else { "entries" },
                if self.errors == 1 { "was" } else { "were" }
            ));
        }

        lines
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

fn files(count: usize) -> &'static str {
    if count == 1 {
        "file"
    } else {
        "files"
    }
}

/// `500 kB (500000 bytes)`
pub fn format_bytes(bytes: u64) -> String {
    format!(
        "{} ({} bytes)",
        humansize::format_size(bytes, humansize::DECIMAL),
        bytes
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(sidecars_found: usize, total_bytes: u64, delete_enabled: bool) -> RunSummary {
        RunSummary {
            base_path: PathBuf::from("/photos"),
            raw_files_seen: 1,
            sidecars_found,
            total_bytes,
            removed: if delete_enabled { sidecars_found } else { 0 },
            delete_enabled,
            mode: RemovalMode::Deferred,
            hidden_skipped: 0,
            duplicate_raws: Vec::new(),
            errors: 0,
            duration_ms: 12,
        }
    }

    #[test]
    fn dry_run_suggests_delete() {
        let lines = summary(1, 500_000, false).lines();

        assert_eq!(lines[0], "Found 1 raw file.");
        assert_eq!(lines[1], "Found 1 sidecar file.");
        assert!(lines[2].starts_with("Run with --delete to save"));
        assert!(lines[2].contains("500000 bytes"));
    }

    #[test]
    fn delete_mode_reports_savings() {
        let line = summary(2, 1_500_000, true).bytes_line().unwrap();
        assert!(line.starts_with("Saved"));
        assert!(line.contains("1500000 bytes"));
    }

    #[test]
    fn no_sidecars_means_no_bytes_line() {
        let summary = summary(0, 0, false);
        assert!(summary.bytes_line().is_none());
        assert_eq!(summary.lines().len(), 2);
        assert!(summary.lines().iter().all(|l| !l.contains("bytes")));
    }

    #[test]
    fn advisory_lines_for_hidden_and_duplicates() {
        let mut summary = summary(1, 10, false);
        summary.hidden_skipped = 2;
        summary.duplicate_raws = vec![PathBuf::from("/photos/IMG_01-1.RAF")];
        summary.errors = 1;

        let lines = summary.lines();
        assert!(lines.iter().any(|l| l.contains("2 hidden sidecar files")));
        assert!(lines.iter().any(|l| l.contains("1 numbered duplicate raw file")));
        assert!(lines.iter().any(|l| l.contains("1 entry could not be read")));
    }

    #[test]
    fn summary_serializes_to_json() {
        let json = summary(1, 500_000, false).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["total_bytes"], 500_000);
        assert_eq!(value["mode"], "deferred");
        assert_eq!(value["delete_enabled"], false);
    }
}
