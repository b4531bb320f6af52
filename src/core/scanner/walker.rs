//! Single-pass directory walk using walkdir.

use super::duplicate::DuplicateDetector;
use super::filter::{normalize_extension, RawFilter, DEFAULT_RAW_EXTENSIONS};
use super::listing::DirListing;
use super::sidecar::{SidecarMatcher, DEFAULT_PREVIEW_EXTENSIONS};
use super::ScanReport;
use crate::core::remover::{RemovalMode, RemovalOutcome, Remover};
use crate::error::{RawCleanerError, Result, ScanError};
use crate::events::{Event, EventSender, RunEvent, RunPhase, ScanEvent};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use walkdir::WalkDir;

/// How much per-file detail gets logged
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verbosity {
    /// Summary and warnings only
    #[default]
    Quiet,
    /// Also every sidecar found
    Verbose,
    /// Also every raw file visited
    VeryVerbose,
}

impl Verbosity {
    /// `-v` once is verbose, twice (or `--very-verbose`) is very verbose
    pub fn from_flags(verbose_count: u8, very_verbose: bool) -> Self {
        match (verbose_count, very_verbose) {
            (_, true) => Verbosity::VeryVerbose,
            (0, false) => Verbosity::Quiet,
            (1, false) => Verbosity::Verbose,
            _ => Verbosity::VeryVerbose,
        }
    }

    pub fn logs_sidecars(&self) -> bool {
        *self >= Verbosity::Verbose
    }

    pub fn logs_raw_files(&self) -> bool {
        *self >= Verbosity::VeryVerbose
    }
}

/// Configuration for a cleaning run. Fixed once the run starts.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Directory to walk
    pub base_path: PathBuf,
    /// Actually delete sidecars (otherwise dry run)
    pub delete: bool,
    pub verbosity: Verbosity,
    /// Remove during the walk or after it
    pub mode: RemovalMode,
    /// Whether hidden sidecars are included
    pub include_hidden: bool,
    /// Raw extensions, without dots
    pub raw_extensions: Vec<String>,
    /// Preview extensions, without dots
    pub preview_extensions: Vec<String>,
    /// Whether to follow symbolic links
    pub follow_symlinks: bool,
}

impl ScanConfig {
    /// Dry run over `base_path` with default extensions
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            delete: false,
            verbosity: Verbosity::default(),
            mode: RemovalMode::default(),
            include_hidden: false,
            raw_extensions: DEFAULT_RAW_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            preview_extensions: DEFAULT_PREVIEW_EXTENSIONS
                .iter()
                .map(|e| e.to_string())
                .collect(),
            follow_symlinks: false,
        }
    }

    /// Reject empty or overlapping extension lists
    pub fn validate(&self) -> Result<()> {
        let raw: HashSet<String> = self
            .raw_extensions
            .iter()
            .map(|e| normalize_extension(e))
            .filter(|e| !e.is_empty())
            .collect();
        let preview: HashSet<String> = self
            .preview_extensions
            .iter()
            .map(|e| normalize_extension(e))
            .filter(|e| !e.is_empty())
            .collect();

        if raw.is_empty() {
            return Err(RawCleanerError::Config(
                "at least one raw extension is required".to_string(),
            ));
        }
        if preview.is_empty() {
            return Err(RawCleanerError::Config(
                "at least one preview extension is required".to_string(),
            ));
        }

        let mut overlap: Vec<&String> = raw.intersection(&preview).collect();
        if !overlap.is_empty() {
            overlap.sort();
            return Err(RawCleanerError::Config(format!(
                "extensions cannot be both raw and preview: {}",
                overlap
                    .iter()
                    .map(|e| e.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            )));
        }

        Ok(())
    }
}

/// Walks the base path once, matching and removing sidecars
pub struct SidecarScanner {
    config: ScanConfig,
    raw_filter: RawFilter,
    matcher: SidecarMatcher,
    detector: DuplicateDetector,
    remover: Remover,
}

impl SidecarScanner {
    /// Build a scanner; fails on an invalid configuration
    pub fn new(config: ScanConfig) -> Result<Self> {
        config.validate()?;

        let raw_filter = RawFilter::with_extensions(&config.raw_extensions);
        let matcher = SidecarMatcher::with_extensions(&config.preview_extensions)
            .with_hidden(config.include_hidden);
        let detector = DuplicateDetector::new(raw_filter.clone());
        let remover = Remover::new(config.delete);

        Ok(Self {
            config,
            raw_filter,
            matcher,
            detector,
            remover,
        })
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// The base path must exist, be a directory and be listable
    pub fn check_base_path(&self) -> std::result::Result<(), ScanError> {
        let base = &self.config.base_path;
        let metadata =
            fs::metadata(base).map_err(|e| ScanError::from_io(base.clone(), e))?;

        if !metadata.is_dir() {
            return Err(ScanError::NotADirectory { path: base.clone() });
        }

        fs::read_dir(base).map_err(|e| ScanError::from_io(base.clone(), e))?;
        Ok(())
    }

    /// Run the walk and, in deferred mode, the removal phase after it
    pub fn run(&self, events: &EventSender) -> Result<ScanReport> {
        let start = Instant::now();

        self.check_base_path()?;

        events.send(Event::Run(RunEvent::Started {
            delete_enabled: self.config.delete,
            inline: self.config.mode.is_inline(),
        }));
        events.send(Event::Run(RunEvent::PhaseChanged {
            phase: RunPhase::Scanning,
        }));

        let mut report = ScanReport::new(
            self.config.base_path.clone(),
            self.config.delete,
            self.config.mode,
        );

        self.walk(&mut report, events)?;

        events.send(Event::Scan(ScanEvent::Completed {
            raw_files_seen: report.raw_files_seen,
            sidecars_found: report.sidecar_count(),
            total_bytes: report.total_bytes,
        }));

        if !self.config.mode.is_inline() {
            events.send(Event::Run(RunEvent::PhaseChanged {
                phase: RunPhase::Removing,
            }));
            report.removed = self.remover.remove_all(&report.sidecars, events)?;
        }

        report.duration_ms = start.elapsed().as_millis() as u64;

        events.send(Event::Run(RunEvent::Completed {
            removed: report.removed,
            duration_ms: report.duration_ms,
        }));

        Ok(report)
    }

    fn walk(&self, report: &mut ScanReport, events: &EventSender) -> Result<()> {
        let base = &self.config.base_path;

        events.send(Event::Scan(ScanEvent::Started {
            base_path: base.clone(),
        }));

        // A sidecar shared by two raws (IMG.RAF + IMG.DNG) belongs to the first
        let mut claimed: HashSet<PathBuf> = HashSet::new();
        let mut skipped: HashSet<PathBuf> = HashSet::new();
        let mut reported_duplicates: HashSet<PathBuf> = HashSet::new();
        // The directory snapshot and walkdir can both trip over the same entry
        let mut failed: HashSet<PathBuf> = HashSet::new();
        let mut listing: Option<DirListing> = None;

        let walker = WalkDir::new(base)
            .follow_links(self.config.follow_symlinks)
            .sort_by_file_name();

        for entry_result in walker {
            let entry = match entry_result {
                Ok(entry) => entry,
                Err(e) => {
                    let path = e
                        .path()
                        .map(Path::to_path_buf)
                        .unwrap_or_else(|| base.clone());
                    let error = if e.io_error().map(|io| io.kind())
                        == Some(std::io::ErrorKind::PermissionDenied)
                    {
                        ScanError::PermissionDenied { path }
                    } else {
                        ScanError::ReadEntry {
                            path,
                            message: e.to_string(),
                        }
                    };
                    record_error(report, events, &mut failed, error);
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            let Some(raw) = self.raw_filter.classify(entry.path()) else {
                continue;
            };
            let path = raw.path.as_path();

            report.raw_files_seen += 1;
            events.send(Event::Scan(ScanEvent::RawFound {
                path: raw.path.clone(),
            }));

            let Some(dir) = path.parent() else {
                continue;
            };

            let stale = listing
                .as_ref()
                .map(|current| current.dir() != dir)
                .unwrap_or(true);
            if stale {
                listing = match DirListing::read(dir, self.config.follow_symlinks) {
                    Ok(mut fresh) => {
                        for error in fresh.take_errors() {
                            record_error(report, events, &mut failed, error);
                        }
                        Some(fresh)
                    }
                    Err(error) => {
                        record_error(report, events, &mut failed, error);
                        None
                    }
                };
            }

            let Some(current) = listing.as_ref() else {
                continue;
            };

            let lookup = self.matcher.find(path, current);

            for hidden in lookup.hidden_skipped {
                if claimed.contains(&hidden.path) || !skipped.insert(hidden.path.clone()) {
                    continue;
                }
                events.send(Event::Scan(ScanEvent::HiddenSidecarSkipped {
                    raw: hidden.raw.clone(),
                    sidecar: hidden.path.clone(),
                }));
                report.hidden_skipped.push(hidden);
            }

            for sidecar in lookup.included {
                if !claimed.insert(sidecar.path.clone()) {
                    continue;
                }

                events.send(Event::Scan(ScanEvent::SidecarFound {
                    raw: sidecar.raw.clone(),
                    sidecar: sidecar.path.clone(),
                    size_bytes: sidecar.size_bytes,
                }));

                if self.config.mode.is_inline()
                    && self.remover.remove(&sidecar, events)? == RemovalOutcome::Removed
                {
                    report.removed += 1;
                }

                report.record_sidecar(sidecar);
            }

            for duplicate in self.detector.find(path, current) {
                if !reported_duplicates.insert(duplicate.duplicate.clone()) {
                    continue;
                }
                events.send(Event::Scan(ScanEvent::DuplicateRawFound {
                    raw: duplicate.raw.clone(),
                    duplicate: duplicate.duplicate.clone(),
                }));
                report.duplicates.push(duplicate);
            }
        }

        Ok(())
    }
}

fn record_error(
    report: &mut ScanReport,
    events: &EventSender,
    failed: &mut HashSet<PathBuf>,
    error: ScanError,
) {
    if !failed.insert(error.path().clone()) {
        return;
    }
    events.send(Event::Scan(ScanEvent::Error {
        path: error.path().clone(),
        message: error.to_string(),
    }));
    report.errors.push(error);
}
