//! Event type definitions for run reporting.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// All events emitted while cleaning a directory tree
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    /// Walk phase events
    Scan(ScanEvent),
    /// Removal events (inline or deferred)
    Removal(RemovalEvent),
    /// Run-level events
    Run(RunEvent),
}

/// Events during the walk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ScanEvent {
    /// Walk has started
    Started { base_path: PathBuf },
    /// A raw file was visited
    RawFound { path: PathBuf },
    /// A sidecar preview was matched to a raw file
    SidecarFound {
        raw: PathBuf,
        sidecar: PathBuf,
        size_bytes: u64,
    },
    /// A hidden sidecar matched but was left out
    HiddenSidecarSkipped { raw: PathBuf, sidecar: PathBuf },
    /// A numbered copy of a raw file exists next to it
    DuplicateRawFound { raw: PathBuf, duplicate: PathBuf },
    /// An entry could not be read; the walk continues
    Error { path: PathBuf, message: String },
    /// Walk completed
    Completed {
        raw_files_seen: usize,
        sidecars_found: usize,
        total_bytes: u64,
    },
}

/// Events from the removal executor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum RemovalEvent {
    /// A sidecar was deleted
    Removed { path: PathBuf, size_bytes: u64 },
    /// Dry run: a sidecar would have been deleted
    WouldRemove { path: PathBuf, size_bytes: u64 },
    /// Deleting a sidecar failed; the run stops
    Failed { path: PathBuf, message: String },
}

/// Run-level events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum RunEvent {
    /// The run has started
    Started { delete_enabled: bool, inline: bool },
    /// Moving to a new phase
    PhaseChanged { phase: RunPhase },
    /// The run finished without a fatal error
    Completed { removed: usize, duration_ms: u64 },
}

/// Phases of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunPhase {
    Scanning,
    Removing,
}

impl std::fmt::Display for RunPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunPhase::Scanning => write!(f, "Scanning"),
            RunPhase::Removing => write!(f, "Removing"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sidecar_event_is_serializable() {
        let event = Event::Scan(ScanEvent::SidecarFound {
            raw: PathBuf::from("/photos/IMG_01.RAF"),
            sidecar: PathBuf::from("/photos/IMG_01.JPG"),
            size_bytes: 500_000,
        });

        let json = serde_json::to_string(&event).unwrap();
        let deserialized: Event = serde_json::from_str(&json).unwrap();

        match deserialized {
            Event::Scan(ScanEvent::SidecarFound { size_bytes, .. }) => {
                assert_eq!(size_bytes, 500_000);
            }
            _ => panic!("Wrong event type"),
        }
    }

    #[test]
    fn phase_displays_name() {
        assert_eq!(RunPhase::Removing.to_string(), "Removing");
    }
}
