//! Executes (or simulates) sidecar removal.

use crate::core::scanner::SidecarMatch;
use crate::error::RemovalError;
use crate::events::{Event, EventSender, RemovalEvent};
use std::fs;

/// What happened to a single sidecar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemovalOutcome {
    /// The file was deleted
    Removed,
    /// Dry run: the file was left in place
    DryRun,
}

/// Removes sidecars when deletion is enabled
#[derive(Debug, Clone, Copy)]
pub struct Remover {
    delete: bool,
}

impl Remover {
    pub fn new(delete: bool) -> Self {
        Self { delete }
    }

    pub fn is_dry_run(&self) -> bool {
        !self.delete
    }

    /// Remove one sidecar, or only report it in a dry run
    pub fn remove(
        &self,
        sidecar: &SidecarMatch,
        events: &EventSender,
    ) -> Result<RemovalOutcome, RemovalError> {
        if !self.delete {
            events.send(Event::Removal(RemovalEvent::WouldRemove {
                path: sidecar.path.clone(),
                size_bytes: sidecar.size_bytes,
            }));
            return Ok(RemovalOutcome::DryRun);
        }

        if let Err(e) = fs::remove_file(&sidecar.path) {
            let error = RemovalError::from_io(sidecar.path.clone(), e);
            events.send(Event::Removal(RemovalEvent::Failed {
                path: sidecar.path.clone(),
                message: error.to_string(),
            }));
            return Err(error);
        }

        events.send(Event::Removal(RemovalEvent::Removed {
            path: sidecar.path.clone(),
            size_bytes: sidecar.size_bytes,
        }));
        Ok(RemovalOutcome::Removed)
    }

    /// Remove sidecars in order, stopping at the first failure.
    ///
    /// Returns how many files were deleted.
    pub fn remove_all(
        &self,
        sidecars: &[SidecarMatch],
        events: &EventSender,
    ) -> Result<usize, RemovalError> {
        let mut removed = 0;
        for sidecar in sidecars {
            if self.remove(sidecar, events)? == RemovalOutcome::Removed {
                removed += 1;
            }
        }
        Ok(removed)
    }
}
