//! # Remover Module
//!
//! Deletes confirmed sidecars, or reports what would be deleted in a dry run.
//! The first failed deletion is fatal; earlier deletions are not rolled back.

mod executor;

pub use executor::{RemovalOutcome, Remover};

use serde::{Deserialize, Serialize};

/// When sidecars are removed relative to the walk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemovalMode {
    /// Remove each sidecar as soon as it is found
    Inline,
    /// Collect everything first, remove after the walk
    #[default]
    Deferred,
}

impl RemovalMode {
    pub fn from_inline_flag(inline: bool) -> Self {
        if inline {
            RemovalMode::Inline
        } else {
            RemovalMode::Deferred
        }
    }

    pub fn is_inline(&self) -> bool {
        matches!(self, RemovalMode::Inline)
    }
}

impl std::fmt::Display for RemovalMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RemovalMode::Inline => write!(f, "inline"),
            RemovalMode::Deferred => write!(f, "deferred"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inline_flag_selects_mode() {
        assert_eq!(RemovalMode::from_inline_flag(true), RemovalMode::Inline);
        assert_eq!(RemovalMode::from_inline_flag(false), RemovalMode::Deferred);
        assert_eq!(RemovalMode::default(), RemovalMode::Deferred);
    }
}
