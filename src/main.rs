//! # raw-cleaner CLI
//!
//! Command-line interface for the raw sidecar cleaner.
//!
//! ## Usage
//! ```bash
//! raw-cleaner ~/Pictures
//! raw-cleaner --path ~/Pictures --delete -v
//! ```

mod cli;

use raw_sidecar_cleaner::Result;

fn main() -> Result<()> {
    cli::run()
}
