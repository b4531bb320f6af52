//! # CLI Module
//!
//! Command-line interface for the raw sidecar cleaner.
//!
//! ## Usage
//! ```bash
//! # Dry run over ~/Pictures
//! raw-cleaner
//!
//! # Delete previews next to raw files, logging each one
//! raw-cleaner --path /Volumes/Photos --delete -v
//!
//! # Include ._ companions, delete while walking
//! raw-cleaner /Volumes/Photos --delete --hidden --inline
//!
//! # JSON summary
//! raw-cleaner ~/Pictures --output json
//! ```

use clap::{ArgAction, Parser, ValueEnum};
use console::{style, Term};
use indicatif::{ProgressBar, ProgressStyle};
use raw_sidecar_cleaner::core::remover::RemovalMode;
use raw_sidecar_cleaner::core::reporter::{format_bytes, RunSummary};
use raw_sidecar_cleaner::core::scanner::{ScanConfig, SidecarScanner, Verbosity};
use raw_sidecar_cleaner::error::{RawCleanerError, Result};
use raw_sidecar_cleaner::events::{
    Event, EventChannel, EventReceiver, RemovalEvent, RunEvent, ScanEvent,
};
use raw_sidecar_cleaner::logging::default_log_path;
use std::path::PathBuf;
use std::thread;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Raw Sidecar Cleaner - remove JPEG previews that duplicate your raw files
#[derive(Parser, Debug)]
#[command(name = "raw-cleaner")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory to scan (defaults to your Pictures folder)
    #[arg(value_name = "DIR")]
    dir: Option<PathBuf>,

    /// Directory to scan, same as DIR
    #[arg(long = "path", value_name = "DIR", conflicts_with = "dir")]
    path: Option<PathBuf>,

    /// Actually delete the sidecar files
    #[arg(long)]
    delete: bool,

    /// Log each sidecar found (-vv also logs each raw file)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Log each raw file visited as well as each sidecar
    #[arg(long)]
    very_verbose: bool,

    /// Delete sidecars during the walk instead of after it
    #[arg(long)]
    inline: bool,

    /// Include hidden sidecar files (e.g. ._IMG_01.JPG)
    #[arg(long)]
    hidden: bool,

    /// Raw extensions to look for (comma separated)
    #[arg(long = "raw-ext", value_name = "EXT", value_delimiter = ',')]
    raw_ext: Vec<String>,

    /// Preview extensions treated as sidecars (comma separated)
    #[arg(long = "preview-ext", value_name = "EXT", value_delimiter = ',')]
    preview_ext: Vec<String>,

    /// Follow symbolic links while walking
    #[arg(long)]
    follow_symlinks: bool,

    /// Output format for the summary
    #[arg(short, long, default_value = "pretty")]
    output: OutputFormat,

    /// Also write logs to ~/.raw-cleaner/raw-cleaner.log
    #[arg(long)]
    log_file: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Human-readable output with colors
    Pretty,
    /// JSON summary for scripting
    Json,
}

impl Cli {
    fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.verbose, self.very_verbose)
    }

    fn scan_config(&self) -> Result<ScanConfig> {
        let base_path = self
            .path
            .clone()
            .or_else(|| self.dir.clone())
            .or_else(default_base_path)
            .ok_or_else(|| {
                RawCleanerError::Config(
                    "no directory given and no Pictures folder could be found".to_string(),
                )
            })?;

        let mut config = ScanConfig::new(base_path);
        config.delete = self.delete;
        config.verbosity = self.verbosity();
        config.mode = RemovalMode::from_inline_flag(self.inline);
        config.include_hidden = self.hidden;
        config.follow_symlinks = self.follow_symlinks;
        if !self.raw_ext.is_empty() {
            config.raw_extensions = self.raw_ext.clone();
        }
        if !self.preview_ext.is_empty() {
            config.preview_extensions = self.preview_ext.clone();
        }

        Ok(config)
    }
}

/// The user's Pictures folder, or `~/Pictures` when the platform has none
fn default_base_path() -> Option<PathBuf> {
    dirs::picture_dir().or_else(|| dirs::home_dir().map(|home| home.join("Pictures")))
}

/// Run the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let verbosity = cli.verbosity();

    let log_path = if cli.log_file {
        Some(default_log_path().ok_or_else(|| {
            RawCleanerError::Config("no home directory for the log file".to_string())
        })?)
    } else {
        None
    };
    raw_sidecar_cleaner::init_tracing(verbosity, log_path.as_deref())?;

    let result = cli
        .scan_config()
        .and_then(|config| run_clean(config, cli.output));

    if let Err(ref e) = result {
        error!(error = %e, "raw-cleaner failed");
    }
    result
}

fn run_clean(config: ScanConfig, output: OutputFormat) -> Result<()> {
    let pretty = matches!(output, OutputFormat::Pretty);
    let verbosity = config.verbosity;

    let scanner = SidecarScanner::new(config)?;
    scanner.check_base_path()?;
    let config = scanner.config();

    if pretty {
        Term::stderr()
            .write_line(&format!(
                "{} {}",
                style("Raw Sidecar Cleaner").bold().cyan(),
                style(concat!("v", env!("CARGO_PKG_VERSION"))).dim()
            ))
            .ok();
    }

    if config.delete {
        warn!("raw-cleaner will delete files");
    }
    info!(path = %config.base_path.display(), mode = %config.mode, "Looking for raw files");

    let (sender, receiver) = EventChannel::new();

    let progress = if pretty {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.enable_steady_tick(Duration::from_millis(120));
        Some(pb)
    } else {
        None
    };

    let progress_clone = progress.clone();
    let event_thread = thread::spawn(move || handle_events(receiver, verbosity, progress_clone));

    let result = scanner.run(&sender);

    // Drop sender to signal event thread to finish
    drop(sender);
    event_thread.join().ok();

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    let report = result?;
    let summary = RunSummary::from(&report);

    match output {
        OutputFormat::Pretty => print_pretty_summary(&summary),
        OutputFormat::Json => println!("{}", summary.to_json()?),
    }

    Ok(())
}

/// Turn core events into log lines and spinner updates
fn handle_events(receiver: EventReceiver, verbosity: Verbosity, progress: Option<ProgressBar>) {
    let log = |f: &dyn Fn()| match &progress {
        Some(pb) => pb.suspend(f),
        None => f(),
    };

    let mut sidecars_found = 0usize;
    let mut bytes_found = 0u64;

    for event in receiver.iter() {
        match event {
            Event::Run(RunEvent::PhaseChanged { phase }) => {
                if let Some(ref pb) = progress {
                    pb.set_message(format!("{}...", phase));
                }
            }
            Event::Scan(ScanEvent::RawFound { path }) => {
                if verbosity.logs_raw_files() {
                    log(&|| info!(path = %path.display(), "Found raw file"));
                }
            }
            Event::Scan(ScanEvent::SidecarFound {
                sidecar,
                size_bytes,
                ..
            }) => {
                sidecars_found += 1;
                bytes_found += size_bytes;
                if verbosity.logs_sidecars() {
                    log(&|| info!(path = %sidecar.display(), size_bytes, "Found sidecar"));
                }
                if let Some(ref pb) = progress {
                    pb.set_message(format!(
                        "Found {} sidecars totalling {}",
                        sidecars_found,
                        humansize::format_size(bytes_found, humansize::DECIMAL)
                    ));
                }
            }
            Event::Scan(ScanEvent::HiddenSidecarSkipped { sidecar, .. }) => {
                log(&|| {
                    warn!(path = %sidecar.display(), "Skipping hidden sidecar (use --hidden to include)")
                });
            }
            Event::Scan(ScanEvent::DuplicateRawFound { raw, duplicate }) => {
                log(&|| {
                    warn!(
                        raw = %raw.display(),
                        duplicate = %duplicate.display(),
                        "Numbered duplicate raw file, review by hand"
                    )
                });
            }
            Event::Scan(ScanEvent::Error { path, message }) => {
                log(&|| warn!(path = %path.display(), "{}", message));
            }
            Event::Removal(RemovalEvent::Removed { path, .. }) => {
                log(&|| info!(path = %path.display(), "Removed sidecar"));
            }
            Event::Removal(RemovalEvent::WouldRemove { path, .. }) => {
                log(&|| debug!(path = %path.display(), "Dry run, keeping sidecar"));
            }
            Event::Removal(RemovalEvent::Failed { path, message }) => {
                log(&|| error!(path = %path.display(), "{}", message));
            }
            _ => {}
        }
    }
}

fn print_pretty_summary(summary: &RunSummary) {
    let term = Term::stdout();

    term.write_line(&format!("{} Scan Complete", style("✓").green().bold()))
        .ok();

    let bytes_line = summary.bytes_line();
    for line in summary.lines() {
        let styled = if Some(&line) == bytes_line.as_ref() {
            style(line).yellow().to_string()
        } else {
            line
        };
        term.write_line(&format!("  {}", styled)).ok();
    }

    if !summary.delete_enabled {
        term.write_line(&format!(
            "{}",
            style("Dry run: no files were deleted.").dim()
        ))
        .ok();
    } else if summary.removed > 0 {
        term.write_line(&format!(
            "{}",
            style(format!(
                "Removed {} files ({}).",
                summary.removed,
                format_bytes(summary.total_bytes)
            ))
            .dim()
        ))
        .ok();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positional_and_flag_paths_are_equivalent() {
        let positional = Cli::parse_from(["raw-cleaner", "/photos"]);
        let flagged = Cli::parse_from(["raw-cleaner", "--path", "/photos"]);

        assert_eq!(
            positional.scan_config().unwrap().base_path,
            flagged.scan_config().unwrap().base_path
        );
    }

    #[test]
    fn flags_map_onto_config() {
        let cli = Cli::parse_from([
            "raw-cleaner",
            "/photos",
            "--delete",
            "--inline",
            "--hidden",
            "-vv",
            "--raw-ext",
            "raf,dmg",
        ]);
        let config = cli.scan_config().unwrap();

        assert!(config.delete);
        assert!(config.include_hidden);
        assert_eq!(config.mode, RemovalMode::Inline);
        assert_eq!(config.verbosity, Verbosity::VeryVerbose);
        assert_eq!(config.raw_extensions, vec!["raf", "dmg"]);
        assert_eq!(config.preview_extensions, vec!["jpg", "jpeg"]);
    }

    #[test]
    fn defaults_are_a_deferred_dry_run() {
        let config = Cli::parse_from(["raw-cleaner", "/photos"]).scan_config().unwrap();

        assert!(!config.delete);
        assert!(!config.include_hidden);
        assert_eq!(config.mode, RemovalMode::Deferred);
        assert_eq!(config.verbosity, Verbosity::Quiet);
    }

    #[test]
    fn single_v_is_verbose() {
        let cli = Cli::parse_from(["raw-cleaner", "/photos", "-v"]);
        assert_eq!(cli.verbosity(), Verbosity::Verbose);

        let cli = Cli::parse_from(["raw-cleaner", "/photos", "--very-verbose"]);
        assert_eq!(cli.verbosity(), Verbosity::VeryVerbose);
    }

    #[test]
    fn path_conflicts_with_positional() {
        let result = Cli::try_parse_from(["raw-cleaner", "/a", "--path", "/b"]);
        assert!(result.is_err());
    }
}
