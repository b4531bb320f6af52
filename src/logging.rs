//! Tracing setup and the optional rotating log file.
//!
//! Log lines go to stderr. With a log file configured they are also appended,
//! without colors, to `~/.raw-cleaner/raw-cleaner.log`. The file is rotated
//! once at startup when it has grown past [`MAX_LOG_BYTES`].

use crate::core::scanner::Verbosity;
use crate::error::{RawCleanerError, Result};
use std::ffi::OsString;
use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

pub const LOG_DIR_NAME: &str = ".raw-cleaner";
pub const LOG_FILE_NAME: &str = "raw-cleaner.log";
/// Rotate when the log grows past 1 MiB
pub const MAX_LOG_BYTES: u64 = 1024 * 1024;
/// Rotated generations kept next to the live file
pub const KEEP_LOG_FILES: usize = 3;

/// `~/.raw-cleaner/raw-cleaner.log`, if a home directory exists
pub fn default_log_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(LOG_DIR_NAME).join(LOG_FILE_NAME))
}

/// Path of rotated generation `n` (`raw-cleaner.log.1`, ...)
pub fn generation_path(path: &Path, n: usize) -> PathBuf {
    let mut name: OsString = path.as_os_str().to_owned();
    name.push(format!(".{}", n));
    PathBuf::from(name)
}

/// Shift `path` to `path.1` (and older generations up) when it exceeds `max_bytes`.
///
/// At most `keep` rotated files survive; the oldest is deleted.
pub fn rotate_log(path: &Path, max_bytes: u64, keep: usize) -> io::Result<bool> {
    let size = match fs::metadata(path) {
        Ok(metadata) => metadata.len(),
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(e),
    };

    if size <= max_bytes {
        return Ok(false);
    }

    if keep == 0 {
        fs::remove_file(path)?;
        return Ok(true);
    }

    let oldest = generation_path(path, keep);
    if oldest.exists() {
        fs::remove_file(&oldest)?;
    }

    for n in (1..keep).rev() {
        let from = generation_path(path, n);
        if from.exists() {
            fs::rename(&from, generation_path(path, n + 1))?;
        }
    }

    fs::rename(path, generation_path(path, 1))?;
    Ok(true)
}

fn open_log_file(path: &Path) -> io::Result<fs::File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    rotate_log(path, MAX_LOG_BYTES, KEEP_LOG_FILES)?;
    OpenOptions::new().create(true).append(true).open(path)
}

/// Default filter directive for a verbosity level. `RUST_LOG` wins over it.
pub fn default_directive(verbosity: Verbosity) -> &'static str {
    if verbosity.logs_raw_files() {
        "debug"
    } else {
        "info"
    }
}

/// Install the global tracing subscriber.
///
/// This should be called once by the application entry point.
pub fn init_tracing(verbosity: Verbosity, log_file: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    let stderr_layer = fmt::layer().with_writer(io::stderr).with_target(false);

    let file_layer = match log_file {
        Some(path) => {
            let file = open_log_file(path).map_err(|e| {
                RawCleanerError::Logging(format!("{}: {}", path.display(), e))
            })?;
            Some(
                fmt::layer()
                    .with_ansi(false)
                    .with_target(false)
                    .with_writer(Mutex::new(file)),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| RawCleanerError::Logging(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_log(path: &Path, size: usize) {
        let mut file = fs::File::create(path).unwrap();
        file.write_all(&vec![b'x'; size]).unwrap();
    }

    #[test]
    fn small_log_is_left_alone() {
        let temp_dir = TempDir::new().unwrap();
        let log = temp_dir.path().join(LOG_FILE_NAME);
        write_log(&log, 10);

        assert!(!rotate_log(&log, 100, 3).unwrap());
        assert!(log.exists());
        assert!(!generation_path(&log, 1).exists());
    }

    #[test]
    fn missing_log_is_not_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let log = temp_dir.path().join(LOG_FILE_NAME);

        assert!(!rotate_log(&log, 100, 3).unwrap());
    }

    #[test]
    fn large_log_shifts_generations() {
        let temp_dir = TempDir::new().unwrap();
        let log = temp_dir.path().join(LOG_FILE_NAME);
        write_log(&generation_path(&log, 1), 1);
        write_log(&generation_path(&log, 2), 2);
        write_log(&generation_path(&log, 3), 3);
        write_log(&log, 200);

        assert!(rotate_log(&log, 100, 3).unwrap());

        assert!(!log.exists());
        assert_eq!(fs::metadata(generation_path(&log, 1)).unwrap().len(), 200);
        assert_eq!(fs::metadata(generation_path(&log, 2)).unwrap().len(), 1);
        assert_eq!(fs::metadata(generation_path(&log, 3)).unwrap().len(), 2);
        assert!(!generation_path(&log, 4).exists());
    }

    #[test]
    fn generation_appends_number() {
        let path = generation_path(Path::new("/home/me/.raw-cleaner/raw-cleaner.log"), 2);
        assert_eq!(path, PathBuf::from("/home/me/.raw-cleaner/raw-cleaner.log.2"));
    }

    #[test]
    fn very_verbose_lowers_default_level() {
        assert_eq!(default_directive(Verbosity::Quiet), "info");
        assert_eq!(default_directive(Verbosity::VeryVerbose), "debug");
    }
}
