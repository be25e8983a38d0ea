//! Logging setup for the CLI and library.
//! Feature flags: `verbose`, `file-logging`.
//!
//! Library code emits `tracing` events; this module installs the subscriber
//! that prints them. `RUST_LOG` directives are honoured on top of the
//! configured level. When a log file is set, events go to the file instead
//! of the console. `verbose!` is a plain printer for user-facing progress
//! lines and never goes to the log file.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
#[cfg(feature = "verbose")]
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

pub use tracing::{debug, error, info, warn};

/// Logging levels.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    /// Error-level messages.
    Error = 1,
    /// Warning-level messages.
    Warn = 2,
    /// Info-level messages.
    Info = 3,
    /// Debug-level messages.
    Debug = 4,
}

impl Level {
    /// The matching `tracing` filter
    #[must_use]
    pub const fn as_filter(self) -> LevelFilter {
        match self {
            Self::Error => LevelFilter::ERROR,
            Self::Warn => LevelFilter::WARN,
            Self::Info => LevelFilter::INFO,
            Self::Debug => LevelFilter::DEBUG,
        }
    }
}

impl FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "error" | "err" => Ok(Self::Error),
            "warn" | "warning" => Ok(Self::Warn),
            "info" => Ok(Self::Info),
            "debug" => Ok(Self::Debug),
            _ => Err(format!("Unknown log level: '{s}'")),
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let as_str = match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
        };
        f.write_str(as_str)
    }
}

/// Parse a level string (case-insensitive). Returns `None` if unrecognised.
#[must_use]
pub fn parse_level(level: &str) -> Option<Level> {
    level.parse().ok()
}

/// Errors raised while installing the subscriber
#[derive(Debug, Error)]
pub enum LoggerError {
    /// The log file could not be opened
    #[error("failed to open log file {}: {source}", path.display())]
    File {
        /// Log file path
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },
    /// A global subscriber is already installed
    #[error("logger already initialized")]
    AlreadyInitialized,
}

/// Runtime flag controlling whether `verbose!` output should emit.
#[cfg(feature = "verbose")]
static VERBOSE_ENABLED: AtomicBool = AtomicBool::new(false);

/// Enable verbose output at runtime.
#[cfg(feature = "verbose")]
pub fn enable_verbose() {
    VERBOSE_ENABLED.store(true, Ordering::SeqCst);
}
#[cfg(not(feature = "verbose"))]
/// Enable verbose output at runtime (no-op when `verbose` feature is disabled).
pub fn enable_verbose() {}

/// Disable verbose output at runtime.
#[cfg(feature = "verbose")]
pub fn disable_verbose() {
    VERBOSE_ENABLED.store(false, Ordering::SeqCst);
}
#[cfg(not(feature = "verbose"))]
/// Disable verbose output at runtime (no-op when `verbose` feature is disabled).
pub fn disable_verbose() {}

/// Returns whether verbose output is enabled (false if `verbose` is disabled).
#[cfg(feature = "verbose")]
pub fn is_verbose_enabled() -> bool {
    VERBOSE_ENABLED.load(Ordering::SeqCst)
}
/// Returns whether verbose output is enabled (false if `verbose` is disabled).
#[cfg(not(feature = "verbose"))]
pub const fn is_verbose_enabled() -> bool {
    false
}

fn env_filter(level: Level) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(level.as_filter().into())
        .from_env_lossy()
}

/// Install the global subscriber.
///
/// Events at or above `level` are printed to stderr, or appended to
/// `log_file` when one is given and the `file-logging` feature is enabled.
///
/// # Errors
/// Returns an error if the log file cannot be opened or a subscriber is
/// already installed.
pub fn init(level: Level, log_file: Option<&Path>) -> Result<(), LoggerError> {
    #[cfg(feature = "file-logging")]
    if let Some(path) = log_file {
        let open_err = |source| LoggerError::File {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(open_err)?;
        }
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(open_err)?;
        return tracing_subscriber::fmt()
            .with_env_filter(env_filter(level))
            .with_target(false)
            .with_ansi(false)
            .with_writer(std::sync::Mutex::new(file))
            .try_init()
            .map_err(|_| LoggerError::AlreadyInitialized);
    }
    #[cfg(not(feature = "file-logging"))]
    let _ = log_file;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter(level))
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|_| LoggerError::AlreadyInitialized)
}

/// Prints a user-facing progress line (requires `verbose` feature and runtime enablement).
/// This is a simple printer with no tags, and does NOT go to log files.
#[macro_export]
macro_rules! verbose {
    ($($arg:tt)*) => {
        if $crate::shared::logger::is_verbose_enabled() {
            println!($($arg)*);
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_parse() {
        assert_eq!(parse_level("ERROR"), Some(Level::Error));
        assert_eq!(parse_level("warning"), Some(Level::Warn));
        assert_eq!(parse_level("info"), Some(Level::Info));
        assert_eq!(parse_level("debug"), Some(Level::Debug));
        assert_eq!(parse_level("trace"), None);
        assert_eq!(parse_level(""), None);
    }

    #[test]
    fn test_level_display_and_order() {
        assert_eq!(Level::Warn.to_string(), "warn");
        assert!(Level::Error < Level::Debug);
        assert_eq!(Level::Info.as_filter(), LevelFilter::INFO);
    }

    #[cfg(feature = "verbose")]
    #[test]
    fn test_verbose_toggle() {
        enable_verbose();
        assert!(is_verbose_enabled());
        crate::verbose!("verbose {}", 1);
        disable_verbose();
        assert!(!is_verbose_enabled());
    }

    #[test]
    fn logs_do_not_panic() {
        info!("info {}", 1);
        warn!("warn {}", 2);
        error!("error {}", 3);
        debug!("debug {}", 4);
    }
}
