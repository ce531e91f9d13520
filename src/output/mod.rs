//! Runtime failures while writing log lines, and the log file sink.
//!
//! Emission never hands errors back to the caller. Each failure becomes a
//! [`LogError`] that goes to the logger's [`ErrorHook`], or to stderr when no
//! hook is installed.

mod file;

pub use file::{FileSink, open_primary};

use std::fmt;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

/// Receives every swallowed runtime failure of a logger.
pub type ErrorHook = Arc<dyn Fn(&LogError) + Send + Sync>;

#[derive(Debug)]
pub enum LogError {
    /// File logging was enabled before a path was configured.
    NoFilePath,
    /// The configured log file could not be opened.
    FileOpen { path: PathBuf, source: io::Error },
    /// A line was due for the file but no handle is open.
    FileNotInitialized,
    FileWrite(io::Error),
    ConsoleWrite(io::Error),
    /// `close(true)` could not delete the log file.
    FileRemove { path: PathBuf, source: io::Error },
}

impl fmt::Display for LogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoFilePath => write!(f, "log file path is not set"),
            Self::FileOpen { path, source } => {
                write!(f, "cannot open log file {}: {source}", path.display())
            }
            Self::FileNotInitialized => write!(f, "log file is not initialized"),
            Self::FileWrite(e) => write!(f, "writing to log file: {e}"),
            Self::ConsoleWrite(e) => write!(f, "writing to output: {e}"),
            Self::FileRemove { path, source } => {
                write!(f, "removing log file {}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for LogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::FileOpen { source, .. } | Self::FileRemove { source, .. } => Some(source),
            Self::FileWrite(e) | Self::ConsoleWrite(e) => Some(e),
            Self::NoFilePath | Self::FileNotInitialized => None,
        }
    }
}
