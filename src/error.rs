//! Unified error type for the fallible lvlog operations (construction and config loading).
//!
//! Emission never returns errors; see [`crate::output::LogError`] for the runtime diagnostics.

use crate::fmt::TemplateError;

/// Error type for lvlog operations.
#[derive(Debug)]
pub enum Error {
    /// I/O error (opening the file logger, reading a config file, flushing).
    Io(std::io::Error),
    /// TOML config parsing error.
    ConfigParse(toml::de::Error),
    /// Config directory not found.
    ConfigDirNotFound,
    /// A level template failed validation.
    Template(TemplateError),
    /// Level string is neither a registered name nor an integer.
    InvalidLevel(String),
    /// Color spec doesn't name a known color.
    InvalidColor(String),
    /// Token scope is neither `line` nor `template`.
    InvalidTokenScope(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::ConfigParse(e) => write!(f, "parse error: {e}"),
            Self::ConfigDirNotFound => write!(f, "config directory not found"),
            Self::Template(e) => write!(f, "invalid template: {e}"),
            Self::InvalidLevel(level) => write!(f, "invalid level: {level}"),
            Self::InvalidColor(color) => write!(f, "invalid color: {color}"),
            Self::InvalidTokenScope(scope) => write!(f, "invalid token scope: {scope}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::ConfigParse(e) => Some(e),
            Self::Template(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Self::ConfigParse(e)
    }
}

impl From<TemplateError> for Error {
    fn from(e: TemplateError) -> Self {
        Self::Template(e)
    }
}
