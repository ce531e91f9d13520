//! Severity levels that gate which messages reach the writer and the log file.
//!
//! Levels are plain integers so host programs can slot their own severities in
//! between the built-ins (see [`registry`]).

pub mod registry;

pub use registry::{LevelOptions, LevelRegistry, register_level};

use std::fmt;
use std::str::FromStr;

/// Derives `Ord` so the logger can compare a message's level against the configured minimum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Level(pub i32);

impl Level {
    /// Startup, teardown, and state-change details useful for diagnosing issues.
    pub const DEBUG: Self = Self(10);
    /// Normal operational milestones.
    pub const INFO: Self = Self(20);
    /// Progress the user probably wants to see even when skimming.
    pub const HINT: Self = Self(22);
    /// Results that should stand out from regular info lines.
    pub const IMPORTANT: Self = Self(24);
    /// Non-fatal anomalies that may need attention.
    pub const WARN: Self = Self(30);
    /// Failures that prevent the operation from completing.
    pub const ERROR: Self = Self(40);

    #[must_use]
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn value(self) -> i32 {
        self.0
    }

    /// Built-in levels in ascending order.
    #[must_use]
    pub const fn builtin() -> [Self; 6] {
        [
            Self::DEBUG,
            Self::INFO,
            Self::HINT,
            Self::IMPORTANT,
            Self::WARN,
            Self::ERROR,
        ]
    }

    /// Display name from the global registry, or the decimal value when unregistered.
    #[must_use]
    pub fn name(self) -> String {
        LevelRegistry::global().name(self)
    }
}

impl From<i32> for Level {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

/// Returned by `FromStr` so callers can distinguish "unknown level" from other parse failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseLevelError(String);

impl fmt::Display for ParseLevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown log level: '{}'", self.0)
    }
}

impl std::error::Error for ParseLevelError {}

impl FromStr for Level {
    type Err = ParseLevelError;

    /// Accepts a decimal value or any name known to the global registry (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LevelRegistry::global().parse_level(s)
    }
}

impl ParseLevelError {
    pub(crate) fn new(input: &str) -> Self {
        Self(input.to_string())
    }
}
