//! TOML configuration for building a [`crate::Logger`] without code.
//!
//! Nothing here is read implicitly: a host program calls [`Config::load`] (or
//! [`Config::load_from`]) and hands the result to [`crate::Logger::from_config`].

mod structs;

pub use structs::{FileConfig, GeneralConfig, LevelConfig};

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// An empty file still produces a working logger: every section defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub file: FileConfig,
    /// Registered before `general.level` is parsed, so the level may name a custom one.
    pub levels: Vec<LevelConfig>,
}

impl Config {
    /// Loads `<config dir>/lvlog/config.toml`; a missing file yields defaults.
    ///
    /// # Errors
    /// Fails if the config directory can't be determined, the file can't be read, or TOML parsing fails.
    pub fn load() -> Result<Self, crate::Error> {
        Self::load_from(&Self::get_config_path()?)
    }

    /// Loads configuration from an explicit path; a missing file yields defaults.
    ///
    /// # Errors
    /// Returns error if the file cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self, crate::Error> {
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::parse(&fs::read_to_string(path)?)
    }

    /// # Errors
    /// Returns [`crate::Error::ConfigParse`] on invalid TOML or mistyped fields.
    pub fn parse(content: &str) -> Result<Self, crate::Error> {
        Ok(toml::from_str(content)?)
    }

    /// Platform config directory (`~/.config/lvlog/config.toml` on Linux).
    ///
    /// # Errors
    /// Fails when the platform has no concept of a config directory.
    pub fn get_config_path() -> Result<PathBuf, crate::Error> {
        directories::ProjectDirs::from("", "", "lvlog")
            .map(|dirs| dirs.config_dir().join("config.toml"))
            .ok_or(crate::Error::ConfigDirNotFound)
    }

    /// `file.path` with `~` expanded.
    #[must_use]
    pub fn log_file_path(&self) -> Option<PathBuf> {
        self.file
            .path
            .as_deref()
            .map(|p| PathBuf::from(shellexpand::tilde(p).as_ref()))
    }
}
