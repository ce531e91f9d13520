//! Configuration struct definitions.

use serde::Deserialize;

/// Flags shared by every line the logger writes.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Minimum level: a registered name (`"warn"`) or an integer (`"15"`).
    pub level: String,
    pub quiet: bool,
    pub clean: bool,
    pub color: bool,
    /// `"line"` or `"template"`.
    pub token_scope: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            quiet: false,
            clean: false,
            color: false,
            token_scope: "line".to_string(),
        }
    }
}

/// Second sink next to the console.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub enabled: bool,
    /// `~` is expanded.
    pub path: Option<String>,
}

/// One `[[levels]]` entry: a custom level or an override of a built-in one.
#[derive(Debug, Clone, Deserialize)]
pub struct LevelConfig {
    pub level: i32,
    pub name: String,
    /// Template such as `"[test] %s\n"`.
    #[serde(default)]
    pub format: Option<String>,
    /// Color spec such as `"green_bold"`.
    #[serde(default)]
    pub color: Option<String>,
}
