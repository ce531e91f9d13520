//! Stepwise construction for loggers that need more than [`Logger::new_console`] offers.

use super::{Logger, Producer, Settings};
use crate::fmt::{ColorFn, Template, TokenScope, timestamp_suffix};
use crate::level::{Level, LevelRegistry};
use crate::output::{ErrorHook, FileSink, LogError};
use std::collections::HashMap;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicI32};
use std::sync::{Arc, Mutex, RwLock};

pub struct LoggerBuilder {
    min_level: Level,
    quiet: bool,
    clean: bool,
    color: bool,
    log_to_file: bool,
    writer: Box<dyn Write + Send>,
    registry: Arc<LevelRegistry>,
    settings: Settings,
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl LoggerBuilder {
    /// Stdout, [`Level::WARN`], no color, global registry, timestamp suffix, empty prefix.
    #[must_use]
    pub fn new() -> Self {
        Self {
            min_level: Level::WARN,
            quiet: false,
            clean: false,
            color: false,
            log_to_file: false,
            writer: Box::new(io::stdout()),
            registry: Arc::clone(LevelRegistry::global()),
            settings: Settings {
                file_path: None,
                prefix: Arc::new(String::new),
                suffix: Arc::new(timestamp_suffix),
                templates: HashMap::new(),
                colors: HashMap::new(),
                token_scope: TokenScope::default(),
                error_hook: None,
            },
        }
    }

    #[must_use]
    pub const fn level(mut self, level: Level) -> Self {
        self.min_level = level;
        self
    }

    #[must_use]
    pub const fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    #[must_use]
    pub const fn clean(mut self, clean: bool) -> Self {
        self.clean = clean;
        self
    }

    #[must_use]
    pub const fn color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    #[must_use]
    pub fn output(mut self, writer: impl Write + Send + 'static) -> Self {
        self.writer = Box::new(writer);
        self
    }

    /// Log file path; the file is only opened when [`Self::log_to_file`] is also set.
    #[must_use]
    pub fn log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.settings.file_path = Some(path.into());
        self
    }

    #[must_use]
    pub const fn log_to_file(mut self, enabled: bool) -> Self {
        self.log_to_file = enabled;
        self
    }

    /// Levels are resolved against `registry` instead of the global one.
    #[must_use]
    pub fn registry(mut self, registry: Arc<LevelRegistry>) -> Self {
        self.registry = registry;
        self
    }

    #[must_use]
    pub fn prefix(mut self, prefix: impl Fn() -> String + Send + Sync + 'static) -> Self {
        let prefix: Producer = Arc::new(prefix);
        self.settings.prefix = prefix;
        self
    }

    #[must_use]
    pub fn suffix(mut self, suffix: impl Fn() -> String + Send + Sync + 'static) -> Self {
        let suffix: Producer = Arc::new(suffix);
        self.settings.suffix = suffix;
        self
    }

    /// Overrides the registry template for one level on this logger only.
    #[must_use]
    pub fn template(mut self, level: Level, template: Template) -> Self {
        self.settings.templates.insert(level, template);
        self
    }

    /// Overrides the registry color for one level on this logger only.
    #[must_use]
    pub fn level_color(mut self, level: Level, color: ColorFn) -> Self {
        self.settings.colors.insert(level, color);
        self
    }

    #[must_use]
    pub const fn token_scope(mut self, scope: TokenScope) -> Self {
        self.settings.token_scope = scope;
        self
    }

    /// Receives failures that would otherwise be printed to stderr.
    ///
    /// Runs after the line is written, outside the close gate. Logging to the
    /// same logger from here recurses while the log file keeps failing.
    #[must_use]
    pub fn on_error(mut self, hook: impl Fn(&LogError) + Send + Sync + 'static) -> Self {
        let hook: ErrorHook = Arc::new(hook);
        self.settings.error_hook = Some(hook);
        self
    }

    /// Opens the log file right away when file logging was requested.
    #[must_use]
    pub fn build(self) -> Logger {
        let logger = Logger {
            min_level: AtomicI32::new(self.min_level.value()),
            quiet: AtomicBool::new(self.quiet),
            clean: AtomicBool::new(self.clean),
            color: AtomicBool::new(self.color),
            log_to_file: AtomicBool::new(self.log_to_file),
            settings: RwLock::new(Arc::new(self.settings)),
            registry: self.registry,
            writer: RwLock::new(Arc::new(Mutex::new(self.writer))),
            file: FileSink::new(),
            gate: RwLock::new(()),
        };
        if self.log_to_file {
            logger.init_log_file();
        }
        logger
    }
}
