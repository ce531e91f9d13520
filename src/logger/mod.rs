//! The logger: filters by level, renders the level's template, optionally
//! colorizes, and writes to its output and, when enabled, its log file.
//!
//! Every method takes `&self`, so one logger can be shared across threads.
//! Flags are atomics and the remaining settings sit in a copy-on-write
//! snapshot, which keeps setters from ever waiting on an emission in progress.
//! Emissions hold a shared gate while they write; [`Logger::close`] takes it
//! exclusively so it waits for in-flight lines and holds off new ones.
//! Producers, color functions, and the error hook run outside the gate.

mod builder;
mod from_config;

pub use builder::LoggerBuilder;

use crate::Error;
use crate::fmt::{Affixes, ColorFn, Template, TokenScope};
use crate::internal;
use crate::level::{Level, LevelRegistry};
use crate::output::{ErrorHook, FileSink, LogError, open_primary};
use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};
use std::sync::{Arc, LazyLock, Mutex, PoisonError, RwLock};

/// Produces prefix or suffix text; called once per emitted line.
pub type Producer = Arc<dyn Fn() -> String + Send + Sync>;

type SharedWriter = Arc<Mutex<Box<dyn Write + Send>>>;

static DEFAULT_LOGGER: LazyLock<Logger> =
    LazyLock::new(|| Logger::new_console(Level::WARN));

/// Process-wide console logger at [`Level::WARN`].
#[must_use]
pub fn default_logger() -> &'static Logger {
    &DEFAULT_LOGGER
}

#[derive(Clone)]
pub(crate) struct Settings {
    pub(crate) file_path: Option<PathBuf>,
    pub(crate) prefix: Producer,
    pub(crate) suffix: Producer,
    pub(crate) templates: HashMap<Level, Template>,
    pub(crate) colors: HashMap<Level, ColorFn>,
    pub(crate) token_scope: TokenScope,
    pub(crate) error_hook: Option<ErrorHook>,
}

pub struct Logger {
    min_level: AtomicI32,
    quiet: AtomicBool,
    clean: AtomicBool,
    color: AtomicBool,
    log_to_file: AtomicBool,
    settings: RwLock<Arc<Settings>>,
    registry: Arc<LevelRegistry>,
    writer: RwLock<SharedWriter>,
    file: FileSink,
    gate: RwLock<()>,
}

impl Logger {
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    /// Stdout logger with the global registry and a timestamp suffix.
    #[must_use]
    pub fn new_console(min_level: Level) -> Self {
        Self::builder().level(min_level).build()
    }

    /// Logger whose output is the file at `path`, opened read/write without truncation.
    /// Starts at [`Level::WARN`] with colors off.
    ///
    /// # Errors
    /// Returns [`Error::Io`] when the file can't be opened or created.
    pub fn new_file(path: impl AsRef<Path>) -> Result<Self, Error> {
        let file = open_primary(path.as_ref())?;
        Ok(Self::builder().level(Level::WARN).output(file).build())
    }

    // ---- emission ----------------------------------------------------------

    pub fn log(&self, level: Level, msg: impl fmt::Display) {
        self.emit(None, level, &msg.to_string());
    }

    pub fn logf(&self, level: Level, args: fmt::Arguments<'_>) {
        self.emit(None, level, &args.to_string());
    }

    /// Logs `msg` followed by a newline to `writer` instead of the logger's output.
    pub fn flog(&self, writer: &mut dyn Write, level: Level, msg: impl fmt::Display) {
        self.emit(Some(writer), level, &format!("{msg}\n"));
    }

    pub fn flogf(&self, writer: &mut dyn Write, level: Level, args: fmt::Arguments<'_>) {
        self.emit(Some(writer), level, &args.to_string());
    }

    pub fn debug(&self, msg: impl fmt::Display) {
        self.log(Level::DEBUG, msg);
    }

    pub fn debugf(&self, args: fmt::Arguments<'_>) {
        self.logf(Level::DEBUG, args);
    }

    pub fn fdebugf(&self, writer: &mut dyn Write, args: fmt::Arguments<'_>) {
        self.flogf(writer, Level::DEBUG, args);
    }

    pub fn info(&self, msg: impl fmt::Display) {
        self.log(Level::INFO, msg);
    }

    pub fn infof(&self, args: fmt::Arguments<'_>) {
        self.logf(Level::INFO, args);
    }

    pub fn finfof(&self, writer: &mut dyn Write, args: fmt::Arguments<'_>) {
        self.flogf(writer, Level::INFO, args);
    }

    pub fn hint(&self, msg: impl fmt::Display) {
        self.log(Level::HINT, msg);
    }

    pub fn hintf(&self, args: fmt::Arguments<'_>) {
        self.logf(Level::HINT, args);
    }

    pub fn fhintf(&self, writer: &mut dyn Write, args: fmt::Arguments<'_>) {
        self.flogf(writer, Level::HINT, args);
    }

    pub fn important(&self, msg: impl fmt::Display) {
        self.log(Level::IMPORTANT, msg);
    }

    pub fn importantf(&self, args: fmt::Arguments<'_>) {
        self.logf(Level::IMPORTANT, args);
    }

    pub fn fimportantf(&self, writer: &mut dyn Write, args: fmt::Arguments<'_>) {
        self.flogf(writer, Level::IMPORTANT, args);
    }

    pub fn warn(&self, msg: impl fmt::Display) {
        self.log(Level::WARN, msg);
    }

    pub fn warnf(&self, args: fmt::Arguments<'_>) {
        self.logf(Level::WARN, args);
    }

    pub fn fwarnf(&self, writer: &mut dyn Write, args: fmt::Arguments<'_>) {
        self.flogf(writer, Level::WARN, args);
    }

    pub fn error(&self, msg: impl fmt::Display) {
        self.log(Level::ERROR, msg);
    }

    pub fn errorf(&self, args: fmt::Arguments<'_>) {
        self.logf(Level::ERROR, args);
    }

    pub fn ferrorf(&self, writer: &mut dyn Write, args: fmt::Arguments<'_>) {
        self.flogf(writer, Level::ERROR, args);
    }

    /// The emission pipeline shared by every leveled method.
    fn emit(&self, writer: Option<&mut dyn Write>, level: Level, message: &str) {
        if !self.enabled(level) {
            return;
        }

        let settings = self.snapshot();
        let line = self.render(&settings, level, message);
        let written = if self.is_color() {
            Cow::Owned(self.paint(&settings, level, &line))
        } else {
            Cow::Borrowed(line.as_str())
        };

        let mut failures = Vec::new();
        {
            let _gate = self.gate.read().unwrap_or_else(PoisonError::into_inner);
            if !self.is_clean() {
                let result = match writer {
                    Some(w) => w.write_all(written.as_bytes()),
                    None => self.write_output(&written),
                };
                if let Err(e) = result {
                    failures.push(LogError::ConsoleWrite(e));
                }
            }
            if self.is_log_to_file()
                && let Err(e) = self.file.write_line(&line)
            {
                failures.push(e);
            }
        }

        for err in &failures {
            report(&settings, err);
        }
    }

    /// Whether a line at `level` would be emitted right now.
    #[must_use]
    pub fn enabled(&self, level: Level) -> bool {
        !self.is_quiet() && level >= self.level()
    }

    /// Renders `message` with the level's template and fresh prefix/suffix, without color.
    #[must_use]
    pub fn format(&self, level: Level, message: &str) -> String {
        self.render(&self.snapshot(), level, message)
    }

    /// Wraps `line` in the level's color function, ignoring the color flag.
    #[must_use]
    pub fn colorize(&self, level: Level, line: &str) -> String {
        self.paint(&self.snapshot(), level, line)
    }

    fn render(&self, settings: &Settings, level: Level, message: &str) -> String {
        let template = settings
            .templates
            .get(&level)
            .cloned()
            .unwrap_or_else(|| self.registry.template(level));
        let affixes = Affixes::new((settings.prefix)(), (settings.suffix)());
        template.render(message, &affixes, settings.token_scope)
    }

    fn paint(&self, settings: &Settings, level: Level, line: &str) -> String {
        let color = settings
            .colors
            .get(&level)
            .cloned()
            .unwrap_or_else(|| self.registry.color(level));
        color(line)
    }

    fn current_writer(&self) -> SharedWriter {
        Arc::clone(&self.writer.read().unwrap_or_else(PoisonError::into_inner))
    }

    fn write_output(&self, s: &str) -> io::Result<()> {
        let writer = self.current_writer();
        let mut writer = writer.lock().unwrap_or_else(PoisonError::into_inner);
        writer.write_all(s.as_bytes())
    }

    // ---- console passthrough ----------------------------------------------

    /// Writes `s` verbatim to the output unless clean is set.
    pub fn console(&self, s: &str) {
        if self.is_clean() {
            return;
        }
        if let Err(e) = self.write_output(s) {
            self.report(&LogError::ConsoleWrite(e));
        }
    }

    pub fn consolef(&self, args: fmt::Arguments<'_>) {
        if self.is_clean() {
            return;
        }
        if let Err(e) = self.write_output(&args.to_string()) {
            self.report(&LogError::ConsoleWrite(e));
        }
    }

    pub fn fconsolef(&self, writer: &mut dyn Write, args: fmt::Arguments<'_>) {
        if self.is_clean() {
            return;
        }
        if let Err(e) = writer.write_fmt(args) {
            self.report(&LogError::ConsoleWrite(e));
        }
    }

    // ---- setters -----------------------------------------------------------

    pub fn set_level(&self, level: Level) {
        self.min_level.store(level.value(), Ordering::Relaxed);
    }

    /// Suppresses every leveled line; console passthrough is unaffected.
    pub fn set_quiet(&self, quiet: bool) {
        self.quiet.store(quiet, Ordering::Relaxed);
    }

    /// Suppresses writes to the output only; the log file still receives lines.
    pub fn set_clean(&self, clean: bool) {
        self.clean.store(clean, Ordering::Relaxed);
    }

    pub fn set_color(&self, color: bool) {
        self.color.store(color, Ordering::Relaxed);
    }

    /// Replaces the output. A line already being written finishes on the old one.
    pub fn set_output(&self, writer: impl Write + Send + 'static) {
        let writer: Box<dyn Write + Send> = Box::new(writer);
        let writer = Arc::new(Mutex::new(writer));
        *self.writer.write().unwrap_or_else(PoisonError::into_inner) = writer;
    }

    /// Sets the log file path. Takes effect at the next [`Self::init_log_file`].
    pub fn set_file(&self, path: impl Into<PathBuf>) {
        let path = path.into();
        self.update_settings(|s| s.file_path = Some(path));
    }

    pub fn set_prefix(&self, prefix: impl Fn() -> String + Send + Sync + 'static) {
        let prefix: Producer = Arc::new(prefix);
        self.update_settings(|s| s.prefix = prefix);
    }

    pub fn set_suffix(&self, suffix: impl Fn() -> String + Send + Sync + 'static) {
        let suffix: Producer = Arc::new(suffix);
        self.update_settings(|s| s.suffix = suffix);
    }

    /// Replaces the per-logger template overrides wholesale.
    pub fn set_formatter(&self, templates: HashMap<Level, Template>) {
        self.update_settings(|s| s.templates = templates);
    }

    /// Replaces the per-logger color overrides wholesale.
    pub fn set_color_map(&self, colors: HashMap<Level, ColorFn>) {
        self.update_settings(|s| s.colors = colors);
    }

    pub fn set_token_scope(&self, scope: TokenScope) {
        self.update_settings(|s| s.token_scope = scope);
    }

    /// Routes swallowed failures to `hook` instead of stderr; `None` restores stderr.
    ///
    /// The hook may call back into this logger, but a hook that logs while the
    /// log file is failing recurses for as long as the failure lasts.
    pub fn set_error_hook(&self, hook: Option<ErrorHook>) {
        self.update_settings(|s| s.error_hook = hook);
    }

    /// `true` (re)opens the log file; `false` closes it.
    pub fn set_log_to_file(&self, enabled: bool) {
        self.log_to_file.store(enabled, Ordering::Relaxed);
        if enabled {
            self.init_log_file();
        } else {
            self.file.close();
        }
    }

    /// Closes any open log file, then opens the configured path for appending.
    /// Failures are reported through the error hook, never returned.
    pub fn init_log_file(&self) {
        self.file.close();
        let settings = self.snapshot();
        let Some(path) = settings.file_path.as_deref() else {
            report(&settings, &LogError::NoFilePath);
            return;
        };
        if let Err(source) = self.file.open(path) {
            report(
                &settings,
                &LogError::FileOpen {
                    path: path.to_path_buf(),
                    source,
                },
            );
        }
    }

    fn update_settings(&self, f: impl FnOnce(&mut Settings)) {
        let mut guard = self.settings.write().unwrap_or_else(PoisonError::into_inner);
        let mut next = (**guard).clone();
        f(&mut next);
        *guard = Arc::new(next);
    }

    fn snapshot(&self) -> Arc<Settings> {
        Arc::clone(&self.settings.read().unwrap_or_else(PoisonError::into_inner))
    }

    fn report(&self, err: &LogError) {
        report(&self.snapshot(), err);
    }

    // ---- shutdown ----------------------------------------------------------

    /// Waits for in-flight lines, closes the log file, and deletes it when `remove` is set.
    /// The log-to-file flag is left as is.
    pub fn close(&self, remove: bool) {
        let _gate = self.gate.write().unwrap_or_else(PoisonError::into_inner);
        self.file.close();

        if !remove {
            return;
        }
        let settings = self.snapshot();
        let Some(path) = settings.file_path.as_deref() else {
            report(&settings, &LogError::NoFilePath);
            return;
        };
        if let Err(source) = fs::remove_file(path) {
            report(
                &settings,
                &LogError::FileRemove {
                    path: path.to_path_buf(),
                    source,
                },
            );
        }
    }

    /// # Errors
    /// The first I/O error from flushing the output or the log file.
    pub fn flush(&self) -> Result<(), Error> {
        self.current_writer()
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .flush()?;
        self.file.flush()?;
        Ok(())
    }

    // ---- getters -----------------------------------------------------------

    #[must_use]
    pub fn level(&self) -> Level {
        Level(self.min_level.load(Ordering::Relaxed))
    }

    #[must_use]
    pub fn is_quiet(&self) -> bool {
        self.quiet.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.clean.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn is_color(&self) -> bool {
        self.color.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn is_log_to_file(&self) -> bool {
        self.log_to_file.load(Ordering::Relaxed)
    }

    /// Whether a log file handle is currently open.
    #[must_use]
    pub fn has_log_file(&self) -> bool {
        self.file.is_open()
    }

    #[must_use]
    pub fn file_path(&self) -> Option<PathBuf> {
        self.snapshot().file_path.clone()
    }

    #[must_use]
    pub fn token_scope(&self) -> TokenScope {
        self.snapshot().token_scope
    }

    #[must_use]
    pub fn registry(&self) -> &Arc<LevelRegistry> {
        &self.registry
    }
}

fn report(settings: &Settings, err: &LogError) {
    match &settings.error_hook {
        Some(hook) => hook(err),
        None => internal::diagnostic(err),
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("level", &self.level())
            .field("quiet", &self.is_quiet())
            .field("clean", &self.is_clean())
            .field("color", &self.is_color())
            .field("log_to_file", &self.is_log_to_file())
            .field("file_path", &self.file_path())
            .field("token_scope", &self.token_scope())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Default)]
    struct Buf(Arc<Mutex<Vec<u8>>>);

    impl Write for Buf {
        fn write(&mut self, data: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(data);
            Ok(data.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Buf {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    fn buffered_logger(buf: &Buf) -> Logger {
        Logger::builder()
            .registry(Arc::new(LevelRegistry::with_defaults()))
            .level(Level::DEBUG)
            .output(buf.clone())
            .suffix(|| ", T".to_string())
            .build()
    }

    #[test]
    fn setter_swaps_snapshot_without_touching_old_one() {
        let buf = Buf::default();
        let logger = buffered_logger(&buf);
        let before = logger.snapshot();
        logger.set_token_scope(TokenScope::Template);

        assert_eq!(before.token_scope, TokenScope::Line);
        assert_eq!(logger.token_scope(), TokenScope::Template);
    }

    #[test]
    fn producers_run_per_line() {
        use std::sync::atomic::AtomicUsize;

        let buf = Buf::default();
        let logger = buffered_logger(&buf);
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        logger.set_suffix(move || {
            let n = counter.fetch_add(1, Ordering::SeqCst);
            format!(", #{n}")
        });

        logger.info("a");
        logger.info("b");

        assert_eq!(buf.text(), "[-] a , #0\n[-] b , #1\n");
    }

    #[test]
    fn fconsolef_ignores_logger_output() {
        let buf = Buf::default();
        let logger = buffered_logger(&buf);
        let mut other = Vec::new();

        logger.fconsolef(&mut other, format_args!("{}-{}", 1, 2));

        assert_eq!(other, b"1-2");
        assert!(buf.text().is_empty());
    }
}
