//! Tests for logger functionality.

use lvlog::fmt::{Color, paint};
use lvlog::{Level, LevelRegistry, LogError, Logger, Template, TokenScope, default_logger};
use std::collections::HashMap;
use std::io::{self, Write};
use std::sync::{Arc, Mutex, mpsc};
use std::thread;

#[derive(Clone, Default)]
struct SharedBuf(Arc<Mutex<Vec<u8>>>);

impl Write for SharedBuf {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl SharedBuf {
    fn text(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }

    fn len(&self) -> usize {
        self.0.lock().unwrap().len()
    }
}

struct FailingWriter;

impl Write for FailingWriter {
    fn write(&mut self, _: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Signals when a write starts, then blocks until released.
struct StallingWriter {
    entered: mpsc::Sender<()>,
    release: mpsc::Receiver<()>,
}

impl Write for StallingWriter {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        let _ = self.entered.send(());
        let _ = self.release.recv();
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Isolated registry and a fixed suffix so output is deterministic.
fn logger_with(buf: &SharedBuf, level: Level) -> Logger {
    Logger::builder()
        .registry(Arc::new(LevelRegistry::with_defaults()))
        .level(level)
        .output(buf.clone())
        .suffix(|| ", 2024-01-02 03:04.05".to_string())
        .build()
}

#[test]
fn builder_default() {
    let logger = Logger::builder().build();
    assert_eq!(logger.level(), Level::WARN);
    assert!(!logger.is_color());
    assert!(!logger.is_quiet());
    assert!(!logger.is_clean());
    assert!(!logger.is_log_to_file());
    assert_eq!(logger.file_path(), None);
    assert_eq!(logger.token_scope(), TokenScope::Line);
}

#[test]
fn console_constructor_sets_level() {
    let logger = Logger::new_console(Level::DEBUG);
    assert_eq!(logger.level(), Level::DEBUG);
    assert!(Arc::ptr_eq(logger.registry(), LevelRegistry::global()));
}

#[test]
fn default_logger_is_warn() {
    assert_eq!(default_logger().level(), Level::WARN);
}

#[test]
fn warn_threshold_scenario() {
    let buf = SharedBuf::default();
    let logger = logger_with(&buf, Level::WARN);

    logger.debug("x");
    assert_eq!(buf.len(), 0);

    logger.warn("x");
    assert_eq!(buf.text(), "[Warn] x \n");
}

#[test]
fn below_threshold_writes_nothing() {
    let buf = SharedBuf::default();
    let logger = logger_with(&buf, Level::ERROR);

    for level in Level::builtin() {
        if level < Level::ERROR {
            logger.log(level, "hidden");
        }
    }
    assert_eq!(buf.len(), 0);
}

#[test]
fn each_enabled_level_writes_one_line() {
    let buf = SharedBuf::default();
    let logger = logger_with(&buf, Level::DEBUG);

    logger.debug("d");
    logger.info("i");
    logger.hint("h");
    logger.important("p");
    logger.warn("w");
    logger.error("e");

    assert_eq!(
        buf.text(),
        "[Debug] d \n\
         [-] i , 2024-01-02 03:04.05\n\
         [+] h , 2024-01-02 03:04.05\n\
         [*] p , 2024-01-02 03:04.05\n\
         [Warn] w \n\
         [Error] e \n"
    );
}

#[test]
fn formatted_variants() {
    let buf = SharedBuf::default();
    let logger = logger_with(&buf, Level::DEBUG);

    logger.errorf(format_args!("{} of {}", 3, 4));
    logger.importantf(format_args!("{}test{}", "aaa", "sd"));

    assert_eq!(
        buf.text(),
        "[Error] 3 of 4 \n[*] aaatestsd , 2024-01-02 03:04.05\n"
    );
}

#[test]
fn writer_variants_bypass_output() {
    let buf = SharedBuf::default();
    let logger = logger_with(&buf, Level::DEBUG);
    let mut other = Vec::new();

    logger.fwarnf(&mut other, format_args!("to {}", "other"));
    logger.flog(&mut other, Level::ERROR, "line");

    assert_eq!(String::from_utf8(other).unwrap(), "[Warn] to other \n[Error] line\n \n");
    assert_eq!(buf.len(), 0);
}

#[test]
fn quiet_suppresses_everything_leveled() {
    let buf = SharedBuf::default();
    let logger = logger_with(&buf, Level::DEBUG);
    logger.set_quiet(true);

    logger.error("nope");
    assert_eq!(buf.len(), 0);

    logger.console("still here");
    assert_eq!(buf.text(), "still here");
}

#[test]
fn clean_suppresses_console_only() {
    let buf = SharedBuf::default();
    let logger = logger_with(&buf, Level::DEBUG);
    logger.set_clean(true);

    logger.error("e");
    logger.console("c");
    logger.consolef(format_args!("{}", 1));

    assert_eq!(buf.len(), 0);
    assert!(logger.is_clean());
}

#[test]
fn color_wraps_entire_line() {
    let buf = SharedBuf::default();
    let logger = Logger::builder()
        .registry(Arc::new(LevelRegistry::with_defaults()))
        .level(Level::DEBUG)
        .output(buf.clone())
        .prefix(|| "pre:".to_string())
        .suffix(|| ":suf".to_string())
        .template(Level::INFO, Template::parse("{{prefix}}%s{{suffix}}").unwrap())
        .color(true)
        .build();

    logger.info("msg");
    assert_eq!(buf.text(), "\x1b[36mpre:msg:suf\x1b[0m");
}

#[test]
fn color_off_leaves_line_untouched() {
    let buf = SharedBuf::default();
    let logger = logger_with(&buf, Level::DEBUG);
    logger.error("plain");
    assert_eq!(buf.text(), "[Error] plain \n");

    logger.set_color(true);
    logger.error("red");
    assert_eq!(
        buf.text(),
        "[Error] plain \n\x1b[1;31m[Error] red \n\x1b[0m"
    );
}

#[test]
fn instance_overrides_beat_registry() {
    let buf = SharedBuf::default();
    let logger = logger_with(&buf, Level::DEBUG);
    logger.set_color(true);

    let mut templates = HashMap::new();
    templates.insert(Level::WARN, Template::parse("W: %s\n").unwrap());
    logger.set_formatter(templates);
    let mut colors = HashMap::new();
    colors.insert(Level::WARN, paint(Color::Blue, false));
    logger.set_color_map(colors);

    logger.warn("a");
    assert_eq!(buf.text(), "\x1b[34mW: a\n\x1b[0m");
}

#[test]
fn set_formatter_replaces_wholesale() {
    let buf = SharedBuf::default();
    let logger = Logger::builder()
        .registry(Arc::new(LevelRegistry::with_defaults()))
        .level(Level::DEBUG)
        .output(buf.clone())
        .template(Level::WARN, Template::parse("W %s\n").unwrap())
        .build();

    let mut templates = HashMap::new();
    templates.insert(Level::ERROR, Template::parse("E %s\n").unwrap());
    logger.set_formatter(templates);

    logger.warn("w");
    logger.error("e");
    assert_eq!(buf.text(), "[Warn] w \nE e\n");
}

#[test]
fn suffix_token_in_message_is_substituted_by_default() {
    let buf = SharedBuf::default();
    let logger = logger_with(&buf, Level::DEBUG);

    logger.warn("at{{suffix}}");
    assert_eq!(buf.text(), "[Warn] at, 2024-01-02 03:04.05 \n");
}

#[test]
fn template_scope_keeps_message_tokens() {
    let buf = SharedBuf::default();
    let logger = logger_with(&buf, Level::DEBUG);
    logger.set_token_scope(TokenScope::Template);

    logger.warn("at{{suffix}}");
    assert_eq!(buf.text(), "[Warn] at{{suffix}} \n");
}

#[test]
fn output_write_failure_goes_to_hook() {
    let errors = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&errors);
    let logger = Logger::builder()
        .output(FailingWriter)
        .on_error(move |e| sink.lock().unwrap().push(e.to_string()))
        .build();

    logger.error("boom");

    let errors = errors.lock().unwrap();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].starts_with("writing to output"));
}

#[test]
fn set_output_redirects() {
    let first = SharedBuf::default();
    let second = SharedBuf::default();
    let logger = logger_with(&first, Level::WARN);

    logger.warn("one");
    logger.set_output(second.clone());
    logger.warn("two");

    assert_eq!(first.text(), "[Warn] one \n");
    assert_eq!(second.text(), "[Warn] two \n");
}

#[test]
fn set_output_does_not_wait_for_stalled_write() {
    let (entered_tx, entered_rx) = mpsc::channel();
    let (release_tx, release_rx) = mpsc::channel();
    let buf = SharedBuf::default();
    let logger = Arc::new(logger_with(&buf, Level::WARN));
    logger.set_output(StallingWriter {
        entered: entered_tx,
        release: release_rx,
    });

    let stalled = {
        let logger = Arc::clone(&logger);
        thread::spawn(move || logger.warn("stalled"))
    };
    entered_rx.recv().unwrap();

    logger.set_output(buf.clone());
    logger.warn("next");
    assert_eq!(buf.text(), "[Warn] next \n");

    release_tx.send(()).unwrap();
    drop(release_tx);
    stalled.join().unwrap();
    assert_eq!(buf.text(), "[Warn] next \n");
}

#[test]
fn concurrent_emission_keeps_lines_whole() {
    let buf = SharedBuf::default();
    let logger = Arc::new(logger_with(&buf, Level::DEBUG));

    let handles: Vec<_> = (0..8)
        .map(|t| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || {
                for i in 0..50 {
                    logger.warnf(format_args!("t{t}-{i}"));
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let text = buf.text();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 400);
    assert!(lines.iter().all(|l| l.starts_with("[Warn] t") && l.ends_with(' ')));
}

#[test]
fn no_file_path_is_reported_not_raised() {
    let errors: Arc<Mutex<Vec<String>>> = Arc::default();
    let sink = Arc::clone(&errors);
    let logger = Logger::builder()
        .output(io::sink())
        .on_error(move |e: &LogError| sink.lock().unwrap().push(e.to_string()))
        .build();

    logger.set_log_to_file(true);
    assert!(logger.is_log_to_file());
    assert!(!logger.has_log_file());

    logger.error("x");
    assert_eq!(
        *errors.lock().unwrap(),
        vec![
            "log file path is not set".to_string(),
            "log file is not initialized".to_string(),
        ]
    );
}

#[test]
fn error_hook_can_be_removed() {
    let logger = Logger::builder().output(io::sink()).build();
    logger.set_error_hook(Some(Arc::new(|_: &LogError| {})));
    logger.set_error_hook(None);
    // back on stderr; must not panic
    logger.set_log_to_file(true);
}
