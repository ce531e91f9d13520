//! Last-resort reporting for failures the logger swallows.
//!
//! A logger that can't write its log file has nowhere better to complain than
//! the process's own stderr, so that is where unhooked diagnostics go.

use crate::output::LogError;
use std::io::{self, Write};

/// Prints `Error: <err>` to stderr. A failing stderr is ignored.
pub fn diagnostic(err: &LogError) {
    let _ = writeln!(io::stderr().lock(), "Error: {err}");
}
