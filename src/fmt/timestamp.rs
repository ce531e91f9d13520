//! Default suffix producer.

use chrono::Local;

/// Layout used by the default suffix: `2024-03-01 14:05.09`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M.%S";

/// Current local time in [`TIMESTAMP_FORMAT`].
#[must_use]
pub fn now() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}

/// `", " + now()`, appended after Info/Hint/Important messages by the built-in templates.
#[must_use]
pub fn timestamp_suffix() -> String {
    format!(", {}", now())
}
