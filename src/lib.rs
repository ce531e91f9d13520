//! `lvlog` - leveled console and file logging.
//!
//! Messages are filtered by an integer severity, rendered through a per-level
//! template, optionally wrapped in ANSI color, and written to an output stream
//! and/or an append-only log file.
//!
//! # Example
//!
//! ```
//! use lvlog::{Level, Logger};
//!
//! let logger = Logger::builder()
//!     .level(Level::DEBUG)
//!     .output(std::io::sink())
//!     .build();
//!
//! logger.info("service started");
//! logger.warnf(format_args!("retrying in {}s", 5));
//! logger.important("build finished");
//! ```
//!
//! Custom levels go into a [`LevelRegistry`]:
//!
//! ```
//! use lvlog::{Level, LevelOptions, Template, register_level};
//!
//! register_level(
//!     Level(35),
//!     "Alert",
//!     LevelOptions::new().template(Template::parse("[!] %s\n").unwrap()),
//! );
//! ```

pub mod config;
mod error;
pub mod fmt;
mod internal;
pub mod level;
pub mod logger;
pub mod output;

pub use config::Config;
pub use error::Error;
pub use fmt::{Color, ColorFn, Template, TemplateError, TokenScope};
pub use level::{Level, LevelOptions, LevelRegistry, register_level};
pub use logger::{Logger, LoggerBuilder, Producer, default_logger};
pub use output::{ErrorHook, LogError};
