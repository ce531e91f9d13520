//! Level names, default templates, and default colors.
//!
//! Every logger resolves a level through a registry unless it carries its own
//! override. The process-wide instance behind [`LevelRegistry::global`] is what
//! loggers use by default; tests and embedders that need isolation hand a
//! private registry to [`crate::LoggerBuilder::registry`].
//!
//! Registration is synchronized, but changing a level's rendering while other
//! threads log is still surprising, so register custom levels during startup.

use super::{Level, ParseLevelError};
use crate::fmt::{Color, ColorFn, Template, identity, paint};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, LazyLock, PoisonError, RwLock};

static GLOBAL: LazyLock<Arc<LevelRegistry>> =
    LazyLock::new(|| Arc::new(LevelRegistry::with_defaults()));

/// Optional parts of a level registration; `None` leaves the current default alone.
#[derive(Clone, Default)]
pub struct LevelOptions {
    pub template: Option<Template>,
    pub color: Option<ColorFn>,
}

impl LevelOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn template(mut self, template: Template) -> Self {
        self.template = Some(template);
        self
    }

    #[must_use]
    pub fn color(mut self, color: ColorFn) -> Self {
        self.color = Some(color);
        self
    }
}

impl fmt::Debug for LevelOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LevelOptions")
            .field("template", &self.template)
            .field("color", &self.color.is_some())
            .finish()
    }
}

#[derive(Default)]
struct Tables {
    names: HashMap<Level, String>,
    templates: HashMap<Level, Template>,
    colors: HashMap<Level, ColorFn>,
}

/// Name, template, and color tables keyed by level.
#[derive(Default)]
pub struct LevelRegistry {
    tables: RwLock<Tables>,
}

impl LevelRegistry {
    /// The shared registry used by every logger that wasn't given its own.
    #[must_use]
    pub fn global() -> &'static Arc<Self> {
        &GLOBAL
    }

    /// A registry with no levels at all; every lookup falls back.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// A registry seeded with the six built-in levels.
    #[must_use]
    pub fn with_defaults() -> Self {
        let registry = Self::empty();
        for (level, name, template, color) in builtin_table() {
            registry.register(
                level,
                name,
                LevelOptions::new().template(template).color(color),
            );
        }
        registry
    }

    /// Inserts or overwrites the level's name, and its template/color when supplied.
    pub fn register(&self, level: Level, name: impl Into<String>, options: LevelOptions) {
        let mut tables = self.tables.write().unwrap_or_else(PoisonError::into_inner);
        tables.names.insert(level, name.into());
        if let Some(template) = options.template {
            tables.templates.insert(level, template);
        }
        if let Some(color) = options.color {
            tables.colors.insert(level, color);
        }
    }

    /// Registered name, or the decimal value for unknown levels.
    #[must_use]
    pub fn name(&self, level: Level) -> String {
        let tables = self.tables.read().unwrap_or_else(PoisonError::into_inner);
        tables
            .names
            .get(&level)
            .cloned()
            .unwrap_or_else(|| level.value().to_string())
    }

    /// Registered template, or `"[<name>] %s"` synthesized from [`Self::name`].
    #[must_use]
    pub fn template(&self, level: Level) -> Template {
        self.registered_template(level)
            .unwrap_or_else(|| Template::fallback(&self.name(level)))
    }

    /// Registered template without the synthesized fallback.
    #[must_use]
    pub fn registered_template(&self, level: Level) -> Option<Template> {
        let tables = self.tables.read().unwrap_or_else(PoisonError::into_inner);
        tables.templates.get(&level).cloned()
    }

    /// Registered color function, or identity.
    #[must_use]
    pub fn color(&self, level: Level) -> ColorFn {
        self.registered_color(level).unwrap_or_else(identity)
    }

    /// Registered color function without the identity fallback.
    #[must_use]
    pub fn registered_color(&self, level: Level) -> Option<ColorFn> {
        let tables = self.tables.read().unwrap_or_else(PoisonError::into_inner);
        tables.colors.get(&level).cloned()
    }

    #[must_use]
    pub fn is_registered(&self, level: Level) -> bool {
        let tables = self.tables.read().unwrap_or_else(PoisonError::into_inner);
        tables.names.contains_key(&level)
    }

    /// Registered levels in ascending order.
    #[must_use]
    pub fn levels(&self) -> Vec<Level> {
        let tables = self.tables.read().unwrap_or_else(PoisonError::into_inner);
        let mut levels: Vec<Level> = tables.names.keys().copied().collect();
        levels.sort_unstable();
        levels
    }

    /// Resolves a decimal value or a registered name (case-insensitive).
    ///
    /// # Errors
    /// Returns [`ParseLevelError`] when the input is neither.
    pub fn parse_level(&self, s: &str) -> Result<Level, ParseLevelError> {
        let trimmed = s.trim();
        if let Ok(value) = trimmed.parse::<i32>() {
            return Ok(Level(value));
        }

        let tables = self.tables.read().unwrap_or_else(PoisonError::into_inner);
        tables
            .names
            .iter()
            .filter(|(_, name)| name.eq_ignore_ascii_case(trimmed))
            .map(|(level, _)| *level)
            .min()
            .ok_or_else(|| ParseLevelError::new(s))
    }
}

impl fmt::Debug for LevelRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tables = self.tables.read().unwrap_or_else(PoisonError::into_inner);
        f.debug_struct("LevelRegistry")
            .field("names", &tables.names)
            .field("templates", &tables.templates)
            .field("colors", &tables.colors.len())
            .finish()
    }
}

/// Registers a level in the global registry.
pub fn register_level(level: Level, name: impl Into<String>, options: LevelOptions) {
    LevelRegistry::global().register(level, name, options);
}

fn builtin_table() -> [(Level, &'static str, Template, ColorFn); 6] {
    [
        (
            Level::DEBUG,
            "Debug",
            Template::builtin("[Debug] %s \n"),
            paint(Color::Yellow, false),
        ),
        (
            Level::INFO,
            "Info",
            Template::builtin("[-] %s {{suffix}}\n"),
            paint(Color::Cyan, false),
        ),
        (
            Level::HINT,
            "Hint",
            Template::builtin("[+] %s {{suffix}}\n"),
            paint(Color::Cyan, true),
        ),
        (
            Level::IMPORTANT,
            "Important",
            Template::builtin("[*] %s {{suffix}}\n"),
            paint(Color::Purple, true),
        ),
        (
            Level::WARN,
            "Warn",
            Template::builtin("[Warn] %s \n"),
            paint(Color::Yellow, true),
        ),
        (
            Level::ERROR,
            "Error",
            Template::builtin("[Error] %s \n"),
            paint(Color::Red, true),
        ),
    ]
}
