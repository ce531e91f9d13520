//! ANSI coloring for rendered lines.
//!
//! Level colors are functions rather than a fixed palette, so a caller can wrap
//! a line in any escape sequence it likes.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Wraps an already rendered line; must be cheap and must not fail.
pub type ColorFn = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// The eight standard foreground colors every terminal understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Purple,
    Cyan,
    White,
}

impl Color {
    /// Terminates any active SGR styling so subsequent text returns to the terminal default.
    pub const RESET: &'static str = "\x1b[0m";

    /// SGR foreground code (30–37).
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Black => 30,
            Self::Red => 31,
            Self::Green => 32,
            Self::Yellow => 33,
            Self::Blue => 34,
            Self::Purple => 35,
            Self::Cyan => 36,
            Self::White => 37,
        }
    }

    #[must_use]
    pub fn fg_ansi(self) -> String {
        format!("\x1b[{}m", self.code())
    }

    #[must_use]
    pub fn fg_bold_ansi(self) -> String {
        format!("\x1b[1;{}m", self.code())
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Black => "black",
            Self::Red => "red",
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Blue => "blue",
            Self::Purple => "purple",
            Self::Cyan => "cyan",
            Self::White => "white",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "black" => Ok(Self::Black),
            "red" => Ok(Self::Red),
            "green" => Ok(Self::Green),
            "yellow" => Ok(Self::Yellow),
            "blue" => Ok(Self::Blue),
            "purple" | "magenta" => Ok(Self::Purple),
            "cyan" => Ok(Self::Cyan),
            "white" => Ok(Self::White),
            _ => Err(format!("unknown color: '{s}'")),
        }
    }
}

#[must_use]
pub fn colorize(text: &str, color: Color) -> String {
    format!("{}{text}{}", color.fg_ansi(), Color::RESET)
}

#[must_use]
pub fn colorize_bold(text: &str, color: Color) -> String {
    format!("{}{text}{}", color.fg_bold_ansi(), Color::RESET)
}

/// A [`ColorFn`] painting the whole line in `color`.
#[must_use]
pub fn paint(color: Color, bold: bool) -> ColorFn {
    if bold {
        Arc::new(move |text: &str| colorize_bold(text, color))
    } else {
        Arc::new(move |text: &str| colorize(text, color))
    }
}

/// Leaves the line untouched; the color of levels registered without one.
#[must_use]
pub fn identity() -> ColorFn {
    Arc::new(|text: &str| text.to_string())
}

/// Parses config color specs: `"red"`, `"red_bold"`, `"bold red"`, or `"none"`.
///
/// # Errors
/// Returns the offending spec when it names no known color.
pub fn parse_color_spec(spec: &str) -> Result<ColorFn, String> {
    let normalized = spec.trim().to_lowercase().replace(['-', ' '], "_");
    if normalized.is_empty() || normalized == "none" {
        return Ok(identity());
    }

    let (name, bold) = if let Some(name) = normalized.strip_suffix("_bold") {
        (name, true)
    } else if let Some(name) = normalized.strip_prefix("bold_") {
        (name, true)
    } else {
        (normalized.as_str(), false)
    };

    name.parse::<Color>()
        .map(|color| paint(color, bold))
        .map_err(|_| spec.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bold_uses_combined_sgr() {
        assert_eq!(colorize_bold("x", Color::Red), "\x1b[1;31mx\x1b[0m");
        assert_eq!(colorize("x", Color::Cyan), "\x1b[36mx\x1b[0m");
    }

    #[test]
    fn color_specs() {
        assert_eq!(parse_color_spec("yellow").unwrap()("a"), "\x1b[33ma\x1b[0m");
        assert_eq!(
            parse_color_spec("Bold Purple").unwrap()("a"),
            "\x1b[1;35ma\x1b[0m"
        );
        assert_eq!(
            parse_color_spec("green_bold").unwrap()("a"),
            "\x1b[1;32ma\x1b[0m"
        );
        assert_eq!(parse_color_spec("none").unwrap()("a"), "a");
        assert!(parse_color_spec("mauve").is_err());
    }
}
