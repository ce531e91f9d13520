//! Per-level line templates such as `"[-] %s {{suffix}}\n"`.
//!
//! A template is parsed once into segments and validated up front, so a bad
//! custom formatter is rejected at registration instead of garbling output at
//! log time.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Replaced with the prefix producer's output.
pub const PREFIX_TOKEN: &str = "{{prefix}}";
/// Replaced with the suffix producer's output.
pub const SUFFIX_TOKEN: &str = "{{suffix}}";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    /// `%s` or `%v`.
    Message,
    Prefix,
    Suffix,
}

/// Where `{{prefix}}` / `{{suffix}}` are substituted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TokenScope {
    /// The whole rendered line, including token text the caller put in the message.
    #[default]
    Line,
    /// Only the template's own token segments; message text is left verbatim.
    Template,
}

impl FromStr for TokenScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "line" => Ok(Self::Line),
            "template" => Ok(Self::Template),
            _ => Err(format!("unknown token scope: '{s}'")),
        }
    }
}

/// Per-emission producer output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Affixes {
    pub prefix: String,
    pub suffix: String,
}

impl Affixes {
    #[must_use]
    pub fn new(prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            suffix: suffix.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    /// No `%s` in the template.
    MissingMessage,
    /// More than one `%s`.
    MultipleMessages(usize),
    /// A `%` verb other than `%s`, `%v`, or `%%`.
    UnsupportedVerb(char),
    /// Template ends in a lone `%`.
    DanglingPercent,
}

impl fmt::Display for TemplateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingMessage => write!(f, "template has no message placeholder"),
            Self::MultipleMessages(n) => {
                write!(f, "template has {n} message placeholders, expected one")
            }
            Self::UnsupportedVerb(c) => write!(f, "unsupported verb '%{c}'"),
            Self::DanglingPercent => write!(f, "template ends with a lone '%'"),
        }
    }
}

impl std::error::Error for TemplateError {}

/// Parsed, validated line template. Cheap to clone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    source: Arc<str>,
    segments: Arc<[Segment]>,
}

impl Template {
    /// Parses `%s`/`%v` (message), `%%` (literal `%`), `{{prefix}}` and `{{suffix}}`.
    ///
    /// # Errors
    /// Fails unless the template holds exactly one message placeholder and no other verbs.
    pub fn parse(source: &str) -> Result<Self, TemplateError> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut messages = 0;
        let mut rest = source;

        while let Some(c) = rest.chars().next() {
            if c == '%' {
                let mut chars = rest.chars();
                chars.next();
                match chars.next() {
                    Some('s' | 'v') => {
                        flush_literal(&mut literal, &mut segments);
                        segments.push(Segment::Message);
                        messages += 1;
                    }
                    Some('%') => literal.push('%'),
                    Some(other) => return Err(TemplateError::UnsupportedVerb(other)),
                    None => return Err(TemplateError::DanglingPercent),
                }
                rest = &rest[2..];
            } else if let Some(after) = rest.strip_prefix(PREFIX_TOKEN) {
                flush_literal(&mut literal, &mut segments);
                segments.push(Segment::Prefix);
                rest = after;
            } else if let Some(after) = rest.strip_prefix(SUFFIX_TOKEN) {
                flush_literal(&mut literal, &mut segments);
                segments.push(Segment::Suffix);
                rest = after;
            } else {
                literal.push(c);
                rest = &rest[c.len_utf8()..];
            }
        }
        flush_literal(&mut literal, &mut segments);

        match messages {
            0 => Err(TemplateError::MissingMessage),
            1 => Ok(Self {
                source: Arc::from(source),
                segments: segments.into(),
            }),
            n => Err(TemplateError::MultipleMessages(n)),
        }
    }

    /// `"[<name>] %s"` for levels registered without a template.
    #[must_use]
    pub fn fallback(name: &str) -> Self {
        let literal = format!("[{name}] ");
        let source = format!("{}%s", literal.replace('%', "%%"));
        Self {
            source: Arc::from(source),
            segments: vec![Segment::Literal(literal), Segment::Message].into(),
        }
    }

    /// Built-in templates are constants known to parse.
    pub(crate) fn builtin(source: &'static str) -> Self {
        Self::parse(source).expect("built-in template is valid")
    }

    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Renders one line; never fails because validation happened at parse time.
    #[must_use]
    pub fn render(&self, message: &str, affixes: &Affixes, scope: TokenScope) -> String {
        let mut line = String::with_capacity(self.source.len() + message.len());

        for segment in self.segments.iter() {
            match (segment, scope) {
                (Segment::Literal(s), _) => line.push_str(s),
                (Segment::Message, _) => line.push_str(message),
                (Segment::Prefix, TokenScope::Line) => line.push_str(PREFIX_TOKEN),
                (Segment::Suffix, TokenScope::Line) => line.push_str(SUFFIX_TOKEN),
                (Segment::Prefix, TokenScope::Template) => line.push_str(&affixes.prefix),
                (Segment::Suffix, TokenScope::Template) => line.push_str(&affixes.suffix),
            }
        }

        match scope {
            // suffix first, matching the order producers' output has always been spliced in
            TokenScope::Line => line
                .replace(SUFFIX_TOKEN, &affixes.suffix)
                .replace(PREFIX_TOKEN, &affixes.prefix),
            TokenScope::Template => line,
        }
    }
}

fn flush_literal(literal: &mut String, segments: &mut Vec<Segment>) {
    if !literal.is_empty() {
        segments.push(Segment::Literal(std::mem::take(literal)));
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl FromStr for Template {
    type Err = TemplateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
