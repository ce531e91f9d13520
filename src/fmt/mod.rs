//! Line rendering: templates, colors, and the timestamp suffix.

mod color;
mod template;
pub mod timestamp;

pub use color::{
    Color, ColorFn, colorize, colorize_bold, identity, paint, parse_color_spec,
};
pub use template::{
    Affixes, PREFIX_TOKEN, SUFFIX_TOKEN, Segment, Template, TemplateError, TokenScope,
};
pub use timestamp::timestamp_suffix;
