//! Markdown rendering and heading slugs.
//!
//! Markdown grammar is not handled here: [`render_markdown`] hands the source
//! to pulldown-cmark with the extension set this crate expects, and
//! everything after that is HTML rewriting in [`crate::transform`].
//!
//! - [`render`]: pulldown-cmark configuration and rendering
//! - [`highlight`]: class-based highlighting of fenced code
//! - [`slugify`]: GitHub-style slugs and per-document de-duplication

mod highlight;
mod render;
mod slugify;

pub use highlight::{CLASS_STYLE, DEFAULT_THEME, highlight_code_blocks, highlight_css};
pub use render::{parser_options, render_markdown};
pub use slugify::{SlugRegistry, normalize_heading_text, slugify};
