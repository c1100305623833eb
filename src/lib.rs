//! # mdpack
//!
//! Render Markdown into a single, self-contained HTML document.
//!
//! ## Features
//!
//! - Local images inlined as base64 data URIs
//! - Image sizing through URL queries (`![](a.png?width=50)`)
//! - Merged table cells from a plain-text convention (`¦` and empty cells)
//! - Task list styling, math blocks, heading anchors
//! - Class-based syntax highlighting of fenced code
//!
//! ## Quick Start
//!
//! ```
//! use mdpack::{Converter, Options, Source, Template};
//!
//! let options = Options::default().with_table_spans(true);
//! let converter = Converter::new(options);
//!
//! let md = "| a | b | c |\n|---|---|---|\n| A¦ | B | |\n";
//! let body = converter.convert(&Source::new(md, ".")).unwrap();
//! assert!(body.contains(r#"<td colspan="2">A</td><td>B</td></tr>"#));
//!
//! let page = Template::new("Report").render(&body).unwrap();
//! assert!(page.starts_with("<!DOCTYPE html>"));
//! ```
//!
//! ## Pipeline
//!
//! Markdown parsing is delegated to pulldown-cmark ([`markdown`]). The
//! rendered HTML then goes through the stages in [`transform`], configured by
//! [`Options`], and [`Template`] wraps the result into a page.

pub mod convert;
pub mod dom;
pub mod error;
pub mod markdown;
pub mod options;
pub mod template;
pub mod transform;

pub use convert::{Converter, Source};
pub use error::{Error, Result};
pub use options::{DEFAULT_MERGE_MARKER, Options};
pub use template::Template;
pub use transform::transform_html;
