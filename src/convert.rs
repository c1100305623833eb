//! Markdown source to transformed HTML.

use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::error::Result;
use crate::markdown::render_markdown;
use crate::options::Options;
use crate::transform::transform_html;

/// One Markdown document and the directory its relative images live in.
#[derive(Debug, Clone)]
pub struct Source {
    pub markdown: String,
    pub base_dir: PathBuf,
}

impl Source {
    pub fn new(markdown: impl Into<String>, base_dir: impl Into<PathBuf>) -> Self {
        Self {
            markdown: markdown.into(),
            base_dir: base_dir.into(),
        }
    }

    /// Read a UTF-8 Markdown file; images resolve against its directory.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let markdown = String::from_utf8(bytes)?;
        let base_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        Ok(Self { markdown, base_dir })
    }
}

/// Renders sources and runs the transformation pipeline on them.
///
/// ```
/// use mdpack::{Converter, Options, Source};
///
/// let converter = Converter::new(Options::default());
/// let html = converter.convert(&Source::new("# Hi", ".")).unwrap();
/// assert_eq!(html, "<h1 id=\"hi\">Hi</h1>\n");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Converter {
    options: Options,
}

impl Converter {
    pub fn new(options: Options) -> Self {
        Self { options }
    }

    /// Render and transform one document.
    pub fn convert(&self, source: &Source) -> Result<String> {
        let html = render_markdown(&source.markdown, &self.options);
        transform_html(&html, &source.base_dir, &self.options)
    }

    /// Convert several documents in parallel and concatenate them in order.
    ///
    /// Fails with the first error in input order.
    pub fn convert_all(&self, sources: &[Source]) -> Result<String> {
        let parts: Vec<Result<String>> = sources.par_iter().map(|s| self.convert(s)).collect();
        tracing::debug!(documents = parts.len(), "Converted documents");

        let mut out = String::new();
        for part in parts {
            out.push_str(&part?);
        }
        Ok(out)
    }
}
