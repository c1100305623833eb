//! Final document assembly.
//!
//! Wraps transformed body HTML in the standalone page skeleton. Stylesheets
//! and scripts are bundled by the caller and passed in as ready-made `head`
//! markup.

use std::path::{Path, PathBuf};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::dom::escape_text;
use crate::error::Result;

/// Placeholder the TOC script fills in.
pub const TOC_PLACEHOLDER: &str = "<div id=\"markdown-toc\"></div>\n";

/// Page skeleton settings.
///
/// ```
/// use mdpack::Template;
///
/// let page = Template::new("Notes").with_toc(true).render("<p>hi</p>").unwrap();
/// assert!(page.contains("<title>Notes</title>"));
/// assert!(page.contains("<div id=\"markdown-toc\"></div>"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Template {
    pub title: String,
    /// Pre-bundled `<style>`/`<script>` markup placed in `<head>`.
    pub head: String,
    /// Emit the TOC placeholder above the content.
    pub toc: bool,
    /// Icon file embedded as a data URI.
    pub favicon: Option<PathBuf>,
    /// Extra CSS appended after `head` in its own `<style>` block.
    pub custom_css: Option<String>,
}

impl Template {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_head(mut self, head: impl Into<String>) -> Self {
        self.head = head.into();
        self
    }

    pub fn with_toc(mut self, toc: bool) -> Self {
        self.toc = toc;
        self
    }

    pub fn with_favicon(mut self, path: impl Into<PathBuf>) -> Self {
        self.favicon = Some(path.into());
        self
    }

    pub fn with_custom_css(mut self, css: impl Into<String>) -> Self {
        self.custom_css = Some(css.into());
        self
    }

    /// Assemble the full page around `body`.
    ///
    /// Fails only when the favicon cannot be read.
    pub fn render(&self, body: &str) -> Result<String> {
        let favicon = match &self.favicon {
            Some(path) => favicon_link(path)?,
            None => String::new(),
        };

        let mut page = String::with_capacity(body.len() + self.head.len() + 512);
        page.push_str(
            "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"UTF-8\">\n\
             <meta http-equiv=\"X-UA-Compatible\" content=\"IE=edge\">\n",
        );
        page.push_str(&favicon);
        page.push_str(&format!("<title>{}</title>\n", escape_text(&self.title)));
        page.push_str(&self.head);
        page.push('\n');
        if let Some(css) = &self.custom_css {
            page.push_str(&format!("<style type=\"text/css\">\n{css}</style>\n"));
        }
        page.push_str("</head>\n<body>\n<div class=\"container\">\n");
        if self.toc {
            page.push_str(TOC_PLACEHOLDER);
        }
        page.push_str("<div class=\"markdown-body\">\n");
        page.push_str(body);
        page.push_str("\n</div>\n</div>\n</body>\n</html>");
        Ok(page)
    }
}

fn favicon_link(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path)?;
    Ok(format!(
        "<link rel='shortcut icon' href='data:image/x-icon;base64,{}'/>\n",
        STANDARD.encode(bytes)
    ))
}

/// Page title from a file path: the file name without its extension.
///
/// ```
/// use mdpack::template::title_from_path;
///
/// assert_eq!(title_from_path("out/report.html"), "report");
/// ```
pub fn title_from_path(path: impl AsRef<Path>) -> String {
    path.as_ref()
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skeleton_layout() {
        let page = Template::new("T").with_head("<style>a{}</style>").render("<p>x</p>").unwrap();
        assert_eq!(
            page,
            concat!(
                "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"UTF-8\">\n",
                "<meta http-equiv=\"X-UA-Compatible\" content=\"IE=edge\">\n",
                "<title>T</title>\n<style>a{}</style>\n</head>\n<body>\n",
                "<div class=\"container\">\n<div class=\"markdown-body\">\n",
                "<p>x</p>\n</div>\n</div>\n</body>\n</html>",
            )
        );
    }

    #[test]
    fn test_title_is_escaped() {
        let page = Template::new("a < b & c").render("").unwrap();
        assert!(page.contains("<title>a &lt; b &amp; c</title>"));
    }

    #[test]
    fn test_custom_css_block() {
        let page = Template::new("T").with_custom_css("p { color: red; }\n").render("").unwrap();
        assert!(page.contains("<style type=\"text/css\">\np { color: red; }\n</style>\n</head>"));
    }

    #[test]
    fn test_missing_favicon_is_an_error() {
        let result = Template::new("T")
            .with_favicon("/nonexistent/favicon.ico")
            .render("");
        assert!(result.is_err());
    }

    #[test]
    fn test_title_from_path() {
        assert_eq!(title_from_path("docs/readme.md"), "readme");
        assert_eq!(title_from_path("archive.tar.gz"), "archive.tar");
        assert_eq!(title_from_path(""), "");
    }
}
