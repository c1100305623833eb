//! Pipeline configuration.

/// Default merge marker: BROKEN BAR (U+00A6).
pub const DEFAULT_MERGE_MARKER: char = '\u{a6}';

/// Which transformation stages run, and how.
///
/// Built once by the caller and passed by reference into the pipeline.
///
/// ```
/// use mdpack::Options;
///
/// let options = Options::default()
///     .with_embed_images(true)
///     .with_table_spans(true);
/// assert!(options.checklists);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Options {
    /// Syntax-highlight fenced code with `hl-` CSS classes.
    pub highlight_code: bool,
    /// Turn `src="a.png?width=50"` into `src="a.png" width=50`.
    pub strip_image_queries: bool,
    /// Inline local images as base64 data URIs.
    pub embed_images: bool,
    /// Rewrite `language-math` code blocks into `$$...$$` paragraphs.
    pub math: bool,
    /// Tag checkbox list items with `task-list-item`.
    pub checklists: bool,
    /// Rebuild colspan/rowspan from merge markers and empty cells.
    pub table_spans: bool,
    /// Give headings without an id a slug id.
    pub heading_ids: bool,
    /// Character that marks a horizontal merge inside a table cell.
    pub merge_marker: char,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            highlight_code: true,
            strip_image_queries: true,
            embed_images: false,
            math: false,
            checklists: true,
            table_spans: false,
            heading_ids: true,
            merge_marker: DEFAULT_MERGE_MARKER,
        }
    }
}

impl Options {
    /// All optional stages off; only the structural defaults remain.
    pub fn minimal() -> Self {
        Self {
            highlight_code: false,
            strip_image_queries: false,
            embed_images: false,
            math: false,
            checklists: false,
            table_spans: false,
            heading_ids: false,
            merge_marker: DEFAULT_MERGE_MARKER,
        }
    }

    pub fn with_highlight_code(mut self, enabled: bool) -> Self {
        self.highlight_code = enabled;
        self
    }

    pub fn with_strip_image_queries(mut self, enabled: bool) -> Self {
        self.strip_image_queries = enabled;
        self
    }

    pub fn with_embed_images(mut self, enabled: bool) -> Self {
        self.embed_images = enabled;
        self
    }

    pub fn with_math(mut self, enabled: bool) -> Self {
        self.math = enabled;
        self
    }

    pub fn with_checklists(mut self, enabled: bool) -> Self {
        self.checklists = enabled;
        self
    }

    pub fn with_table_spans(mut self, enabled: bool) -> Self {
        self.table_spans = enabled;
        self
    }

    pub fn with_heading_ids(mut self, enabled: bool) -> Self {
        self.heading_ids = enabled;
        self
    }

    pub fn with_merge_marker(mut self, marker: char) -> Self {
        self.merge_marker = marker;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = Options::default();
        assert!(options.highlight_code);
        assert!(options.strip_image_queries);
        assert!(options.checklists);
        assert!(!options.embed_images);
        assert!(!options.table_spans);
        assert_eq!(options.merge_marker, '¦');
    }
}
