//! Markdown to HTML via pulldown-cmark.

use pulldown_cmark::{Options as ParserOptions, Parser, html};

use super::highlight::highlight_code_blocks;
use crate::options::Options;

/// Extensions enabled for rendering.
///
/// GitHub-flavored tables, task lists, strikethrough and footnotes, plus
/// definition lists, smart punctuation and `{#id .class}` heading attributes.
pub fn parser_options() -> ParserOptions {
    ParserOptions::ENABLE_TABLES
        | ParserOptions::ENABLE_TASKLISTS
        | ParserOptions::ENABLE_STRIKETHROUGH
        | ParserOptions::ENABLE_FOOTNOTES
        | ParserOptions::ENABLE_DEFINITION_LIST
        | ParserOptions::ENABLE_SMART_PUNCTUATION
        | ParserOptions::ENABLE_HEADING_ATTRIBUTES
}

/// Render Markdown source to an HTML fragment.
///
/// Raw HTML in the source passes through untouched. Fenced ```` ```math ````
/// blocks come out as `<pre><code class="language-math">`, which the math
/// stage picks up. Other fenced code is highlighted when
/// [`Options::highlight_code`] is set.
///
/// ```
/// use mdpack::Options;
/// use mdpack::markdown::render_markdown;
///
/// let html = render_markdown("- [x] done", &Options::default());
/// assert!(html.contains(r#"type="checkbox""#));
/// ```
pub fn render_markdown(source: &str, options: &Options) -> String {
    let parser = Parser::new_ext(source, parser_options());
    let mut out = String::with_capacity(source.len() * 3 / 2);
    if options.highlight_code {
        html::push_html(&mut out, highlight_code_blocks(parser));
    } else {
        html::push_html(&mut out, parser);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_renders_sections() {
        let html = render_markdown("| a | b |\n|---|---|\n| 1 | 2 |\n", &Options::default());
        assert!(html.contains("<thead>"));
        assert!(html.contains("<tbody>"));
        assert!(html.contains("<td>1</td>"));
    }

    #[test]
    fn test_math_fence_class() {
        let html = render_markdown("```math\nx^2\n```\n", &Options::default());
        assert!(html.contains(r#"<code class="language-math">"#), "{html}");
    }

    #[test]
    fn test_raw_html_passes_through() {
        let html = render_markdown("<div class=\"note\">hi</div>\n", &Options::default());
        assert!(html.contains(r#"<div class="note">hi</div>"#));
    }

    #[test]
    fn test_image_query_kept_for_stripper() {
        let html = render_markdown("![x](a.png?width=50&align=right)", &Options::default());
        assert!(html.contains(r#"src="a.png?width=50&amp;align=right""#), "{html}");
    }

    #[test]
    fn test_explicit_heading_id() {
        let html = render_markdown("# Title {#custom}\n", &Options::default());
        assert!(html.contains(r#"<h1 id="custom">Title</h1>"#), "{html}");
    }

    #[test]
    fn test_fenced_code_highlighted_with_classes() {
        let html = render_markdown("```rust\nlet a = 1 < 2;\n```\n", &Options::default());
        assert!(
            html.starts_with(r#"<pre class="highlight"><code class="language-rust"><span class="hl-"#),
            "{html}"
        );
        assert!(html.contains("hl-rust"), "{html}");
        assert!(html.contains("&lt;"), "{html}");
        assert!(html.ends_with("</code></pre>\n"), "{html}");
    }

    #[test]
    fn test_math_and_unknown_fences_not_highlighted() {
        let html = render_markdown(
            "```math\nx\n```\n\n```no-such-language\ny\n```\n",
            &Options::default(),
        );
        assert!(html.contains(r#"<pre><code class="language-math">x"#), "{html}");
        assert!(html.contains(r#"<pre><code class="language-no-such-language">y"#), "{html}");
        assert!(!html.contains("hl-"), "{html}");
    }

    #[test]
    fn test_highlighting_disabled() {
        let options = Options::default().with_highlight_code(false);
        let html = render_markdown("```rust\nfn main() {}\n```\n", &options);
        assert_eq!(html, "<pre><code class=\"language-rust\">fn main() {}\n</code></pre>\n");
    }
}
