//! Class-based syntax highlighting for fenced code blocks.
//!
//! Highlighted blocks carry CSS classes instead of inline colors, so the page
//! picks its palette through a stylesheet (see [`highlight_css`]). Fences
//! tagged `math` and fences in unknown languages are left for the default
//! renderer.

use std::sync::LazyLock;

use pulldown_cmark::{CodeBlockKind, CowStr, Event, Tag, TagEnd};
use syntect::highlighting::ThemeSet;
use syntect::html::{ClassStyle, ClassedHTMLGenerator, css_for_theme_with_class_style};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

use crate::dom::escape_attr;
use crate::error::{Error, Result};

/// Prefix on every highlighting class, so scopes like `source` or `string`
/// cannot clash with page styles.
pub const CLASS_STYLE: ClassStyle = ClassStyle::SpacedPrefixed { prefix: "hl-" };

/// Theme [`highlight_css`] uses when the caller has no preference.
pub const DEFAULT_THEME: &str = "InspiredGitHub";

static SYNTAXES: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);

/// A fenced block being collected until its end tag.
struct FencedBlock<'a> {
    lang: String,
    syntax: &'static SyntaxReference,
    code: String,
    events: Vec<Event<'a>>,
}

/// Replace highlightable fenced code blocks in an event stream with
/// pre-rendered HTML.
pub fn highlight_code_blocks<'a>(
    events: impl Iterator<Item = Event<'a>>,
) -> impl Iterator<Item = Event<'a>> {
    let mut out = Vec::new();
    let mut block: Option<FencedBlock<'a>> = None;

    for event in events {
        match (block.take(), event) {
            (None, Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(info)))) => {
                let lang = fence_language(&info).to_string();
                match find_syntax(&lang) {
                    Some(syntax) => {
                        let start = Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(info)));
                        block = Some(FencedBlock {
                            lang,
                            syntax,
                            code: String::new(),
                            events: vec![start],
                        });
                    }
                    None => out.push(Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(info)))),
                }
            }
            (None, event) => out.push(event),
            (Some(b), Event::End(TagEnd::CodeBlock)) => match highlight_block(&b) {
                Some(html) => out.push(Event::Html(CowStr::from(html))),
                None => {
                    out.extend(b.events);
                    out.push(Event::End(TagEnd::CodeBlock));
                }
            },
            (Some(mut b), event) => {
                if let Event::Text(text) = &event {
                    b.code.push_str(text);
                }
                b.events.push(event);
                block = Some(b);
            }
        }
    }

    // Unterminated block at end of input.
    if let Some(b) = block {
        out.extend(b.events);
    }

    out.into_iter()
}

/// First word of a fence's info string.
fn fence_language(info: &str) -> &str {
    info.split_whitespace().next().unwrap_or("")
}

/// Syntax for a fence language, by file extension or name.
///
/// `math` is never highlighted: the math stage needs the raw block.
fn find_syntax(lang: &str) -> Option<&'static SyntaxReference> {
    if lang.is_empty() || lang.eq_ignore_ascii_case("math") {
        return None;
    }
    let syntaxes: &'static SyntaxSet = &SYNTAXES;
    syntaxes.find_syntax_by_token(lang)
}

fn highlight_block(block: &FencedBlock<'_>) -> Option<String> {
    let mut generator =
        ClassedHTMLGenerator::new_with_class_style(block.syntax, &SYNTAXES, CLASS_STYLE);
    for line in LinesWithEndings::from(&block.code) {
        if let Err(e) = generator.parse_html_for_line_which_includes_newline(line) {
            tracing::warn!(lang = %block.lang, error = %e, "Failed to highlight code block");
            return None;
        }
    }

    Some(format!(
        "<pre class=\"highlight\"><code class=\"language-{}\">{}</code></pre>\n",
        escape_attr(&block.lang),
        generator.finalize()
    ))
}

/// Stylesheet for highlighted blocks in one of syntect's bundled themes.
///
/// ```
/// use mdpack::markdown::{DEFAULT_THEME, highlight_css};
///
/// let css = highlight_css(DEFAULT_THEME).unwrap();
/// assert!(css.contains(".hl-"));
/// ```
pub fn highlight_css(theme: &str) -> Result<String> {
    let themes = ThemeSet::load_defaults();
    let theme = themes
        .themes
        .get(theme)
        .ok_or_else(|| Error::Highlight(format!("unknown theme: {theme}")))?;
    css_for_theme_with_class_style(theme, CLASS_STYLE).map_err(|e| Error::Highlight(e.to_string()))
}
