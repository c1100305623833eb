//! Stage 1: image query stripping.
//!
//! Authors size and align images with a query string on the URL:
//! `![](a.png?width=50&align=right)`. The renderer emits that verbatim, so
//! this pass moves the parameters out of `src` and onto the tag as bare
//! attributes. It works on text because the result is re-parsed anyway.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};

/// `<img ... src="PATH?PARAMS" ...>`, confined to a single tag.
static IMG_QUERY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(<img\b[^>]*?\ssrc=)"([^"?]*)\?([^"\s]+)"([^>]*>)"#).unwrap()
});

/// Parameter separator, escaped (as renderers emit it) or raw.
static PARAM_SEP_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new("&amp;|&").unwrap());

/// Move `?k=v&amp;k2=v2` from image URLs onto the tag as attributes.
///
/// Tags whose `src` has no query are returned unchanged, as is input without
/// any `<img>`.
///
/// ```
/// use mdpack::transform::strip_image_queries;
///
/// let html = r#"<img src="a.png?w=10&amp;h=20">"#;
/// assert_eq!(strip_image_queries(html), r#"<img src="a.png" w=10 h=20>"#);
/// ```
pub fn strip_image_queries(html: &str) -> Cow<'_, str> {
    IMG_QUERY_RE.replace_all(html, |caps: &Captures| {
        let params: Vec<&str> = PARAM_SEP_RE
            .split(&caps[3])
            .filter(|p| !p.is_empty())
            .collect();
        format!(
            "{}\"{}\" {}{}",
            &caps[1],
            &caps[2],
            params.join(" "),
            &caps[4]
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_img_is_borrowed() {
        let html = "<p>a?b=c</p>";
        assert!(matches!(strip_image_queries(html), Cow::Borrowed(_)));
    }

    #[test]
    fn test_img_without_query_untouched() {
        let html = r#"<p><img src="a.png" alt="x"></p>"#;
        assert_eq!(strip_image_queries(html), html);
    }

    #[test]
    fn test_params_become_attributes() {
        assert_eq!(
            strip_image_queries(r#"<img src="a.png?width=50&amp;align=right" alt="pic" />"#),
            r#"<img src="a.png" width=50 align=right alt="pic" />"#
        );
    }

    #[test]
    fn test_single_param() {
        assert_eq!(
            strip_image_queries(r#"<img src="dir/b.jpg?width=100">"#),
            r#"<img src="dir/b.jpg" width=100>"#
        );
    }

    #[test]
    fn test_raw_ampersand_separator() {
        assert_eq!(
            strip_image_queries(r#"<img src="a.png?w=1&h=2">"#),
            r#"<img src="a.png" w=1 h=2>"#
        );
    }

    #[test]
    fn test_does_not_span_tags() {
        let html = r#"<img src="a.png" alt=""><img src="b.png?w=3">"#;
        assert_eq!(
            strip_image_queries(html),
            r#"<img src="a.png" alt=""><img src="b.png" w=3>"#
        );
    }

    #[test]
    fn test_other_tags_untouched() {
        let html = r#"<a href="x.html?y=1">l</a><script src="s.js?v=2"></script>"#;
        assert_eq!(strip_image_queries(html), html);
    }
}
