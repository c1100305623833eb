//! Slug generation for heading anchors.

use std::collections::HashSet;

/// Generate a GitHub-style slug from text.
///
/// Lowercases ASCII alphanumerics, turns whitespace, `-` and `_` into single
/// hyphens, drops everything else, and trims hyphens from both ends.
///
/// # Examples
///
/// ```
/// use mdpack::markdown::slugify;
///
/// assert_eq!(slugify("Chapter One"), "chapter-one");
/// assert_eq!(slugify("Hello, World!"), "hello-world");
/// assert_eq!(slugify("  Multiple   Spaces  "), "multiple-spaces");
/// ```
pub fn slugify(text: &str) -> String {
    text.chars()
        .filter_map(|c| {
            if c.is_ascii_alphanumeric() {
                Some(c.to_ascii_lowercase())
            } else if c.is_whitespace() || c == '-' || c == '_' {
                Some('-')
            } else {
                None
            }
        })
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// Collapse runs of whitespace to single spaces and trim.
pub fn normalize_heading_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Hands out unique slugs within one document.
///
/// The first use of a slug is returned as-is; repeats get `-1`, `-2`, ...
/// Ids already present in the document are reserved with
/// [`reserve`](Self::reserve) so generated ones never collide with them.
#[derive(Debug, Default)]
pub struct SlugRegistry {
    used: HashSet<String>,
}

impl SlugRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark an id as taken.
    pub fn reserve(&mut self, id: &str) {
        self.used.insert(id.to_string());
    }

    /// Unique slug for `text`; `fallback` when the text yields no slug.
    pub fn unique(&mut self, text: &str, fallback: &str) -> String {
        let mut base = slugify(text);
        if base.is_empty() {
            base = fallback.to_string();
        }

        let mut candidate = base.clone();
        let mut n = 0;
        while self.used.contains(&candidate) {
            n += 1;
            candidate = format!("{base}-{n}");
        }
        self.used.insert(candidate.clone());
        candidate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_simple() {
        assert_eq!(slugify("Hello World"), "hello-world");
    }

    #[test]
    fn test_slugify_with_punctuation() {
        assert_eq!(slugify("Hello, World!"), "hello-world");
    }

    #[test]
    fn test_slugify_underscores() {
        assert_eq!(slugify("hello_world"), "hello-world");
    }

    #[test]
    fn test_slugify_numbers() {
        assert_eq!(slugify("Chapter 1"), "chapter-1");
    }

    #[test]
    fn test_slugify_empty() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("   "), "");
        assert_eq!(slugify("日本語"), "");
    }

    #[test]
    fn test_slugify_hyphens() {
        assert_eq!(slugify("hello--world"), "hello-world");
        assert_eq!(slugify("-hello-"), "hello");
    }

    #[test]
    fn test_normalize_heading_text() {
        assert_eq!(normalize_heading_text("  a \n b\tc "), "a b c");
    }

    #[test]
    fn test_registry_deduplicates() {
        let mut slugs = SlugRegistry::new();
        assert_eq!(slugs.unique("Intro", "heading"), "intro");
        assert_eq!(slugs.unique("Intro", "heading"), "intro-1");
        assert_eq!(slugs.unique("intro", "heading"), "intro-2");
    }

    #[test]
    fn test_registry_respects_reserved_and_fallback() {
        let mut slugs = SlugRegistry::new();
        slugs.reserve("setup");
        assert_eq!(slugs.unique("Setup", "heading"), "setup-1");
        assert_eq!(slugs.unique("???", "heading"), "heading");
        assert_eq!(slugs.unique("", "heading"), "heading-1");
    }
}
