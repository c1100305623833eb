//! Heading anchors: every `h1`-`h6` gets an id for links and the TOC script.

use crate::dom::{Document, NodeId};
use crate::markdown::{SlugRegistry, normalize_heading_text};

const HEADING_TAGS: &[&str] = &["h1", "h2", "h3", "h4", "h5", "h6"];

/// Slug used when a heading's text has nothing sluggable in it.
const FALLBACK_SLUG: &str = "heading";

/// Assign slug ids to headings that have none. Returns how many were added.
///
/// Existing ids are kept and reserved first, so generated ids never clash
/// with them regardless of position.
pub fn assign_heading_ids(doc: &mut Document) -> usize {
    let headings: Vec<NodeId> = doc
        .descendants(doc.body())
        .into_iter()
        .filter(|&id| {
            doc.element_name(id)
                .is_some_and(|n| HEADING_TAGS.contains(&n.as_ref()))
        })
        .collect();

    let mut slugs = SlugRegistry::new();
    for &h in &headings {
        if let Some(existing) = doc.get_attr(h, "id") {
            slugs.reserve(existing);
        }
    }

    let mut assigned = 0;
    for h in headings {
        if doc.has_attr(h, "id") {
            continue;
        }
        let text = normalize_heading_text(&doc.text(h));
        let id = slugs.unique(&text, FALLBACK_SLUG);
        doc.set_attr(h, "id", id);
        assigned += 1;
    }
    assigned
}
