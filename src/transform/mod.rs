//! Post-render HTML transformation pipeline.
//!
//! ## Pipeline Order
//!
//! 1. **Image query stripping** - text-level, before parsing
//! 2. **Image embedding** - local `src` become data URIs
//! 3. **Math blocks** - `language-math` code becomes `$$...$$`
//! 4. **Checklists** - task items get `task-list-item`
//! 5. **Table spans** - merge markers become colspan/rowspan
//! 6. **Heading ids** - slug ids for anchors and the TOC
//!
//! Stage 1 runs on text. The result is parsed once and stages 2-6 mutate the
//! same [`Document`]; it is serialized once at the end. Each stage is toggled
//! by [`Options`].

mod checklist;
mod heading_ids;
mod image_embed;
mod image_query;
mod math;
mod table_span;

use std::path::Path;

pub use checklist::{TASK_LIST_ITEM_CLASS, mark_checklists};
pub use heading_ids::assign_heading_ids;
pub use image_embed::{
    EmbedStats, embed_images, encode_data_uri, mime_type_for, resolve_image_path,
};
pub use image_query::strip_image_queries;
pub use math::normalize_math_blocks;
pub use table_span::{reconstruct_table_spans, strip_markers};

use crate::dom::Document;
use crate::error::Result;
use crate::options::Options;

/// Run every enabled stage on rendered HTML.
///
/// `base_dir` is only used to resolve relative image paths.
pub fn transform_html(html: &str, base_dir: &Path, options: &Options) -> Result<String> {
    let html = if options.strip_image_queries {
        strip_image_queries(html)
    } else {
        html.into()
    };

    if !needs_tree(&html, options) {
        return Ok(html.into_owned());
    }

    let mut doc = Document::parse(&html)?;
    transform_document(&mut doc, base_dir, options);
    Ok(doc.to_html())
}

/// Whether any enabled tree stage can change `html`.
///
/// Parsing and re-serializing normalizes markup (`<br />` becomes `<br>`), so
/// the tree is skipped when the only enabled stage would find nothing to do.
fn needs_tree(html: &str, options: &Options) -> bool {
    let other_stages =
        options.math || options.checklists || options.table_spans || options.heading_ids;
    other_stages || (options.embed_images && contains_img_tag(html))
}

fn contains_img_tag(html: &str) -> bool {
    html.as_bytes()
        .windows(4)
        .any(|w| w.eq_ignore_ascii_case(b"<img"))
}

/// Run the tree stages (2-6) on an already parsed document.
pub fn transform_document(doc: &mut Document, base_dir: &Path, options: &Options) {
    if options.embed_images {
        embed_images(doc, base_dir);
    }
    if options.math {
        let n = normalize_math_blocks(doc);
        tracing::debug!(blocks = n, "Normalized math blocks");
    }
    if options.checklists {
        let n = mark_checklists(doc);
        tracing::debug!(items = n, "Marked checklist items");
    }
    if options.table_spans {
        let n = reconstruct_table_spans(doc, options.merge_marker);
        tracing::debug!(tables = n, "Reconstructed table spans");
    }
    if options.heading_ids {
        let n = assign_heading_ids(doc);
        tracing::debug!(headings = n, "Assigned heading ids");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_options_pass_through() {
        let html = "<p>x</p><img src=\"a.png?w=1\">";
        let out = transform_html(html, Path::new("."), &Options::minimal()).unwrap();
        assert_eq!(out, html);
    }

    #[test]
    fn test_embedding_alone_leaves_image_free_html_untouched() {
        let html = "<hr />\n<p>&quot;q&quot;<br />x</p>\n";
        let options = Options::minimal().with_embed_images(true);
        let out = transform_html(html, Path::new("."), &options).unwrap();
        assert_eq!(out, html);
    }

    #[test]
    fn test_embedding_parses_when_an_image_is_present() {
        let options = Options::minimal().with_embed_images(true);
        assert!(!needs_tree("<p>image</p>", &options));
        assert!(needs_tree(r#"<p><IMG src="a.png"></p>"#, &options));
        assert!(needs_tree("<p>x</p>", &Options::minimal().with_math(true)));
        assert!(!needs_tree("<img src=\"a.png\">", &Options::minimal()));
    }

    #[test]
    fn test_query_stripping_without_tree() {
        let options = Options::minimal().with_strip_image_queries(true);
        let out = transform_html(r#"<img src="a.png?w=1">"#, Path::new("."), &options).unwrap();
        assert_eq!(out, r#"<img src="a.png" w=1>"#);
    }

    #[test]
    fn test_stripped_params_become_real_attributes_in_tree() {
        let options = Options::minimal()
            .with_strip_image_queries(true)
            .with_checklists(true);
        let out = transform_html(
            r#"<p><img src="a.png?width=50&amp;align=right" alt="x"></p>"#,
            Path::new("."),
            &options,
        )
        .unwrap();
        assert_eq!(
            out,
            r#"<p><img src="a.png" width="50" align="right" alt="x"></p>"#
        );
    }

    #[test]
    fn test_all_tree_stages_together() {
        let html = concat!(
            "<h1>Doc</h1>",
            "<ul><li><input type=\"checkbox\"> a</li></ul>",
            "<pre><code class=\"language-math\">x</code></pre>",
            "<table><thead><tr><th></th><th></th></tr></thead>",
            "<tbody><tr><td>A¦</td><td></td></tr></tbody></table>",
        );
        let options = Options::default().with_math(true).with_table_spans(true);
        let out = transform_html(html, Path::new("."), &options).unwrap();
        assert_eq!(
            out,
            concat!(
                "<h1 id=\"doc\">Doc</h1>",
                "<ul><li class=\"task-list-item\"><input type=\"checkbox\"> a</li></ul>",
                "<p>$$x$$</p>",
                "<table><tbody><tr><td colspan=\"2\">A</td></tr></tbody></table>",
            )
        );
    }
}
