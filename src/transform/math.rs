//! Stage 3: fenced math blocks become `$$...$$` paragraphs for the math
//! typesetter.

use crate::dom::Document;

/// Replace each `<pre><code class="language-math">` with `<p>$$…$$</p>`.
///
/// Returns the number of blocks rewritten.
pub fn normalize_math_blocks(doc: &mut Document) -> usize {
    let blocks: Vec<_> = doc
        .elements_by_tag(doc.body(), "code")
        .into_iter()
        .filter(|&code| doc.has_class(code, "language-math"))
        .filter_map(|code| {
            let pre = doc.get(code)?.parent;
            doc.is_element_named(pre, "pre").then_some((pre, code))
        })
        .collect();

    for &(pre, code) in &blocks {
        let tex = doc.text(code);
        let p = doc.create_html_element("p", vec![]);
        doc.append_text(p, &format!("$${tex}$$"));
        doc.replace(pre, p);
    }

    blocks.len()
}
