//! Stage 4: task list items get a presentation class.

use crate::dom::{Document, NodeId};

pub const TASK_LIST_ITEM_CLASS: &str = "task-list-item";

/// Add `task-list-item` to every `<li>` holding a checkbox next to text.
///
/// An item qualifies when it has a direct text child and a checkbox
/// `<input>` anywhere below it. Applying the pass twice changes nothing.
pub fn mark_checklists(doc: &mut Document) -> usize {
    let view: &Document = doc;
    let items: Vec<NodeId> = view
        .elements_by_tag(view.body(), "li")
        .into_iter()
        .filter(|&li| is_task_item(view, li))
        .collect();

    for &li in &items {
        doc.add_class(li, TASK_LIST_ITEM_CLASS);
    }
    items.len()
}

fn is_task_item(doc: &Document, li: NodeId) -> bool {
    let has_text = doc.children(li).any(|c| doc.is_text(c));
    has_text
        && doc
            .elements_by_tag(li, "input")
            .into_iter()
            .any(|input| doc.get_attr(input, "type") == Some("checkbox"))
}
