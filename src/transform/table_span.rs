//! Stage 5: merged table cells from a plain-text convention.
//!
//! Markdown tables have no syntax for spanning cells, so authors mark them in
//! the text:
//!
//! - a merge marker (`¦` by default) inside a cell extends that cell one
//!   column to the right, once per occurrence;
//! - an empty body cell below a non-empty one continues the cell above it
//!   downwards.
//!
//! This pass turns those marks into `colspan`/`rowspan` attributes and
//! removes the cells they cover.
//!
//! ## Order
//!
//! Each `<tbody>` is processed in three steps:
//!
//! 1. **Horizontal**: every row, left to right, assigns `colspan` and marks
//!    cells pushed past the row's width as hidden.
//! 2. **Vertical**: every logical column, top to bottom, assigns `rowspan` to
//!    the nearest non-empty cell above a run of empty ones and hides the run.
//! 3. **Cleanup**: hidden cells are removed.
//!
//! Horizontal merges are complete before any vertical one is computed, so the
//! vertical pass addresses columns through the final colspans. Changing that
//! order changes the result for cells merged in both directions.
//!
//! Finally a `<thead>` whose header cells are all empty is dropped.

use std::collections::HashSet;

use crate::dom::{Document, NodeId};

/// Rewrite every table in the document. Returns the number of tables seen.
///
/// ```
/// use mdpack::dom::Document;
/// use mdpack::transform::reconstruct_table_spans;
///
/// let mut doc = Document::parse(
///     "<table><tbody><tr><td>A¦</td><td>B</td><td>C</td></tr></tbody></table>",
/// )
/// .unwrap();
/// reconstruct_table_spans(&mut doc, '¦');
/// assert_eq!(
///     doc.to_html(),
///     r#"<table><tbody><tr><td colspan="2">A</td><td>B</td></tr></tbody></table>"#
/// );
/// ```
pub fn reconstruct_table_spans(doc: &mut Document, marker: char) -> usize {
    let tables = doc.elements_by_tag(doc.body(), "table");

    for &table in &tables {
        let bodies: Vec<NodeId> = doc.child_elements(table, "tbody").collect();
        for tbody in bodies {
            let rows = body_rows(doc, tbody);
            let mut hidden = HashSet::new();
            let col_max = merge_columns(doc, &rows, marker, &mut hidden);
            merge_rows(doc, &rows, col_max, &mut hidden);
            for cell in hidden {
                doc.detach(cell);
            }
        }
        if prune_empty_header(doc, table) {
            tracing::debug!("Removed empty table header");
        }
    }

    tables.len()
}

/// Data cells of each row in a table section.
fn body_rows(doc: &Document, section: NodeId) -> Vec<Vec<NodeId>> {
    doc.child_elements(section, "tr")
        .map(|tr| doc.child_elements(tr, "td").collect())
        .collect()
}

/// Horizontal pass. Returns the widest raw row length.
///
/// A running column counter advances by one per cell plus one per marker.
/// Any cell that ends past the row's raw cell count is a phantom left over
/// from the merge and is hidden; for a single marker that is the row's last
/// cell.
fn merge_columns(
    doc: &mut Document,
    rows: &[Vec<NodeId>],
    marker: char,
    hidden: &mut HashSet<NodeId>,
) -> usize {
    let mut col_max = 0;

    for row in rows {
        let col_mns = row.len();
        col_max = col_max.max(col_mns);

        let mut col = 0;
        for &cell in row {
            col += 1;
            let cnt = strip_cell_markers(doc, cell, marker);
            if cnt > 0 {
                doc.set_attr(cell, "colspan", (cnt + 1).to_string());
                col += cnt;
            }
            if col > col_mns {
                hidden.insert(cell);
            }
        }
    }

    col_max
}

/// Vertical pass over logical columns `0..col_max`.
///
/// Rows too short to reach the column are skipped without resetting the
/// chain. The chain's root resets at every non-empty cell.
fn merge_rows(
    doc: &mut Document,
    rows: &[Vec<NodeId>],
    col_max: usize,
    hidden: &mut HashSet<NodeId>,
) {
    for m in 0..col_max {
        let mut root: Option<NodeId> = None;
        let mut cnt = 0;

        for (k, row) in rows.iter().enumerate() {
            if row.len() <= m {
                continue;
            }
            let Some(cell) = occupying_cell(doc, row, m) else {
                continue;
            };

            if k == 0 || !doc.is_text_empty(cell) {
                root = Some(cell);
                cnt = 0;
                continue;
            }

            // Nothing above to extend until a root turns up.
            if let Some(root) = root {
                cnt += 1;
                doc.set_attr(root, "rowspan", (cnt + 1).to_string());
                hidden.insert(cell);
            }
        }
    }
}

/// The cell covering logical column `index`, found by summing colspans.
fn occupying_cell(doc: &Document, row: &[NodeId], index: usize) -> Option<NodeId> {
    let mut pos = 0;
    row.iter().copied().find(|&cell| {
        pos += colspan(doc, cell);
        pos > index
    })
}

/// Declared colspan; 1 when absent, 0 when unparsable.
fn colspan(doc: &Document, cell: NodeId) -> usize {
    doc.get_attr(cell, "colspan")
        .map_or(1, |v| v.parse().unwrap_or(0))
}

/// Remove merge markers from every text node in the cell.
///
/// Returns how many markers were removed.
fn strip_cell_markers(doc: &mut Document, cell: NodeId, marker: char) -> usize {
    let text_nodes: Vec<NodeId> = doc
        .descendants(cell)
        .into_iter()
        .filter(|&id| doc.is_text(id))
        .collect();

    let mut total = 0;
    for id in text_nodes {
        let Some(text) = doc.text_content_mut(id) else {
            continue;
        };
        let (stripped, cnt) = strip_markers(text, marker);
        if cnt > 0 {
            *text = stripped;
            total += cnt;
        }
    }
    total
}

/// Remove every `marker` and the ASCII whitespace directly after it.
pub fn strip_markers(text: &str, marker: char) -> (String, usize) {
    let mut out = String::with_capacity(text.len());
    let mut count = 0;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if c == marker {
            count += 1;
            while chars.next_if(char::is_ascii_whitespace).is_some() {}
        } else {
            out.push(c);
        }
    }

    (out, count)
}

/// Drop the table's `<thead>` when none of its header cells has text.
///
/// The scan stops at the first non-empty header cell.
fn prune_empty_header(doc: &mut Document, table: NodeId) -> bool {
    let heads: Vec<NodeId> = doc.child_elements(table, "thead").collect();
    let mut empty = true;
    let mut removed = false;

    for thead in heads {
        let rows: Vec<NodeId> = doc.child_elements(thead, "tr").collect();
        'scan: for tr in rows {
            for th in doc.child_elements(tr, "th") {
                if !doc.is_text_empty(th) {
                    empty = false;
                    break 'scan;
                }
            }
        }
        if empty {
            doc.detach(thead);
            removed = true;
        }
    }

    removed
}
