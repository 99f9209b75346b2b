//! Row and cell collection over a table subtree.

use markup5ever_rcdom::Handle;

use crate::converter::node_util::{attr, element_children, tag_name};

/// Collect the rows of a table in document order, descending through
/// `thead`/`tbody`/`tfoot` wrappers. Each row is its `td`/`th` cells.
pub(crate) fn collect_rows(table: &Handle) -> Vec<Vec<Handle>> {
    let mut rows = Vec::new();
    collect_into(table, &mut rows);
    rows
}

fn collect_into(node: &Handle, rows: &mut Vec<Vec<Handle>>) {
    for child in element_children(node) {
        match tag_name(&child) {
            Some("tr") => {
                let cells: Vec<Handle> = element_children(&child)
                    .into_iter()
                    .filter(|c| matches!(tag_name(c), Some("td" | "th")))
                    .collect();
                rows.push(cells);
            }
            Some("thead" | "tbody" | "tfoot") => collect_into(&child, rows),
            _ => {}
        }
    }
}

/// Declared column span of a cell, at least 1.
pub(crate) fn colspan(cell: &Handle) -> usize {
    attr(cell, "colspan")
        .and_then(|v| v.trim().parse::<usize>().ok())
        .filter(|&n| n > 0)
        .unwrap_or(1)
}

/// Columns a row occupies once colspans are expanded.
pub(crate) fn row_width(cells: &[Handle]) -> usize {
    cells.iter().map(colspan).sum()
}

/// True when every cell in the row is a `th`.
pub(crate) fn is_header_row(cells: &[Handle]) -> bool {
    !cells.is_empty() && cells.iter().all(|c| tag_name(c) == Some("th"))
}
