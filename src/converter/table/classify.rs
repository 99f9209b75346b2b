//! Structural table classification.
//!
//! Precedence is fixed: History, then Layout, then ComplexSections,
//! then Standard. The decision is made once per table before any
//! rendering begins.

use markup5ever_rcdom::Handle;

use crate::converter::node_util::{
    ancestor_haystack_contains, attr, class_contains, has_descendant, id_class_haystack,
    is_heading_tag, tag_name, text_content,
};

use super::grid::{collect_rows, is_header_row};
use super::TableKind;

pub(crate) fn classify(table: &Handle, complex_threshold: usize) -> TableKind {
    if is_history(table) {
        return TableKind::History;
    }
    if is_layout(table) {
        return TableKind::Layout;
    }
    // A declared header row marks a data table: complex cells inside it
    // are simplified in place by the standard renderer instead of
    // exploding the grid into sections.
    if has_complex_cell(table, complex_threshold) && !has_header_row(table) {
        return TableKind::ComplexSections;
    }
    TableKind::Standard
}

fn has_header_row(table: &Handle) -> bool {
    collect_rows(table)
        .first()
        .is_some_and(|row| is_header_row(row))
}

fn is_history(table: &Handle) -> bool {
    let hay = id_class_haystack(table);
    if hay.contains("history") || hay.contains("version") {
        return true;
    }

    let rows = collect_rows(table);
    if let Some(header) = rows.first() {
        let text = header
            .iter()
            .map(text_content)
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase();
        let versionish = text.contains("version") || text.contains("v.");
        let authored = text.contains("changed by") || text.contains("published");
        if versionish && authored {
            return true;
        }
    }

    ancestor_haystack_contains(table, "history") || ancestor_haystack_contains(table, "version")
}

/// Presentation-only grids: borderless tables inside layout containers,
/// single-cell wrappers around block content, or macro wrapper tables.
fn is_layout(table: &Handle) -> bool {
    if class_contains(table, "wysiwyg-macro") {
        return true;
    }

    let borderless = match attr(table, "border") {
        Some(b) => b.trim() == "0",
        None => true,
    };

    let rows = collect_rows(table);

    if borderless {
        let in_layout_container = ["layout", "column", "section", "panel"]
            .iter()
            .any(|c| ancestor_haystack_contains(table, c));
        let first_cell_has_blocks = rows
            .first()
            .and_then(|r| r.first())
            .is_some_and(cell_has_block_content);
        if in_layout_container && first_cell_has_blocks {
            return true;
        }
    }

    // A 1x1 table around block content is a wrapper, not data.
    rows.len() == 1 && rows[0].len() == 1 && cell_has_block_content(&rows[0][0])
}

fn cell_has_block_content(cell: &Handle) -> bool {
    has_descendant(cell, &|n| {
        matches!(
            tag_name(n),
            Some("div" | "table" | "ul" | "ol" | "p")
        ) || tag_name(n).is_some_and(is_heading_tag)
    })
}

fn has_complex_cell(table: &Handle, threshold: usize) -> bool {
    collect_rows(table)
        .iter()
        .flatten()
        .any(|cell| is_complex_cell(cell, threshold))
}

/// A cell that cannot be flattened into one inline table cell without
/// loss. Shared between classification and the standard renderer's
/// per-cell simplification.
pub(crate) fn is_complex_cell(cell: &Handle, threshold: usize) -> bool {
    if has_descendant(cell, &|n| {
        matches!(
            tag_name(n),
            Some("img" | "ul" | "ol" | "table" | "pre" | "blockquote")
        ) || tag_name(n).is_some_and(is_heading_tag)
            || class_contains(n, "panel")
    }) {
        return true;
    }

    if text_content(cell).chars().count() > threshold {
        return true;
    }

    // Multiple paragraphs mean block structure, not an inline value.
    cell.children
        .borrow()
        .iter()
        .filter(|c| tag_name(c) == Some("p"))
        .count()
        > 1
}
