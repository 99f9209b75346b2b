//! Standard pipe-table rendering.
//!
//! Every emitted row is reconciled to the header column count, colspans
//! become empty placeholder cells, and a cell too complex to inline is
//! simplified to a short placeholder so the grid shape survives.

use markup5ever_rcdom::Handle;

use crate::converter::context::ConvertContext;
use crate::converter::dispatch::convert_children;
use crate::converter::node_util::{
    attr, class_contains, find_descendant, is_heading_tag, tag_name, text_content,
};

use super::classify::is_complex_cell;
use super::grid::{collect_rows, colspan, row_width};

/// Characters kept when a complex cell falls back to truncated text.
const SIMPLIFIED_TEXT_LIMIT: usize = 50;

pub(crate) fn render(table: &Handle, ctx: &mut ConvertContext<'_>) -> String {
    let rows = collect_rows(table);
    let columns = rows.iter().map(|r| row_width(r)).max().unwrap_or(0);
    if columns == 0 {
        return String::new();
    }

    let mut out = String::new();
    for (i, row) in rows.iter().enumerate() {
        let mut cells = Vec::with_capacity(columns);
        for cell in row {
            cells.push(cell_text(cell, ctx));
            for _ in 1..colspan(cell) {
                cells.push(String::new());
            }
        }
        cells.resize(columns, String::new());
        cells.truncate(columns);

        out.push_str("| ");
        out.push_str(&cells.join(" | "));
        out.push_str(" |\n");

        if i == 0 {
            out.push_str(&separator_row(columns));
        }
    }
    out.push('\n');
    out
}

pub(crate) fn separator_row(columns: usize) -> String {
    let mut sep = String::from("|");
    for _ in 0..columns {
        sep.push_str("---|");
    }
    sep.push('\n');
    sep
}

fn cell_text(cell: &Handle, ctx: &mut ConvertContext<'_>) -> String {
    let raw = if is_complex_cell(cell, ctx.options.complex_cell_threshold) {
        ctx.mark_subtree_processed(cell);
        simplify_cell(cell)
    } else {
        convert_children(cell, ctx)
    };
    inline_cell(&raw)
}

/// Collapse a converted fragment into a single pipe-safe table line.
pub(crate) fn inline_cell(text: &str) -> String {
    let flat = text.replace('\n', " ");
    let flat = flat.split_whitespace().collect::<Vec<_>>().join(" ");
    flat.replace('|', "\\|")
}

/// Short placeholder for content that will not fit in a grid cell.
pub(crate) fn simplify_cell(cell: &Handle) -> String {
    if let Some(heading) =
        find_descendant(cell, &|n| tag_name(n).is_some_and(is_heading_tag))
    {
        let text = text_content(&heading);
        if !text.is_empty() {
            return format!("**{text}**");
        }
    }

    if let Some(img) = find_descendant(cell, &|n| tag_name(n) == Some("img")) {
        let alt = attr(&img, "alt").unwrap_or_default();
        return format!("[{}]", alt.trim());
    }

    if let Some(list) =
        find_descendant(cell, &|n| matches!(tag_name(n), Some("ul" | "ol")))
    {
        let items = list
            .children
            .borrow()
            .iter()
            .filter(|c| tag_name(c) == Some("li"))
            .count();
        return format!("[List: {items} items]");
    }

    if find_descendant(cell, &|n| tag_name(n) == Some("table")).is_some() {
        return "[Table]".to_string();
    }

    if find_descendant(cell, &|n| {
        matches!(tag_name(n), Some("pre" | "blockquote")) || class_contains(n, "panel")
    })
    .is_some()
    {
        return "[Panel content]".to_string();
    }

    let text = text_content(cell);
    if text.chars().count() > SIMPLIFIED_TEXT_LIMIT {
        let cut: String = text.chars().take(SIMPLIFIED_TEXT_LIMIT).collect();
        format!("{}...", cut.trim_end())
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConvertOptions;
    use crate::converter::node_util::is_element;
    use crate::converter::slug::SlugRegistry;
    use html5ever::parse_document;
    use html5ever::tendril::TendrilSink;
    use markup5ever_rcdom::RcDom;

    fn render_table(html: &str) -> String {
        let doc = parse_document(RcDom::default(), Default::default())
            .one(html)
            .document;
        let table = find_descendant(&doc, &|n| is_element(n, "table")).unwrap();
        let options = ConvertOptions::default();
        let mut ctx =
            ConvertContext::new(&options, SlugRegistry::index_document(&doc), None);
        render(&table, &mut ctx)
    }

    #[test]
    fn two_by_two_with_single_separator() {
        let md = render_table(
            r#"<table border="1"><tr><th>A</th><th>B</th></tr>
               <tr><td>1</td><td>2</td></tr></table>"#,
        );
        assert_eq!(md, "| A | B |\n|---|---|\n| 1 | 2 |\n\n");
    }

    #[test]
    fn ragged_rows_are_padded_to_header_width() {
        let md = render_table(
            r#"<table border="1"><tr><th>A</th><th>B</th><th>C</th></tr>
               <tr><td>1</td></tr></table>"#,
        );
        assert_eq!(md, "| A | B | C |\n|---|---|---|\n| 1 |  |  |\n\n");
    }

    #[test]
    fn colspan_becomes_placeholder_cells() {
        let md = render_table(
            r#"<table border="1"><tr><th>A</th><th>B</th><th>C</th></tr>
               <tr><td colspan="2">wide</td><td>c</td></tr></table>"#,
        );
        assert_eq!(md, "| A | B | C |\n|---|---|---|\n| wide |  | c |\n\n");
    }

    #[test]
    fn pipes_escaped_and_newlines_flattened() {
        let md = render_table(
            "<table border=\"1\"><tr><th>H</th></tr>\
             <tr><td>a | b\nc</td></tr></table>",
        );
        assert_eq!(md, "| H |\n|---|\n| a \\| b c |\n\n");
    }

    #[test]
    fn complex_cell_is_simplified_to_placeholder() {
        let md = render_table(
            r#"<table border="1"><tr><th>K</th><th>V</th></tr>
               <tr><td>list</td><td><ul><li>1</li><li>2</li><li>3</li><li>4</li><li>5</li></ul></td></tr></table>"#,
        );
        assert!(md.contains("| [List: 5 items] |"));
    }

    #[test]
    fn every_row_matches_separator_width() {
        let md = render_table(
            r#"<table border="1"><tr><th>A</th><th>B</th></tr>
               <tr><td>1</td><td>2</td><td>3</td></tr>
               <tr><td>only</td></tr></table>"#,
        );
        let widths: Vec<usize> = md
            .lines()
            .filter(|l| l.starts_with('|'))
            .map(|l| l.matches('|').count())
            .collect();
        let first = widths[0];
        assert!(widths.iter().all(|w| *w == first), "ragged output: {md}");
    }
}
