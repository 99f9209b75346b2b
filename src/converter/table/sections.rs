//! Complex-section rendering.
//!
//! When cells hold block content that will not fit a grid, the table is
//! rewritten as sections: each row's first cell becomes a level-2
//! heading and the remaining cells render beneath it as body blocks.
//! Tabular alignment is traded for legibility.

use markup5ever_rcdom::Handle;

use crate::converter::context::ConvertContext;
use crate::converter::dispatch::convert_children;
use crate::converter::node_util::text_content;

use super::grid::collect_rows;

pub(crate) fn render(table: &Handle, ctx: &mut ConvertContext<'_>) -> String {
    let mut out = String::new();

    for row in collect_rows(table) {
        let mut cells = row.iter();
        let Some(first) = cells.next() else {
            continue;
        };

        // Plain text flattening also normalizes any heading markup the
        // cell already carried down to this one `##`.
        let title = text_content(first);
        let title = title.trim();
        ctx.mark_subtree_processed(first);
        if !title.is_empty() {
            out.push_str(&format!("## {title}\n\n"));
        }

        for cell in cells {
            let body = convert_children(cell, ctx);
            let body = body.trim();
            if !body.is_empty() {
                out.push_str(body);
                out.push_str("\n\n");
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConvertOptions;
    use crate::converter::node_util::{find_descendant, is_element};
    use crate::converter::slug::SlugRegistry;
    use html5ever::parse_document;
    use html5ever::tendril::TendrilSink;
    use markup5ever_rcdom::RcDom;

    fn render_sections(html: &str) -> String {
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
    fn first_cell_becomes_heading() {
        let md = render_sections(
            "<table><tr><td>Install</td><td><ul><li>step 1</li><li>step 2</li></ul></td></tr></table>",
        );
        assert_eq!(md, "## Install\n\n- step 1\n- step 2\n\n");
    }

    #[test]
    fn existing_heading_markup_is_normalized() {
        let md = render_sections(
            "<table><tr><td><h4>Deep Title</h4></td><td><p>body</p></td></tr></table>",
        );
        assert_eq!(md, "## Deep Title\n\nbody\n\n");
    }

    #[test]
    fn rows_render_in_order() {
        let md = render_sections(
            "<table><tr><td>A</td><td><p>a body</p></td></tr>\
             <tr><td>B</td><td><p>b body</p></td></tr></table>",
        );
        assert_eq!(md, "## A\n\na body\n\n## B\n\nb body\n\n");
    }
}
