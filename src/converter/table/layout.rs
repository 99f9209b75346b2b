//! Layout-table flattening.
//!
//! A layout table positions content; it is not data. The grid is
//! discarded and every cell's converted block content flows out in
//! row-major order.

use markup5ever_rcdom::Handle;

use crate::converter::context::ConvertContext;
use crate::converter::dispatch::convert_children;

use super::grid::collect_rows;

pub(crate) fn render(table: &Handle, ctx: &mut ConvertContext<'_>) -> String {
    let mut blocks = Vec::new();
    for row in collect_rows(table) {
        for cell in row {
            let fragment = convert_children(&cell, ctx);
            let fragment = fragment.trim();
            if !fragment.is_empty() {
                blocks.push(fragment.to_string());
            }
        }
    }
    if blocks.is_empty() {
        String::new()
    } else {
        format!("{}\n\n", blocks.join("\n\n"))
    }
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

    #[test]
    fn grid_is_discarded_and_content_flows() {
        let doc = parse_document(RcDom::default(), Default::default())
            .one(
                "<table><tr><td><p>left column</p></td><td><p>right column</p></td></tr>\
                 <tr><td><p>below</p></td></tr></table>",
            )
            .document;
        let table = find_descendant(&doc, &|n| is_element(n, "table")).unwrap();
        let options = ConvertOptions::default();
        let mut ctx =
            ConvertContext::new(&options, SlugRegistry::index_document(&doc), None);
        assert_eq!(
            render(&table, &mut ctx),
            "left column\n\nright column\n\nbelow\n\n"
        );
    }
}
