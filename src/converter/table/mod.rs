//! Table classification and rendering.
//!
//! A table is classified exactly once, before any rendering begins, and
//! the classification picks one of four strategies. Precedence is
//! History, Layout, ComplexSections, then Standard as the default.

use markup5ever_rcdom::Handle;

mod classify;
mod grid;
mod history;
mod layout;
mod sections;
mod standard;

use super::context::ConvertContext;

/// Rendering strategy for one table, immutable once computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    History,
    Layout,
    ComplexSections,
    Standard,
}

pub(crate) fn render_table(table: &Handle, ctx: &mut ConvertContext<'_>) -> String {
    let kind = classify::classify(table, ctx.options.complex_cell_threshold);
    tracing::debug!(?kind, "classified table");

    let rendered = match kind {
        TableKind::History => history::render(table, ctx),
        TableKind::Layout => layout::render(table, ctx),
        TableKind::ComplexSections => sections::render(table, ctx),
        TableKind::Standard => standard::render(table, ctx),
    };

    // Whatever the strategy consumed, nothing below this table renders
    // again through another path.
    ctx.mark_subtree_processed(table);
    rendered
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
    fn standard_table_end_to_end() {
        let doc = parse_document(RcDom::default(), Default::default())
            .one(
                r#"<table border="1"><tr><th>Key</th><th>Value</th></tr>
                   <tr><td>host</td><td>example.test</td></tr></table>"#,
            )
            .document;
        let table = find_descendant(&doc, &|n| is_element(n, "table")).unwrap();
        let options = ConvertOptions::default();
        let mut ctx =
            ConvertContext::new(&options, SlugRegistry::index_document(&doc), None);
        assert_eq!(
            render_table(&table, &mut ctx),
            "| Key | Value |\n|---|---|\n| host | example.test |\n\n"
        );
    }
}
