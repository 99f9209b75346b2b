//! Page-history table rendering.
//!
//! History tables always come out as the fixed four-column grid
//! `Version | Published | Changed By | Comment`, whatever shape the
//! export used. Rows with fewer than 3 cells carry no revision data and
//! are skipped.

use markup5ever_rcdom::Handle;

use crate::converter::context::ConvertContext;
use crate::converter::node_util::{attr, find_descendant, tag_name, text_content};

use super::grid::{collect_rows, is_header_row};
use super::standard::{inline_cell, separator_row};

pub(crate) fn render(table: &Handle, ctx: &mut ConvertContext<'_>) -> String {
    ctx.mark_subtree_processed(table);

    let mut out = String::from("| Version | Published | Changed By | Comment |\n");
    out.push_str(&separator_row(4));

    let mut emitted = 0usize;
    for row in collect_rows(table) {
        if is_header_row(&row) {
            continue;
        }
        if row.len() < 3 {
            tracing::debug!(cells = row.len(), "skipping short history row");
            continue;
        }

        let version = version_cell(&row[0]);
        let published = inline_cell(&text_content(&row[1]));
        let changed_by = changed_by_cell(&row[2]);
        let comment = row
            .get(3)
            .map(|c| inline_cell(&text_content(c)))
            .unwrap_or_default();

        out.push_str(&format!(
            "| {version} | {published} | {changed_by} | {comment} |\n"
        ));
        emitted += 1;
    }

    if emitted == 0 {
        return String::new();
    }
    out.push('\n');
    out
}

/// The version cell prefers its embedded link so the revision stays
/// clickable.
fn version_cell(cell: &Handle) -> String {
    if let Some(a) = find_descendant(cell, &|n| tag_name(n) == Some("a")) {
        let label = inline_cell(&text_content(&a));
        let href = attr(&a, "href").unwrap_or_default();
        if !label.is_empty() && !href.is_empty() {
            return format!("[{label}]({href})");
        }
    }
    inline_cell(&text_content(cell))
}

/// Optional user icon, then the username as a link when one exists.
fn changed_by_cell(cell: &Handle) -> String {
    let mut parts = Vec::new();

    if let Some(img) = find_descendant(cell, &|n| tag_name(n) == Some("img"))
        && let Some(src) = attr(&img, "src")
    {
        let alt = attr(&img, "alt").unwrap_or_default();
        parts.push(format!("![{}]({})", inline_cell(&alt), src.trim()));
    }

    if let Some(a) = find_descendant(cell, &|n| tag_name(n) == Some("a")) {
        let label = inline_cell(&text_content(&a));
        let href = attr(&a, "href").unwrap_or_default();
        if !label.is_empty() && !href.is_empty() {
            parts.push(format!("[{label}]({href})"));
        } else if !label.is_empty() {
            parts.push(label);
        }
    } else {
        let name = inline_cell(&text_content(cell));
        if !name.is_empty() {
            parts.push(name);
        }
    }

    parts.join(" ")
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

    fn render_history(html: &str) -> String {
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
    fn renders_fixed_four_column_grid() {
        let md = render_history(
            r#"<table><tr><th>Version</th><th>Published</th><th>Changed By</th><th>Comment</th></tr>
               <tr><td><a href="v2.html">v. 2</a></td><td>Jan 05, 2024</td>
                   <td><a href="~sam">Sam Doe</a></td><td>typo fix</td></tr></table>"#,
        );
        assert_eq!(
            md,
            "| Version | Published | Changed By | Comment |\n\
             |---|---|---|---|\n\
             | [v. 2](v2.html) | Jan 05, 2024 | [Sam Doe](~sam) | typo fix |\n\n"
        );
    }

    #[test]
    fn short_rows_are_skipped() {
        let md = render_history(
            r#"<table><tr><td>v. 1</td><td>orphan</td></tr>
               <tr><td>v. 2</td><td>Jan 05</td><td>sam</td></tr></table>"#,
        );
        assert!(!md.contains("orphan"));
        assert!(md.contains("| v. 2 | Jan 05 | sam |"));
    }

    #[test]
    fn user_icon_precedes_the_name() {
        let md = render_history(
            r#"<table><tr><td>v. 3</td><td>Feb 10</td>
               <td><img src="avatar.png" alt=""><a href="~kim">Kim</a></td></tr></table>"#,
        );
        assert!(md.contains("| ![](avatar.png) [Kim](~kim) |"));
    }

    #[test]
    fn all_rows_short_yields_nothing() {
        let md = render_history("<table><tr><td>only</td></tr></table>");
        assert_eq!(md, "");
    }
}
