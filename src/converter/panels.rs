//! `div` routing: Confluence panels, layout grids, and plain containers.

use markup5ever_rcdom::Handle;

use super::context::ConvertContext;
use super::dispatch::{convert_children, convert_node};
use super::node_util::{children, class_contains, text_content};

/// Callout boxes Confluence renders as colored panels.
const PANEL_CLASSES: &[&str] = &[
    "panel",
    "confluence-information-macro",
    "aui-message",
    "note",
    "warning",
    "info",
    "tip",
];

/// Column/section grid containers whose visual structure is discarded.
const LAYOUT_CLASSES: &[&str] = &[
    "columnlayout",
    "layoutcell",
    "innercell",
    "contentlayout",
    "section",
];

pub(crate) fn render_div(node: &Handle, ctx: &mut ConvertContext<'_>) -> String {
    // Inner panel wrappers are plain containers; only the outer panel
    // div owns the blockquote framing.
    if class_contains(node, "panelcontent")
        || class_contains(node, "panelheader")
        || class_contains(node, "macro-body")
    {
        return convert_children(node, ctx);
    }
    if PANEL_CLASSES.iter().any(|c| class_contains(node, c)) {
        tracing::debug!("rendering div as panel");
        return render_panel(node, ctx);
    }
    if LAYOUT_CLASSES.iter().any(|c| class_contains(node, c)) {
        return render_layout(node, ctx);
    }
    convert_children(node, ctx)
}

/// Bold title line, then the body as a blockquote.
fn render_panel(node: &Handle, ctx: &mut ConvertContext<'_>) -> String {
    let title = children(node)
        .into_iter()
        .find(|c| class_contains(c, "panelheader") || class_contains(c, "title"))
        .map(|header| {
            // The header subtree is consumed as plain text.
            let text = text_content(&header);
            ctx.mark_subtree_processed(&header);
            text
        })
        .unwrap_or_default();

    let body = convert_children(node, ctx);
    let body = body.trim();

    let mut out = String::new();
    if !title.trim().is_empty() {
        out.push_str(&format!("**{}**\n\n", title.trim()));
    }
    if !body.is_empty() {
        for line in body.lines() {
            if line.trim().is_empty() {
                out.push_str(">\n");
            } else {
                out.push_str("> ");
                out.push_str(line.trim_end());
                out.push('\n');
            }
        }
        out.push('\n');
    }
    out
}

/// Flatten a column grid: each child's block content in document order,
/// the grid itself contributing nothing.
fn render_layout(node: &Handle, ctx: &mut ConvertContext<'_>) -> String {
    let mut blocks = Vec::new();
    for child in children(node) {
        let fragment = convert_node(&child, ctx);
        let fragment = fragment.trim();
        if !fragment.is_empty() {
            blocks.push(fragment.to_string());
        }
    }
    if blocks.is_empty() {
        String::new()
    } else {
        format!("{}\n\n", blocks.join("\n\n"))
    }
}
