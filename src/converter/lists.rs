//! Bullet and numbered list rendering.
//!
//! Continuation lines stay aligned under the item marker so block
//! content inside an `li` remains part of the item. Nested lists are
//! rendered in place with two extra spaces of indentation per level.

use markup5ever_rcdom::Handle;

use super::context::ConvertContext;
use super::dispatch::convert_node;
use super::drop_filter::should_drop;
use super::node_util::{children, tag_name};

/// Render a `ul` or `ol` subtree as a Markdown list, followed by a
/// blank line.
pub(crate) fn render_list(node: &Handle, ordered: bool, ctx: &mut ConvertContext<'_>) -> String {
    let body = render_items(node, ordered, 0, ctx);
    if body.is_empty() {
        String::new()
    } else {
        format!("{body}\n")
    }
}

fn render_items(
    list: &Handle,
    ordered: bool,
    indent: usize,
    ctx: &mut ConvertContext<'_>,
) -> String {
    let mut out = String::new();
    let mut index = 0usize;

    for child in children(list) {
        if tag_name(&child) != Some("li") {
            continue;
        }
        ctx.mark_processed(&child);
        if should_drop(&child, ctx) {
            continue;
        }

        // Nested lists render after the item's own content, one level
        // deeper; everything else converts through the dispatcher.
        let mut inline = String::new();
        let mut nested = String::new();
        for grandchild in children(&child) {
            match tag_name(&grandchild) {
                Some(sub @ ("ul" | "ol")) => {
                    ctx.mark_processed(&grandchild);
                    if !should_drop(&grandchild, ctx) {
                        nested.push_str(&render_items(
                            &grandchild,
                            sub == "ol",
                            indent + 2,
                            ctx,
                        ));
                    }
                }
                _ => inline.push_str(&convert_node(&grandchild, ctx)),
            }
        }

        let inline = inline.trim();
        if inline.is_empty() && nested.is_empty() {
            continue;
        }

        index += 1;
        let pad = " ".repeat(indent);
        let marker = if ordered {
            format!("{index}. ")
        } else {
            "- ".to_string()
        };

        let mut lines = inline.lines().filter(|l| !l.trim().is_empty());
        match lines.next() {
            Some(first) => {
                out.push_str(&pad);
                out.push_str(&marker);
                out.push_str(first.trim());
                out.push('\n');
            }
            None => {
                // Item holds only a nested list; keep the marker so the
                // sublist still belongs to an item.
                out.push_str(&pad);
                out.push_str(marker.trim_end());
                out.push('\n');
            }
        }
        // Continuation indent is fixed per list flavor, not tied to the
        // marker width, so item ten lines up with item one.
        let continuation = if ordered { 3 } else { 2 };
        for line in lines {
            out.push_str(&pad);
            out.push_str(&" ".repeat(continuation));
            out.push_str(line.trim());
            out.push('\n');
        }
        out.push_str(&nested);
    }

    out
}
