//! Anchor element rendering and fragment-href rewriting.

use markup5ever_rcdom::Handle;

use super::context::ConvertContext;
use super::dispatch::convert_children;
use super::node_util::attr;

/// Render an `a` element.
///
/// Fragment hrefs go through the slug registry so same-document links
/// land on the emitted heading anchors. An image-only link comes out as
/// `[![alt](src)](href)` because the image child renders itself before
/// the wrapping happens here.
pub(crate) fn render_link(node: &Handle, ctx: &mut ConvertContext<'_>) -> String {
    let href = attr(node, "href").unwrap_or_default();
    let href = ctx.slugs.resolve_link(href.trim());

    let inner = convert_children(node, ctx);
    let text = inner.trim();

    if text.is_empty() && href.is_empty() {
        return String::new();
    }
    if href.is_empty() {
        // Named anchor with visible text but nowhere to point.
        return text.to_string();
    }
    let label = if text.is_empty() { href.as_str() } else { text };
    format!("[{label}]({href})")
}
