//! Inline code spans and fenced code blocks.
//!
//! Code content is taken as raw text and never re-walked, so the
//! dispatcher cannot mangle significant whitespace inside it.

use markup5ever_rcdom::Handle;

use super::context::ConvertContext;
use super::node_util::{attr, find_descendant, is_element, raw_text};

/// Render `code`/`tt` outside a `pre` as a backtick span.
pub(crate) fn render_inline_code(node: &Handle, ctx: &mut ConvertContext<'_>) -> String {
    ctx.mark_subtree_processed(node);
    let text = raw_text(node);
    let text = text.trim();
    if text.is_empty() {
        return String::new();
    }
    // A backtick inside the span needs a longer delimiter.
    if text.contains('`') {
        format!("`` {text} ``")
    } else {
        format!("`{text}`")
    }
}

/// Render a `pre` element as a fenced block with a language token when
/// one is declared on the `pre` or its inner `code`.
pub(crate) fn render_code_block(node: &Handle, ctx: &mut ConvertContext<'_>) -> String {
    ctx.mark_subtree_processed(node);

    let content = raw_text(node);
    let content = content.trim_matches('\n').trim_end();
    if content.trim().is_empty() {
        return String::new();
    }

    let lang = language_of(node)
        .or_else(|| {
            find_descendant(node, &|n| is_element(n, "code")).and_then(|c| language_of(&c))
        })
        .unwrap_or_default();

    let fence = if content.contains("```") { "````" } else { "```" };
    format!("{fence}{lang}\n{content}\n{fence}\n\n")
}

fn language_of(node: &Handle) -> Option<String> {
    if let Some(lang) = attr(node, "data-language") {
        let lang = lang.trim().to_lowercase();
        if !lang.is_empty() {
            return Some(lang);
        }
    }
    attr(node, "class")?
        .split_whitespace()
        .find_map(|c| c.strip_prefix("language-").map(|l| l.to_lowercase()))
}
