//! The recursive element dispatcher.
//!
//! Every node is visited at most once per document (enforced by the
//! Processed Set in [`ConvertContext`]) and dispatched through a closed
//! [`ElementKind`] enum. Unrecognized tags always fall through to the
//! pass-through rule so no content is silently lost.

use markup5ever_rcdom::{Handle, NodeData};

use super::code;
use super::context::ConvertContext;
use super::drop_filter::should_drop;
use super::images;
use super::links;
use super::lists;
use super::node_util::{children, collapse_inline, separates_inline, tag_name, text_content};
use super::panels;
use super::table;

/// Supported element vocabulary of a Confluence export page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ElementKind {
    Heading(u8),
    Paragraph,
    Bold,
    Italic,
    UnorderedList,
    OrderedList,
    ListItem,
    Link,
    Image,
    Code,
    Pre,
    Blockquote,
    Div,
    Span,
    Table,
    Break,
    Rule,
    Unknown(String),
}

impl ElementKind {
    pub(crate) fn from_tag(tag: &str) -> Self {
        match tag {
            "h1" => Self::Heading(1),
            "h2" => Self::Heading(2),
            "h3" => Self::Heading(3),
            "h4" => Self::Heading(4),
            "h5" => Self::Heading(5),
            "h6" => Self::Heading(6),
            "p" => Self::Paragraph,
            "b" | "strong" => Self::Bold,
            "i" | "em" => Self::Italic,
            "ul" => Self::UnorderedList,
            "ol" => Self::OrderedList,
            "li" => Self::ListItem,
            "a" => Self::Link,
            "img" => Self::Image,
            "code" | "tt" => Self::Code,
            "pre" => Self::Pre,
            "blockquote" => Self::Blockquote,
            "div" => Self::Div,
            "span" => Self::Span,
            "table" => Self::Table,
            "br" => Self::Break,
            "hr" => Self::Rule,
            other => Self::Unknown(other.to_string()),
        }
    }
}

/// Convert one node to its Markdown fragment.
///
/// Marks the node processed before its handler runs; a node seen twice
/// contributes exactly one fragment across the whole conversion.
pub(crate) fn convert_node(node: &Handle, ctx: &mut ConvertContext<'_>) -> String {
    if !ctx.mark_processed(node) {
        return String::new();
    }

    if should_drop(node, ctx) {
        return String::new();
    }

    match &node.data {
        NodeData::Document => convert_children(node, ctx),
        NodeData::Text { contents } => {
            let text = contents.borrow();
            if text.trim().is_empty() {
                // Pretty-printing whitespace between blocks drops; a gap
                // between two inline siblings is a real word separator.
                if separates_inline(node) {
                    " ".to_string()
                } else {
                    String::new()
                }
            } else {
                collapse_inline(&text)
            }
        }
        NodeData::Element { .. } => {
            let tag = tag_name(node).unwrap_or_default().to_string();
            ctx.trail.push(tag.clone());
            let fragment = convert_element(&tag, node, ctx);
            ctx.trail.pop();
            fragment
        }
        _ => String::new(),
    }
}

/// Convert all children in document order and concatenate the fragments.
pub(crate) fn convert_children(node: &Handle, ctx: &mut ConvertContext<'_>) -> String {
    let mut out = String::new();
    for child in children(node) {
        out.push_str(&convert_node(&child, ctx));
    }
    out
}

fn convert_element(tag: &str, node: &Handle, ctx: &mut ConvertContext<'_>) -> String {
    match ElementKind::from_tag(tag) {
        ElementKind::Heading(level) => heading(node, level, ctx),
        ElementKind::Paragraph => paragraph(node, ctx),
        ElementKind::Bold => emphasis(node, "**", ctx),
        ElementKind::Italic => emphasis(node, "*", ctx),
        ElementKind::UnorderedList => lists::render_list(node, false, ctx),
        ElementKind::OrderedList => lists::render_list(node, true, ctx),
        // A stray li outside any list still renders its content.
        ElementKind::ListItem => convert_children(node, ctx),
        ElementKind::Link => links::render_link(node, ctx),
        ElementKind::Image => images::render_image(node, ctx),
        ElementKind::Code => code::render_inline_code(node, ctx),
        ElementKind::Pre => code::render_code_block(node, ctx),
        ElementKind::Blockquote => blockquote(node, ctx),
        ElementKind::Div => panels::render_div(node, ctx),
        ElementKind::Span => convert_children(node, ctx),
        ElementKind::Table => table::render_table(node, ctx),
        ElementKind::Break => "\n".to_string(),
        ElementKind::Rule => "\n\n---\n\n".to_string(),
        ElementKind::Unknown(_) => convert_children(node, ctx),
    }
}

fn heading(node: &Handle, level: u8, ctx: &mut ConvertContext<'_>) -> String {
    // Headings flatten their children to plain text; the subtree is
    // consumed here rather than re-walked.
    let text = text_content(node);
    let text = text.trim();
    ctx.mark_subtree_processed(node);

    if text.is_empty() {
        return String::new();
    }

    let marker = "#".repeat(level as usize);
    if ctx.options.emit_heading_anchors {
        let slug = ctx.slugs.resolve(node);
        format!("{marker} {text} {{#{slug}}}\n\n")
    } else {
        format!("{marker} {text}\n\n")
    }
}

fn paragraph(node: &Handle, ctx: &mut ConvertContext<'_>) -> String {
    let content = convert_children(node, ctx);
    let trimmed = content.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("{trimmed}\n\n")
    }
}

fn emphasis(node: &Handle, marker: &str, ctx: &mut ConvertContext<'_>) -> String {
    let content = convert_children(node, ctx);
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    // Whitespace moves outside the markers; `** x**` is not valid
    // emphasis in most renderers.
    let lead = if content.starts_with(char::is_whitespace) { " " } else { "" };
    let tail = if content.ends_with(char::is_whitespace) { " " } else { "" };
    format!("{lead}{marker}{trimmed}{marker}{tail}")
}

fn blockquote(node: &Handle, ctx: &mut ConvertContext<'_>) -> String {
    let content = convert_children(node, ctx);
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    let mut out = String::new();
    for line in trimmed.lines() {
        if line.trim().is_empty() {
            out.push_str(">\n");
        } else {
            out.push_str("> ");
            out.push_str(line.trim_end());
            out.push('\n');
        }
    }
    out.push('\n');
    out
}
