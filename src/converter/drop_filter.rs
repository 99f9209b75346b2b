//! Exclusion rules for Confluence export chrome.
//!
//! A single predicate decides whether a node is excluded from output.
//! Dropped nodes are still marked processed by the dispatcher so nothing
//! re-visits them.

use markup5ever_rcdom::{Handle, NodeData};

use super::context::ConvertContext;
use super::node_util::{attr, id_class_haystack, tag_name};

/// Tags that never contribute output.
const DROPPED_TAGS: &[&str] = &["script", "style", "noscript", "button"];

/// Id/class substrings of export chrome: navigation, footers,
/// breadcrumbs, sidebars, and the metadata widgets Confluence renders
/// around the article body.
const DROP_PATTERNS: &[&str] = &[
    "breadcrumb-section",
    "breadcrumbs",
    "navigation",
    "sidebar",
    "aside",
    "page-metadata",
    "footer",
    "comments-section",
    "labels-section",
    "like-section",
    "hidden",
];

/// Decide whether a node is excluded from output.
///
/// Any one rule matching drops the node: comments, denylisted tags,
/// `aria-hidden`, inline hiding styles, or denylisted id/class names.
/// Chrome outside the article body never reaches this predicate at
/// all: the walk is rooted at the content container located by
/// `find_content_root`.
pub(crate) fn should_drop(node: &Handle, ctx: &ConvertContext<'_>) -> bool {
    if matches!(node.data, NodeData::Comment { .. }) {
        return true;
    }

    let Some(tag) = tag_name(node) else {
        return false;
    };

    if DROPPED_TAGS.contains(&tag) {
        return true;
    }

    if attr(node, "aria-hidden").as_deref() == Some("true") {
        return true;
    }

    if let Some(style) = attr(node, "style") {
        let style: String = style.to_lowercase().split_whitespace().collect();
        if style.contains("display:none") || style.contains("visibility:hidden") {
            return true;
        }
    }

    let hay = id_class_haystack(node);
    if !hay.is_empty() {
        if DROP_PATTERNS.iter().any(|p| hay.contains(p)) {
            return true;
        }
        if ctx
            .options
            .extra_drop_patterns
            .iter()
            .any(|p| hay.contains(&p.to_lowercase()))
        {
            return true;
        }
    }

    false
}
