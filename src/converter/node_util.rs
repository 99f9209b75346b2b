//! Helpers over `markup5ever_rcdom` nodes.
//!
//! The engine treats the parsed tree as read-only; every helper here
//! borrows and clones, none mutates.

use markup5ever_rcdom::{Handle, NodeData};
use std::rc::Rc;

/// Stable identity of a node for the lifetime of one conversion.
///
/// The tree outlives the conversion and is never rebuilt mid-run, so the
/// allocation address is a valid identity key.
pub(crate) fn node_id(node: &Handle) -> usize {
    Rc::as_ptr(node) as usize
}

pub(crate) fn tag_name(node: &Handle) -> Option<&str> {
    match &node.data {
        NodeData::Element { name, .. } => Some(&name.local),
        _ => None,
    }
}

pub(crate) fn is_element(node: &Handle, tag: &str) -> bool {
    tag_name(node) == Some(tag)
}

/// Value of an attribute, if present.
pub(crate) fn attr(node: &Handle, name: &str) -> Option<String> {
    let NodeData::Element { attrs, .. } = &node.data else {
        return None;
    };
    attrs
        .borrow()
        .iter()
        .find(|a| &*a.name.local == name)
        .map(|a| a.value.to_string())
}

/// Lower-cased id and class joined into one haystack for denylist and
/// classification checks.
pub(crate) fn id_class_haystack(node: &Handle) -> String {
    let mut hay = String::new();
    if let Some(id) = attr(node, "id") {
        hay.push_str(&id.to_lowercase());
    }
    if let Some(class) = attr(node, "class") {
        hay.push(' ');
        hay.push_str(&class.to_lowercase());
    }
    hay
}

pub(crate) fn class_contains(node: &Handle, needle: &str) -> bool {
    attr(node, "class").is_some_and(|c| c.to_lowercase().contains(needle))
}

/// Snapshot of the children; avoids holding a `RefCell` borrow across
/// recursive calls.
pub(crate) fn children(node: &Handle) -> Vec<Handle> {
    node.children.borrow().iter().cloned().collect()
}

pub(crate) fn element_children(node: &Handle) -> Vec<Handle> {
    node.children
        .borrow()
        .iter()
        .filter(|c| matches!(c.data, NodeData::Element { .. }))
        .cloned()
        .collect()
}

pub(crate) fn parent(node: &Handle) -> Option<Handle> {
    let weak = node.parent.take();
    let parent = weak.as_ref().and_then(std::rc::Weak::upgrade);
    node.parent.set(weak);
    parent
}

/// Plain text of a subtree, whitespace runs collapsed to single spaces.
/// Script and style content is skipped.
pub(crate) fn text_content(node: &Handle) -> String {
    let mut out = String::new();
    collect_text(node, &mut out, false);
    collapse_whitespace(&out)
}

/// Exact text of a subtree with whitespace preserved, for `pre`/`code`
/// content that must not be re-walked.
pub(crate) fn raw_text(node: &Handle) -> String {
    let mut out = String::new();
    collect_text(node, &mut out, true);
    out
}

fn collect_text(node: &Handle, out: &mut String, raw: bool) {
    match &node.data {
        NodeData::Text { contents } => out.push_str(&contents.borrow()),
        NodeData::Element { name, .. } => {
            let tag = &*name.local;
            if tag == "script" || tag == "style" {
                return;
            }
            // Preformatted line structure comes from <br> as well as text.
            if raw && tag == "br" {
                out.push('\n');
            }
            for child in node.children.borrow().iter() {
                collect_text(child, out, raw);
            }
        }
        NodeData::Document => {
            for child in node.children.borrow().iter() {
                collect_text(child, out, raw);
            }
        }
        _ => {}
    }
}

/// Collapse a text node for inline flow: interior whitespace runs
/// become one space, and boundary whitespace survives as a single
/// space so the node still separates its inline siblings.
pub(crate) fn collapse_inline(text: &str) -> String {
    let collapsed = collapse_whitespace(text);
    if collapsed.is_empty() {
        return String::new();
    }
    let mut out = String::with_capacity(collapsed.len() + 2);
    if text.starts_with(char::is_whitespace) {
        out.push(' ');
    }
    out.push_str(&collapsed);
    if text.ends_with(char::is_whitespace) {
        out.push(' ');
    }
    out
}

const BLOCK_TAGS: &[&str] = &[
    "p", "div", "ul", "ol", "li", "dl", "dt", "dd", "table", "thead",
    "tbody", "tfoot", "tr", "td", "th", "pre", "blockquote", "hr", "br",
    "section", "article", "header", "footer", "nav", "main", "aside",
    "form", "figure", "figcaption",
];

pub(crate) fn is_block_tag(tag: &str) -> bool {
    BLOCK_TAGS.contains(&tag) || is_heading_tag(tag)
}

/// Whether a whitespace-only text node sits between two inline
/// siblings and therefore must render as a single separating space.
/// Whitespace between block siblings is formatting noise and drops.
pub(crate) fn separates_inline(node: &Handle) -> bool {
    let Some(p) = parent(node) else {
        return false;
    };
    let siblings = p.children.borrow();
    let Some(idx) = siblings.iter().position(|c| node_id(c) == node_id(node)) else {
        return false;
    };
    let prev = idx.checked_sub(1).and_then(|i| siblings.get(i));
    let next = siblings.get(idx + 1);
    match (prev, next) {
        (Some(prev), Some(next)) => is_inline(prev) && is_inline(next),
        _ => false,
    }
}

fn is_inline(node: &Handle) -> bool {
    match tag_name(node) {
        Some(tag) => !is_block_tag(tag),
        None => matches!(node.data, NodeData::Text { .. }),
    }
}

pub(crate) fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last_space = false;
    for c in text.chars() {
        if c.is_whitespace() {
            if !last_space && !out.is_empty() {
                out.push(' ');
            }
            last_space = true;
        } else {
            out.push(c);
            last_space = false;
        }
    }
    if out.ends_with(' ') {
        out.pop();
    }
    out
}

/// Depth-first search for an element with the given id.
pub(crate) fn find_by_id(root: &Handle, id: &str) -> Option<Handle> {
    if attr(root, "id").as_deref() == Some(id) {
        return Some(root.clone());
    }
    for child in root.children.borrow().iter() {
        if let Some(found) = find_by_id(child, id) {
            return Some(found);
        }
    }
    None
}

/// First descendant (not the root itself) matching the predicate.
pub(crate) fn find_descendant<F>(node: &Handle, pred: &F) -> Option<Handle>
where
    F: Fn(&Handle) -> bool,
{
    for child in node.children.borrow().iter() {
        if pred(child) {
            return Some(child.clone());
        }
        if let Some(found) = find_descendant(child, pred) {
            return Some(found);
        }
    }
    None
}

pub(crate) fn has_descendant<F>(node: &Handle, pred: &F) -> bool
where
    F: Fn(&Handle) -> bool,
{
    find_descendant(node, pred).is_some()
}

pub(crate) fn is_heading_tag(tag: &str) -> bool {
    matches!(tag, "h1" | "h2" | "h3" | "h4" | "h5" | "h6")
}

/// Whether any ancestor's id/class contains the needle.
pub(crate) fn ancestor_haystack_contains(node: &Handle, needle: &str) -> bool {
    let mut current = parent(node);
    while let Some(n) = current {
        if matches!(n.data, NodeData::Element { .. })
            && id_class_haystack(&n).contains(needle)
        {
            return true;
        }
        current = parent(&n);
    }
    false
}
