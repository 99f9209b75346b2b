//! Breadcrumb promotion.
//!
//! Export pages open with the breadcrumb trail as a numbered list. When
//! a document still starts with one, it is promoted to an explicit
//! `## Navigation` section with bullets. A document that already opens
//! with a heading is left alone, which makes the pass a no-op on its
//! own output.

use regex::Regex;
use std::sync::LazyLock;

static NUMBERED_ITEM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]+\.\s+(.+)$").expect("NUMBERED_ITEM: hardcoded regex is valid")
});

pub fn promote_navigation_block(input: &str) -> String {
    let body_start = input.len() - input.trim_start_matches(['\n', ' ']).len();
    let body = &input[body_start..];
    if body.starts_with('#') {
        return input.to_string();
    }

    let mut crumbs = Vec::new();
    let mut consumed = 0usize;
    for line in body.lines() {
        match NUMBERED_ITEM.captures(line.trim()) {
            Some(caps) => {
                crumbs.push(caps[1].trim().to_string());
                consumed += line.len() + 1;
            }
            None if line.trim().is_empty() && !crumbs.is_empty() => break,
            _ => return input.to_string(),
        }
    }

    // One numbered item is an ordinary list, not a breadcrumb trail.
    if crumbs.len() < 2 {
        return input.to_string();
    }

    let rest = body[consumed.min(body.len())..].trim_start_matches('\n');
    let mut out = String::from("## Navigation\n\n");
    for crumb in &crumbs {
        out.push_str("- ");
        out.push_str(crumb);
        out.push('\n');
    }
    if !rest.is_empty() {
        out.push('\n');
        out.push_str(rest);
    }
    out
}
