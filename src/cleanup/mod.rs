//! Whole-document Markdown cleanup.
//!
//! An ordered list of named, pure passes applied once, after the
//! dispatcher has assembled the raw document. Each pass is individually
//! idempotent and the pipeline as a whole is too; running cleanup on
//! already-clean output changes nothing.

pub mod entities;
pub mod headings;
pub mod navigation;
pub mod spacing;
pub mod tables;

type Pass = fn(&str) -> String;

/// The fixed pass order. Entity decoding runs after table repair so
/// decoded pipes cannot break cell counting, and blank-line collapsing
/// runs late to absorb spacing the earlier passes introduce.
const PASSES: &[(&str, Pass)] = &[
    ("collapse_doubled_headings", headings::collapse_doubled_headings),
    ("fix_block_adjacency", headings::fix_block_adjacency),
    ("repair_tables", tables::repair_tables),
    ("decode_entities", entities::decode_entities),
    ("collapse_blank_lines", spacing::collapse_blank_lines),
    ("promote_navigation_block", navigation::promote_navigation_block),
];

/// Run every cleanup pass in order.
pub fn cleanup(input: &str) -> String {
    let mut text = input.to_string();
    for (name, pass) in PASSES {
        let next = pass(&text);
        if next != text {
            tracing::debug!(pass = name, "cleanup pass modified document");
        }
        text = next;
    }
    text
}
