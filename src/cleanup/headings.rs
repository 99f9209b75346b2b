//! Heading marker repair and block adjacency spacing.

use regex::Regex;
use std::sync::LazyLock;

static DOUBLED_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^(#{1,6}) (#{1,6}) ")
        .expect("DOUBLED_HEADING: hardcoded regex is valid")
});

/// Merge doubled heading markers (`# # Title` becomes `## Title`),
/// clamped to level 6. Nested heading handling can stack markers more
/// than once, so the pass runs to a fixpoint.
pub fn collapse_doubled_headings(input: &str) -> String {
    let mut text = input.to_string();
    loop {
        let next = DOUBLED_HEADING
            .replace_all(&text, |caps: &regex::Captures<'_>| {
                let level = (caps[1].len() + caps[2].len()).min(6);
                format!("{} ", "#".repeat(level))
            })
            .into_owned();
        if next == text {
            return next;
        }
        text = next;
    }
}

/// Insert the blank lines Markdown needs around headings and before
/// list blocks. Fenced code is left untouched.
pub fn fix_block_adjacency(input: &str) -> String {
    let mut out: Vec<String> = Vec::new();
    let mut in_fence = false;

    for line in input.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with("```") {
            in_fence = !in_fence;
            out.push(line.to_string());
            continue;
        }
        if !in_fence
            && let Some(prev) = out.last()
        {
            let prev = prev.clone();
            let prev_blank = prev.trim().is_empty();
            let needs_gap = if is_heading_line(trimmed) {
                !prev_blank
            } else if is_list_item(trimmed) {
                !prev_blank && !is_list_context(&prev)
            } else {
                !line.trim().is_empty() && is_heading_line(prev.trim_start())
            };
            if needs_gap {
                out.push(String::new());
            }
        }
        out.push(line.to_string());
    }

    let mut text = out.join("\n");
    if input.ends_with('\n') {
        text.push('\n');
    }
    text
}

fn is_heading_line(line: &str) -> bool {
    let hashes = line.chars().take_while(|&c| c == '#').count();
    (1..=6).contains(&hashes) && line[hashes..].starts_with(' ')
}

fn is_list_item(line: &str) -> bool {
    if line.starts_with("- ") {
        return true;
    }
    let digits = line.chars().take_while(|c| c.is_ascii_digit()).count();
    digits > 0 && line[digits..].starts_with(". ")
}

/// Lines a list item may legally follow without a separating blank:
/// another item or an indented continuation line.
fn is_list_context(line: &str) -> bool {
    is_list_item(line.trim_start()) || line.starts_with("  ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn doubled_markers_merge() {
        assert_eq!(collapse_doubled_headings("# # Title\n"), "## Title\n");
        assert_eq!(collapse_doubled_headings("## # Deep\n"), "### Deep\n");
    }

    #[test]
    fn tripled_markers_reach_fixpoint() {
        assert_eq!(collapse_doubled_headings("# # # Title\n"), "### Title\n");
    }

    #[test]
    fn merge_clamps_to_level_six() {
        assert_eq!(collapse_doubled_headings("#### #### T\n"), "###### T\n");
    }

    #[test]
    fn heading_after_text_gets_a_blank_line() {
        assert_eq!(
            fix_block_adjacency("para\n## Next\n"),
            "para\n\n## Next\n"
        );
    }

    #[test]
    fn text_after_heading_gets_a_blank_line() {
        assert_eq!(fix_block_adjacency("## T\nbody\n"), "## T\n\nbody\n");
    }

    #[test]
    fn list_after_paragraph_gets_a_blank_line() {
        assert_eq!(fix_block_adjacency("para\n- item\n"), "para\n\n- item\n");
    }

    #[test]
    fn adjacent_list_items_stay_together() {
        let input = "- a\n- b\n  cont\n- c\n";
        assert_eq!(fix_block_adjacency(input), input);
    }

    #[test]
    fn fenced_code_is_untouched() {
        let input = "```\n# not a heading\n- not a list\n```\n";
        assert_eq!(fix_block_adjacency(input), input);
    }

    #[test]
    fn both_passes_are_idempotent() {
        let input = "# # T\npara\n- x\n## U\n";
        let once = fix_block_adjacency(&collapse_doubled_headings(input));
        assert_eq!(
            fix_block_adjacency(&collapse_doubled_headings(&once)),
            once
        );
    }
}
