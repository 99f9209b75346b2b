//! Blank line normalization.

/// Collapse runs of 3 or more blank lines to 2, trim leading blank
/// lines, and end the document with exactly one newline. Blank lines
/// inside fenced code are preserved.
pub fn collapse_blank_lines(input: &str) -> String {
    let mut out: Vec<&str> = Vec::new();
    let mut in_fence = false;
    let mut blanks = 0usize;

    for line in input.lines() {
        if line.trim_start().starts_with("```") {
            in_fence = !in_fence;
            blanks = 0;
            out.push(line);
            continue;
        }
        if !in_fence && line.trim().is_empty() {
            blanks += 1;
            if blanks > 2 || out.is_empty() {
                continue;
            }
            out.push("");
        } else {
            blanks = 0;
            out.push(line);
        }
    }

    while out.last().is_some_and(|l| l.trim().is_empty()) {
        out.pop();
    }

    if out.is_empty() {
        return String::new();
    }
    let mut text = out.join("\n");
    text.push('\n');
    text
}
