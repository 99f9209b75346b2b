//! Table delimiter and column-count repair.
//!
//! Concatenated fragments can leave a table without its separator row,
//! with a separator of the wrong width, or with ragged data rows. Each
//! contiguous run of `|` rows is normalized to the width of its first
//! row.

use regex::Regex;
use std::sync::LazyLock;

static SEPARATOR_ROW: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\|(?:\s*:?-+:?\s*\|)+\s*$")
        .expect("SEPARATOR_ROW: hardcoded regex is valid")
});

pub fn repair_tables(input: &str) -> String {
    let lines: Vec<&str> = input.lines().collect();
    let mut out: Vec<String> = Vec::new();
    let mut in_fence = false;
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];
        if line.trim_start().starts_with("```") {
            in_fence = !in_fence;
            out.push(line.to_string());
            i += 1;
            continue;
        }
        if in_fence || !is_table_row(line) {
            out.push(line.to_string());
            i += 1;
            continue;
        }

        let start = i;
        while i < lines.len() && is_table_row(lines[i]) {
            i += 1;
        }
        repair_block(&lines[start..i], &mut out);
    }

    let mut text = out.join("\n");
    if input.ends_with('\n') {
        text.push('\n');
    }
    text
}

fn repair_block(block: &[&str], out: &mut Vec<String>) {
    let header = cells_of(block[0]);
    let width = header.len();
    if width == 0 {
        for line in block {
            out.push((*line).to_string());
        }
        return;
    }

    let mut repaired = false;
    out.push(render_row(&header, width));
    out.push(separator(width));

    for line in &block[1..] {
        if SEPARATOR_ROW.is_match(line.trim()) {
            continue;
        }
        let cells = cells_of(line);
        if cells.len() != width {
            repaired = true;
        }
        out.push(render_row(&cells, width));
    }

    if block.len() < 2 || !SEPARATOR_ROW.is_match(block[1].trim()) {
        repaired = true;
    }
    if repaired {
        tracing::debug!(width, "repaired table block");
    }
}

fn is_table_row(line: &str) -> bool {
    let t = line.trim_start();
    t.starts_with('|') && t.len() > 1
}

/// Cell texts of a row, honoring `\|` escapes.
fn cells_of(line: &str) -> Vec<String> {
    let sentinel = '\u{0}';
    let masked = line.trim().replace("\\|", &sentinel.to_string());
    let inner = masked
        .strip_prefix('|')
        .unwrap_or(&masked)
        .strip_suffix('|')
        .unwrap_or_else(|| masked.strip_prefix('|').unwrap_or(&masked));
    inner
        .split('|')
        .map(|c| c.trim().replace(sentinel, "\\|"))
        .collect()
}

fn render_row(cells: &[String], width: usize) -> String {
    let mut padded: Vec<&str> = cells.iter().map(String::as_str).collect();
    padded.resize(width, "");
    padded.truncate(width);
    format!("| {} |", padded.join(" | "))
}

fn separator(width: usize) -> String {
    let mut sep = String::from("|");
    for _ in 0..width {
        sep.push_str("---|");
    }
    sep
}
