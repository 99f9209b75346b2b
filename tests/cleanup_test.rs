//! Cleanup pipeline behavior over assembled documents, including the
//! idempotence property checked against generated markdown-ish input.

use confluence2md::cleanup;
use proptest::prelude::*;

#[test]
fn passes_compose_in_order() {
    // Doubled heading fixed, spacing inserted, table repaired, entity
    // decoded, blank run collapsed, all in one run.
    let input = "# # Title\nintro &amp; more\n| A | B |\n| 1 |\n\n\n\n\nend\n";
    let out = cleanup(input);
    assert!(out.starts_with("## Title\n"), "got: {out}");
    assert!(out.contains("intro & more"), "got: {out}");
    assert!(out.contains("|---|---|"), "got: {out}");
    assert!(out.contains("| 1 |  |"), "got: {out}");
    assert!(!out.contains("\n\n\n\n"), "got: {out}");
}

#[test]
fn breadcrumbs_promote_once() {
    let input = "1. [Home](index.html)\n2. [Ops Space](ops.html)\n\n## Runbook\n\nsteps\n";
    let once = cleanup(input);
    assert!(once.starts_with("## Navigation\n\n- [Home](index.html)\n"), "got: {once}");
    assert_eq!(cleanup(&once), once);
}

#[test]
fn already_clean_document_is_untouched() {
    let input = "## Deploy {#deploy}\n\nRun the pipeline.\n\n- step one\n- step two\n\n| K | V |\n|---|---|\n| a | b |\n";
    assert_eq!(cleanup(input), input);
}

fn block() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z][a-z ]{0,18}[a-z]".prop_map(|t| format!("## {t}")),
        "[a-z][a-z ]{0,28}[a-z]",
        "[a-z][a-z ]{0,8}[a-z]".prop_map(|t| format!("- {t}\n- second item")),
        Just("| A | B |\n|---|---|\n| 1 | 2 |".to_string()),
        Just("| H | I |\n| ragged |".to_string()),
        Just("salt &amp; pepper &lt;tag&gt; &#65;".to_string()),
        Just("```\n# not a heading\n\n\n\nstill code\n```".to_string()),
        Just("1. [crumb one](a.html)\n2. [crumb two](b.html)".to_string()),
        Just("# # doubled".to_string()),
    ]
}

proptest! {
    #[test]
    fn cleanup_is_idempotent(
        blocks in prop::collection::vec(block(), 1..8),
        gaps in prop::collection::vec(1usize..5, 0..8),
    ) {
        let mut doc = String::new();
        for (i, block) in blocks.iter().enumerate() {
            if i > 0 {
                let gap = gaps.get(i - 1).copied().unwrap_or(1);
                doc.push_str(&"\n".repeat(gap));
            }
            doc.push_str(block);
        }
        doc.push('\n');

        let once = cleanup(&doc);
        let twice = cleanup(&once);
        prop_assert_eq!(&twice, &once, "input was: {:?}", doc);
    }

    #[test]
    fn cleanup_never_loses_word_content(words in prop::collection::vec("[a-z]{3,10}", 1..6)) {
        let doc = words.join("\n\n");
        let out = cleanup(&doc);
        for word in &words {
            prop_assert!(out.contains(word.as_str()));
        }
    }
}
