//! Residual HTML entity decoding.
//!
//! The parser resolves most entities, but text assembled from raw
//! fragments can still carry escaped ones. `&amp;` is only decoded when
//! the result would not itself read as an entity, which keeps the pass
//! idempotent: a doubly-escaped `&amp;lt;` is left alone instead of
//! decaying one level per run.

use regex::Regex;
use std::sync::LazyLock;

static NUMERIC_ENTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&#(x[0-9a-fA-F]{1,6}|[0-9]{1,7});")
        .expect("NUMERIC_ENTITY: hardcoded regex is valid")
});

static GUARDED_AMP: LazyLock<fancy_regex::Regex> = LazyLock::new(|| {
    fancy_regex::Regex::new(
        r"&amp;(?!(?:[a-zA-Z][a-zA-Z0-9]{1,31}|#[0-9]{1,7}|#[xX][0-9a-fA-F]{1,6});)",
    )
    .expect("GUARDED_AMP: hardcoded regex is valid")
});

/// Code points never decoded: `&` would re-form entities and `|` would
/// break table cells.
const KEEP_ESCAPED: &[u32] = &[38, 124];

pub fn decode_entities(input: &str) -> String {
    let text = input
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&ndash;", "-")
        .replace("&mdash;", "-")
        .replace("&hellip;", "...");

    let text = NUMERIC_ENTITY.replace_all(&text, |caps: &regex::Captures<'_>| {
        let body = &caps[1];
        let code = if let Some(hex) = body.strip_prefix('x') {
            u32::from_str_radix(hex, 16).ok()
        } else {
            body.parse::<u32>().ok()
        };
        match code {
            Some(n) if !KEEP_ESCAPED.contains(&n) => char::from_u32(n)
                .map(String::from)
                .unwrap_or_else(|| caps[0].to_string()),
            _ => caps[0].to_string(),
        }
    });

    GUARDED_AMP.replace_all(&text, "&").into_owned()
}
