//! Heading slug derivation and same-document anchor resolution.
//!
//! The registry never writes generated ids back onto the parsed tree;
//! node identity maps to its assigned slug out of band, which keeps the
//! input immutable while still giving every heading a stable anchor.

use markup5ever_rcdom::Handle;
use std::collections::HashMap;

use super::node_util::{
    ancestor_haystack_contains, attr, is_heading_tag, node_id, tag_name, text_content,
};

/// Derive an anchor-safe slug from heading text.
///
/// Lower-cases, folds common Latin diacritics to their base letter,
/// collapses every other non-alphanumeric run to a single hyphen, and
/// trims edge hyphens.
///
/// ```
/// use confluence2md::slugify;
///
/// assert_eq!(slugify("Getting Started"), "getting-started");
/// assert_eq!(slugify("Résumé & CV"), "resume-cv");
/// assert_eq!(slugify("  --  "), "");
/// ```
pub fn slugify(text: &str) -> String {
    text.chars()
        .map(|c| {
            let c = fold_diacritic(c);
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// Map common accented Latin characters to their unaccented base.
/// Anything unrecognized passes through and falls to the hyphen rule.
fn fold_diacritic(c: char) -> char {
    match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'À' | 'Á' | 'Â' | 'Ã' | 'Ä' | 'Å' => 'a',
        'è' | 'é' | 'ê' | 'ë' | 'È' | 'É' | 'Ê' | 'Ë' => 'e',
        'ì' | 'í' | 'î' | 'ï' | 'Ì' | 'Í' | 'Î' | 'Ï' => 'i',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'Ò' | 'Ó' | 'Ô' | 'Õ' | 'Ö' => 'o',
        'ù' | 'ú' | 'û' | 'ü' | 'Ù' | 'Ú' | 'Û' | 'Ü' => 'u',
        'ý' | 'ÿ' | 'Ý' => 'y',
        'ñ' | 'Ñ' => 'n',
        'ç' | 'Ç' => 'c',
        'ß' => 's',
        other => other,
    }
}

/// Per-document registry of heading anchors and the id index used to
/// resolve fragment links.
///
/// Entries are created on first resolve and never changed afterwards, so
/// resolving the same heading twice always returns the same slug. Two
/// distinct headings that normalize to the same slug are de-duplicated
/// with `-2`, `-3`, ... suffixes; the first encounter keeps the bare slug.
pub struct SlugRegistry {
    by_node: HashMap<usize, String>,
    taken: HashMap<String, usize>,
    ids: HashMap<String, Handle>,
}

impl SlugRegistry {
    /// Build the id index with a single walk over the document.
    pub fn index_document(root: &Handle) -> Self {
        let mut ids = HashMap::new();
        index_ids(root, &mut ids);
        Self {
            by_node: HashMap::new(),
            taken: HashMap::new(),
            ids,
        }
    }

    /// Anchor slug for a heading node.
    ///
    /// Derived from the heading text so that fragment links resolved
    /// through [`resolve_link`](Self::resolve_link) land on the emitted
    /// anchor even when the export gave the heading a synthetic id. An
    /// explicit id is only used when the text yields nothing. The result
    /// is de-duplicated and memoized per node.
    pub fn resolve(&mut self, heading: &Handle) -> String {
        let key = node_id(heading);
        if let Some(existing) = self.by_node.get(&key) {
            return existing.clone();
        }

        let derived = slugify(&text_content(heading));
        let base = if !derived.is_empty() {
            derived
        } else {
            match attr(heading, "id") {
                Some(id) if !id.trim().is_empty() => id.trim().to_string(),
                _ => "section".to_string(),
            }
        };

        let slug = self.claim(base);
        self.by_node.insert(key, slug.clone());
        slug
    }

    fn claim(&mut self, base: String) -> String {
        match self.taken.get_mut(&base) {
            None => {
                self.taken.insert(base.clone(), 1);
                base
            }
            Some(count) => {
                *count += 1;
                let suffixed = format!("{}-{}", base, count);
                // The suffixed form is claimed too, so a literal
                // "foo-2" heading seen later cannot collide with it.
                self.taken.insert(suffixed.clone(), 1);
                suffixed
            }
        }
    }

    /// Rewrite a same-document fragment href through the registry.
    ///
    /// Fragment links whose target is a heading (or an anchor inside a
    /// table-of-contents container) point at the heading's slug, which is
    /// not necessarily the literal id. Anything else passes through
    /// unchanged, including fragments with no resolvable target.
    pub fn resolve_link(&mut self, href: &str) -> String {
        let Some(fragment) = href.strip_prefix('#') else {
            return href.to_string();
        };
        let decoded = urlencoding::decode(fragment)
            .map(|c| c.into_owned())
            .unwrap_or_else(|_| fragment.to_string());

        let Some(target) = self.ids.get(&decoded).cloned() else {
            tracing::debug!(fragment = %decoded, "fragment link target not found, passing through");
            return href.to_string();
        };

        if tag_name(&target).is_some_and(is_heading_tag) {
            return format!("#{}", self.resolve(&target));
        }

        // Anchors generated inside a TOC macro target the heading text,
        // so derive the slug the same way the heading itself would.
        if ancestor_haystack_contains(&target, "toc") {
            let derived = slugify(&text_content(&target));
            if !derived.is_empty() {
                return format!("#{}", derived);
            }
        }

        href.to_string()
    }
}

fn index_ids(node: &Handle, ids: &mut HashMap<String, Handle>) {
    if let Some(id) = attr(node, "id")
        && !id.is_empty()
    {
        // First occurrence wins, matching browser getElementById.
        ids.entry(id).or_insert_with(|| node.clone());
    }
    for child in node.children.borrow().iter() {
        index_ids(child, ids);
    }
}
