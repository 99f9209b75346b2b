//! Per-document conversion state threaded through the recursive walk.

use markup5ever_rcdom::Handle;
use std::collections::HashSet;

use crate::assets::{AssetCatalog, ImagePair};
use crate::config::ConvertOptions;

use super::node_util::node_id;
use super::slug::SlugRegistry;

/// Mutable state for one document's conversion.
///
/// Holds the Processed Set, the slug registry, and the collectors for
/// image copy pairs and non-fatal warnings. Created fresh per document
/// and never shared across documents, so the whole conversion needs no
/// locking.
pub struct ConvertContext<'a> {
    pub(crate) options: &'a ConvertOptions,
    pub(crate) assets: Option<&'a AssetCatalog>,
    pub(crate) slugs: SlugRegistry,
    /// Ancestor tag trail for diagnostics.
    pub(crate) trail: Vec<String>,
    pub(crate) images: Vec<ImagePair>,
    pub(crate) warnings: Vec<String>,
    processed: HashSet<usize>,
}

impl<'a> ConvertContext<'a> {
    pub fn new(
        options: &'a ConvertOptions,
        slugs: SlugRegistry,
        assets: Option<&'a AssetCatalog>,
    ) -> Self {
        Self {
            options,
            assets,
            slugs,
            trail: Vec::new(),
            images: Vec::new(),
            warnings: Vec::new(),
            processed: HashSet::new(),
        }
    }

    /// Mark a node as processed. Returns false if it already was, in
    /// which case the caller must contribute nothing for it.
    ///
    /// Nodes are marked *before* their handler runs so a node reachable
    /// through two paths, or re-entering itself, short-circuits to an
    /// empty fragment.
    pub(crate) fn mark_processed(&mut self, node: &Handle) -> bool {
        self.processed.insert(node_id(node))
    }

    /// Mark an entire subtree processed, for handlers that consume their
    /// content as raw or plain text instead of re-walking it.
    pub(crate) fn mark_subtree_processed(&mut self, node: &Handle) {
        self.processed.insert(node_id(node));
        for child in node.children.borrow().iter() {
            self.mark_subtree_processed(child);
        }
    }

    pub(crate) fn warn(&mut self, message: String) {
        tracing::warn!(trail = %self.trail.join(">"), "{message}");
        self.warnings.push(message);
    }
}
