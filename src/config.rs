//! Conversion options.

use serde::{Deserialize, Serialize};

/// Tuning knobs for a [`PageConverter`](crate::PageConverter).
///
/// All fields have conservative defaults; the struct round-trips through
/// serde so a batch run can be driven from a JSON config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertOptions {
    /// Additional id/class substrings to drop on top of the builtin
    /// Confluence chrome denylist.
    pub extra_drop_patterns: Vec<String>,

    /// Text length above which a table cell counts as complex and is
    /// simplified to a placeholder inside Standard tables.
    pub complex_cell_threshold: usize,

    /// Emit `{#slug}` anchor suffixes on headings.
    pub emit_heading_anchors: bool,

    /// Drop images whose source cannot be located in the asset catalog.
    /// When false the image reference is kept and only a warning is
    /// recorded.
    pub drop_missing_images: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            extra_drop_patterns: Vec::new(),
            complex_cell_threshold: 300,
            emit_heading_anchors: true,
            drop_missing_images: true,
        }
    }
}
