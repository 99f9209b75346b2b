//! Confluence HTML export to Markdown conversion.
//!
//! The engine walks a parsed HTML tree exactly once per node, classifies
//! tables into one of four rendering strategies, resolves same-document
//! anchors through a slug registry, and finishes with an ordered pipeline
//! of whole-document cleanup passes.
//!
//! # Example
//!
//! ```rust
//! use confluence2md::{ConvertOptions, PageConverter};
//!
//! let converter = PageConverter::new(ConvertOptions::default());
//! let output = converter.convert_html("<h2>Getting Started</h2>").unwrap();
//! assert!(output.markdown.starts_with("## Getting Started"));
//! ```

pub mod assets;
pub mod cleanup;
pub mod config;
pub mod converter;
pub mod error;

pub use assets::{AssetCatalog, ImagePair};
pub use cleanup::cleanup;
pub use config::ConvertOptions;
pub use converter::{ConversionOutput, PageConverter};
pub use converter::slug::{slugify, SlugRegistry};
pub use converter::table::TableKind;
pub use error::ConvertError;
