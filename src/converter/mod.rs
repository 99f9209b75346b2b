//! The DOM-to-Markdown conversion engine.
//!
//! [`PageConverter`] is the entry point: parse, locate the content
//! root, dispatch the recursive walk, then run the cleanup pipeline
//! over the assembled document.

use std::path::Path;

use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, RcDom};

pub mod slug;
pub mod table;

mod code;
mod context;
mod dispatch;
mod drop_filter;
mod images;
mod links;
mod lists;
mod node_util;
mod panels;

use crate::assets::{AssetCatalog, ImagePair};
use crate::config::ConvertOptions;
use crate::error::{ConvertError, Result};

use context::ConvertContext;
use node_util::{class_contains, find_by_id, find_descendant, is_element};
use slug::SlugRegistry;

/// Result of converting one page.
#[derive(Debug)]
pub struct ConversionOutput {
    pub markdown: String,
    /// `(source, consumer-relative)` copy pairs for images the page
    /// references; copying is the caller's job.
    pub images: Vec<ImagePair>,
    /// Non-fatal diagnostics collected during the walk.
    pub warnings: Vec<String>,
}

/// Converts Confluence export pages to Markdown.
///
/// One converter may be shared across many pages; per-page state lives
/// in a fresh context each call, so conversions are independent and a
/// batch can run one page per thread.
pub struct PageConverter {
    options: ConvertOptions,
    assets: Option<AssetCatalog>,
}

impl PageConverter {
    pub fn new(options: ConvertOptions) -> Self {
        Self {
            options,
            assets: None,
        }
    }

    /// Attach an asset catalog so image references resolve to copy
    /// pairs instead of passing through unchecked.
    pub fn with_assets(options: ConvertOptions, assets: AssetCatalog) -> Self {
        Self {
            options,
            assets: Some(assets),
        }
    }

    /// Convert one page of export HTML to cleaned Markdown.
    pub fn convert_html(&self, html: &str) -> Result<ConversionOutput> {
        let dom = parse_document(RcDom::default(), Default::default()).one(html);
        let document = dom.document;

        let root = find_content_root(&document);
        let mut ctx = ConvertContext::new(
            &self.options,
            SlugRegistry::index_document(&document),
            self.assets.as_ref(),
        );

        let raw = dispatch::convert_node(&root, &mut ctx);
        let markdown = crate::cleanup::cleanup(&raw);

        Ok(ConversionOutput {
            markdown,
            images: ctx.images,
            warnings: ctx.warnings,
        })
    }

    /// Read and convert one export file. Bytes that are not valid UTF-8
    /// are replaced rather than failing the page.
    pub fn convert_file(&self, path: &Path) -> Result<ConversionOutput> {
        let bytes = std::fs::read(path).map_err(|source| ConvertError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let html = String::from_utf8_lossy(&bytes);
        if html.trim().is_empty() {
            return Err(ConvertError::EmptyDocument {
                path: path.to_path_buf(),
            });
        }
        self.convert_html(&html)
    }
}

/// Locate the node the article body hangs from.
///
/// Confluence exports nest the article under a handful of well-known
/// containers; the first match wins, the whole body is the fallback.
fn find_content_root(document: &Handle) -> Handle {
    if let Some(main) = find_by_id(document, "main-content") {
        return main;
    }
    if let Some(wiki) = find_descendant(document, &|n| class_contains(n, "wiki-content")) {
        return wiki;
    }
    if let Some(content) = find_by_id(document, "content") {
        return content;
    }
    if let Some(main) = find_descendant(document, &|n| is_element(n, "main")) {
        return main;
    }
    if let Some(body) = find_descendant(document, &|n| is_element(n, "body")) {
        return body;
    }
    document.clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_root_prefers_main_content_id() {
        let converter = PageConverter::new(ConvertOptions::default());
        let out = converter
            .convert_html(
                r#"<body><div id="header"><p>chrome title</p></div>
                   <div id="main-content"><p>article text</p></div></body>"#,
            )
            .unwrap();
        assert!(out.markdown.contains("article text"));
        assert!(!out.markdown.contains("chrome title"));
    }

    #[test]
    fn falls_back_to_body_without_known_containers() {
        let converter = PageConverter::new(ConvertOptions::default());
        let out = converter.convert_html("<p>loose text</p>").unwrap();
        assert_eq!(out.markdown.trim(), "loose text");
    }

    #[test]
    fn warnings_and_images_start_empty() {
        let converter = PageConverter::new(ConvertOptions::default());
        let out = converter.convert_html("<p>x</p>").unwrap();
        assert!(out.images.is_empty());
        assert!(out.warnings.is_empty());
    }
}
