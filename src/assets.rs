//! Attachment lookup for image resolution.
//!
//! A Confluence export carries its attachments in directories next to
//! the pages (`attachments/`, `images/`, `download/`). The catalog
//! indexes every file under the export root once so image handlers can
//! resolve a `src` without touching the filesystem per reference.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use jwalk::WalkDir;

/// One image copy the caller must perform: the file found in the
/// export and the path the Markdown references it by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePair {
    pub source: PathBuf,
    pub relative: PathBuf,
}

/// Filename and relative-path index over an export directory.
pub struct AssetCatalog {
    root: PathBuf,
    by_relative: HashMap<String, PathBuf>,
    by_name: HashMap<String, PathBuf>,
}

impl AssetCatalog {
    /// Walk the export root and index every regular file.
    pub fn scan(root: &Path) -> Self {
        let mut by_relative = HashMap::new();
        let mut by_name = HashMap::new();

        for entry in WalkDir::new(root).skip_hidden(false).into_iter().flatten() {
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            if let Ok(rel) = path.strip_prefix(root) {
                by_relative.insert(normalize(&rel.to_string_lossy()), path.clone());
            }
            let name = entry.file_name().to_string_lossy().to_string();
            // First hit wins on duplicate basenames across directories.
            by_name.entry(name).or_insert_with(|| path.clone());
        }

        log::debug!(
            "asset catalog: {} files under {}",
            by_relative.len(),
            root.display()
        );
        Self {
            root: root.to_path_buf(),
            by_relative,
            by_name,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve an image `src` to a copy pair.
    ///
    /// The src is URL-decoded and stripped of any query string, then
    /// matched first by relative path and second by bare filename.
    pub fn resolve(&self, src: &str) -> Option<ImagePair> {
        let src = src.split(['?', '#']).next().unwrap_or(src);
        let decoded = urlencoding::decode(src)
            .map(|c| c.into_owned())
            .unwrap_or_else(|_| src.to_string());
        let rel = normalize(&decoded);
        if rel.is_empty() {
            return None;
        }

        if let Some(source) = self.by_relative.get(&rel) {
            return Some(ImagePair {
                source: source.clone(),
                relative: PathBuf::from(rel),
            });
        }

        let name = rel.rsplit('/').next().unwrap_or(&rel);
        self.by_name.get(name).map(|source| ImagePair {
            source: source.clone(),
            relative: source
                .strip_prefix(&self.root)
                .map(Path::to_path_buf)
                .unwrap_or_else(|_| PathBuf::from(name)),
        })
    }
}

/// Forward slashes, no leading `./`.
fn normalize(path: &str) -> String {
    let path = path.replace('\\', "/");
    path.trim_start_matches("./").trim_start_matches('/').to_string()
}
