//! Folder-backed cache provider.
//!
//! Layout: `<root>/<package set>/<package>/<files>`. Each regular file is one
//! item titled by its file name. Text and JSON files are inlined; images and
//! other files are referenced by a `{"src": "<set>/<package>/<file>"}` pointer
//! that `resolve` turns into a URL, size and checksum on read.

use crate::sources::{CacheProvider, ContentResolver, ResolvedContent, SourceError};
use common::model::package::CachedItem;
use common::model::package_item::ItemDataType;
use log::debug;
use mime_guess::mime;
use rayon::prelude::*;
use serde_json::{json, Value};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Component, Path, PathBuf};

#[derive(Debug, Clone)]
pub struct LocalSource {
    root: PathBuf,
}

impl LocalSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn is_visible(path: &Path) -> bool {
        path.file_name()
            .and_then(|n| n.to_str())
            .map(|n| !n.starts_with('.'))
            .unwrap_or(false)
    }

    /// Visible children of `dir` matching `keep`, sorted by name.
    fn children(dir: &Path, keep: impl Fn(&Path) -> bool) -> Result<Vec<PathBuf>, SourceError> {
        let entries = fs::read_dir(dir).map_err(|e| SourceError::io(dir, e))?;
        let mut paths = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| SourceError::io(dir, e))?.path();
            if Self::is_visible(&path) && keep(&path) {
                paths.push(path);
            }
        }
        paths.sort();
        Ok(paths)
    }

    fn read_item(&self, package_set: &str, package: &str, path: &Path) -> Result<CachedItem, SourceError> {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let mime_type = mime_guess::from_path(path).first_or_octet_stream();

        let (data_type, data) = if mime_type.type_() == mime::TEXT || mime_type.subtype() == mime::JSON {
            let body = fs::read_to_string(path).map_err(|e| SourceError::io(path, e))?;
            (ItemDataType::Text, Value::String(body))
        } else {
            let data_type = if mime_type.type_() == mime::IMAGE {
                ItemDataType::Image
            } else {
                ItemDataType::File
            };
            let src = format!("{}/{}/{}", package_set, package, file_name);
            (data_type, json!({ "src": src }))
        };

        Ok(CachedItem {
            title: file_name,
            data_type,
            data,
            file_name: None,
            mime_type: Some(mime_type.essence_str().to_string()),
            tags: BTreeSet::new(),
            unavailable: false,
        })
    }

    /// Joins a relative pointer onto the root, refusing anything that could
    /// escape it.
    fn pointer_path(&self, src: &str) -> Result<PathBuf, SourceError> {
        let relative = Path::new(src);
        let safe = !src.is_empty()
            && relative
                .components()
                .all(|c| matches!(c, Component::Normal(_)));
        if !safe {
            return Err(SourceError::InvalidPointer(src.to_string()));
        }
        Ok(self.root.join(relative))
    }
}

impl CacheProvider for LocalSource {
    fn list_packages(&self, package_set: &str) -> Result<Vec<String>, SourceError> {
        let dir = self.pointer_path(package_set)?;
        if !dir.is_dir() {
            return Err(SourceError::NotFound(package_set.to_string()));
        }
        let slugs = Self::children(&dir, Path::is_dir)?
            .into_iter()
            .filter_map(|p| p.file_name().map(|n| n.to_string_lossy().to_string()))
            .collect();
        Ok(slugs)
    }

    fn fetch(&self, package_set: &str, package: &str) -> Result<Vec<CachedItem>, SourceError> {
        let dir = self.pointer_path(&format!("{}/{}", package_set, package))?;
        if !dir.is_dir() {
            return Err(SourceError::NotFound(format!("{}/{}", package_set, package)));
        }
        let files = Self::children(&dir, Path::is_file)?;
        debug!("Reading {} files from {}", files.len(), dir.display());

        let mut items = files
            .par_iter()
            .map(|path| self.read_item(package_set, package, path))
            .collect::<Result<Vec<_>, _>>()?;
        items.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(items)
    }
}

impl ContentResolver for LocalSource {
    fn resolve(&self, src: &str) -> Result<ResolvedContent, SourceError> {
        let path = self.pointer_path(src)?;
        let bytes = fs::read(&path).map_err(|e| SourceError::io(&path, e))?;
        let absolute = path.canonicalize().map_err(|e| SourceError::io(&path, e))?;
        Ok(ResolvedContent {
            url: format!("file://{}", absolute.display()),
            size: bytes.len() as u64,
            checksum: format!("{:x}", md5::compute(&bytes)),
        })
    }
}
