//! In-memory collaborators for tests.

use crate::sources::{
    CacheProvider, ContentResolver, PublishSink, ResolvedContent, SourceError,
};
use common::model::package::{CachedItem, Package};
use common::model::package_version::PackageVersionWithItems;
use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;

#[derive(Default)]
pub struct MemorySource {
    packages: Mutex<BTreeMap<(String, String), Vec<CachedItem>>>,
    content: Mutex<HashMap<String, Vec<u8>>>,
    published: Mutex<Vec<(String, i64)>>,
    reject_publish: Mutex<bool>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_items(&self, package_set: &str, package: &str, items: Vec<CachedItem>) {
        self.packages
            .lock()
            .unwrap()
            .insert((package_set.to_string(), package.to_string()), items);
    }

    pub fn remove(&self, package_set: &str, package: &str) {
        self.packages
            .lock()
            .unwrap()
            .remove(&(package_set.to_string(), package.to_string()));
    }

    pub fn set_content(&self, src: &str, bytes: &[u8]) {
        self.content
            .lock()
            .unwrap()
            .insert(src.to_string(), bytes.to_vec());
    }

    pub fn reject_publish(&self, reject: bool) {
        *self.reject_publish.lock().unwrap() = reject;
    }

    /// `(package slug, id_num)` of every publish, in order.
    pub fn published(&self) -> Vec<(String, i64)> {
        self.published.lock().unwrap().clone()
    }
}

impl CacheProvider for MemorySource {
    fn list_packages(&self, package_set: &str) -> Result<Vec<String>, SourceError> {
        let packages = self.packages.lock().unwrap();
        let slugs: Vec<String> = packages
            .keys()
            .filter(|(set, _)| set == package_set)
            .map(|(_, slug)| slug.clone())
            .collect();
        if slugs.is_empty() {
            return Err(SourceError::NotFound(package_set.to_string()));
        }
        Ok(slugs)
    }

    fn fetch(&self, package_set: &str, package: &str) -> Result<Vec<CachedItem>, SourceError> {
        self.packages
            .lock()
            .unwrap()
            .get(&(package_set.to_string(), package.to_string()))
            .cloned()
            .ok_or_else(|| SourceError::NotFound(format!("{}/{}", package_set, package)))
    }
}

impl ContentResolver for MemorySource {
    fn resolve(&self, src: &str) -> Result<ResolvedContent, SourceError> {
        let content = self.content.lock().unwrap();
        let bytes = content
            .get(src)
            .ok_or_else(|| SourceError::NotFound(src.to_string()))?;
        Ok(ResolvedContent {
            url: format!("memory://{}", src),
            size: bytes.len() as u64,
            checksum: format!("{:x}", md5::compute(bytes)),
        })
    }
}

impl PublishSink for MemorySource {
    fn publish(
        &self,
        package: &Package,
        version: &PackageVersionWithItems,
    ) -> Result<(), SourceError> {
        if *self.reject_publish.lock().unwrap() {
            return Err(SourceError::Rejected("sink offline".to_string()));
        }
        self.published
            .lock()
            .unwrap()
            .push((package.slug.clone(), version.version.id_num));
        Ok(())
    }
}
