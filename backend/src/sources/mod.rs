//! External collaborators the versioning engine calls into.
//!
//! - `CacheProvider`: lists and fetches the live content of packages
//!   (the Drive sync transport, or the local folder stand-in).
//! - `ContentResolver`: resolves item content pointers on refresh.
//! - `PublishSink`: receives a package's latest version on publish.
//!
//! All three are blocking; async callers run them on the blocking pool.

pub mod local;
#[cfg(test)]
pub mod memory;
pub mod publish;

use common::model::package::{CachedItem, Package};
use common::model::package_version::PackageVersionWithItems;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("source not found: {0}")]
    NotFound(String),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid content pointer '{0}'")]
    InvalidPointer(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{0}")]
    Rejected(String),
}

impl SourceError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub trait CacheProvider: Send + Sync {
    /// Slugs of the packages the source knows for a package set.
    fn list_packages(&self, package_set: &str) -> Result<Vec<String>, SourceError>;

    /// The current items of one package, in a stable order.
    fn fetch(&self, package_set: &str, package: &str) -> Result<Vec<CachedItem>, SourceError>;
}

/// Volatile facts about a piece of pointed-to content.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedContent {
    pub url: String,
    pub size: u64,
    /// Hex md5 of the content bytes.
    pub checksum: String,
}

pub trait ContentResolver: Send + Sync {
    fn resolve(&self, src: &str) -> Result<ResolvedContent, SourceError>;
}

pub trait PublishSink: Send + Sync {
    fn publish(
        &self,
        package: &Package,
        version: &PackageVersionWithItems,
    ) -> Result<(), SourceError>;
}
