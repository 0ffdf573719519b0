use crate::model::package_item::ItemDataType;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Freshness of a package's live cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PackageState {
    /// Never fetched, or the cache is known to be out of date.
    #[default]
    Stale,
    /// The last fetch succeeded.
    Fresh,
    /// The last fetch or publish failed.
    Error,
}

impl PackageState {
    pub fn as_str(&self) -> &'static str {
        match self {
            PackageState::Stale => "stale",
            PackageState::Fresh => "fresh",
            PackageState::Error => "error",
        }
    }
}

impl fmt::Display for PackageState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PackageState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "stale" => Ok(PackageState::Stale),
            "fresh" => Ok(PackageState::Fresh),
            "error" => Ok(PackageState::Error),
            other => Err(format!("unknown package state '{}'", other)),
        }
    }
}

/// One record of a package's live cache, as produced by the cache provider.
///
/// Only `title` is required; it is the key used when selecting items for a
/// version. Everything else defaults so that `{"title": "headline"}` is a
/// valid entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CachedItem {
    pub title: String,
    #[serde(default)]
    pub data_type: ItemDataType,
    #[serde(default)]
    pub data: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    /// Set on outbound copies whose content pointer could not be resolved.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub unavailable: bool,
}

impl CachedItem {
    /// A plain text entry with the given title and body.
    pub fn text(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            data_type: ItemDataType::Text,
            data: Value::String(body.into()),
            file_name: None,
            mime_type: Some("text/plain".to_string()),
            tags: BTreeSet::new(),
            unavailable: false,
        }
    }

    /// The file name a snapshot copy of this entry is stored under.
    pub fn file_name(&self) -> &str {
        self.file_name.as_deref().unwrap_or(&self.title)
    }
}

/// A versionable bundle of content items under a package set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Package {
    pub id: i64,
    pub slug: String,
    /// Slug of the owning package set.
    pub package_set: String,
    pub metadata: Value,
    pub state: PackageState,
    pub last_fetched_date: Option<DateTime<Utc>>,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub tags: BTreeSet<String>,
    /// `id_num` of the newest version, if any version exists.
    pub latest_version: Option<i64>,
}

/// A package together with its live cache.
///
/// Used by list, create, update and preview responses, which always show the
/// live cache.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PackageWithCache {
    #[serde(flatten)]
    pub package: Package,
    pub cached: Vec<CachedItem>,
}
