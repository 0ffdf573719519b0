//! Retrieval views of a package.
//!
//! A retrieved package shows either its live cache or one historical version,
//! never both. `PackageView` encodes that choice; its serialized form always
//! carries both keys with exactly one of them `null`.

use crate::model::package::{CachedItem, Package};
use crate::model::package_version::PackageVersionWithItems;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

#[derive(Debug, Clone, PartialEq)]
pub enum PackageView {
    /// The current live cache.
    Live(Vec<CachedItem>),
    /// A stored version with its items.
    Historical(PackageVersionWithItems),
}

impl PackageView {
    pub fn cached(&self) -> Option<&[CachedItem]> {
        match self {
            PackageView::Live(items) => Some(items),
            PackageView::Historical(_) => None,
        }
    }

    pub fn version_data(&self) -> Option<&PackageVersionWithItems> {
        match self {
            PackageView::Live(_) => None,
            PackageView::Historical(version) => Some(version),
        }
    }
}

impl Serialize for PackageView {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("cached", &self.cached())?;
        map.serialize_entry("version_data", &self.version_data())?;
        map.end()
    }
}

/// Package representation returned by the retrieve endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct PackageDetail {
    #[serde(flatten)]
    pub package: Package,
    #[serde(flatten)]
    pub view: PackageView,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::package::PackageState;
    use crate::model::package_version::PackageVersion;
    use chrono::Utc;
    use serde_json::json;
    use std::collections::BTreeSet;

    fn package() -> Package {
        let now = Utc::now();
        Package {
            id: 1,
            slug: "story1".to_string(),
            package_set: "news".to_string(),
            metadata: json!({}),
            state: PackageState::Fresh,
            last_fetched_date: Some(now),
            created_by: "editor".to_string(),
            created_at: now,
            updated_at: now,
            tags: BTreeSet::new(),
            latest_version: Some(1),
        }
    }

    #[test]
    fn live_view_nulls_version_data() {
        let detail = PackageDetail {
            package: package(),
            view: PackageView::Live(vec![CachedItem::text("headline", "Hi")]),
        };
        let value = serde_json::to_value(&detail).unwrap();
        assert_eq!(value["slug"], "story1");
        assert_eq!(value["cached"][0]["title"], "headline");
        assert!(value["version_data"].is_null());
    }

    #[test]
    fn historical_view_nulls_cached() {
        let now = Utc::now();
        let version = PackageVersionWithItems {
            version: PackageVersion {
                id: 7,
                id_num: 1,
                title: "v1".to_string(),
                package: 1,
                created_by: "editor".to_string(),
                version_description: "first cut".to_string(),
                created_at: now,
                updated_at: now,
            },
            items: Vec::new(),
        };
        let detail = PackageDetail {
            package: package(),
            view: PackageView::Historical(version),
        };
        let value = serde_json::to_value(&detail).unwrap();
        assert!(value["cached"].is_null());
        assert_eq!(value["version_data"]["id_num"], 1);
        assert_eq!(value["version_data"]["items"], json!([]));
    }
}
