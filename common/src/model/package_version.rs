use crate::model::package_item::PackageItem;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An immutable, numbered snapshot of selected cache items.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PackageVersion {
    pub id: i64,
    /// Version number, unique per package and starting at 1.
    pub id_num: i64,
    pub title: String,
    /// Id of the owning package.
    pub package: i64,
    pub created_by: String,
    pub version_description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A version together with its frozen items.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PackageVersionWithItems {
    #[serde(flatten)]
    pub version: PackageVersion,
    pub items: Vec<PackageItem>,
}
