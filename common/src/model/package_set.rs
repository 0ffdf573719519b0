use crate::model::integration::Integration;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A named namespace grouping related packages and their integrations.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PackageSet {
    pub id: i64,
    /// Human-assigned, globally unique identifier used in URLs.
    pub slug: String,
    /// Free-form key/value metadata.
    pub metadata: Value,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Package set representation returned by the detail endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageSetDetail {
    #[serde(flatten)]
    pub package_set: PackageSet,
    pub integrations: Vec<Integration>,
}
