use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePackageSetRequest {
    pub slug: String,
    #[serde(default)]
    pub metadata: Option<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdatePackageSetRequest {
    pub metadata: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateIntegrationRequest {
    pub integration_type: String,
    #[serde(default)]
    pub metadata: Option<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePackageRequest {
    pub slug: String,
    #[serde(default)]
    pub metadata: Option<Value>,
    #[serde(default)]
    pub tags: BTreeSet<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePackageRequest {
    #[serde(default)]
    pub metadata: Option<Value>,
    #[serde(default)]
    pub tags: Option<BTreeSet<String>>,
}

/// Body of `POST .../packages/{slug}/snapshot`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateVersionRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub version_description: String,
    /// Titles of the live cache entries to freeze.
    #[serde(default)]
    pub included_items: Vec<String>,
}

/// Only descriptive fields of a version may change after creation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateVersionRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub version_description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentRequest {
    pub body: String,
}

/// `?ordering=` on list endpoints; a leading `-` sorts descending.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    pub ordering: Option<String>,
}

/// `?version=` on the package retrieve endpoint. Kept as raw text so that
/// non-numeric values can be told apart from the `-1` sentinel.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RetrieveQuery {
    pub version: Option<String>,
}
