use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An external integration (e.g. Drive sync credentials) owned by a package set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Integration {
    pub id: i64,
    pub package_set: String,
    pub integration_type: String,
    pub metadata: Value,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}
