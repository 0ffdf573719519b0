use serde::{Deserialize, Serialize};

/// Status of a background job, polled through `GET /api/v1/jobs/{id}`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum JobStatus {
    Pending,
    /// Percentage of work done.
    InProgress(u32),
    /// Finished; carries a JSON-encoded result (e.g. a `SyncReport`).
    Completed(String),
    Failed(String),
}

/// Handle returned by endpoints that dispatch work in the background.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct JobHandle {
    pub id: String,
}

/// Outcome of importing all packages of a package set from the source provider.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct SyncReport {
    /// Packages that did not exist before the sync.
    pub created: Vec<String>,
    /// Packages whose cache was fetched successfully.
    pub refreshed: Vec<String>,
    pub failed: Vec<SyncFailure>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SyncFailure {
    pub slug: String,
    pub error: String,
}
